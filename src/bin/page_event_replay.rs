use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solar_page::api::{EventOutcome, PageConfig, PageEvent, PageSnapshot, SolarPage};
use solar_page::core::Selector;
use solar_page::host::{Document, ManualScheduler, MemoryDocument};
use solar_page::render::NullRenderer;

const USAGE: &str = "usage: page_event_replay --input <script.json> [--output <path>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReplayScript {
    #[serde(default)]
    config: Option<serde_json::Value>,
    steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
enum ReplayStep {
    Click {
        selector: String,
        #[serde(default)]
        index: usize,
    },
    SetField {
        selector: String,
        value: String,
    },
    Submit,
    Swipe {
        from_x: f64,
        to_x: f64,
    },
    PointerEnter,
    PointerLeave,
    Wait {
        ms: u64,
    },
}

#[derive(Debug, Serialize)]
struct StepReport {
    step: ReplayStep,
    outcomes: Vec<EventOutcome>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    steps: Vec<StepReport>,
    result_text: String,
    scroll_top: f64,
    elapsed_ms: u64,
    snapshot: PageSnapshot,
}

struct Session {
    document: MemoryDocument,
    scheduler: ManualScheduler,
    page: SolarPage<NullRenderer>,
}

impl Session {
    fn element(&self, selector: &str, index: usize) -> Result<solar_page::host::ElementId, String> {
        let selector = Selector::parse(selector).map_err(|err| err.to_string())?;
        self.document
            .query_all(&selector)
            .get(index)
            .copied()
            .ok_or_else(|| format!("no element `{selector}` at index {index}"))
    }

    fn dispatch(&mut self, event: PageEvent) -> Result<EventOutcome, String> {
        self.page
            .dispatch(&mut self.document, &mut self.scheduler, event)
            .map_err(|err| err.to_string())
    }

    fn run_step(&mut self, step: &ReplayStep) -> Result<Vec<EventOutcome>, String> {
        let container = self.page.carousel().container();
        match step {
            ReplayStep::Click { selector, index } => {
                let target = self.element(selector, *index)?;
                Ok(vec![self.dispatch(PageEvent::Click { target })?])
            }
            ReplayStep::SetField { selector, value } => {
                let field = self.element(selector, 0)?;
                self.document.set_value(field, value.clone());
                Ok(Vec::new())
            }
            ReplayStep::Submit => {
                let form = self.page.calculator().form();
                Ok(vec![self.dispatch(PageEvent::Submit { form })?])
            }
            ReplayStep::Swipe { from_x, to_x } => Ok(vec![
                self.dispatch(PageEvent::TouchStart {
                    target: container,
                    x: *from_x,
                })?,
                self.dispatch(PageEvent::TouchMove {
                    target: container,
                    x: *to_x,
                })?,
                self.dispatch(PageEvent::TouchEnd { target: container })?,
            ]),
            ReplayStep::PointerEnter => Ok(vec![
                self.dispatch(PageEvent::PointerEnter { target: container })?,
            ]),
            ReplayStep::PointerLeave => Ok(vec![
                self.dispatch(PageEvent::PointerLeave { target: container })?,
            ]),
            ReplayStep::Wait { ms } => {
                let deadline = self.scheduler.now() + Duration::from_millis(*ms);
                let mut outcomes = Vec::new();
                while let Some(timer) = self.scheduler.pop_due(deadline) {
                    outcomes.push(self.dispatch(PageEvent::TimerFired { timer })?);
                }
                Ok(outcomes)
            }
        }
    }
}

fn main() {
    let _ = solar_page::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let script: ReplayScript =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let config = match &script.config {
        Some(value) => PageConfig::from_json_compat_str(&value.to_string())
            .map_err(|err| err.to_string())?,
        None => PageConfig::default(),
    };

    let mut document = MemoryDocument::landing_page();
    let mut scheduler = ManualScheduler::new();
    let page = SolarPage::attach(&mut document, &mut scheduler, NullRenderer::default(), config)
        .map_err(|err| format!("page setup failed: {err}"))?;
    let mut session = Session {
        document,
        scheduler,
        page,
    };

    let mut steps = Vec::with_capacity(script.steps.len());
    for step in script.steps {
        let (outcomes, error) = match session.run_step(&step) {
            Ok(outcomes) => (outcomes, None),
            Err(err) => (Vec::new(), Some(err)),
        };
        steps.push(StepReport {
            step,
            outcomes,
            error,
        });
    }

    let result = session.page.calculator().result_element();
    let report = ReplayReport {
        steps,
        result_text: session
            .document
            .text_content(result)
            .unwrap_or_default()
            .to_owned(),
        scroll_top: session.document.scroll_top(),
        elapsed_ms: u64::try_from(session.scheduler.now().as_millis()).unwrap_or(u64::MAX),
        snapshot: session.page.snapshot().map_err(|err| err.to_string())?,
    };

    let payload = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    match args.output {
        Some(path) => fs::write(&path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output,
    })
}
