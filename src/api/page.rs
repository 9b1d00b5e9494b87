use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::EnergyMix;
use crate::error::{PageError, PageResult};
use crate::host::{Document, ElementId, Scheduler, TimerId};
use crate::interaction::HoverState;
use crate::render::Renderer;

use super::{
    CalculatorOutcome, CarouselController, CarouselEvent, ChartKind, EnergyChart,
    NavigationHandler, PageConfig, SolarCalculator,
};

/// Host events routed to the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PageEvent {
    Click { target: ElementId },
    Submit { form: ElementId },
    TouchStart { target: ElementId, x: f64 },
    TouchMove { target: ElementId, x: f64 },
    TouchEnd { target: ElementId },
    PointerEnter { target: ElementId },
    PointerLeave { target: ElementId },
    TimerFired { timer: TimerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Navigation,
    Carousel,
    Calculator,
}

/// What one dispatched event did.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Widget that consumed the event, if any.
    pub widget: Option<WidgetKind>,
    /// Whether the host must suppress the browser default action.
    pub default_prevented: bool,
    pub slide_changed: bool,
    pub scrolled_to: Option<ElementId>,
    pub calculator: Option<CalculatorOutcome>,
    /// Fault the consuming widget reported while handling the event.
    pub error: Option<String>,
}

impl EventOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn by(widget: WidgetKind) -> Self {
        Self {
            widget: Some(widget),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub kind: ChartKind,
    pub label: String,
    pub categories: Vec<(String, f64)>,
    pub wedge_count: usize,
}

/// Observable widget state for tools and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub nav_link_count: usize,
    pub current_slide: usize,
    pub slide_count: usize,
    pub carousel_transform: String,
    pub auto_advance_timer: Option<TimerId>,
    pub hover: HoverState,
    pub chart: ChartSnapshot,
}

/// All page widgets, attached in dependency order.
#[derive(Debug)]
pub struct SolarPage<R: Renderer> {
    config: PageConfig,
    navigation: NavigationHandler,
    carousel: CarouselController,
    chart: EnergyChart<R>,
    calculator: SolarCalculator,
}

impl<R: Renderer> SolarPage<R> {
    /// Attaches every widget with the shipped energy-mix dataset.
    pub fn attach<D, S>(
        document: &mut D,
        scheduler: &mut S,
        renderer: R,
        config: PageConfig,
    ) -> PageResult<Self>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        Self::attach_with_dataset(document, scheduler, renderer, EnergyMix::global_2025(), config)
    }

    /// Attaches navigation, carousel, chart and calculator, in that order.
    ///
    /// Any setup fault aborts the whole page; a carousel that was already
    /// attached is detached again so no timer outlives the failure.
    pub fn attach_with_dataset<D, S>(
        document: &mut D,
        scheduler: &mut S,
        renderer: R,
        dataset: EnergyMix,
        config: PageConfig,
    ) -> PageResult<Self>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        config.validate()?;
        let selectors = &config.selectors;

        let navigation = NavigationHandler::attach(&*document, &selectors.nav_link);
        let carousel = CarouselController::attach(document, scheduler, selectors, config.carousel)?;

        let rest = EnergyChart::attach(
            &*document,
            &selectors.chart_canvas,
            renderer,
            dataset,
            config.chart.clone(),
        )
        .and_then(|chart| {
            SolarCalculator::attach(&*document, selectors, config.calculator.clone())
                .map(|calculator| (chart, calculator))
        });
        let (chart, calculator) = match rest {
            Ok(widgets) => widgets,
            Err(err) => {
                carousel.detach(scheduler);
                return Err(err);
            }
        };

        debug!("solar page attached");
        Ok(Self {
            config,
            navigation,
            carousel,
            chart,
            calculator,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationHandler {
        &self.navigation
    }

    #[must_use]
    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut CarouselController {
        &mut self.carousel
    }

    #[must_use]
    pub fn chart(&self) -> &EnergyChart<R> {
        &self.chart
    }

    #[must_use]
    pub fn calculator(&self) -> &SolarCalculator {
        &self.calculator
    }

    /// Routes one host event to the widget owning its target.
    ///
    /// Clicks on navigation links always prevent the default jump. When the
    /// link target does not resolve, nothing scrolls and the outcome carries
    /// the fault in `error`.
    pub fn dispatch<D, S>(
        &mut self,
        document: &mut D,
        scheduler: &mut S,
        event: PageEvent,
    ) -> PageResult<EventOutcome>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        trace!(?event, "dispatch");
        let outcome = match event {
            PageEvent::Click { target } if self.navigation.owns(target) => {
                let (scrolled_to, error) = match self.navigation.on_click(document, target) {
                    Ok(section) => (Some(section), None),
                    Err(err) => (None, Some(err.to_string())),
                };
                EventOutcome {
                    default_prevented: true,
                    scrolled_to,
                    error,
                    ..EventOutcome::by(WidgetKind::Navigation)
                }
            }
            PageEvent::Click { target } if target == self.carousel.prev_button() => {
                self.carousel_event(document, scheduler, CarouselEvent::PrevClicked)
            }
            PageEvent::Click { target } if target == self.carousel.next_button() => {
                self.carousel_event(document, scheduler, CarouselEvent::NextClicked)
            }
            PageEvent::Submit { form } if form == self.calculator.form() => {
                let result = self.calculator.on_submit(document);
                EventOutcome {
                    default_prevented: true,
                    calculator: Some(result),
                    ..EventOutcome::by(WidgetKind::Calculator)
                }
            }
            PageEvent::TouchStart { target, x } if target == self.carousel.container() => {
                self.carousel_event(document, scheduler, CarouselEvent::TouchStart { x })
            }
            PageEvent::TouchMove { target, x } if target == self.carousel.container() => {
                self.carousel_event(document, scheduler, CarouselEvent::TouchMove { x })
            }
            PageEvent::TouchEnd { target } if target == self.carousel.container() => {
                self.carousel_event(document, scheduler, CarouselEvent::TouchEnd)
            }
            PageEvent::PointerEnter { target } if target == self.carousel.container() => {
                self.carousel_event(document, scheduler, CarouselEvent::PointerEnter)
            }
            PageEvent::PointerLeave { target } if target == self.carousel.container() => {
                self.carousel_event(document, scheduler, CarouselEvent::PointerLeave)
            }
            PageEvent::TimerFired { timer } => {
                self.carousel_event(document, scheduler, CarouselEvent::TimerFired(timer))
            }
            _ => EventOutcome::ignored(),
        };
        Ok(outcome)
    }

    fn carousel_event<D, S>(
        &mut self,
        document: &mut D,
        scheduler: &mut S,
        event: CarouselEvent,
    ) -> EventOutcome
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        let slide_changed = self.carousel.handle_event(document, scheduler, event);
        EventOutcome {
            slide_changed,
            ..EventOutcome::by(WidgetKind::Carousel)
        }
    }

    pub fn snapshot(&self) -> PageResult<PageSnapshot> {
        let dataset = self.chart.dataset();
        let categories = dataset
            .iter()
            .map(|(category, share)| {
                crate::core::decimal_to_f64(share.value, category)
                    .map(|value| (category.to_owned(), value))
            })
            .collect::<PageResult<Vec<_>>>()?;

        Ok(PageSnapshot {
            nav_link_count: self.navigation.links().len(),
            current_slide: self.carousel.current_index(),
            slide_count: self.carousel.slide_count(),
            carousel_transform: self.carousel.transform_value(),
            auto_advance_timer: self.carousel.auto_advance_timer(),
            hover: self.carousel.hover_state(),
            chart: ChartSnapshot {
                kind: self.chart.kind(),
                label: dataset.label().to_owned(),
                categories,
                wedge_count: self.chart.frame().wedges.len(),
            },
        })
    }

    /// Stops the carousel timer and hands the renderer back.
    pub fn detach<S: Scheduler + ?Sized>(self, scheduler: &mut S) -> R {
        self.carousel.detach(scheduler);
        debug!("solar page detached");
        self.chart.into_renderer()
    }
}

impl PageSnapshot {
    pub fn to_json_pretty(&self) -> PageResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PageError::InvalidData(format!("failed to serialize page snapshot: {e}")))
    }
}
