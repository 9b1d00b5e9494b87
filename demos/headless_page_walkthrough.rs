use std::time::Duration;

use solar_page::api::{PageConfig, PageEvent, SolarPage};
use solar_page::host::{ManualScheduler, MemoryDocument};
use solar_page::render::NullRenderer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = solar_page::telemetry::init_default_tracing();

    let mut document = MemoryDocument::landing_page();
    let mut scheduler = ManualScheduler::new();
    let mut page = SolarPage::attach(
        &mut document,
        &mut scheduler,
        NullRenderer::default(),
        PageConfig::default(),
    )?;

    let about = page.navigation().links()[1];
    let outcome = page.dispatch(&mut document, &mut scheduler, PageEvent::Click { target: about })?;
    println!(
        "nav click: prevented={} scroll_top={}",
        outcome.default_prevented,
        document.scroll_top()
    );

    let deadline = scheduler.now() + Duration::from_secs(13);
    while let Some(timer) = scheduler.pop_due(deadline) {
        page.dispatch(&mut document, &mut scheduler, PageEvent::TimerFired { timer })?;
    }
    println!(
        "after 13s: slide={} transform={}",
        page.carousel().current_index(),
        page.carousel().transform_value()
    );

    for (selector, value) in [
        ("#energyUsage", "450"),
        ("#sunlightHours", "4.5"),
        ("#panelWattage", "400"),
    ] {
        if let Some(field) = document.find(selector) {
            document.set_value(field, value);
        }
    }
    let form = page.calculator().form();
    let outcome = page.dispatch(&mut document, &mut scheduler, PageEvent::Submit { form })?;
    if let Some(result) = outcome.calculator {
        println!("calculator: {}", result.message());
    }

    println!("{}", page.snapshot()?.to_json_pretty()?);

    let renderer = page.detach(&mut scheduler);
    assert_eq!(renderer.render_count, 1);
    assert_eq!(scheduler.active_count(), 0);
    Ok(())
}
