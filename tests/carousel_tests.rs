use std::time::Duration;

use solar_page::api::{CarouselConfig, CarouselController, CarouselEvent, PageSelectors};
use solar_page::host::{ManualScheduler, MemoryDocument, MemoryElement};

const INTERVAL: Duration = Duration::from_millis(6_000);

fn attach() -> (MemoryDocument, ManualScheduler, CarouselController) {
    let mut document = MemoryDocument::landing_page();
    let mut scheduler = ManualScheduler::new();
    let carousel = CarouselController::attach(
        &mut document,
        &mut scheduler,
        &PageSelectors::default(),
        CarouselConfig::default(),
    )
    .expect("carousel attach");
    (document, scheduler, carousel)
}

fn run_timers(
    document: &mut MemoryDocument,
    scheduler: &mut ManualScheduler,
    carousel: &mut CarouselController,
    elapsed: Duration,
) -> usize {
    let deadline = scheduler.now() + elapsed;
    let mut advanced = 0;
    while let Some(timer) = scheduler.pop_due(deadline) {
        if carousel.on_timer_fired(document, timer) {
            advanced += 1;
        }
    }
    advanced
}

fn transform(document: &MemoryDocument, carousel: &CarouselController) -> String {
    document
        .style(carousel.container(), "transform")
        .expect("transform written")
        .to_owned()
}

#[test]
fn attach_shows_first_slide_and_starts_one_timer() {
    let (document, scheduler, carousel) = attach();
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.slide_count(), 3);
    assert_eq!(transform(&document, &carousel), "translateX(-0%)");
    assert!(carousel.is_auto_advancing());
    assert_eq!(scheduler.active_count(), 1);
}

#[test]
fn buttons_wrap_in_both_directions() {
    let (mut document, mut scheduler, mut carousel) = attach();

    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::PrevClicked);
    assert_eq!(carousel.current_index(), 2);
    assert_eq!(transform(&document, &carousel), "translateX(-200%)");

    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::NextClicked);
    assert_eq!(carousel.current_index(), 0);

    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::NextClicked);
    assert_eq!(carousel.current_index(), 1);
    assert_eq!(transform(&document, &carousel), "translateX(-100%)");
}

#[test]
fn show_slide_is_idempotent() {
    let (mut document, _scheduler, mut carousel) = attach();
    carousel.show_slide(&mut document, 2);
    let first = (carousel.current_index(), transform(&document, &carousel));
    carousel.show_slide(&mut document, 2);
    let second = (carousel.current_index(), transform(&document, &carousel));
    assert_eq!(first, second);
}

#[test]
fn show_slide_wraps_out_of_range_indices() {
    let (mut document, _scheduler, mut carousel) = attach();
    carousel.show_slide(&mut document, 3);
    assert_eq!(carousel.current_index(), 0);
    carousel.show_slide(&mut document, -1);
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn auto_advance_moves_one_slide_per_interval() {
    let (mut document, mut scheduler, mut carousel) = attach();
    let advanced = run_timers(&mut document, &mut scheduler, &mut carousel, INTERVAL * 4);
    assert_eq!(advanced, 4);
    assert_eq!(carousel.current_index(), 4 % 3);

    let advanced = run_timers(
        &mut document,
        &mut scheduler,
        &mut carousel,
        INTERVAL - Duration::from_millis(1),
    );
    assert_eq!(advanced, 0);
}

#[test]
fn hover_suspends_auto_advance_until_pointer_leaves() {
    let (mut document, mut scheduler, mut carousel) = attach();
    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::PointerEnter);
    assert!(!carousel.is_auto_advancing());
    assert_eq!(scheduler.active_count(), 0);

    let advanced = run_timers(&mut document, &mut scheduler, &mut carousel, INTERVAL * 10);
    assert_eq!(advanced, 0);
    assert_eq!(carousel.current_index(), 0);

    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::PointerLeave);
    assert_eq!(scheduler.active_count(), 1);
    let advanced = run_timers(&mut document, &mut scheduler, &mut carousel, INTERVAL);
    assert_eq!(advanced, 1);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn repeated_pointer_leave_never_stacks_timers() {
    let (mut document, mut scheduler, mut carousel) = attach();
    for _ in 0..5 {
        carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::PointerLeave);
    }
    assert_eq!(scheduler.active_count(), 1);

    let advanced = run_timers(&mut document, &mut scheduler, &mut carousel, INTERVAL);
    assert_eq!(advanced, 1);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn fires_from_a_replaced_timer_are_ignored() {
    let (mut document, mut scheduler, mut carousel) = attach();
    let stale = carousel.auto_advance_timer().expect("timer running");
    carousel.start_auto_advance(&mut scheduler);
    assert_ne!(carousel.auto_advance_timer(), Some(stale));

    assert!(!carousel.on_timer_fired(&mut document, stale));
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn swipe_thresholds_are_exclusive() {
    let (mut document, mut scheduler, mut carousel) = attach();
    let mut swipe = |carousel: &mut CarouselController, delta: f64| {
        carousel.handle_event(
            &mut document,
            &mut scheduler,
            CarouselEvent::TouchStart { x: 200.0 },
        );
        carousel.handle_event(
            &mut document,
            &mut scheduler,
            CarouselEvent::TouchMove { x: 200.0 + delta },
        );
        carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchEnd)
    };

    assert!(!swipe(&mut carousel, 50.0));
    assert!(!swipe(&mut carousel, -50.0));
    assert_eq!(carousel.current_index(), 0);

    assert!(swipe(&mut carousel, 51.0));
    assert_eq!(carousel.current_index(), 2, "swipe right reveals previous");

    assert!(swipe(&mut carousel, -51.0));
    assert_eq!(carousel.current_index(), 0, "swipe left reveals next");
}

#[test]
fn tap_after_swipe_does_not_reuse_previous_gesture() {
    let (mut document, mut scheduler, mut carousel) = attach();
    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchStart { x: 300.0 });
    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchMove { x: 100.0 });
    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchEnd);
    assert_eq!(carousel.current_index(), 1);

    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchStart { x: 600.0 });
    let changed = carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchEnd);
    assert!(!changed);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn touch_end_without_start_is_ignored() {
    let (mut document, mut scheduler, mut carousel) = attach();
    carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchMove { x: 10.0 });
    assert!(!carousel.handle_event(&mut document, &mut scheduler, CarouselEvent::TouchEnd));
    assert!(!carousel.is_tracking_touch());
}

#[test]
fn single_slide_carousel_stays_on_its_slide() {
    let mut document = MemoryDocument::new();
    document.push(MemoryElement::new().with_class("carousel-container"));
    document.push(MemoryElement::new().with_class("carousel-slide"));
    document.push(MemoryElement::new().with_class("prev-btn"));
    document.push(MemoryElement::new().with_class("next-btn"));
    let mut scheduler = ManualScheduler::new();
    let mut carousel = CarouselController::attach(
        &mut document,
        &mut scheduler,
        &PageSelectors::default(),
        CarouselConfig::default(),
    )
    .expect("carousel attach");

    carousel.advance(&mut document, 1);
    carousel.advance(&mut document, -1);
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(transform(&document, &carousel), "translateX(-0%)");
}

#[test]
fn missing_slides_fail_setup() {
    let mut document = MemoryDocument::new();
    document.push(MemoryElement::new().with_class("carousel-container"));
    document.push(MemoryElement::new().with_class("prev-btn"));
    document.push(MemoryElement::new().with_class("next-btn"));
    let mut scheduler = ManualScheduler::new();

    let err = CarouselController::attach(
        &mut document,
        &mut scheduler,
        &PageSelectors::default(),
        CarouselConfig::default(),
    )
    .expect_err("no slides");
    assert!(matches!(err, solar_page::PageError::MissingElement { .. }));
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn detach_cancels_the_timer() {
    let (_document, mut scheduler, carousel) = attach();
    let timer = carousel.auto_advance_timer().expect("running");
    carousel.detach(&mut scheduler);
    assert!(!scheduler.is_active(timer));
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn custom_interval_is_honoured() {
    let mut document = MemoryDocument::landing_page();
    let mut scheduler = ManualScheduler::new();
    let mut carousel = CarouselController::attach(
        &mut document,
        &mut scheduler,
        &PageSelectors::default(),
        CarouselConfig {
            auto_advance_interval_ms: 1_000,
            ..CarouselConfig::default()
        },
    )
    .expect("carousel attach");

    let advanced = run_timers(
        &mut document,
        &mut scheduler,
        &mut carousel,
        Duration::from_millis(2_500),
    );
    assert_eq!(advanced, 2);
    assert_eq!(carousel.current_index(), 2);
}
