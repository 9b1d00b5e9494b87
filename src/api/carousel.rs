use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::PageResult;
use crate::host::{
    Document, ElementId, Scheduler, TimerHandle, TimerId, require_element, require_elements,
};
use crate::interaction::{HoverState, SwipeTracker, classify_swipe};

use super::{CarouselConfig, PageSelectors};

/// Inputs the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CarouselEvent {
    PrevClicked,
    NextClicked,
    TouchStart { x: f64 },
    TouchMove { x: f64 },
    TouchEnd,
    PointerEnter,
    PointerLeave,
    TimerFired(TimerId),
}

/// Wraps `index` into `0..slide_count`.
///
/// `slide_count` must be at least one.
#[must_use]
pub fn normalize_slide_index(index: isize, slide_count: usize) -> usize {
    let count = isize::try_from(slide_count).unwrap_or(isize::MAX).max(1);
    // rem_euclid of a positive modulus is always in 0..count.
    index.rem_euclid(count) as usize
}

/// Slide carousel with buttons, swipe, hover pause and auto-advance.
///
/// `current_index` is the only mutable widget state and [`Self::show_slide`]
/// is its only writer.
#[derive(Debug)]
pub struct CarouselController {
    container: ElementId,
    slides: Vec<ElementId>,
    prev_button: ElementId,
    next_button: ElementId,
    config: CarouselConfig,
    current_index: usize,
    swipe: SwipeTracker,
    hover: HoverState,
    auto_advance: Option<TimerHandle>,
}

impl CarouselController {
    /// Resolves the carousel elements, starts auto-advance and shows slide 0.
    pub fn attach<D, S>(
        document: &mut D,
        scheduler: &mut S,
        selectors: &PageSelectors,
        config: CarouselConfig,
    ) -> PageResult<Self>
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        let container = require_element(&*document, &selectors.carousel_container)?;
        let slides = require_elements(&*document, &selectors.carousel_slide)?;
        let prev_button = require_element(&*document, &selectors.carousel_prev)?;
        let next_button = require_element(&*document, &selectors.carousel_next)?;

        let mut carousel = Self {
            container,
            slides,
            prev_button,
            next_button,
            config,
            current_index: 0,
            swipe: SwipeTracker::default(),
            hover: HoverState::Outside,
            auto_advance: None,
        };
        debug!(slides = carousel.slides.len(), "carousel attached");

        carousel.start_auto_advance(scheduler);
        carousel.show_slide(document, 0);
        Ok(carousel)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    #[must_use]
    pub fn container(&self) -> ElementId {
        self.container
    }

    #[must_use]
    pub fn prev_button(&self) -> ElementId {
        self.prev_button
    }

    #[must_use]
    pub fn next_button(&self) -> ElementId {
        self.next_button
    }

    #[must_use]
    pub fn config(&self) -> CarouselConfig {
        self.config
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn is_tracking_touch(&self) -> bool {
        self.swipe.is_tracking()
    }

    /// Identity of the running auto-advance timer, if any.
    #[must_use]
    pub fn auto_advance_timer(&self) -> Option<TimerId> {
        self.auto_advance.as_ref().map(TimerHandle::id)
    }

    #[must_use]
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_some()
    }

    /// Horizontal container offset for the current slide, in percent.
    #[must_use]
    pub fn offset_percent(&self) -> f64 {
        -(self.current_index as f64) * self.config.slide_offset_percent
    }

    /// CSS `transform` value placing the current slide in view.
    #[must_use]
    pub fn transform_value(&self) -> String {
        format!(
            "translateX(-{}%)",
            self.current_index as f64 * self.config.slide_offset_percent
        )
    }

    #[must_use]
    pub fn owns(&self, element: ElementId) -> bool {
        element == self.container || element == self.prev_button || element == self.next_button
    }

    /// Wraps `index`, commits it and synchronizes the container transform.
    pub fn show_slide<D: Document + ?Sized>(&mut self, document: &mut D, index: isize) {
        self.current_index = normalize_slide_index(index, self.slides.len());
        let transform = self.transform_value();
        document.set_style(self.container, "transform", &transform);
        debug!(index = self.current_index, transform = %transform, "show slide");
    }

    /// Moves `step` slides from the current one, wrapping at both ends.
    pub fn advance<D: Document + ?Sized>(&mut self, document: &mut D, step: isize) {
        let current = isize::try_from(self.current_index).unwrap_or(0);
        self.show_slide(document, current.saturating_add(step));
    }

    /// Starts the auto-advance timer, replacing any running one.
    pub fn start_auto_advance<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.stop_auto_advance(scheduler);
        let handle = scheduler.start_repeating(self.config.auto_advance_interval());
        debug!(
            timer = handle.id().0,
            interval_ms = self.config.auto_advance_interval_ms,
            "auto-advance started"
        );
        self.auto_advance = Some(handle);
    }

    pub fn stop_auto_advance<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.auto_advance.take() {
            debug!(timer = handle.id().0, "auto-advance stopped");
            scheduler.cancel(handle);
        }
    }

    /// Advances one slide when `timer` is the running auto-advance timer.
    ///
    /// Fires from stopped or replaced timers are ignored. Returns whether the
    /// slide advanced.
    pub fn on_timer_fired<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        timer: TimerId,
    ) -> bool {
        if self.auto_advance_timer() != Some(timer) {
            trace!(timer = timer.0, "ignoring stale auto-advance fire");
            return false;
        }
        self.advance(document, 1);
        true
    }

    pub fn on_touch_start(&mut self, x: f64) {
        self.swipe.on_touch_start(x);
    }

    pub fn on_touch_move(&mut self, x: f64) {
        self.swipe.on_touch_move(x);
    }

    /// Ends the touch gesture and applies a swipe when the delta exceeds the threshold.
    pub fn on_touch_end<D: Document + ?Sized>(&mut self, document: &mut D) -> bool {
        let Some(delta) = self.swipe.on_touch_end() else {
            return false;
        };
        match classify_swipe(delta, self.config.swipe_threshold_px) {
            Some(direction) => {
                trace!(delta, ?direction, "swipe");
                self.advance(document, direction.slide_step());
                true
            }
            None => {
                trace!(delta, "touch below swipe threshold");
                false
            }
        }
    }

    pub fn on_pointer_enter<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.hover = HoverState::Inside;
        self.stop_auto_advance(scheduler);
    }

    pub fn on_pointer_leave<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.hover = HoverState::Outside;
        self.start_auto_advance(scheduler);
    }

    /// Applies one event. Returns whether the visible slide was rewritten.
    pub fn handle_event<D, S>(
        &mut self,
        document: &mut D,
        scheduler: &mut S,
        event: CarouselEvent,
    ) -> bool
    where
        D: Document + ?Sized,
        S: Scheduler + ?Sized,
    {
        match event {
            CarouselEvent::PrevClicked => {
                self.advance(document, -1);
                true
            }
            CarouselEvent::NextClicked => {
                self.advance(document, 1);
                true
            }
            CarouselEvent::TouchStart { x } => {
                self.on_touch_start(x);
                false
            }
            CarouselEvent::TouchMove { x } => {
                self.on_touch_move(x);
                false
            }
            CarouselEvent::TouchEnd => self.on_touch_end(document),
            CarouselEvent::PointerEnter => {
                self.on_pointer_enter(scheduler);
                false
            }
            CarouselEvent::PointerLeave => {
                self.on_pointer_leave(scheduler);
                false
            }
            CarouselEvent::TimerFired(timer) => self.on_timer_fired(document, timer),
        }
    }

    /// Stops auto-advance and releases the widget.
    pub fn detach<S: Scheduler + ?Sized>(mut self, scheduler: &mut S) {
        self.stop_auto_advance(scheduler);
        self.swipe.cancel();
        debug!("carousel detached");
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_slide_index;

    #[test]
    fn normalizes_both_directions() {
        assert_eq!(normalize_slide_index(3, 3), 0);
        assert_eq!(normalize_slide_index(-1, 3), 2);
        assert_eq!(normalize_slide_index(1, 3), 1);
        assert_eq!(normalize_slide_index(7, 3), 1);
        assert_eq!(normalize_slide_index(-4, 3), 2);
        assert_eq!(normalize_slide_index(isize::MIN, 1), 0);
    }
}
