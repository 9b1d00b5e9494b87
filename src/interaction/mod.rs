use serde::{Deserialize, Serialize};

/// Outcome of a completed horizontal touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Finger moved right: reveals the previous slide.
    Right,
    /// Finger moved left: reveals the next slide.
    Left,
}

impl SwipeDirection {
    /// Slide step the swipe maps to.
    #[must_use]
    pub fn slide_step(self) -> isize {
        match self {
            Self::Right => -1,
            Self::Left => 1,
        }
    }
}

/// Classifies a gesture delta. Only `|delta| > threshold_px` counts as a swipe.
#[must_use]
pub fn classify_swipe(delta_px: f64, threshold_px: f64) -> Option<SwipeDirection> {
    if delta_px > threshold_px {
        Some(SwipeDirection::Right)
    } else if delta_px < -threshold_px {
        Some(SwipeDirection::Left)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSample {
    start_x: f64,
    last_x: f64,
}

/// Horizontal touch gesture sampler.
///
/// Holds at most one in-flight gesture. The sample is consumed by
/// [`SwipeTracker::on_touch_end`] and never carried into the next gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeTracker {
    sample: Option<GestureSample>,
}

impl SwipeTracker {
    #[must_use]
    pub fn is_tracking(self) -> bool {
        self.sample.is_some()
    }

    pub fn on_touch_start(&mut self, x: f64) {
        self.sample = Some(GestureSample {
            start_x: x,
            last_x: x,
        });
    }

    /// Updates the last-seen coordinate. Moves without a start are ignored.
    pub fn on_touch_move(&mut self, x: f64) {
        if let Some(sample) = self.sample.as_mut() {
            sample.last_x = x;
        }
    }

    /// Ends the gesture and returns `last - start`, or `None` without a start.
    pub fn on_touch_end(&mut self) -> Option<f64> {
        self.sample
            .take()
            .map(|sample| sample.last_x - sample.start_x)
    }

    pub fn cancel(&mut self) {
        self.sample = None;
    }
}

/// Pointer presence over a hover-sensitive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Outside,
    Inside,
}

#[cfg(test)]
mod tests {
    use super::{SwipeDirection, SwipeTracker, classify_swipe};

    #[test]
    fn tap_without_move_has_zero_delta() {
        let mut tracker = SwipeTracker::default();
        tracker.on_touch_start(300.0);
        tracker.on_touch_move(120.0);
        assert_eq!(tracker.on_touch_end(), Some(-180.0));

        tracker.on_touch_start(90.0);
        assert_eq!(tracker.on_touch_end(), Some(0.0));
        assert_eq!(tracker.on_touch_end(), None);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(classify_swipe(50.0, 50.0), None);
        assert_eq!(classify_swipe(-50.0, 50.0), None);
        assert_eq!(classify_swipe(50.5, 50.0), Some(SwipeDirection::Right));
        assert_eq!(classify_swipe(-50.5, 50.0), Some(SwipeDirection::Left));
        assert_eq!(classify_swipe(f64::NAN, 50.0), None);
    }
}
