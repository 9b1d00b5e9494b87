use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Identity of one started repeating timer, carried by fire events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Ownership token of a running repeating timer.
///
/// Not `Clone`: stopping a timer consumes its handle, so a handle can be
/// cancelled at most once and a dropped slot can never be reused by mistake.
#[derive(Debug, PartialEq, Eq)]
pub struct TimerHandle {
    id: TimerId,
}

impl TimerHandle {
    #[must_use]
    pub fn new(id: TimerId) -> Self {
        Self { id }
    }

    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }
}

/// Host-provided repeating timer facility.
pub trait Scheduler {
    fn start_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Stops the timer. Always succeeds, including for timers that already fired.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledTimer {
    period: Duration,
    next_due: Duration,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Fires are popped one at a time with [`ManualScheduler::pop_due`] so the host
/// can dispatch each one before the next is computed, exactly like an event loop.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: IndexMap<TimerId, ScheduledTimer>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Returns the next timer due at or before `deadline` and moves the clock to
    /// its due time. When nothing is due the clock moves to `deadline`.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let due = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.next_due <= deadline)
            .min_by_key(|(id, timer)| (timer.next_due, **id))
            .map(|(id, _)| *id);

        match due {
            Some(id) => {
                if let Some(timer) = self.timers.get_mut(&id) {
                    self.now = self.now.max(timer.next_due);
                    timer.next_due += timer.period;
                }
                trace!(timer = id.0, now_ms = self.now.as_millis() as u64, "timer fired");
                Some(id)
            }
            None => {
                self.now = self.now.max(deadline);
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn start_repeating(&mut self, period: Duration) -> TimerHandle {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Zero periods would fire forever within one deadline.
        let period = period.max(Duration::from_millis(1));
        self.timers.insert(
            id,
            ScheduledTimer {
                period,
                next_due: self.now + period,
            },
        );
        TimerHandle::new(id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.shift_remove(&handle.id());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ManualScheduler, Scheduler};

    #[test]
    fn repeating_timer_fires_once_per_period() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.start_repeating(Duration::from_millis(100));
        let id = handle.id();

        let mut fired = 0;
        while let Some(fired_id) = scheduler.pop_due(Duration::from_millis(350)) {
            assert_eq!(fired_id, id);
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(scheduler.now(), Duration::from_millis(350));

        scheduler.cancel(handle);
        assert_eq!(scheduler.pop_due(Duration::from_secs(10)), None);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn restarted_timer_counts_period_from_restart() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.start_repeating(Duration::from_millis(100));
        assert_eq!(scheduler.pop_due(Duration::from_millis(150)), Some(first.id()));
        assert_eq!(scheduler.pop_due(Duration::from_millis(150)), None);
        scheduler.cancel(first);

        let second = scheduler.start_repeating(Duration::from_millis(100));
        assert_eq!(scheduler.pop_due(Duration::from_millis(249)), None);
        assert_eq!(
            scheduler.pop_due(Duration::from_millis(250)),
            Some(second.id())
        );
    }
}
