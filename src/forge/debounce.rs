use std::time::{Duration, Instant};

/// Single-slot trailing debouncer.
///
/// At most one task is pending. Scheduling replaces the pending task and restarts the quiet
/// interval, so only the last task of a burst ever fires.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub(crate) fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm `task` at `now`. Returns true when a previously pending task was cancelled.
    pub(crate) fn schedule(&mut self, task: T, now: Instant) -> bool {
        self.pending.replace((task, now)).is_some()
    }

    /// Take the pending task if its quiet interval has elapsed by `now`.
    pub(crate) fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, armed) = self.pending.as_ref()?;
        if now.saturating_duration_since(*armed) < self.delay {
            return None;
        }
        self.pending.take().map(|(task, _)| task)
    }

    pub(crate) fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(task, _)| task)
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Remaining quiet time before the pending task fires, if any.
    pub(crate) fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        let (_, armed) = self.pending.as_ref()?;
        Some(
            self.delay
                .saturating_sub(now.saturating_duration_since(*armed)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/forge/debounce.rs"]
mod tests;
