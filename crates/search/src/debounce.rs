//! Input debouncing.
//!
//! A [`Debouncer`] coalesces a burst of events into the last one. Every
//! [`schedule`](Debouncer::schedule) replaces the pending value and pushes the
//! deadline out by the full delay; [`poll`](Debouncer::poll) hands the value
//! over once the deadline has passed. Time is passed in explicitly so the
//! caller's event loop (or a test) owns the clock.

use std::time::{Duration, Instant};

/// Delay between the last keystroke and running a search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Timer-based coalescing of values.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value`, due at `now + delay`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if deadline <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.schedule("lamp", start);
        assert_eq!(debouncer.poll(start + 199 * MS), None);
        assert_eq!(debouncer.poll(start + 200 * MS), Some("lamp"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + 400 * MS), None);
    }

    #[test]
    fn test_burst_keeps_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(200 * MS);

        debouncer.schedule("l", start);
        debouncer.schedule("la", start + 50 * MS);
        debouncer.schedule("lam", start + 100 * MS);

        // the first deadline has passed but was pushed out by later events
        assert_eq!(debouncer.poll(start + 250 * MS), None);
        assert_eq!(debouncer.deadline(), Some(start + 300 * MS));
        assert_eq!(debouncer.poll(start + 300 * MS), Some("lam"));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(10 * MS);

        debouncer.schedule(1, start);
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.poll(start + 20 * MS), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
