//! Throttle-and-debounce scheduling for scroll events.
//!
//! The first call in a quiet period fires immediately; calls arriving
//! within the delay window coalesce into a single trailing fire whose
//! deadline resets on every new call. The clock is injected so tests
//! never sleep.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ThrottleDebounce {
    delay: Duration,
    last_fire: Option<Instant>,
    deadline: Option<Instant>,
}

impl ThrottleDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fire: None,
            deadline: None,
        }
    }

    /// Record a call at `now`. Returns `true` when the call may run
    /// immediately; otherwise a trailing fire is (re)scheduled.
    pub fn call(&mut self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) if now.duration_since(last) < self.delay => {
                self.deadline = Some(now + self.delay);
                false
            }
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }

    /// Consume the trailing fire if its deadline has passed.
    pub fn take_ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.last_fire = Some(now);
                true
            }
            _ => false,
        }
    }

    /// How long to wait before the trailing fire becomes ready.
    pub fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Drop any pending trailing fire.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
