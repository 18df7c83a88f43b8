//! Trailing-edge debouncer for the search input
//!
//! The UI event loop already wakes on a short poll interval, so the debouncer
//! is a deadline rather than a timer callback: `trigger` records the newest
//! input and restarts the delay, `poll` yields the input once the delay has
//! elapsed with nothing newer, and `cancel` drops whatever is pending. Last
//! call wins; there is no leading-edge fire and no queue.

use std::time::{Duration, Instant};

/// Debounces rapid input changes into one delayed lookup
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(Instant, String)>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiescence delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records new input, replacing any pending one and restarting the delay
    pub fn trigger(&mut self, input: impl Into<String>) {
        self.pending = Some((Instant::now() + self.delay, input.into()));
    }

    /// Yields the pending input if its deadline has passed, at most once
    pub fn poll(&mut self) -> Option<String> {
        match &self.pending {
            Some((deadline, _)) if Instant::now() >= *deadline => {
                self.pending.take().map(|(_, input)| input)
            }
            _ => None,
        }
    }

    /// Drops any pending input without firing
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns true while an input is waiting for its deadline
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
