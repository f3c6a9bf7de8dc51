//! Debounce timer for lookup scheduling.
//!
//! Collapses rapid text changes into a single lookup that fires only after
//! the caller stops making changes for the configured delay.

/// Default quiet period between the last keystroke and the lookup it
/// triggers, in milliseconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 150;

/// Trailing-edge debounce over caller-supplied millisecond timestamps.
///
/// The caller owns the clock: every operation takes `now_ms`, so behavior
/// is fully deterministic under test. Rescheduling before the deadline
/// replaces the earlier deadline outright.
#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u64,
    /// Timestamp at which the pending execution becomes due.
    deadline_ms: Option<u64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY_MS)
    }
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    /// Restart the quiet period from `now_ms`.
    pub fn schedule_execution_at(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// Schedule an execution that is due immediately, skipping the delay.
    pub fn schedule_immediate_at(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms);
    }

    /// Check if a pending execution is due at `now_ms`.
    pub fn should_execute_at(&self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) => now_ms >= deadline,
            None => false,
        }
    }

    /// Mark the pending execution as done.
    pub fn mark_executed(&mut self) {
        self.deadline_ms = None;
    }

    /// Drop the pending execution without running it.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn has_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
