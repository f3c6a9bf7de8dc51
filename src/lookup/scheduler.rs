//! Debounced, single-flight lookup scheduling.

use crate::source::types::RequestToken;

use super::debouncer::Debouncer;

/// Collects query text changes, lets the debouncer settle them into at most
/// one due lookup per burst, and tracks which fetch is currently live.
///
/// Tokens are handed out in issue order. Issuing a token supersedes the
/// previous one, so a completion that comes back for an older token can be
/// recognized and dropped.
#[derive(Debug)]
pub struct LookupScheduler {
    debouncer: Debouncer,
    pending_text: Option<String>,
    min_chars: usize,
    /// Next token value. Starts at 1; 0 is reserved for worker-level errors.
    next_token: u64,
    in_flight: Option<RequestToken>,
}

impl LookupScheduler {
    pub fn new(delay_ms: u64, min_chars: usize) -> Self {
        Self {
            debouncer: Debouncer::new(delay_ms),
            pending_text: None,
            min_chars,
            next_token: 1,
            in_flight: None,
        }
    }

    /// Record a text change and restart the quiet period.
    pub fn note_input(&mut self, text: &str, now_ms: u64) {
        self.pending_text = Some(text.to_string());
        self.debouncer.schedule_execution_at(now_ms);
    }

    /// Record a pasted value: due immediately, no quiet period.
    pub fn note_paste(&mut self, text: &str, now_ms: u64) {
        self.pending_text = Some(text.to_string());
        self.debouncer.schedule_immediate_at(now_ms);
    }

    /// Take the settled query text once its quiet period has elapsed.
    /// Yields at most one text per burst, always the latest.
    pub fn take_due(&mut self, now_ms: u64) -> Option<String> {
        if !self.debouncer.should_execute_at(now_ms) {
            return None;
        }
        self.debouncer.mark_executed();
        self.pending_text.take()
    }

    /// Drop any scheduled lookup that has not fired yet.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
        self.pending_text = None;
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.has_pending()
    }

    /// Whether `text` is long enough to be looked up.
    pub fn gate_passes(&self, text: &str) -> bool {
        text.chars().count() >= self.min_chars
    }

    /// Allocate the token for a new fetch, superseding the previous one.
    pub fn begin_flight(&mut self) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        if self.next_token == 0 {
            self.next_token = 1;
        }
        if let Some(old) = self.in_flight.replace(token) {
            log::debug!("Request {} supersedes request {}", token.0, old.0);
        }
        token
    }

    /// Forget the in-flight token so later completions for it read as stale.
    pub fn invalidate(&mut self) {
        self.in_flight = None;
    }

    pub fn is_live(&self, token: RequestToken) -> bool {
        self.in_flight == Some(token)
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
