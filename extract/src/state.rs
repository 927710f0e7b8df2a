//! Retry state machine for a single extraction.
//!
//! ```text
//!             ┌──────────── ParseFailed ◄──┐
//!             ▼                            │ unparseable / empty,
//!   Pending ──observe──► ParsedOk          │ budget left
//!             │
//!             ├──────────► Stable          (same text as last time)
//!             └──────────► Exhausted       (budget spent)
//! ```
//!
//! `ParsedOk`, `Stable` and `Exhausted` are terminal.

use std::time::Duration;

use serde_json::Value;

use crate::error::{AttemptOutcome, AttemptRecord};
use crate::parse::parse_structured;

/// Where the retry loop stands after the latest response.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    /// No response observed yet.
    Pending,
    /// The latest response parsed as JSON.
    ParsedOk(Value),
    /// The latest response was unusable and attempts remain.
    ParseFailed,
    /// The latest response repeated the previous one verbatim.
    Stable,
    /// The attempt budget is spent without a parseable response.
    Exhausted,
}

impl AttemptState {
    /// Whether the loop must stop calling the model.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ParsedOk(_) | Self::Stable | Self::Exhausted)
    }
}

/// Bounded retry loop with a stability short-circuit.
///
/// Feed each model response to [`RetryLoop::observe`] until the state is
/// terminal. The loop holds no I/O; callers own the model call and the pause
/// between attempts.
#[derive(Debug)]
pub struct RetryLoop {
    max_attempts: usize,
    attempts: usize,
    last_output: Option<String>,
    state: AttemptState,
    history: Vec<AttemptRecord>,
}

impl RetryLoop {
    /// Creates a loop allowing `max_attempts` model calls.
    ///
    /// A budget of zero starts out `Exhausted`.
    #[must_use]
    pub const fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            attempts: 0,
            last_output: None,
            state: if max_attempts == 0 {
                AttemptState::Exhausted
            } else {
                AttemptState::Pending
            },
            history: Vec::new(),
        }
    }

    /// Classifies one raw model response and advances the state.
    ///
    /// Responses are trimmed first. Empty responses are inconclusive and do
    /// not replace the text used for the stability check.
    pub fn observe(&mut self, raw: &str, elapsed: Duration) -> &AttemptState {
        if self.state.is_terminal() {
            return &self.state;
        }

        self.attempts += 1;
        let current = raw.trim();

        let outcome = if current.is_empty() {
            AttemptOutcome::Empty
        } else if self.last_output.as_deref() == Some(current) {
            AttemptOutcome::Repeated
        } else {
            self.last_output = Some(current.to_string());
            match parse_structured(current) {
                Ok(value) => {
                    self.state = AttemptState::ParsedOk(value);
                    AttemptOutcome::Parsed
                }
                Err(e) => AttemptOutcome::ParseFailed(e.to_string()),
            }
        };

        if outcome == AttemptOutcome::Repeated {
            self.state = AttemptState::Stable;
        } else if !self.state.is_terminal() {
            self.state = if self.attempts >= self.max_attempts {
                AttemptState::Exhausted
            } else {
                AttemptState::ParseFailed
            };
        }

        self.history.push(AttemptRecord {
            attempt_number: self.attempts,
            raw_output: current.to_string(),
            outcome,
            elapsed,
        });

        &self.state
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AttemptState {
        &self.state
    }

    /// Number of responses observed so far.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Maximum number of responses the loop accepts.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Most recent non-empty response, trimmed.
    #[must_use]
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    /// Per-attempt records so far.
    #[must_use]
    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// Consumes the loop, returning its history.
    #[must_use]
    pub fn into_history(self) -> Vec<AttemptRecord> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const T: Duration = Duration::ZERO;

    #[test]
    fn test_first_response_parses() {
        let mut machine = RetryLoop::new(3);
        assert_eq!(machine.state(), &AttemptState::Pending);

        let state = machine.observe("  {\"Doors count\": 3}\n", T);
        assert_eq!(state, &AttemptState::ParsedOk(json!({"Doors count": 3})));
        assert_eq!(machine.attempts(), 1);
        assert_eq!(machine.history()[0].outcome, AttemptOutcome::Parsed);
    }

    #[test]
    fn test_parse_failure_then_success() {
        let mut machine = RetryLoop::new(3);
        assert_eq!(machine.observe("thinking...", T), &AttemptState::ParseFailed);
        assert!(machine.observe("{\"a\": 1}", T).is_terminal());
        assert_eq!(machine.attempts(), 2);
    }

    #[test]
    fn test_identical_text_stops_early() {
        let mut machine = RetryLoop::new(5);
        machine.observe("not json", T);
        let state = machine.observe("  not json  ", T);

        assert_eq!(state, &AttemptState::Stable);
        assert_eq!(machine.attempts(), 2);
        assert_eq!(machine.history()[1].outcome, AttemptOutcome::Repeated);
    }

    #[test]
    fn test_only_consecutive_repeats_count() {
        let mut machine = RetryLoop::new(5);
        machine.observe("a", T);
        machine.observe("b", T);
        assert_eq!(machine.observe("a", T), &AttemptState::ParseFailed);
    }

    #[test]
    fn test_empty_responses_do_not_reset_stability_reference() {
        let mut machine = RetryLoop::new(5);
        machine.observe("same", T);
        assert_eq!(machine.observe("   ", T), &AttemptState::ParseFailed);
        assert_eq!(machine.history()[1].outcome, AttemptOutcome::Empty);
        assert_eq!(machine.last_output(), Some("same"));
        assert_eq!(machine.observe("same", T), &AttemptState::Stable);
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut machine = RetryLoop::new(3);
        machine.observe("one", T);
        machine.observe("two", T);
        assert_eq!(machine.observe("three", T), &AttemptState::Exhausted);
        assert_eq!(machine.into_history().len(), 3);
    }

    #[test]
    fn test_success_on_last_attempt_wins_over_exhaustion() {
        let mut machine = RetryLoop::new(2);
        machine.observe("nope", T);
        assert!(matches!(machine.observe("{}", T), AttemptState::ParsedOk(_)));
    }

    #[test]
    fn test_zero_budget_starts_exhausted() {
        let mut machine = RetryLoop::new(0);
        assert_eq!(machine.state(), &AttemptState::Exhausted);
        machine.observe("{}", T);
        assert_eq!(machine.attempts(), 0);
    }

    #[test]
    fn test_terminal_state_ignores_further_input() {
        let mut machine = RetryLoop::new(3);
        machine.observe("{}", T);
        machine.observe("other", T);
        assert_eq!(machine.attempts(), 1);
        assert!(matches!(machine.state(), AttemptState::ParsedOk(_)));
    }
}
