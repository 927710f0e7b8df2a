//! Configuration for extraction retry behavior.

use std::time::Duration;

use crate::prompt::FLOOR_PLAN_PROMPT;

/// Configuration for extraction retry behavior.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Maximum number of model calls before giving up (default: 3).
    pub max_attempts: usize,
    /// Pause between attempts (default: 2 seconds).
    pub retry_delay: Duration,
    /// Instruction sent with the image on every attempt.
    pub prompt: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            prompt: FLOOR_PLAN_PROMPT.to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Set the maximum number of attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the pause between attempts.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Replace the instruction sent with the image.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}
