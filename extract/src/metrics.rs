//! Per-extraction accounting: model calls, payload sizes and rough token use.

use std::time::Duration;

/// What one extraction cost.
///
/// Token counts are estimates over the text parts only; image tokens are
/// billed by the backend and tracked here as raw bytes sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionMetrics {
    /// Model calls that returned a response.
    pub total_attempts: usize,
    /// Wall-clock time, retry pauses included.
    pub wall_time: Duration,
    /// Encoded image bytes uploaded across all calls.
    pub image_bytes_sent: usize,
    /// Estimated prompt tokens across all calls.
    pub estimated_input_tokens: usize,
    /// Estimated response tokens across all calls.
    pub estimated_output_tokens: usize,
}

impl ExtractionMetrics {
    /// Accounts for one answered model call.
    pub fn record_call(&mut self, prompt: &str, image_bytes: usize, response: &str) {
        self.total_attempts += 1;
        self.image_bytes_sent += image_bytes;
        self.estimated_input_tokens += estimate_tokens(prompt);
        self.estimated_output_tokens += estimate_tokens(response);
    }

    /// Sum of the input and output estimates.
    #[must_use]
    pub const fn estimated_total_tokens(&self) -> usize {
        self.estimated_input_tokens + self.estimated_output_tokens
    }
}

/// Rough token count for `text`: one token per four chars, rounded up.
///
/// ```
/// use buildsmart_extract::estimate_tokens;
///
/// assert_eq!(estimate_tokens("Doors count"), 3);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("{\"Doors count\": 3}"), 5);
        assert_eq!(estimate_tokens("área útil"), 3);
    }

    #[test]
    fn test_record_call_accumulates() {
        let mut metrics = ExtractionMetrics::default();
        metrics.record_call("Count the doors", 2048, "not json");
        metrics.record_call("Count the doors", 2048, "{\"Doors count\": 3}");

        assert_eq!(metrics.total_attempts, 2);
        assert_eq!(metrics.image_bytes_sent, 4096);
        assert_eq!(metrics.estimated_input_tokens, 8);
        assert_eq!(metrics.estimated_output_tokens, 2 + 5);
        assert_eq!(metrics.estimated_total_tokens(), 15);
    }

    #[test]
    fn test_empty_response_costs_no_output_tokens() {
        let mut metrics = ExtractionMetrics::default();
        metrics.record_call("prompt", 10, "");
        assert_eq!(metrics.estimated_output_tokens, 0);
        assert_eq!(metrics.estimated_input_tokens, 2);
    }
}
