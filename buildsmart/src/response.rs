//! Response bodies for the request boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;
use crate::pipeline::Analysis;

/// Error body returned to callers: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable error message.
    pub error: String,
}

impl From<&Error> for ErrorPayload {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// A status code and JSON body, ready for any transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Cost breakdown on success, [`ErrorPayload`] on failure.
    pub body: Value,
}

impl AnalysisResponse {
    /// Renders the outcome of [`Analyzer::analyze`](crate::pipeline::Analyzer::analyze).
    #[must_use]
    pub fn from_result(result: &Result<Analysis, Error>) -> Self {
        match result {
            Ok(analysis) => Self {
                status: 200,
                body: serde_json::to_value(&analysis.breakdown).unwrap_or(Value::Null),
            },
            Err(err) => Self {
                status: err.status_code(),
                body: serde_json::to_value(ErrorPayload::from(err)).unwrap_or(Value::Null),
            },
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildsmart_extract::ExtractionError;

    #[test]
    fn test_error_body_shape() {
        let result: Result<Analysis, Error> =
            Err(ExtractionError::InvalidImage("No image file provided".to_string()).into());

        let response = AnalysisResponse::from_result(&result);

        assert_eq!(response.status, 400);
        assert!(!response.is_success());
        assert_eq!(
            response.body,
            serde_json::json!({"error": "Invalid image: No image file provided"})
        );
    }
}
