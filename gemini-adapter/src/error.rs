use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini API key not found: {0}")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Gemini returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode Gemini response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
