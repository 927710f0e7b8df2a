use std::time::Instant;

use tokio::time::timeout;

use crate::body::{build_body, candidate_text};
use crate::error::GeminiError;
use crate::types::{GenerateConfig, GenerateContentResponse, GenerateResult, InlineImage};

/// Longest error body kept in `GeminiError::Status`.
const MAX_ERROR_BODY: usize = 2048;

/// Executes one `generateContent` call bounded by `config.timeout`.
///
/// # Errors
///
/// Returns `GeminiError::Timeout` when the deadline passes,
/// `GeminiError::Status` for a non-success status, `GeminiError::Http` for
/// transport failures and `GeminiError::MalformedResponse` when the body is
/// not a `generateContent` envelope.
pub async fn run_generate(
    http: &reqwest::Client,
    api_key: &str,
    prompt: &str,
    image: &InlineImage<'_>,
    config: &GenerateConfig,
) -> Result<GenerateResult, GeminiError> {
    let url = config.endpoint();
    let body = build_body(prompt, image, config);
    let start_time = Instant::now();

    tracing::debug!(
        model = %config.model,
        image_bytes = image.data.len(),
        prompt_chars = prompt.chars().count(),
        "Sending generateContent request"
    );

    let call = async {
        let response = http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        Ok::<_, GeminiError>((status, text))
    };

    let (status, text) = timeout(config.timeout, call)
        .await
        .map_err(|_| GeminiError::Timeout(config.timeout))??;

    if !status.is_success() {
        return Err(GeminiError::Status {
            status: status.as_u16(),
            body: truncate(&text, MAX_ERROR_BODY),
        });
    }

    let envelope: GenerateContentResponse = serde_json::from_str(&text)
        .map_err(|e| GeminiError::MalformedResponse(e.to_string()))?;

    let finish_reason = envelope
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.clone());
    let duration = start_time.elapsed();

    let result = GenerateResult {
        text: candidate_text(&envelope),
        finish_reason,
        duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        usage: envelope.usage_metadata,
    };

    tracing::debug!(
        model = %config.model,
        elapsed_ms = result.duration_ms,
        text_len = result.text.len(),
        finish_reason = ?result.finish_reason,
        "generateContent completed"
    );

    Ok(result)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("quota exceeded", 100), "quota exceeded");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let long = "é".repeat(10);
        assert_eq!(truncate(&long, 4), "éééé...");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let http = reqwest::Client::new();
        let config = GenerateConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GenerateConfig::default()
        };
        let image = InlineImage {
            mime_type: "image/png",
            data: &[0u8; 4],
        };

        let err = run_generate(&http, "key", "prompt", &image, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Http(_) | GeminiError::Timeout(_)));
    }
}
