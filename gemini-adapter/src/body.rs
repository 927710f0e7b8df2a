//! Request body builder and response text extraction for `generateContent`.

use base64::Engine as _;
use serde_json::{json, Value};

use crate::types::{GenerateConfig, GenerateContentResponse, InlineImage};

/// Builds the JSON body for a single-turn request carrying one inline image
/// followed by the prompt text.
#[must_use]
pub fn build_body(prompt: &str, image: &InlineImage<'_>, config: &GenerateConfig) -> Value {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image.data);

    let mut body = json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "inline_data": { "mime_type": image.mime_type, "data": encoded } },
                { "text": prompt }
            ]
        }]
    });

    if let Some(temperature) = config.temperature {
        body["generationConfig"] = json!({ "temperature": temperature });
    }

    body
}

/// Returns the text of the first candidate, with its parts concatenated.
///
/// A response without candidates, or whose first candidate has no text
/// parts (e.g. blocked by a safety filter), yields an empty string.
#[must_use]
pub fn candidate_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> InlineImage<'static> {
        InlineImage {
            mime_type: "image/png",
            data: b"\x89PNG",
        }
    }

    #[test]
    fn test_body_has_image_then_prompt() {
        let body = build_body("count the doors", &image(), &GenerateConfig::default());
        let parts = body["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], "iVBORw==");
        assert_eq!(parts[1]["text"], "count the doors");
    }

    #[test]
    fn test_generation_config_only_when_temperature_set() {
        let plain = build_body("p", &image(), &GenerateConfig::default());
        assert!(plain.get("generationConfig").is_none());

        let config = GenerateConfig {
            temperature: Some(0.0),
            ..GenerateConfig::default()
        };
        let tuned = build_body("p", &image(), &config);
        assert_eq!(tuned["generationConfig"]["temperature"], 0.0);
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"Doors count\": " }, { "text": "3}" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 270, "candidatesTokenCount": 12, "totalTokenCount": 282 }
        }))
        .unwrap();

        assert_eq!(candidate_text(&response), "{\"Doors count\": 3}");
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 282);
    }

    #[test]
    fn test_blocked_candidate_yields_empty_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(candidate_text(&response), "");

        assert_eq!(candidate_text(&GenerateContentResponse::default()), "");
    }
}
