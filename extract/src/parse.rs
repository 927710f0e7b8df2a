//! Parsing of free-text model output into JSON.

use serde_json::Value;

use crate::error::ExtractionError;

const FENCE: &str = "```";

/// Parses trimmed model output as JSON.
///
/// Falls back to the body of the first Markdown code fence when the text as a
/// whole is not JSON, since vision models often wrap their answer in
/// ```` ```json ```` blocks despite instructions.
///
/// # Errors
///
/// Returns [`ExtractionError::ParseFailure`] carrying the parser message for
/// the full text.
pub fn parse_structured(text: &str) -> Result<Value, ExtractionError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(e) => fenced_body(text)
            .and_then(|body| serde_json::from_str::<Value>(body).ok())
            .ok_or_else(|| ExtractionError::ParseFailure {
                message: e.to_string(),
                raw_text: text.to_string(),
            }),
    }
}

fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let rest = text[open + FENCE.len()..].trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let close = rest.find(FENCE)?;
    Some(rest[..close].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let value = parse_structured(r#"{"Doors count": 3}"#).unwrap();
        assert_eq!(value, json!({"Doors count": 3}));
    }

    #[test]
    fn test_fenced_json_with_language_tag() {
        let text = "```json\n{\"Windows count\": 5}\n```";
        assert_eq!(parse_structured(text).unwrap(), json!({"Windows count": 5}));
    }

    #[test]
    fn test_fenced_json_with_surrounding_prose() {
        let text = "Here is the result:\n```\n{\"Doors count\": 2}\n```\nLet me know if you need more.";
        assert_eq!(parse_structured(text).unwrap(), json!({"Doors count": 2}));
    }

    #[test]
    fn test_prose_is_parse_failure() {
        let err = parse_structured("I could not find a floor plan in this image.").unwrap_err();
        assert!(err.is_transient());
        assert!(matches!(err, ExtractionError::ParseFailure { raw_text, .. } if raw_text.starts_with("I could")));
    }

    #[test]
    fn test_unclosed_fence_is_parse_failure() {
        assert!(parse_structured("```json\n{\"Doors count\": 2}").is_err());
    }

    #[test]
    fn test_non_object_json_still_parses() {
        assert_eq!(parse_structured("42").unwrap(), json!(42));
    }
}
