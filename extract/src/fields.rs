//! Validation of parsed model output into a [`QuantityRecord`].

use buildsmart_core::{QuantityRecord, MAX_BUILT_UP_AREA_SQ_FT};
use serde_json::{json, Value};

use crate::error::ExtractionError;
use crate::prompt::{AREA_KEY, DOORS_KEY, WINDOWS_KEY};

/// JSON Schema the parsed response must satisfy.
#[must_use]
pub fn quantity_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            AREA_KEY: {
                "type": "number",
                "exclusiveMinimum": 0,
                "maximum": MAX_BUILT_UP_AREA_SQ_FT
            },
            WINDOWS_KEY: { "type": "integer", "minimum": 0, "maximum": u32::MAX },
            DOORS_KEY: { "type": "integer", "minimum": 0, "maximum": u32::MAX }
        },
        "required": [AREA_KEY, WINDOWS_KEY, DOORS_KEY]
    })
}

/// Collect all validation errors for `instance` against `schema`.
///
/// Returns one formatted message per failure, with its instance path.
///
/// # Errors
///
/// Returns [`ExtractionError::Schema`] if `schema` does not compile.
pub fn collect_validation_errors(
    schema: &Value,
    instance: &Value,
) -> Result<Vec<String>, ExtractionError> {
    let validator =
        jsonschema::Validator::new(schema).map_err(|e| ExtractionError::Schema(e.to_string()))?;
    Ok(validator
        .iter_errors(instance)
        .map(|error| format!("At path '{}': {}", error.instance_path, error))
        .collect())
}

/// Converts a parsed response into a [`QuantityRecord`].
///
/// # Errors
///
/// Returns [`ExtractionError::IncompleteFields`] when any key is missing, has
/// the wrong type, or is out of range, and [`ExtractionError::Schema`] if the
/// field schema itself is broken.
pub fn quantities_from_value(value: &Value) -> Result<QuantityRecord, ExtractionError> {
    let problems = collect_validation_errors(&quantity_schema(), value)?;
    if !problems.is_empty() {
        return Err(incomplete(problems, value));
    }

    let area = number(value, AREA_KEY);
    let doors = count(value, DOORS_KEY);
    let windows = count(value, WINDOWS_KEY);

    QuantityRecord::new(area, doors, windows).map_err(|e| incomplete(vec![e.to_string()], value))
}

fn number(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

/// Schema validation guarantees an integral value in `0..=u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: &Value, key: &str) -> u32 {
    value
        .get(key)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64)))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_default()
}

fn incomplete(problems: Vec<String>, value: &Value) -> ExtractionError {
    ExtractionError::IncompleteFields {
        problems,
        response: value.clone(),
    }
}
