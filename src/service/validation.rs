//! Required-field checks for request bodies.

use crate::error::AppError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a text field from any JSON value. `null` reads as empty,
/// numbers and booleans as their JSON text.
pub fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

pub struct RequestValidator;

impl RequestValidator {
    /// Fail with `message` unless every value is non-empty.
    pub fn require_non_empty(values: &[&str], message: &str) -> Result<(), AppError> {
        if values.iter().any(|v| v.is_empty()) {
            return Err(AppError::Validation(message.to_string()));
        }
        Ok(())
    }
}
