//! Shared DTO types used across multiple endpoints.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Confirmation body returned by `DELETE` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Human-readable confirmation (e.g. `"Task deleted"`).
    pub result: String,
}

impl DeleteResponse {
    /// Builds a confirmation with the given message.
    #[must_use]
    pub fn new(result: &str) -> Self {
        Self {
            result: result.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

/// Deserializes an optional row id sent either as a JSON integer or as a
/// numeric string. `null` and `""` both mean "no id".
///
/// # Errors
///
/// Fails when the value is neither an integer nor a numeric string.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Int(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer id, got {text:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<i64>,
    }

    fn parse(json: &str) -> Option<Option<i64>> {
        serde_json::from_str::<Holder>(json).ok().map(|h| h.id)
    }

    #[test]
    fn accepts_integer_string_and_blank() {
        assert_eq!(parse(r#"{"id": 3}"#), Some(Some(3)));
        assert_eq!(parse(r#"{"id": "7"}"#), Some(Some(7)));
        assert_eq!(parse(r#"{"id": ""}"#), Some(None));
        assert_eq!(parse(r#"{"id": null}"#), Some(None));
        assert_eq!(parse(r"{}"), Some(None));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert_eq!(parse(r#"{"id": "abc"}"#), None);
        assert_eq!(parse(r#"{"id": true}"#), None);
    }
}
