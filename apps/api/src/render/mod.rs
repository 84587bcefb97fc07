//! Shared pieces for turning model JSON into Markdown documents.
//!
//! Model output is untrusted: any field may be missing or have the wrong shape.
//! The `lenient*` deserializers below turn a badly shaped field into "absent"
//! so one bad field never discards the whole document.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Placeholder shown for any missing score or answer.
pub const NOT_AVAILABLE: &str = "N/A";

/// The model's text could not be used as a JSON document.
#[derive(Debug, Error)]
pub enum ResponseFormatError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response JSON is not an object")]
    NotAnObject,
}

/// A finished Markdown document, ready to hand back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RenderedDocument {
    fn from(markdown: String) -> Self {
        Self(markdown)
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses `json_text` and requires a top-level object.
pub fn parse_object(json_text: &str) -> Result<Value, ResponseFormatError> {
    let value: Value = serde_json::from_str(json_text)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ResponseFormatError::NotAnObject)
    }
}

/// Python-style truthiness, used where the model may answer with `null`, `{}`, `[]` or `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Deserializes `T`, or `None` when the value has the wrong shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a score given either as a number or as a numeric string (`"85"`, `"85%"`).
/// Anything else is treated as absent.
pub fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok(),
        _ => None,
    };
    Ok(score.filter(|x| x.is_finite()))
}

/// Deserializes a list, dropping elements of the wrong shape.
/// Anything other than an array becomes an empty list.
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Formats an optional score the way the report shows it: `8`, `7.5`, or `N/A`.
pub fn score_or_na(score: Option<f64>) -> String {
    match score {
        Some(value) => value.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
