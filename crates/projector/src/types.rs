//! The type codec registry: a closed set of output types, each owning a
//! formatter. Rendered as an enum with a `format` method rather than a
//! function-pointer table -- no separate disposer is needed since the
//! formatted value's ownership is expressed directly in `FieldValue`.

use crate::error::{ConfigError, FormatError};
use crate::timestamp::parse_epoch_micros;
use serde_json::Value;

/// The formatted contents of one stored field, borrowed from the parsed
/// document where possible (`Text` over a JSON string) or freshly allocated
/// where the value must be re-rendered (`Timestamp`, or `Text` over any
/// non-string JSON value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'doc> {
    /// The located pointer did not resolve.
    Null,
    /// Borrowed directly from the parsed document; no allocation.
    Borrowed(&'doc [u8]),
    /// Freshly allocated by the formatter.
    Owned(Vec<u8>),
}

impl<'doc> FieldValue<'doc> {
    /// The bytes to write into the row, or None for the NULL sentinel.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Null => None,
            FieldValue::Borrowed(b) => Some(b),
            FieldValue::Owned(v) => Some(v),
        }
    }
}

/// Registry of output types. May grow; each variant owns its formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Text,
    Timestamp,
}

impl OutputType {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "text" => Ok(OutputType::Text),
            "timestamp" => Ok(OutputType::Timestamp),
            other => Err(ConfigError::UnknownOutputType(other.to_string())),
        }
    }

    /// Format a located, non-null value. Returns an error if the value
    /// can't be rendered as this output type (eg, a non-string timestamp).
    pub fn format<'doc>(&self, value: &'doc Value) -> Result<FieldValue<'doc>, FormatError> {
        match self {
            OutputType::Text => Ok(match value {
                Value::String(s) => FieldValue::Borrowed(s.as_bytes()),
                other => FieldValue::Owned(render_string(other).into_bytes()),
            }),
            OutputType::Timestamp => match value {
                Value::String(s) => {
                    let micros = parse_epoch_micros(s)?;
                    Ok(FieldValue::Owned(micros.to_be_bytes().to_vec()))
                }
                _ => Err(FormatError::NotAString),
            },
        }
    }
}

/// Coerce any JSON scalar or structural value to its string rendering, used
/// both by the text formatter (for non-string values) and by the `match`/
/// `substr` filters (for any value).
pub fn render_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).expect("serde_json::Value always serializes")
        }
    }
}
