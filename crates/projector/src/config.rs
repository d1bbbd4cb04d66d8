//! Configuration surface and normalizer. Accepts the three
//! user-facing shapes and rewrites them into a uniform 5-tuple consumed
//! by the needle compiler.

use crate::error::ConfigError;
use serde::Deserialize;

/// One entry of the `jpointers` configuration list, in any of the three
/// shapes a user may write. Untagged `serde` deserialization picks the
/// first variant that matches the JSON shape, deserializing heterogeneous
/// configuration JSON straight into a typed Rust enum ahead of further
/// processing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum JPointerEntry {
    /// A bare pointer string: `"/a/b"`.
    Bare(String),
    /// A positional array of 1-5 strings: `[jpointer, pqtype, action, filter, data]`.
    Positional(Vec<String>),
    /// A group/object form with named keys.
    Group {
        jpointer: String,
        #[serde(default)]
        pqtype: Option<String>,
        #[serde(default)]
        action: Option<String>,
        #[serde(default)]
        filter: Option<String>,
        #[serde(default)]
        data: Option<String>,
    },
}

/// The top-level configuration surface.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectorConfig {
    pub jpointers: Vec<JPointerEntry>,
}

/// A canonical 5-tuple, normalized from any of the three accepted shapes.
/// This is the sole input type the needle compiler accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub jpointer: String,
    pub pqtype: String,
    pub action: String,
    pub filter: String,
    pub data: String,
}

const DEFAULT_PQTYPE: &str = "text";
const DEFAULT_ACTION: &str = "store";
const DEFAULT_FILTER: &str = "noop";

impl JPointerEntry {
    /// Normalize this entry into the canonical 5-tuple, applying defaults
    /// for omitted fields. Does not yet validate enum values or the
    /// match/substr `data` requirement -- that happens in
    /// `normalize_all`, once every entry has been shaped uniformly.
    fn normalize(&self) -> Result<NormalizedEntry, ConfigError> {
        let entry = match self {
            JPointerEntry::Bare(jpointer) => NormalizedEntry {
                jpointer: jpointer.clone(),
                pqtype: DEFAULT_PQTYPE.to_string(),
                action: DEFAULT_ACTION.to_string(),
                filter: DEFAULT_FILTER.to_string(),
                data: String::new(),
            },
            JPointerEntry::Positional(fields) => {
                if fields.is_empty() || fields.len() > 5 {
                    return Err(ConfigError::InvalidPositionalLength(fields.len()));
                }
                let get = |i: usize, default: &str| {
                    fields.get(i).cloned().unwrap_or_else(|| default.to_string())
                };
                NormalizedEntry {
                    jpointer: fields[0].clone(),
                    pqtype: get(1, DEFAULT_PQTYPE),
                    action: get(2, DEFAULT_ACTION),
                    filter: get(3, DEFAULT_FILTER),
                    data: get(4, ""),
                }
            }
            JPointerEntry::Group {
                jpointer,
                pqtype,
                action,
                filter,
                data,
            } => NormalizedEntry {
                jpointer: jpointer.clone(),
                pqtype: pqtype.clone().unwrap_or_else(|| DEFAULT_PQTYPE.to_string()),
                action: action.clone().unwrap_or_else(|| DEFAULT_ACTION.to_string()),
                filter: filter.clone().unwrap_or_else(|| DEFAULT_FILTER.to_string()),
                data: data.clone().unwrap_or_default(),
            },
        };
        Ok(entry)
    }
}

/// Normalize and validate every entry of a configuration. Rejects
/// unknown enum values, empty pointers, wrong shapes, and a missing
/// `data` argument where the chosen filter requires one. This is the
/// whole of `Projector::validate`'s work.
pub fn normalize_all(config: &ProjectorConfig) -> Result<Vec<NormalizedEntry>, ConfigError> {
    config
        .jpointers
        .iter()
        .map(|entry| {
            let normalized = entry.normalize()?;
            validate_entry(&normalized)?;
            Ok(normalized)
        })
        .collect()
}

fn validate_entry(entry: &NormalizedEntry) -> Result<(), ConfigError> {
    if entry.jpointer.is_empty() {
        return Err(ConfigError::EmptyPointer);
    }
    crate::types::OutputType::parse(&entry.pqtype)?;
    crate::action::Action::parse(&entry.action)?;
    let filter = crate::filter::Filter::parse(&entry.filter)?;
    if filter.requires_arg() && entry.data.is_empty() {
        return Err(ConfigError::MissingFilterArg {
            filter: entry.filter.clone(),
        });
    }
    Ok(())
}
