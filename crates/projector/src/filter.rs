//! The filter registry: a closed set of named predicates over a located
//! JSON value, dispatched via a `match` rather than a function-pointer
//! table (same rendering choice as `OutputType` and `Action`).

use crate::error::ConfigError;
use crate::types::render_string;
use serde_json::Value;

/// Registry of filter predicates. Filters never raise; a false result is
/// valid input to the action that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Always true.
    Noop,
    /// True iff the pointer resolved.
    Exists,
    /// True iff the pointer resolved and its string rendering equals
    /// `filter_arg` byte-for-byte.
    Match,
    /// True iff the pointer resolved and `filter_arg` occurs as a
    /// substring of its string rendering.
    Substr,
}

impl Filter {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "noop" => Ok(Filter::Noop),
            "exists" => Ok(Filter::Exists),
            "match" => Ok(Filter::Match),
            "substr" => Ok(Filter::Substr),
            other => Err(ConfigError::UnknownFilter(other.to_string())),
        }
    }

    /// Does this filter require a non-empty `filter_arg`?
    pub fn requires_arg(&self) -> bool {
        matches!(self, Filter::Match | Filter::Substr)
    }

    /// Apply the filter to a located value. `value` is None iff the
    /// pointer did not resolve.
    pub fn apply(&self, value: Option<&Value>, filter_arg: &str) -> bool {
        match self {
            Filter::Noop => true,
            Filter::Exists => value.is_some(),
            Filter::Match => value
                .map(|v| render_string(v) == filter_arg)
                .unwrap_or(false),
            Filter::Substr => value
                .map(|v| render_string(v).contains(filter_arg))
                .unwrap_or(false),
        }
    }
}
