use thiserror::Error;

/// Errors raised while validating or compiling a configuration. Fatal to
/// startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("jpointer entry has an empty pointer")]
    EmptyPointer,
    #[error("unknown output type {0:?}")]
    UnknownOutputType(String),
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
    #[error("filter {filter:?} requires a non-empty data argument")]
    MissingFilterArg { filter: String },
    #[error("positional array must have between 1 and 5 elements, found {0}")]
    InvalidPositionalLength(usize),
}

/// Errors raised while formatting a located value for a specific output
/// type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error(transparent)]
    Timestamp(#[from] crate::timestamp::TimestampError),
    #[error("value is not a JSON string")]
    NotAString,
}

/// Errors raised while evaluating the NeedleSet against one message: a
/// contract violation (not nul-terminated, JSON parse failure) or a
/// per-field format error. Both are logged by the caller and treated as
/// a drop.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("message payload is not nul-terminated at the declared length")]
    NotNulTerminated,
    #[error("failed to parse message payload as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to format field: {0}")]
    Format(#[from] FormatError),
}
