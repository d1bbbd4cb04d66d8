//! The JSON projection and binary row-encoding hook.
//!
//! Drives a declarative extraction language (JSON Pointer paths paired
//! with type, action, and filter policies) over arbitrary JSON documents,
//! applies filtering and control-flow decisions that may drop a message,
//! normalizes scalar types, and emits a length-prefixed big-endian binary
//! row compatible with a downstream binary COPY protocol.
//!
//! The hook contract is three calls: [`Projector::validate`] normalizes
//! and checks a [`ProjectorConfig`], [`Projector::init`] compiles it into
//! a [`Projector`], and [`Projector::handle`] evaluates one [`Message`].

pub mod action;
pub mod config;
pub mod error;
pub mod filter;
pub mod message;
pub mod needle;
pub mod ptr;
pub mod row;
pub mod timestamp;
pub mod types;

use config::{normalize_all, ProjectorConfig};
use error::{ConfigError, EvalError};
use message::{Message, MetadataValue, METADATA_KEY};
use needle::NeedleSet;
use types::FieldValue;

/// The outcome of evaluating one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The message's payload was replaced with a binary row.
    Keep,
    /// A filter+action decision discarded this message; the payload is
    /// untouched. Not an error.
    Drop,
}

/// The compiled hook. Immutable after [`Projector::init`]; `Send + Sync`
/// so a single instance may be shared across worker threads and called
/// concurrently, one invocation per message, with no internal locking
/// needed.
#[derive(Debug, Clone)]
pub struct Projector {
    needles: NeedleSet,
}

impl Projector {
    /// Pure configuration check: normalizes the three accepted
    /// shapes into canonical 5-tuples and validates every enum value and
    /// the match/substr `data` requirement. Mutates `config` in place to
    /// its normalized form, matching the hook contract's "mutates the
    /// config object only to normalize shapes".
    pub fn validate(config: &mut ProjectorConfig) -> Result<(), ConfigError> {
        let normalized = normalize_all(config)?;
        // Re-serialize the canonical shapes back as group entries so a
        // second call to `validate` is idempotent.
        config.jpointers = normalized
            .into_iter()
            .map(|e| config::JPointerEntry::Group {
                jpointer: e.jpointer,
                pqtype: Some(e.pqtype),
                action: Some(e.action),
                filter: Some(e.filter),
                data: Some(e.data),
            })
            .collect();
        Ok(())
    }

    /// Compile the configuration into a `Projector`. Fatal to startup on
    /// error.
    pub fn init(config: &ProjectorConfig) -> Result<Projector, ConfigError> {
        let normalized = normalize_all(config)?;
        let needles = NeedleSet::compile(&normalized)?;
        tracing::info!(
            needle_count = needles.needles().len(),
            fields_count = needles.fields_count(),
            "compiled projector needle set",
        );
        Ok(Projector { needles })
    }

    /// Evaluate one message: parse, walk the needle set in
    /// declared order, and either replace the payload with a binary row
    /// (`Keep`), leave it untouched (`Drop`), or report a per-message
    /// error (`Err`) for the caller to log and treat as a drop.
    pub fn handle(&self, message: &mut dyn Message) -> Result<Outcome, EvalError> {
        if !message.nul_terminated() {
            tracing::warn!("message payload is not nul-terminated");
            return Err(EvalError::NotNulTerminated);
        }

        let doc: serde_json::Value = serde_json::from_slice(message.data()).map_err(|err| {
            tracing::warn!(%err, "failed to parse message payload as JSON");
            err
        })?;

        // Per-message scratch: a stack-local vec of formatted stored
        // values plus the subset flagged for metadata publication. Both
        // drop naturally at the end of this call; there is no explicit
        // release bookkeeping to perform.
        let mut stored_values: Vec<FieldValue<'_>> =
            Vec::with_capacity(self.needles.fields_count() as usize);
        let mut meta_updates: Vec<String> = Vec::new();

        for needle in self.needles.needles() {
            let located = needle.pointer.query(&doc);
            let filter_result = needle.filter.apply(located, &needle.filter_arg);

            if !needle.action.keep(filter_result) {
                tracing::debug!(pointer = %needle.pointer, "message dropped by filter/action");
                return Ok(Outcome::Drop);
            }

            if !needle.stored() {
                continue;
            }

            let value = match located {
                None => FieldValue::Null,
                Some(value) => needle.output_type.format(value).map_err(|err| {
                    tracing::warn!(pointer = %needle.pointer, %err, "failed to format field");
                    err
                })?,
            };

            if needle.action.publishes_metadata() {
                if let Some(bytes) = value.as_bytes() {
                    meta_updates.push(String::from_utf8_lossy(bytes).into_owned());
                }
            }

            stored_values.push(value);
        }

        let row = row::serialize_row(self.needles.fields_count(), &stored_values);

        // Last-writer-wins across every store_meta needle that produced a
        // non-null value, in NeedleSet iteration order.
        for rendered in meta_updates {
            message
                .metadata_mut()
                .insert(METADATA_KEY.to_string(), MetadataValue::String(rendered));
        }

        message.set_data(row);
        tracing::debug!("message kept");
        Ok(Outcome::Keep)
    }
}
