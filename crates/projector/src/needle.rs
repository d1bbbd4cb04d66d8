//! The needle compiler: turns normalized 5-tuples into a compiled,
//! immutable `NeedleSet` that the evaluator walks once per message.

use crate::action::Action;
use crate::config::NormalizedEntry;
use crate::error::ConfigError;
use crate::filter::Filter;
use crate::ptr::Pointer;
use crate::types::OutputType;

/// One compiled extraction rule. Immutable after construction; shared
/// read-only across every message a `Projector` handles.
#[derive(Debug, Clone)]
pub struct Needle {
    pub pointer: Pointer,
    pub output_type: OutputType,
    pub action: Action,
    pub filter: Filter,
    pub filter_arg: String,
}

impl Needle {
    /// True iff this needle can contribute an output field. A static
    /// property of its action, independent of any per-message outcome.
    pub fn stored(&self) -> bool {
        self.action.stored()
    }
}

/// The ordered, compiled list of needles. Order is authoritative: it
/// fixes the column order of every emitted row. Immutable after
/// `compile`; `Send + Sync` by construction (every field is owned data),
/// so a `Projector` may be shared across worker threads without locking.
#[derive(Debug, Clone)]
pub struct NeedleSet {
    needles: Vec<Needle>,
    fields_count: u16,
}

impl NeedleSet {
    /// Compile a normalized configuration into a `NeedleSet`. Each tuple
    /// becomes exactly one needle; `fields_count` is fixed here and never
    /// recomputed per message.
    pub fn compile(entries: &[NormalizedEntry]) -> Result<NeedleSet, ConfigError> {
        let mut needles = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.jpointer.is_empty() {
                return Err(ConfigError::EmptyPointer);
            }
            let output_type = OutputType::parse(&entry.pqtype)?;
            let action = Action::parse(&entry.action)?;
            let filter = Filter::parse(&entry.filter)?;
            if filter.requires_arg() && entry.data.is_empty() {
                return Err(ConfigError::MissingFilterArg {
                    filter: entry.filter.clone(),
                });
            }
            needles.push(Needle {
                pointer: Pointer::parse(&entry.jpointer),
                output_type,
                action,
                // Filter argument is owned by the needle only when the
                // filter actually requires one.
                filter_arg: if filter.requires_arg() {
                    entry.data.clone()
                } else {
                    String::new()
                },
                filter,
            });
        }
        let fields_count = needles.iter().filter(|n| n.stored()).count() as u16;
        Ok(NeedleSet {
            needles,
            fields_count,
        })
    }

    pub fn needles(&self) -> &[Needle] {
        &self.needles
    }

    /// The compile-time stored-field count, written verbatim into every
    /// row header regardless of how many needles resolve at runtime.
    pub fn fields_count(&self) -> u16 {
        self.fields_count
    }
}
