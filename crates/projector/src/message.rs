//! The message contract: the external collaborator
//! the evaluator reads from and writes into. Specified only at its
//! interface boundary -- the producer/consumer plumbing that implements
//! it is out of scope.

use std::collections::HashMap;

/// A metadata datum. Closed to `String` for now; the type tag mirrors the
/// downstream store's STRING-typed datum convention and leaves room to
/// grow the same way the type/action/filter registries do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    String(String),
}

/// The well-known metadata key every `store_meta` needle publishes under.
/// Multiple needles collide here; last-writer-wins.
pub const METADATA_KEY: &str = "jpointer";

pub type MetadataMap = HashMap<String, MetadataValue>;

/// The external message the projector hook reads from and writes into.
/// Rendered as a trait so the evaluator is decoupled from any specific
/// producer/consumer plumbing; a real pipeline implements this over its
/// own message type.
pub trait Message {
    /// The message's current payload. MUST be nul-terminated at
    /// `self.data().len()` -- i.e. `self.data()` never includes the
    /// terminator itself, but one more byte is allocated and zeroed past
    /// it. `nul_terminated` below is what the evaluator actually checks.
    fn data(&self) -> &[u8];

    /// Whether the payload honors the producer's nul-termination
    /// contract. The in-memory representation of this
    /// check is left to the implementation -- a `Vec<u8>`-backed message
    /// can simply always answer `true` by construction.
    fn nul_terminated(&self) -> bool;

    /// Replace the payload. Takes ownership of the new buffer; the prior
    /// buffer is dropped by the implementation, matching "the hook
    /// becomes the owner of the prior data buffer and releases it".
    fn set_data(&mut self, data: Vec<u8>);

    /// The message's metadata map, for `store_meta` publication.
    fn metadata_mut(&mut self) -> &mut MetadataMap;
}

/// A minimal `Message` over an owned `Vec<u8>`, used by tests and by any
/// host that doesn't need a custom representation.
#[derive(Debug, Clone, Default)]
pub struct OwnedMessage {
    data: Vec<u8>,
    metadata: MetadataMap,
}

impl OwnedMessage {
    /// Build a message whose payload is `data`, nul-terminating it as
    /// required by the producer contract.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        OwnedMessage {
            data: data.into(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }
}

impl Message for OwnedMessage {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn nul_terminated(&self) -> bool {
        true
    }

    fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    fn metadata_mut(&mut self) -> &mut MetadataMap {
        &mut self.metadata
    }
}
