//! The row serializer: a length-prefixed binary row compatible
//! with the downstream binary COPY protocol. A single growable buffer
//! (`bytes::BytesMut`) with amortized-doubling growth, not hand-rolled
//! reallocation.

use crate::types::FieldValue;
use bytes::{BufMut, BytesMut};

/// The `0xFFFFFFFF` sentinel the downstream store reads as NULL.
pub const NULL_SENTINEL: u32 = 0xFFFF_FFFF;

/// Serialize one row: a 16-bit field count followed by each stored
/// field's `(length, bytes)` in `NeedleSet` order. `values` must already
/// be filtered down to stored needles only, in declared order, and its
/// length must equal the compile-time `fields_count`.
pub fn serialize_row(fields_count: u16, values: &[FieldValue]) -> Vec<u8> {
    debug_assert_eq!(values.len(), fields_count as usize);

    let mut buf = BytesMut::with_capacity(2 + values.len() * 8);
    buf.put_u16(fields_count);
    for value in values {
        match value.as_bytes() {
            None => buf.put_u32(NULL_SENTINEL),
            Some(bytes) => {
                buf.put_u32(bytes.len() as u32);
                buf.put_slice(bytes);
            }
        }
    }
    buf.to_vec()
}
