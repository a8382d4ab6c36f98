//! The tracer (C7): schema-less inspection of a fingerprint-prefixed
//! payload.
//!
//! Unlike [`crate::parse`], [`trace`] does not require the caller to know
//! the payload's type in advance: it reads the fingerprint prefix, looks it
//! up in the [`crate::registry`], and drives that type's [`crate::Print`]
//! implementation against the caller's [`crate::Sink`]. Per `spec.md` §6,
//! tracing a payload the registry cannot resolve, or whose bytes are
//! malformed partway through, is a silent no-op: `trace` never panics and
//! never propagates an error, since it exists for best-effort diagnostic
//! output rather than a contract the caller should branch on.

use crate::config::{Codec, Limit};
use crate::cursor::ReadCursor;
use crate::endian::{BigEndian, Endian, LittleEndian};
use crate::registry;
use crate::sink::Sink;

/// Attempts to resolve `bytes`'s fingerprint prefix through the registry
/// and print the value it describes to `sink`, in the given byte order.
/// Any failure — an unresolvable fingerprint, a truncated payload, a sink
/// write failure — is swallowed silently. Any dynamic sequence/string
/// length the payload claims is bounded by [`Limit::default`].
pub fn trace<S: Sink>(bytes: &[u8], order: Endian, sink: &mut S) {
    let _ = match order {
        Endian::Little => trace_le(bytes, Limit::default(), sink),
        Endian::Big => trace_be(bytes, Limit::default(), sink),
    };
}

/// Like [`trace`], but takes its byte order and dynamic-length limit from
/// `codec` instead of defaulting the latter.
pub fn trace_with_codec<S: Sink>(bytes: &[u8], codec: Codec, sink: &mut S) {
    let _ = match codec.endian() {
        Endian::Little => trace_le(bytes, codec.limit(), sink),
        Endian::Big => trace_be(bytes, codec.limit(), sink),
    };
}

fn trace_le<S: Sink>(bytes: &[u8], limit: Limit, sink: &mut S) -> Option<()> {
    let mut cursor = ReadCursor::<LittleEndian>::with_limit(bytes, limit);
    let fingerprint = crate::decoder::peek_fingerprint::<LittleEndian>(bytes).ok()?;
    cursor.advance(8).ok()?;
    let entry = registry::find_by_fingerprint(fingerprint.to_bits())
        .or_else(|| registry::find_by_structural_hash(fingerprint.structural_hash()))?;
    entry.decode_and_print_le(&mut cursor, sink).ok()
}

fn trace_be<S: Sink>(bytes: &[u8], limit: Limit, sink: &mut S) -> Option<()> {
    let mut cursor = ReadCursor::<BigEndian>::with_limit(bytes, limit);
    let fingerprint = crate::decoder::peek_fingerprint::<BigEndian>(bytes).ok()?;
    cursor.advance(8).ok()?;
    let entry = registry::find_by_fingerprint(fingerprint.to_bits())
        .or_else(|| registry::find_by_structural_hash(fingerprint.structural_hash()))?;
    entry.decode_and_print_be(&mut cursor, sink).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_on_unresolvable_fingerprint_is_a_silent_noop() {
        let bytes = [0u8; 16];
        let mut out = String::new();
        trace(&bytes, Endian::Little, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn trace_on_truncated_payload_is_a_silent_noop() {
        let bytes = [0u8; 4];
        let mut out = String::new();
        trace(&bytes, Endian::Little, &mut out);
        assert!(out.is_empty());
    }
}
