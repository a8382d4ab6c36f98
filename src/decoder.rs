//! The decoder (C6): the two-pass validate/decode scheme plus the
//! fingerprint compatibility check `spec.md` §6's error taxonomy describes.
//!
//! A payload is accepted in one of three ways:
//!
//! 1. Its fingerprint matches the expected type's fingerprint exactly.
//! 2. Its alias hash differs but its structural hash matches *and* that
//!    structural hash belongs to some type the registry actually knows
//!    about: the type was renamed but its shape did not change. This is the
//!    "restrictive, top-level only" structural fallback from `spec.md` §9
//!    Open Question (a) — `spec.md` §8 boundary scenario 3 requires the
//!    match to be found "in the registry", not merely computed against the
//!    expected type in isolation.
//! 3. Neither: rejected, as either [`crate::Error::binary_incompatible`]
//!    (same alias, different shape — a real incompatible change) or
//!    [`crate::Error::layout_incompatible`] (neither alias nor structure
//!    match — an unrelated type).

use crate::config::Limit;
use crate::cursor::ReadCursor;
use crate::endian::ByteOrder;
use crate::error::{Error, Result};
use crate::hash::Fingerprint;
use crate::registry;
use crate::shape::{Decode, Shape};

fn check_compatible<T: Shape>(payload: Fingerprint) -> Result<()> {
    let expected = T::fingerprint();
    if payload.to_bits() == expected.to_bits() {
        return Ok(());
    }
    if payload.alias_hash() == expected.alias_hash() {
        return Err(Error::binary_incompatible(payload.to_bits()));
    }
    if payload.structural_hash() == expected.structural_hash()
        && registry::find_by_structural_hash(payload.structural_hash()).is_some()
    {
        return Ok(());
    }
    Err(Error::layout_incompatible(payload.to_bits()))
}

/// Reads a fingerprint-prefixed payload and reconstructs a `T`, bounding any
/// dynamic sequence/string length it contains by [`Limit::default`].
///
/// Runs [`Decode::validate`] against a throwaway copy of the cursor before
/// [`Decode::decode`] touches the bytes, so a truncated or hostile payload
/// is rejected before any allocation happens for its dynamic parts.
pub fn parse<T, O>(bytes: &[u8]) -> Result<T>
where
    T: Shape + for<'de> Decode<'de>,
    O: ByteOrder,
{
    parse_with_limit::<T, O>(bytes, Limit::default())
}

/// Like [`parse`], but bounds any dynamic sequence/string length the
/// payload claims by `limit` instead of [`Limit::default`] — the
/// [`crate::config::Codec`]-configurable guard against a hostile length
/// prefix that `spec.md` §6 describes.
pub fn parse_with_limit<T, O>(bytes: &[u8], limit: Limit) -> Result<T>
where
    T: Shape + for<'de> Decode<'de>,
    O: ByteOrder,
{
    let mut cursor = ReadCursor::<O>::with_limit(bytes, limit);
    let fingerprint = Fingerprint::from_bits(cursor.read_scalar::<u64>()?);
    check_compatible::<T>(fingerprint)?;

    let mut validation_pass = cursor;
    T::validate(&mut validation_pass)?;
    T::decode(&mut cursor)
}

/// Like [`parse`], but writes the result into `out` instead of returning a
/// fresh value. `out` is only overwritten once decoding has fully
/// succeeded.
pub fn parse_into<T, O>(bytes: &[u8], out: &mut T) -> Result<()>
where
    T: Shape + for<'de> Decode<'de>,
    O: ByteOrder,
{
    *out = parse::<T, O>(bytes)?;
    Ok(())
}

/// Reads just the 8-byte fingerprint prefix from `bytes` without decoding
/// the rest of the payload. Used by [`crate::trace`] to resolve a payload's
/// type through the registry before a concrete `T` is known.
pub fn peek_fingerprint<O: ByteOrder>(bytes: &[u8]) -> Result<Fingerprint> {
    let mut cursor = ReadCursor::<O>::new(bytes);
    Ok(Fingerprint::from_bits(cursor.read_scalar::<u64>()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::serialize;
    use crate::endian::LittleEndian;

    #[test]
    fn round_trips_a_primitive() {
        let buf = serialize::<u32, LittleEndian>(&99).unwrap();
        assert_eq!(parse::<u32, LittleEndian>(&buf).unwrap(), 99);
    }

    #[test]
    fn truncated_payload_is_rejected_before_decode() {
        let mut buf = serialize::<Vec<u32>, LittleEndian>(&vec![1, 2, 3]).unwrap();
        buf.truncate(buf.len() - 1);
        assert!(parse::<Vec<u32>, LittleEndian>(&buf).is_err());
    }

    #[test]
    fn mismatched_fingerprint_is_layout_incompatible() {
        let buf = serialize::<u32, LittleEndian>(&1).unwrap();
        let err = parse::<f32, LittleEndian>(&buf).unwrap_err();
        assert!(err.fingerprint().is_some());
    }

    #[test]
    fn parse_with_limit_rejects_an_oversized_sequence_length() {
        use crate::config::Limit;

        let buf = serialize::<Vec<u32>, LittleEndian>(&vec![1, 2, 3, 4]).unwrap();
        assert!(parse::<Vec<u32>, LittleEndian>(&buf).is_ok());
        assert!(parse_with_limit::<Vec<u32>, LittleEndian>(&buf, Limit::new(2)).is_err());
    }

    #[test]
    fn peek_fingerprint_does_not_consume_the_payload() {
        let buf = serialize::<u32, LittleEndian>(&5).unwrap();
        let fp = peek_fingerprint::<LittleEndian>(&buf).unwrap();
        assert_eq!(fp, u32::fingerprint());
        // the full payload is still parseable afterwards
        assert_eq!(parse::<u32, LittleEndian>(&buf).unwrap(), 5);
    }

    /// A colliding structural hash alone is not enough for the fallback:
    /// `FakeU32` never submits itself to the registry (only
    /// `#[derive(Record)]` types do), so even though its structural hash is
    /// identical to `u32`'s, a `u32` payload must not be accepted as a
    /// `FakeU32` — `spec.md` §8 boundary scenario 3 requires the match to be
    /// found in the registry, not merely computed against the expected type.
    struct FakeU32;

    impl Shape for FakeU32 {
        const FAMILY: crate::shape::Family = crate::shape::Family::UnsignedInt;
        const ALIAS: &'static str = "fake_u32";

        fn structural_hash(hasher: &mut crate::hash::StructuralHasher) {
            hasher.fold(Self::FAMILY as u32).fold(4);
        }
    }

    impl<'de> Decode<'de> for FakeU32 {
        fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
            u32::validate::<O>(cursor)
        }

        fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
            u32::decode::<O>(cursor)?;
            Ok(FakeU32)
        }
    }

    #[test]
    fn structural_match_requires_registry_membership() {
        let buf = serialize::<u32, LittleEndian>(&7).unwrap();
        let err = parse::<FakeU32, LittleEndian>(&buf).unwrap_err();
        assert!(err.fingerprint().is_some());
    }
}
