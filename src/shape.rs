//! Per-type-family operations (C2): the seven-operation contract `spec.md`
//! §4.2 describes, split across three traits so ordinary Rust trait bounds
//! (rather than an abstract vtable) pick the right implementation for each
//! of the eleven supported type families.
//!
//! - [`Shape`] carries the type-level metadata: its family tag, its
//!   canonical alias, and how it folds into a structural hash. Every
//!   encodable/decodable type implements this.
//! - [`Encode`] is the value-level write side: `byte_size` + `encode`.
//! - [`Decode`] is the value-level read side, split into the two-pass
//!   `validate`/`decode` scheme from `spec.md` §4.6: `validate` walks the
//!   payload confirming every claimed length fits before anything is
//!   allocated, `decode` then performs the actual reads and constructs the
//!   value. This is the idiomatic-Rust reading of the original's `init`
//!   pass, which resizes a value's dynamic sub-parts in place before a
//!   second pass fills them in — Rust values are built by construction
//!   rather than resized in place, so the first pass here validates instead
//!   of sizing, but it exists for the same reason: never run off the end of
//!   a truncated or hostile payload while looking at a length prefix.

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::hash::StructuralHasher;

/// Internal family tag folded into a type's structural hash, distinguishing
/// otherwise-identical shapes (e.g. a `u32` from an `f32` of the same
/// width). Values are stable for the lifetime of the crate's major version:
/// they are part of the wire-compatible fingerprint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Family {
    Null = 0,
    Bool = 1,
    SignedInt = 2,
    UnsignedInt = 3,
    Float = 4,
    Char = 5,
    Enum = 6,
    FixedArray = 7,
    Sequence = 8,
    Utf8String = 9,
    Utf16String = 10,
    Bitset = 11,
    Tuple = 12,
    Aggregate = 13,
    TimePoint = 14,
    Duration = 15,
    Complex = 16,
}

/// Type-level metadata shared by every family `structwire` supports.
///
/// `structural_hash` must fold at least one value distinguishing this
/// type's family from the others (a [`Family`] tag, in almost every
/// implementation here) before folding in any nested child hashes, and must
/// consult [`StructuralHasher::depth_exhausted`] before recursing into a
/// child's `structural_hash` — see `spec.md` §3's nesting-depth invariant.
pub trait Shape: Sized {
    /// This type's internal family tag.
    const FAMILY: Family;

    /// Canonical, case-sensitive textual name used for the alias hash.
    /// Unique within a single build's [`crate::registry`].
    const ALIAS: &'static str;

    /// Folds this type's structural shape into `hasher`.
    fn structural_hash(hasher: &mut StructuralHasher);

    /// The exact byte size of every value of this type, if the type is
    /// fixed-size (contains no dynamic sequences, strings, or nested
    /// dynamic fields). `None` for dynamically sized types.
    fn static_size() -> Option<usize> {
        None
    }

    /// This type's fingerprint: `(alias_hash << 32) | structural_hash`.
    fn fingerprint() -> crate::hash::Fingerprint {
        crate::hash::Fingerprint::of::<Self>()
    }
}

/// The write side of the C2 contract.
pub trait Encode: Shape {
    /// Exact number of bytes `self` will occupy on the wire, exclusive of
    /// the 8-byte fingerprint prefix [`crate::encoder::serialize`] adds.
    fn byte_size(&self) -> usize;

    /// Writes `self`'s bytes starting at `cursor`'s current position,
    /// advancing it by exactly `self.byte_size()`.
    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()>;
}

/// The read side of the C2 contract, split into the two-pass scheme
/// described in the module docs above.
pub trait Decode<'de>: Shape {
    /// First pass: walks the payload starting at `cursor`'s current
    /// position, confirming every length this type (or a nested field of
    /// it) claims actually fits within the remaining bytes, and advancing
    /// `cursor` to just past the region this value will occupy. Performs no
    /// allocation and constructs no value.
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()>;

    /// Second pass: reads `cursor`'s bytes and constructs `Self`. Only
    /// called after [`Decode::validate`] has already confirmed the region
    /// is well-formed and in-bounds for this exact type.
    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self>;
}
