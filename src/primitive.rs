//! Primitive scalar families: `bool`, the signed/unsigned integers, the two
//! floating-point types, and `char` (`spec.md` §3, families "primitive" and
//! "char").
//!
//! Grounded on the teacher's per-primitive codec impls
//! (`src/integral/*`, `src/integer/internal.rs`), generalized here to also
//! fold each primitive's [`Family`] tag and bit width into its structural
//! hash, since the teacher has no fingerprinting concept to draw from for
//! that part.

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::{Error, Result};
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

macro_rules! impl_numeric {
    ($ty:ty, $family:expr, $alias:literal, write = $write:ident, read = $read:ident) => {
        impl Shape for $ty {
            const FAMILY: Family = $family;
            const ALIAS: &'static str = $alias;

            fn structural_hash(hasher: &mut StructuralHasher) {
                hasher.fold(Self::FAMILY as u32).fold(core::mem::size_of::<$ty>() as u32);
            }

            fn static_size() -> Option<usize> {
                Some(core::mem::size_of::<$ty>())
            }
        }

        impl Encode for $ty {
            fn byte_size(&self) -> usize {
                core::mem::size_of::<$ty>()
            }

            fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
                cursor.write_scalar(*self)
            }
        }

        impl<'de> Decode<'de> for $ty {
            fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
                cursor.advance(core::mem::size_of::<$ty>())
            }

            fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
                cursor.read_scalar()
            }
        }

        impl Print for $ty {
            fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
                sink.$write((*self).into())
            }
        }
    };
}

impl_numeric!(i8, Family::SignedInt, "i8", write = write_int, read = read_scalar);
impl_numeric!(i16, Family::SignedInt, "i16", write = write_int, read = read_scalar);
impl_numeric!(i32, Family::SignedInt, "i32", write = write_int, read = read_scalar);
impl_numeric!(i64, Family::SignedInt, "i64", write = write_int, read = read_scalar);

impl_numeric!(u8, Family::UnsignedInt, "u8", write = write_uint, read = read_scalar);
impl_numeric!(u16, Family::UnsignedInt, "u16", write = write_uint, read = read_scalar);
impl_numeric!(u32, Family::UnsignedInt, "u32", write = write_uint, read = read_scalar);
impl_numeric!(u64, Family::UnsignedInt, "u64", write = write_uint, read = read_scalar);

// i128/u128 and the floats don't convert losslessly via `Into`, so they get
// their own tiny bodies rather than going through `impl_numeric!`.

impl Shape for i128 {
    const FAMILY: Family = Family::SignedInt;
    const ALIAS: &'static str = "i128";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(16);
    }

    fn static_size() -> Option<usize> {
        Some(16)
    }
}

impl Encode for i128 {
    fn byte_size(&self) -> usize {
        16
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        cursor.write_scalar(*self)
    }
}

impl<'de> Decode<'de> for i128 {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        cursor.advance(16)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        cursor.read_scalar()
    }
}

impl Print for i128 {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_int(*self)
    }
}

impl Shape for u128 {
    const FAMILY: Family = Family::UnsignedInt;
    const ALIAS: &'static str = "u128";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(16);
    }

    fn static_size() -> Option<usize> {
        Some(16)
    }
}

impl Encode for u128 {
    fn byte_size(&self) -> usize {
        16
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        cursor.write_scalar(*self)
    }
}

impl<'de> Decode<'de> for u128 {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        cursor.advance(16)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        cursor.read_scalar()
    }
}

impl Print for u128 {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_uint(*self)
    }
}

macro_rules! impl_float {
    ($ty:ty, $alias:literal) => {
        impl Shape for $ty {
            const FAMILY: Family = Family::Float;
            const ALIAS: &'static str = $alias;

            fn structural_hash(hasher: &mut StructuralHasher) {
                hasher.fold(Self::FAMILY as u32).fold(core::mem::size_of::<$ty>() as u32);
            }

            fn static_size() -> Option<usize> {
                Some(core::mem::size_of::<$ty>())
            }
        }

        impl Encode for $ty {
            fn byte_size(&self) -> usize {
                core::mem::size_of::<$ty>()
            }

            fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
                cursor.write_scalar(*self)
            }
        }

        impl<'de> Decode<'de> for $ty {
            fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
                cursor.advance(core::mem::size_of::<$ty>())
            }

            fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
                cursor.read_scalar()
            }
        }

        impl Print for $ty {
            fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
                sink.write_float(*self as f64)
            }
        }
    };
}

impl_float!(f32, "f32");
impl_float!(f64, "f64");

impl Shape for bool {
    const FAMILY: Family = Family::Bool;
    const ALIAS: &'static str = "bool";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32);
    }

    fn static_size() -> Option<usize> {
        Some(1)
    }
}

impl Encode for bool {
    fn byte_size(&self) -> usize {
        1
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        cursor.write_scalar::<u8>(if *self { 1 } else { 0 })
    }
}

impl<'de> Decode<'de> for bool {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        cursor.advance(1)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        Ok(cursor.read_scalar::<u8>()? != 0)
    }
}

impl Print for bool {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_str(if *self { "true" } else { "false" })
    }
}

/// `char` is encoded as its 32-bit Unicode scalar value (`spec.md` §3's
/// "char" family: "character code units ... 32 bits").
impl Shape for char {
    const FAMILY: Family = Family::Char;
    const ALIAS: &'static str = "char";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(4);
    }

    fn static_size() -> Option<usize> {
        Some(4)
    }
}

impl Encode for char {
    fn byte_size(&self) -> usize {
        4
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        cursor.write_scalar(*self as u32)
    }
}

impl<'de> Decode<'de> for char {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        cursor.advance(4)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        let scalar = cursor.read_scalar::<u32>()?;
        char::from_u32(scalar).ok_or_else(Error::invalid_utf8)
    }
}

impl Print for char {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_char(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;
    use crate::hash::Fingerprint;

    #[test]
    fn same_width_different_family_hash_differently() {
        assert_ne!(Fingerprint::of::<u32>().structural_hash(), Fingerprint::of::<i32>().structural_hash());
        assert_ne!(Fingerprint::of::<u32>().structural_hash(), Fingerprint::of::<f32>().structural_hash());
    }

    #[test]
    fn bool_round_trips() {
        let mut buf = [0u8; 1];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            true.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(bool::decode(&mut r).unwrap(), true);
    }

    #[test]
    fn char_round_trips() {
        let mut buf = [0u8; 4];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            'é'.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(char::decode(&mut r).unwrap(), 'é');
    }
}
