//! Fixed arrays and dynamic sequences (`spec.md` §3, families "fixed array"
//! and "dynamic sequence").
//!
//! A fixed array `[T; N]` carries its length in the type itself, so the
//! wire format has no length prefix: `N` copies of `T` back to back. A
//! dynamic sequence (`Vec<T>`) is length-prefixed with a `u32`, matching
//! `spec.md` §6's wire table ("sequence = u32 length + elements"); the
//! teacher has no equivalent dynamic-sequence wire format to draw from, so
//! this is grounded directly on `spec.md` §6 and `original_source/`'s
//! length-prefixed `serial_vector.h` convention, expressed through the C2
//! traits. The length prefix is checked against the decoding
//! [`ReadCursor`]'s configured limit (see [`ReadCursor::check_len`]) before
//! any element is validated or decoded, so a hostile length does not reach
//! `Vec::with_capacity` before the rest of the payload has been confirmed
//! to actually contain that many elements.

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::{Error, Result};
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

impl<T: Shape, const N: usize> Shape for [T; N] {
    const FAMILY: Family = Family::FixedArray;
    const ALIAS: &'static str = "array";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(N as u32);
        hasher.nested(|h| T::structural_hash(h));
    }

    fn static_size() -> Option<usize> {
        T::static_size().map(|size| size * N)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn byte_size(&self) -> usize {
        self.iter().map(Encode::byte_size).sum()
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        for item in self {
            item.encode(cursor)?;
        }
        Ok(())
    }
}

impl<'de, T: Decode<'de>, const N: usize> Decode<'de> for [T; N] {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        for _ in 0..N {
            T::validate(cursor)?;
        }
        Ok(())
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        // `validate` has already confirmed every element fits, so building
        // the array element-by-element and bailing through `?` on an
        // internal decode failure (which should be unreachable given a
        // prior successful validate) is acceptable here: there is no
        // uninitialized memory exposed on an early return, only a dropped
        // partial `Vec` collected below.
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(cursor)?);
        }
        match items.try_into() {
            Ok(array) => Ok(array),
            Err(_) => unreachable!("validated fixed array must decode exactly N elements"),
        }
    }
}

impl<T: Print, const N: usize> Print for [T; N] {
    fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()> {
        sink.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                sink.write_str(", ")?;
            }
            item.print(sink, indent + 1)?;
        }
        sink.write_str("]")
    }
}

/// Maximum element count a sequence length prefix can express (`spec.md`
/// §6's `ArrayOverflow` error: "a dynamic sequence or string length would
/// not fit in the 4-byte unsigned length prefix").
const MAX_SEQUENCE_LEN: u64 = u32::MAX as u64;

impl<T: Shape> Shape for Vec<T> {
    const FAMILY: Family = Family::Sequence;
    const ALIAS: &'static str = "sequence";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32);
        hasher.nested(|h| T::structural_hash(h));
    }

    fn static_size() -> Option<usize> {
        None
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn byte_size(&self) -> usize {
        4 + self.iter().map(Encode::byte_size).sum::<usize>()
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        if self.len() as u64 > MAX_SEQUENCE_LEN {
            return Err(Error::array_overflow(self.len() as u64));
        }
        cursor.write_scalar(self.len() as u32)?;
        for item in self {
            item.encode(cursor)?;
        }
        Ok(())
    }
}

impl<'de, T: Decode<'de>> Decode<'de> for Vec<T> {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        let len = cursor.read_scalar::<u32>()?;
        cursor.check_len(len as u64)?;
        for _ in 0..len {
            T::validate(cursor)?;
        }
        Ok(())
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        let len = cursor.read_scalar::<u32>()?;
        cursor.check_len(len as u64)?;
        let mut items = Vec::with_capacity(len as usize);
        for _ in 0..len {
            items.push(T::decode(cursor)?);
        }
        Ok(items)
    }
}

impl<T: Print> Print for Vec<T> {
    fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()> {
        sink.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                sink.write_str(", ")?;
            }
            item.print(sink, indent + 1)?;
        }
        sink.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn fixed_array_has_static_size() {
        assert_eq!(<[u32; 4] as Shape>::static_size(), Some(16));
    }

    #[test]
    fn sequence_has_no_static_size() {
        assert_eq!(<Vec<u32> as Shape>::static_size(), None);
    }

    #[test]
    fn sequence_round_trips() {
        let values: Vec<u16> = vec![1, 2, 3];
        let mut buf = vec![0u8; values.byte_size()];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            values.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        Vec::<u16>::validate(&mut ReadCursor::<LittleEndian>::new(&buf)).unwrap();
        assert_eq!(Vec::<u16>::decode(&mut r).unwrap(), values);
    }

    /// A claimed length past the cursor's configured limit is rejected
    /// before `Vec::with_capacity` ever sees it, whether or not the bytes
    /// backing that many elements are actually present.
    #[test]
    fn oversized_length_prefix_is_rejected_before_allocating() {
        use crate::config::Limit;

        let mut buf = [0u8; 4];
        WriteCursor::<LittleEndian>::new(&mut buf).write_scalar(u32::MAX).unwrap();

        let mut r = ReadCursor::<LittleEndian>::with_limit(&buf, Limit::new(16));
        assert!(Vec::<u8>::validate(&mut r).is_err());

        let mut r = ReadCursor::<LittleEndian>::with_limit(&buf, Limit::new(16));
        assert!(Vec::<u8>::decode(&mut r).is_err());
    }

    #[test]
    fn fixed_array_round_trips() {
        let values: [u8; 3] = [9, 8, 7];
        let mut buf = [0u8; 3];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            values.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(<[u8; 3]>::decode(&mut r).unwrap(), values);
    }
}
