//! The null family (`spec.md` §3: "zero bytes on the wire"), implemented
//! both for the unit type `()` and an explicit [`Null`] marker for callers
//! who want a named type rather than `()`.

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

/// A value carrying no data, encoding to zero bytes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Null;

impl Shape for Null {
    const FAMILY: Family = Family::Null;
    const ALIAS: &'static str = "null";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32);
    }

    fn static_size() -> Option<usize> {
        Some(0)
    }
}

impl Encode for Null {
    fn byte_size(&self) -> usize {
        0
    }

    fn encode<O: ByteOrder>(&self, _cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        Ok(())
    }
}

impl<'de> Decode<'de> for Null {
    fn validate<O: ByteOrder>(_cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        Ok(())
    }

    fn decode<O: ByteOrder>(_cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        Ok(Null)
    }
}

impl Print for Null {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_str("null")
    }
}

impl Shape for () {
    const FAMILY: Family = Family::Null;
    const ALIAS: &'static str = "unit";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32);
    }

    fn static_size() -> Option<usize> {
        Some(0)
    }
}

impl Encode for () {
    fn byte_size(&self) -> usize {
        0
    }

    fn encode<O: ByteOrder>(&self, _cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        Ok(())
    }
}

impl<'de> Decode<'de> for () {
    fn validate<O: ByteOrder>(_cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        Ok(())
    }

    fn decode<O: ByteOrder>(_cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        Ok(())
    }
}

impl Print for () {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_str("()")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_has_zero_static_size() {
        assert_eq!(<Null as Shape>::static_size(), Some(0));
        assert_eq!(<() as Shape>::static_size(), Some(0));
    }
}
