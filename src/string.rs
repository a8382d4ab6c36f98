//! String families (`spec.md` §3 "string": "character code units ... 8/16/32
//! bits").
//!
//! `String` covers the 8-bit case directly. [`Utf16String`] supplements it
//! with the 16-bit case the reference implementation (`paralogi/memserial`)
//! keeps as a distinct metatype (`wstring`/`u16string`), which the
//! distilled spec folds into one family but does not forbid splitting back
//! out. Both are length-prefixed the same way a [`Vec`] sequence is: a
//! `u32` element count followed by the code units, checked against the
//! decoding cursor's configured limit before any of those units are read.

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::{Error, Result};
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

const MAX_LEN: u64 = u32::MAX as u64;

impl Shape for String {
    const FAMILY: Family = Family::Utf8String;
    const ALIAS: &'static str = "string";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(1);
    }

    fn static_size() -> Option<usize> {
        None
    }
}

impl Encode for String {
    fn byte_size(&self) -> usize {
        4 + self.len()
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        let bytes = self.as_bytes();
        if bytes.len() as u64 > MAX_LEN {
            return Err(Error::array_overflow(bytes.len() as u64));
        }
        cursor.write_scalar(bytes.len() as u32)?;
        cursor.write_bytes(bytes)
    }
}

impl<'de> Decode<'de> for String {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        let len = cursor.read_scalar::<u32>()?;
        cursor.check_len(len as u64)?;
        cursor.advance(len as usize)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        let len = cursor.read_scalar::<u32>()?;
        cursor.check_len(len as u64)?;
        let bytes = cursor.read_bytes(len as usize)?;
        core::str::from_utf8(bytes).map(str::to_owned).map_err(|_| Error::invalid_utf8())
    }
}

impl Print for String {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_str(self)
    }
}

/// A string of 16-bit code units, stored in this crate's chosen byte order
/// on the wire (`spec.md` §3's string family, 16-bit variant).
///
/// Unlike `std`'s `OsString`, this does not require valid UTF-16: it stores
/// raw `u16` code units and only attempts a UTF-16 decode into a Rust
/// `String` on request, via [`Utf16String::to_string_lossy`] /
/// [`Utf16String::into_string`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Utf16String(Vec<u16>);

impl Utf16String {
    /// Wraps a vector of raw UTF-16 code units.
    pub fn from_units(units: Vec<u16>) -> Utf16String {
        Utf16String(units)
    }

    /// Encodes a Rust `&str` into its UTF-16 code units.
    pub fn from_str(s: &str) -> Utf16String {
        Utf16String(s.encode_utf16().collect())
    }

    /// Borrows the raw code units.
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Decodes this value's code units into a Rust `String`, replacing any
    /// unpaired surrogate with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Decodes this value's code units into a Rust `String`, failing on any
    /// unpaired surrogate.
    pub fn into_string(self) -> Result<String> {
        String::from_utf16(&self.0).map_err(|_| Error::invalid_utf16())
    }
}

impl Shape for Utf16String {
    const FAMILY: Family = Family::Utf16String;
    const ALIAS: &'static str = "u16string";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(2);
    }

    fn static_size() -> Option<usize> {
        None
    }
}

impl Encode for Utf16String {
    fn byte_size(&self) -> usize {
        4 + self.0.len() * 2
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        if self.0.len() as u64 > MAX_LEN {
            return Err(Error::array_overflow(self.0.len() as u64));
        }
        cursor.write_scalar(self.0.len() as u32)?;
        for &unit in &self.0 {
            cursor.write_scalar(unit)?;
        }
        Ok(())
    }
}

impl<'de> Decode<'de> for Utf16String {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        let len = cursor.read_scalar::<u32>()?;
        cursor.check_len(len as u64)?;
        cursor.advance(len as usize * 2)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        let len = cursor.read_scalar::<u32>()?;
        cursor.check_len(len as u64)?;
        let mut units = Vec::with_capacity(len as usize);
        for _ in 0..len {
            units.push(cursor.read_scalar::<u16>()?);
        }
        Ok(Utf16String(units))
    }
}

impl Print for Utf16String {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        sink.write_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn string_round_trips() {
        let value = String::from("hello, world");
        let mut buf = vec![0u8; value.byte_size()];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            value.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(String::decode(&mut r).unwrap(), value);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut buf = [0u8; 5];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            w.write_scalar::<u32>(1).unwrap();
            w.write_bytes(&[0xFF]).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert!(String::decode(&mut r).is_err());
    }

    #[test]
    fn oversized_length_prefix_is_rejected_before_allocating() {
        use crate::config::Limit;

        let mut buf = [0u8; 4];
        WriteCursor::<LittleEndian>::new(&mut buf).write_scalar(u32::MAX).unwrap();

        let mut r = ReadCursor::<LittleEndian>::with_limit(&buf, Limit::new(16));
        assert!(String::decode(&mut r).is_err());

        let mut r = ReadCursor::<LittleEndian>::with_limit(&buf, Limit::new(16));
        assert!(Utf16String::decode(&mut r).is_err());
    }

    #[test]
    fn utf16_round_trips() {
        let value = Utf16String::from_str("héllo");
        let mut buf = vec![0u8; value.byte_size()];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            value.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        let decoded = Utf16String::decode(&mut r).unwrap();
        assert_eq!(decoded.into_string().unwrap(), "héllo");
    }
}
