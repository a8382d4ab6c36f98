//! Byte cursors: an advancing position inside a byte range, parameterized by
//! [`ByteOrder`] so that endian-aware reads/writes share one code path
//! across big, little, and native storage order (`spec.md` §4.1).

use core::marker::PhantomData;

use crate::config::Limit;
use crate::endian::{ByteOrder, Scalar};
use crate::error::{Error, Result};

/// A cursor over an immutable byte range, advancing as values are read out
/// of it.
#[derive(Clone, Copy, Debug)]
pub struct ReadCursor<'data, O> {
    bytes: &'data [u8],
    pos: usize,
    limit: u32,
    _order: PhantomData<O>,
}

impl<'data, O: ByteOrder> ReadCursor<'data, O> {
    /// Creates a cursor starting at the beginning of `bytes`, bounding any
    /// single dynamic sequence/string length it validates by
    /// [`Limit::default`].
    #[inline]
    pub fn new(bytes: &'data [u8]) -> ReadCursor<'data, O> {
        ReadCursor::with_limit(bytes, Limit::default())
    }

    /// Creates a cursor starting at the beginning of `bytes`, bounding any
    /// single dynamic sequence/string length it validates by `limit`.
    #[inline]
    pub fn with_limit(bytes: &'data [u8], limit: Limit) -> ReadCursor<'data, O> {
        ReadCursor { bytes, pos: 0, limit: limit.get(), _order: PhantomData }
    }

    /// Bytes remaining between the current position and the end of the
    /// underlying range.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Current position, in bytes, from the start of the underlying range.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads a scalar of type `T` in this cursor's byte order, advancing the
    /// position by `size_of::<T>()`.
    pub fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        if self.remaining() < T::SIZE {
            return Err(Error::buffer_overflow(T::SIZE, self.remaining()));
        }
        let value = O::read::<T>(&self.bytes[self.pos..]);
        self.pos += T::SIZE;
        Ok(value)
    }

    /// Reads `len` raw bytes without any byte-order interpretation,
    /// advancing the position by `len`.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'data [u8]> {
        if self.remaining() < len {
            return Err(Error::buffer_overflow(len, self.remaining()));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Validates that at least `len` bytes remain without advancing the
    /// cursor. Used by the decode validator's first pass (`spec.md` §4.2
    /// `init`) to confirm a dynamic container's claimed length actually fits
    /// before any allocation happens.
    pub fn require(&self, len: usize) -> Result<()> {
        if self.remaining() < len {
            Err(Error::buffer_overflow(len, self.remaining()))
        } else {
            Ok(())
        }
    }

    /// Advances the cursor by `len` bytes without reading them. Used
    /// alongside [`ReadCursor::require`] during validation passes.
    pub fn advance(&mut self, len: usize) -> Result<()> {
        self.require(len)?;
        self.pos += len;
        Ok(())
    }

    /// Rejects a dynamic sequence/string length prefix that exceeds this
    /// cursor's configured [`Limit`], before any of its elements or bytes
    /// are read. Every dynamic-length family (`Vec<T>`, `String`,
    /// `Utf16String`) calls this immediately after reading its length
    /// prefix, so a hostile length never reaches `Vec::with_capacity` or an
    /// unbounded read loop.
    pub fn check_len(&self, len: u64) -> Result<()> {
        if len > self.limit as u64 {
            Err(Error::limit_exceeded(len, self.limit))
        } else {
            Ok(())
        }
    }
}

/// A cursor over a mutable byte range, advancing as values are written into
/// it.
#[derive(Debug)]
pub struct WriteCursor<'data, O> {
    bytes: &'data mut [u8],
    pos: usize,
    _order: PhantomData<O>,
}

impl<'data, O: ByteOrder> WriteCursor<'data, O> {
    /// Creates a cursor starting at the beginning of `bytes`.
    #[inline]
    pub fn new(bytes: &'data mut [u8]) -> WriteCursor<'data, O> {
        WriteCursor { bytes, pos: 0, _order: PhantomData }
    }

    /// Bytes remaining between the current position and the end of the
    /// underlying range.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Current position, in bytes, from the start of the underlying range.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Writes `value` in this cursor's byte order, advancing the position
    /// by `size_of::<T>()`.
    pub fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        if self.remaining() < T::SIZE {
            return Err(Error::buffer_overflow(T::SIZE, self.remaining()));
        }
        O::write(&mut self.bytes[self.pos..], value);
        self.pos += T::SIZE;
        Ok(())
    }

    /// Writes raw bytes with no byte-order interpretation, advancing the
    /// position by `bytes.len()`.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.remaining() < bytes.len() {
            return Err(Error::buffer_overflow(bytes.len(), self.remaining()));
        }
        self.bytes[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn write_then_read_round_trips() {
        let mut buf = [0u8; 8];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            w.write_scalar(0x1122_3344u32).unwrap();
            w.write_bytes(&[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(r.read_scalar::<u32>().unwrap(), 0x1122_3344);
        assert_eq!(r.read_bytes(4).unwrap(), &[0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn overflow_is_detected_without_panicking() {
        let buf = [0u8; 2];
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert!(r.read_scalar::<u32>().is_err());
    }
}
