//! Fixed-width bit sets (`spec.md` §3 "bitset"; wire format §6: "⌈N/8⌉
//! bytes, LSB-first").
//!
//! `N` is a const generic bit count, not a byte count: [`Bitset::<13>`]
//! occupies 2 bytes on the wire, with the top 3 bits of the second byte
//! unused and always written as zero.

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

const fn byte_len(bits: usize) -> usize {
    (bits + 7) / 8
}

/// A set of `N` bits, stored LSB-first in `ceil(N / 8)` bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bitset<const N: usize> {
    bytes: [u8; 32],
}

impl<const N: usize> Bitset<N> {
    /// An all-zero bitset.
    pub const fn new() -> Bitset<N> {
        assert!(N <= 256, "Bitset only supports up to 256 bits");
        Bitset { bytes: [0u8; 32] }
    }

    /// Returns the value of bit `index`.
    pub fn get(&self, index: usize) -> bool {
        assert!(index < N, "bitset index out of range");
        (self.bytes[index / 8] >> (index % 8)) & 1 != 0
    }

    /// Sets bit `index` to `value`.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < N, "bitset index out of range");
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }
}

impl<const N: usize> Default for Bitset<N> {
    fn default() -> Bitset<N> {
        Bitset::new()
    }
}

impl<const N: usize> Shape for Bitset<N> {
    const FAMILY: Family = Family::Bitset;
    const ALIAS: &'static str = "bitset";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32).fold(N as u32);
    }

    fn static_size() -> Option<usize> {
        Some(byte_len(N))
    }
}

impl<const N: usize> Encode for Bitset<N> {
    fn byte_size(&self) -> usize {
        byte_len(N)
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        cursor.write_bytes(&self.bytes[..byte_len(N)])
    }
}

impl<'de, const N: usize> Decode<'de> for Bitset<N> {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        cursor.advance(byte_len(N))
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        let raw = cursor.read_bytes(byte_len(N))?;
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Bitset { bytes })
    }
}

impl<const N: usize> Print for Bitset<N> {
    fn print<S: Sink>(&self, sink: &mut S, _indent: usize) -> Result<()> {
        for i in (0..N).rev() {
            sink.write_char(if self.get(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn byte_len_rounds_up() {
        assert_eq!(byte_len(1), 1);
        assert_eq!(byte_len(8), 1);
        assert_eq!(byte_len(9), 2);
        assert_eq!(byte_len(13), 2);
    }

    #[test]
    fn set_and_get_round_trip_through_bytes() {
        let mut set = Bitset::<13>::new();
        set.set(0, true);
        set.set(12, true);
        set.set(5, true);

        let mut buf = vec![0u8; set.byte_size()];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            set.encode(&mut w).unwrap();
        }
        assert_eq!(buf.len(), 2);
        assert_eq!(buf[0], 0b0010_0001);
        assert_eq!(buf[1], 0b0001_0000);

        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        let decoded = Bitset::<13>::decode(&mut r).unwrap();
        assert!(decoded.get(0));
        assert!(decoded.get(12));
        assert!(decoded.get(5));
        assert!(!decoded.get(1));
    }
}
