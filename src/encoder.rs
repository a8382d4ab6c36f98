//! The encoder (C5): writes a value's 64-bit fingerprint followed by its
//! encoded bytes (`spec.md` §6's wire format: "8-byte fingerprint prefix +
//! per-family encoding").

use crate::cursor::WriteCursor;
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::shape::{Encode, Shape};

/// The exact number of bytes [`serialize`] will produce for `value`: the
/// 8-byte fingerprint prefix plus `value`'s own encoded size.
pub fn byte_size<T: Encode>(value: &T) -> usize {
    8 + value.byte_size()
}

/// Encodes `value` into a freshly allocated buffer, prefixed with its
/// fingerprint.
pub fn serialize<T: Encode, O: ByteOrder>(value: &T) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; byte_size(value)];
    serialize_into::<T, O>(value, &mut buf)?;
    Ok(buf)
}

/// Encodes `value` into `buf`, which must be at least
/// [`byte_size`]`(value)` bytes, returning the number of bytes written.
pub fn serialize_into<T: Encode, O: ByteOrder>(value: &T, buf: &mut [u8]) -> Result<usize> {
    let mut cursor = WriteCursor::<O>::new(buf);
    cursor.write_scalar(T::fingerprint().to_bits())?;
    value.encode(&mut cursor)?;
    Ok(cursor.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn byte_size_includes_fingerprint_prefix() {
        assert_eq!(byte_size(&42u32), 8 + 4);
    }

    #[test]
    fn serialize_writes_the_fingerprint_first() {
        let buf = serialize::<u32, LittleEndian>(&7).unwrap();
        let prefix = u64::from_le_bytes(buf[..8].try_into().unwrap());
        assert_eq!(prefix, u32::fingerprint().to_bits());
        assert_eq!(&buf[8..], &7u32.to_le_bytes());
    }
}
