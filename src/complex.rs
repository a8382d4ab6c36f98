//! Complex numbers (`spec.md` §3 "complex"; wire format §6: "(real, imag)").

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

/// A complex number over a scalar component type `T`, stored as `(real,
/// imag)` with no padding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    /// Builds a complex number from its real and imaginary parts.
    pub const fn new(re: T, im: T) -> Complex<T> {
        Complex { re, im }
    }
}

impl<T: Shape> Shape for Complex<T> {
    const FAMILY: Family = Family::Complex;
    const ALIAS: &'static str = "complex";

    fn structural_hash(hasher: &mut StructuralHasher) {
        hasher.fold(Self::FAMILY as u32);
        hasher.nested(|h| T::structural_hash(h));
    }

    fn static_size() -> Option<usize> {
        T::static_size().map(|size| size * 2)
    }
}

impl<T: Encode> Encode for Complex<T> {
    fn byte_size(&self) -> usize {
        self.re.byte_size() + self.im.byte_size()
    }

    fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
        self.re.encode(cursor)?;
        self.im.encode(cursor)
    }
}

impl<'de, T: Decode<'de>> Decode<'de> for Complex<T> {
    fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
        T::validate(cursor)?;
        T::validate(cursor)
    }

    fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
        let re = T::decode(cursor)?;
        let im = T::decode(cursor)?;
        Ok(Complex { re, im })
    }
}

impl<T: Print> Print for Complex<T> {
    fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()> {
        self.re.print(sink, indent)?;
        sink.write_str(" + ")?;
        self.im.print(sink, indent)?;
        sink.write_str("i")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn complex_round_trips() {
        let value = Complex::new(1.5f64, -2.25f64);
        let mut buf = vec![0u8; value.byte_size()];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            value.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(Complex::<f64>::decode(&mut r).unwrap(), value);
    }
}
