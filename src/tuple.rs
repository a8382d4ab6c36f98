//! Tuples (`spec.md` §3 "tuple"; wire format §6: "fields in declaration
//! order, no padding").
//!
//! Structural hashing for tuples folds only the folded hash of each element
//! in turn, with no extra family tag beyond the one each element already
//! contributes through its own `structural_hash` — matching the original
//! implementation's aggregate hashing, which does not inject a synthetic
//! tag before recursing into fields (`serial_aggregate.h`'s `HashFunctor`).

use crate::cursor::{ReadCursor, WriteCursor};
use crate::endian::ByteOrder;
use crate::error::Result;
use crate::hash::StructuralHasher;
use crate::shape::{Decode, Encode, Family, Shape};
use crate::sink::{Print, Sink};

macro_rules! impl_tuple {
    ($($idx:tt => $name:ident),+) => {
        impl<$($name: Shape),+> Shape for ($($name,)+) {
            const FAMILY: Family = Family::Tuple;
            const ALIAS: &'static str = "tuple";

            fn structural_hash(hasher: &mut StructuralHasher) {
                hasher.nested(|h| {
                    $($name::structural_hash(h);)+
                });
            }

            fn static_size() -> Option<usize> {
                let mut total = 0usize;
                $(total = total.checked_add($name::static_size()?)?;)+
                Some(total)
            }
        }

        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn byte_size(&self) -> usize {
                0 $(+ self.$idx.byte_size())+
            }

            fn encode<O: ByteOrder>(&self, cursor: &mut WriteCursor<'_, O>) -> Result<()> {
                $(self.$idx.encode(cursor)?;)+
                Ok(())
            }
        }

        impl<'de, $($name: Decode<'de>),+> Decode<'de> for ($($name,)+) {
            fn validate<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<()> {
                $($name::validate(cursor)?;)+
                Ok(())
            }

            fn decode<O: ByteOrder>(cursor: &mut ReadCursor<'de, O>) -> Result<Self> {
                Ok(($($name::decode(cursor)?,)+))
            }
        }

        impl<$($name: Print),+> Print for ($($name,)+) {
            fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()> {
                sink.write_str("(")?;
                let mut first = true;
                $(
                    if !first {
                        sink.write_str(", ")?;
                    }
                    first = false;
                    self.$idx.print(sink, indent + 1)?;
                )+
                sink.write_str(")")
            }
        }
    };
}

impl_tuple!(0 => A);
impl_tuple!(0 => A, 1 => B);
impl_tuple!(0 => A, 1 => B, 2 => C);
impl_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
impl_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::LittleEndian;

    #[test]
    fn pair_round_trips() {
        let value: (u32, bool) = (7, true);
        let mut buf = vec![0u8; value.byte_size()];
        {
            let mut w = WriteCursor::<LittleEndian>::new(&mut buf);
            value.encode(&mut w).unwrap();
        }
        let mut r = ReadCursor::<LittleEndian>::new(&buf);
        assert_eq!(<(u32, bool)>::decode(&mut r).unwrap(), value);
    }

    #[test]
    fn static_size_sums_elements() {
        assert_eq!(<(u32, u8, u16) as Shape>::static_size(), Some(4 + 1 + 2));
    }
}
