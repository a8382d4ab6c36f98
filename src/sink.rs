//! Schema-less text output (C7 support): the contract [`crate::trace`] prints
//! through.
//!
//! A [`Sink`] is the minimal text surface `spec.md` §6 requires of the
//! tracer: string fragments, individual characters, and decimal renderings
//! of integers and floats. [`Print`] is the per-type-family operation that
//! drives a `Sink` from a value without the caller needing to know the
//! value's static type in advance — the same role `Decode` plays for bytes,
//! but for text.

use crate::error::Result;

/// Minimal text output surface used by [`Print`] implementations.
///
/// A blanket implementation over any [`core::fmt::Write`] is provided below,
/// so `String` and any other `fmt::Write` target work as a `Sink` without
/// extra glue.
pub trait Sink {
    /// Writes a literal string fragment.
    fn write_str(&mut self, s: &str) -> Result<()>;

    /// Writes a single character.
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }

    /// Writes the decimal rendering of a signed integer.
    fn write_int(&mut self, value: i128) -> Result<()> {
        self.write_str(&value.to_string())
    }

    /// Writes the decimal rendering of an unsigned integer.
    fn write_uint(&mut self, value: u128) -> Result<()> {
        self.write_str(&value.to_string())
    }

    /// Writes the decimal rendering of a floating-point value.
    fn write_float(&mut self, value: f64) -> Result<()> {
        self.write_str(&value.to_string())
    }
}

impl<W: core::fmt::Write> Sink for W {
    fn write_str(&mut self, s: &str) -> Result<()> {
        core::fmt::Write::write_str(self, s).map_err(Into::into)
    }
}

/// Per-type-family rendering, the text-output analogue of [`crate::shape::Encode`].
///
/// `indent` is the current nesting depth in logical units (not bytes or
/// spaces); implementations for container/aggregate families pass
/// `indent + 1` to their children so a [`Sink`] that cares about
/// pretty-printing can use it, but [`Print`] itself stays layout-agnostic:
/// it emits flat fragments and leaves spacing decisions to the sink.
pub trait Print {
    /// Writes this value's textual rendering to `sink`.
    fn print<S: Sink>(&self, sink: &mut S, indent: usize) -> Result<()>;
}

/// Directly pretty-prints `value` to `sink`, with no fingerprint involved
/// (`spec.md` §6's `print<T,S>`). Unlike [`crate::trace`], the caller
/// already knows `value`'s type, so there is no registry lookup and no
/// silent failure mode: a [`Sink`] error propagates to the caller.
pub fn print<T: Print, S: Sink>(value: &T, sink: &mut S) -> Result<()> {
    value.print(sink, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_a_sink() {
        let mut out = String::new();
        out.write_str("abc").unwrap();
        out.write_char('d').unwrap();
        out.write_uint(42).unwrap();
        assert_eq!(out, "abcd42");
    }

    #[test]
    fn print_writes_directly_with_no_fingerprint() {
        let mut out = String::new();
        print(&7u32, &mut out).unwrap();
        assert_eq!(out, "7");
    }
}
