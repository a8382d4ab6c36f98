//! Runtime codec configuration: byte order and a length-prefix limit, set
//! through a validating builder (`spec.md` §6's `Codec` is not itself part
//! of the spec's external-interfaces table, but every serialize/parse call
//! needs an endianness and a bound on how large a dynamic sequence/string a
//! malicious payload's length prefix can claim — see [`Limit`]).
//!
//! Grounded directly on `abio`'s own `src/config/codec.rs`
//! (`Codec`/`CodecBuilder`/`Limit`), including its exact `0x1000`-byte
//! default bumped here to `0x10_0000` since this crate's dynamic types
//! (nested aggregates, sequences) run larger than `abio`'s fixed byte
//! layouts.

use crate::endian::Endian;
use crate::error::{Error, Result};

/// Configurable settings controlling how values are encoded, decoded, and
/// traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec {
    endian: Endian,
    limit: Limit,
}

impl Codec {
    /// Starts building a [`Codec`] with no fields set.
    #[inline]
    pub const fn builder() -> CodecBuilder {
        CodecBuilder { endian: None, limit: None }
    }

    /// The configured byte order.
    #[inline]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// The configured buffer-size limit.
    #[inline]
    pub const fn limit(&self) -> Limit {
        self.limit
    }

    /// Returns `true` if this codec uses big endian byte order.
    #[inline]
    pub const fn is_big_endian(&self) -> bool {
        self.endian.is_big_endian()
    }

    /// Returns `true` if this codec uses little endian byte order.
    #[inline]
    pub const fn is_little_endian(&self) -> bool {
        self.endian.is_little_endian()
    }
}

impl Default for Codec {
    #[inline]
    fn default() -> Codec {
        Codec::builder()
            .with_little_endian()
            .with_limit(Limit::default())
            .try_build()
            .expect("default CodecBuilder is always fully specified")
    }
}

/// Maximum element/byte count a single dynamic sequence or string length
/// prefix is allowed to claim. [`crate::cursor::ReadCursor::check_len`]
/// rejects any `Vec<T>`, `String`, or `Utf16String` length past this bound
/// immediately after reading the length prefix, before `Vec::with_capacity`
/// or an element read loop ever sees it — [`crate::parse_with_limit`] and
/// [`crate::trace_with_codec`] are the entry points that take one
/// explicitly; [`crate::parse`] and [`crate::trace`] fall back to
/// [`Limit::default`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Limit(u32);

impl Limit {
    /// Default limit: 1 MiB, comfortably larger than any single record this
    /// crate expects to see in practice while still bounding worst-case
    /// memory use from a corrupt length prefix.
    const DEFAULT_MAX_LIMIT: u32 = 0x10_0000;

    /// Creates a new limit of `value` bytes.
    #[inline]
    pub const fn new(value: u32) -> Limit {
        Limit(value)
    }

    /// Returns the limit in bytes.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::ops::Deref for Limit {
    type Target = u32;

    #[inline]
    fn deref(&self) -> &u32 {
        &self.0
    }
}

impl Default for Limit {
    #[inline]
    fn default() -> Limit {
        Limit(Self::DEFAULT_MAX_LIMIT)
    }
}

/// Builder producing a validated [`Codec`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CodecBuilder {
    endian: Option<Endian>,
    limit: Option<Limit>,
}

impl CodecBuilder {
    /// Creates a builder with no fields set.
    #[inline]
    pub const fn new() -> CodecBuilder {
        CodecBuilder { endian: None, limit: None }
    }

    /// Sets big endian byte order.
    #[inline]
    pub const fn with_big_endian(mut self) -> CodecBuilder {
        self.endian = Some(Endian::Big);
        self
    }

    /// Sets little endian byte order.
    #[inline]
    pub const fn with_little_endian(mut self) -> CodecBuilder {
        self.endian = Some(Endian::Little);
        self
    }

    /// Sets byte order explicitly.
    #[inline]
    pub const fn with_endian(mut self, endian: Endian) -> CodecBuilder {
        self.endian = Some(endian);
        self
    }

    /// Sets the buffer-size limit.
    #[inline]
    pub const fn with_limit(mut self, limit: Limit) -> CodecBuilder {
        self.limit = Some(limit);
        self
    }

    /// Sets the buffer-size limit from a const generic, for call sites that
    /// want the value fixed at compile time.
    #[inline]
    pub const fn with_const_limit<const LIMIT: u32>(mut self) -> CodecBuilder {
        self.limit = Some(Limit::new(LIMIT));
        self
    }

    /// Builds a [`Codec`], failing if either field was left unset.
    #[inline]
    pub const fn try_build(self) -> Result<Codec> {
        let Some(endian) = self.endian else {
            return Err(Error::invalid_codec("endianness must be set"));
        };
        let Some(limit) = self.limit else {
            return Err(Error::invalid_codec("byte limit must be set"));
        };
        Ok(Codec { endian, limit })
    }

    /// Builds a [`Codec`], filling any unset field from `fallback`.
    #[inline]
    pub const fn build(self, fallback: Codec) -> Codec {
        let endian = match self.endian {
            Some(endian) => endian,
            None => fallback.endian(),
        };
        let limit = match self.limit {
            Some(limit) => limit,
            None => fallback.limit(),
        };
        Codec { endian, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_both_fields() {
        assert!(CodecBuilder::new().try_build().is_err());
        assert!(CodecBuilder::new().with_little_endian().try_build().is_err());
        assert!(CodecBuilder::new()
            .with_little_endian()
            .with_limit(Limit::default())
            .try_build()
            .is_ok());
    }

    #[test]
    fn big_endian_and_little_endian_are_distinct() {
        let big = Codec::builder().with_big_endian().with_limit(Limit::default()).try_build().unwrap();
        let little = Codec::builder().with_little_endian().with_limit(Limit::default()).try_build().unwrap();
        assert!(big.is_big_endian());
        assert!(little.is_little_endian());
    }
}
