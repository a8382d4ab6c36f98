//! Error taxonomy for the [`structwire`][crate] crate.
//!
//! Errors are reported as typed failures at the operation boundary. On any
//! error, an in-progress encode or decode aborts immediately; partially
//! written output buffers and the input cursor position are left in an
//! unspecified state (see `spec.md` §7). [`crate::trace`] is the sole
//! exception: it absorbs every [`Error`] as a silent no-op.

use core::fmt;

/// Core error type for the [`structwire`][crate] crate.
///
/// This is a thin wrapper around a private [`ErrorKind`], following the same
/// shape as the rest of this crate's sibling error types: one public,
/// `Display`-able handle and a hidden enum of failure states.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    const fn new(kind: ErrorKind) -> Error {
        Error { kind }
    }

    /// A dynamic sequence or string length would not fit in the 4-byte
    /// unsigned length prefix the wire format requires.
    pub const fn array_overflow(len: u64) -> Error {
        Error::new(ErrorKind::ArrayOverflow { len })
    }

    /// The input or output byte buffer is too small for the requested
    /// operation.
    pub const fn buffer_overflow(required: usize, available: usize) -> Error {
        Error::new(ErrorKind::BufferOverflow { required, available })
    }

    /// The payload's structural hash does not correspond to any registered
    /// structure compatible with the expected type.
    pub const fn layout_incompatible(fingerprint: u64) -> Error {
        Error::new(ErrorKind::LayoutIncompatible { fingerprint })
    }

    /// The payload's alias hash matches the expected type but its structural
    /// hash does not: the recorded type changed shape.
    pub const fn binary_incompatible(fingerprint: u64) -> Error {
        Error::new(ErrorKind::BinaryIncompatible { fingerprint })
    }

    /// The bytes read where a UTF-8 string was expected are not valid UTF-8.
    pub const fn invalid_utf8() -> Error {
        Error::new(ErrorKind::InvalidUtf8)
    }

    /// The bytes read where a UTF-16 string was expected are not valid
    /// UTF-16.
    pub const fn invalid_utf16() -> Error {
        Error::new(ErrorKind::InvalidUtf16)
    }

    /// A duration's tick count overflowed while converting between
    /// representations.
    pub const fn duration_overflow() -> Error {
        Error::new(ErrorKind::DurationOverflow)
    }

    /// The [`Sink`][crate::sink::Sink] used by `print`/`trace` failed.
    pub const fn sink_failure() -> Error {
        Error::new(ErrorKind::SinkFailure)
    }

    /// An operation failed because a [`Codec`][crate::config::Codec] or
    /// [`CodecBuilder`][crate::config::CodecBuilder] was left incompletely
    /// configured.
    pub const fn invalid_codec(message: &'static str) -> Error {
        Error::new(ErrorKind::InvalidCodec { message })
    }

    /// A dynamic sequence or string claimed a length longer than the active
    /// [`Limit`][crate::config::Limit] allows, before any element or byte of
    /// it was read.
    pub const fn limit_exceeded(len: u64, limit: u32) -> Error {
        Error::new(ErrorKind::LimitExceeded { len, limit })
    }

    /// Returns the fingerprint carried by this error, if any.
    ///
    /// Only [`Error::layout_incompatible`] and [`Error::binary_incompatible`]
    /// carry one.
    pub const fn fingerprint(&self) -> Option<u64> {
        match self.kind {
            ErrorKind::LayoutIncompatible { fingerprint }
            | ErrorKind::BinaryIncompatible { fingerprint } => Some(fingerprint),
            _ => None,
        }
    }
}

/// Failure states a [`structwire`][crate] operation can enter.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum ErrorKind {
    ArrayOverflow { len: u64 },
    BufferOverflow { required: usize, available: usize },
    LayoutIncompatible { fingerprint: u64 },
    BinaryIncompatible { fingerprint: u64 },
    InvalidUtf8,
    InvalidUtf16,
    DurationOverflow,
    SinkFailure,
    InvalidCodec { message: &'static str },
    LimitExceeded { len: u64, limit: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::ArrayOverflow { len } => {
                write!(f, "sequence length {len} does not fit in a 4-byte length prefix")
            }
            ErrorKind::BufferOverflow { required, available } => {
                write!(f, "buffer overflow: required {required} bytes, have {available}")
            }
            ErrorKind::LayoutIncompatible { fingerprint } => {
                write!(f, "fingerprint {fingerprint:#018x} is not structurally compatible with the expected type")
            }
            ErrorKind::BinaryIncompatible { fingerprint } => {
                write!(f, "fingerprint {fingerprint:#018x} matches the expected alias but not its structural shape")
            }
            ErrorKind::InvalidUtf8 => write!(f, "decoded bytes are not valid UTF-8"),
            ErrorKind::InvalidUtf16 => write!(f, "decoded bytes are not valid UTF-16"),
            ErrorKind::DurationOverflow => write!(f, "duration tick count overflowed during conversion"),
            ErrorKind::SinkFailure => write!(f, "text sink failed while writing a value"),
            ErrorKind::InvalidCodec { message } => write!(f, "invalid codec configuration: {message}"),
            ErrorKind::LimitExceeded { len, limit } => {
                write!(f, "claimed length {len} exceeds the configured limit of {limit} bytes")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Error {
        Error::sink_failure()
    }
}

/// Result alias used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_only_present_on_compat_errors() {
        assert_eq!(Error::array_overflow(1 << 33).fingerprint(), None);
        assert_eq!(Error::layout_incompatible(42).fingerprint(), Some(42));
        assert_eq!(Error::binary_incompatible(7).fingerprint(), Some(7));
    }

    #[test]
    fn display_mentions_the_offending_quantity() {
        let msg = Error::buffer_overflow(10, 4).to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('4'));
    }

    #[test]
    fn limit_exceeded_carries_no_fingerprint() {
        let err = Error::limit_exceeded(1_000_000, 16);
        assert_eq!(err.fingerprint(), None);
        assert!(err.to_string().contains("1000000"));
        assert!(err.to_string().contains('16'));
    }
}
