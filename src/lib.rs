//! `structwire` is a structural binary serialization core.
//!
//! Given a value of a statically known record type, [`serialize`] emits a
//! compact byte sequence prefixed by a 64-bit type [`Fingerprint`]. Given such
//! a byte sequence and an expected record type, [`parse`] reconstructs the
//! value, rejecting mismatches deterministically. [`trace`] supports
//! schema-less inspection: it reads the fingerprint, resolves it through the
//! [`registry`], and prints the value without the caller knowing its type in
//! advance.
//!
//! # Layout
//!
//! - [`endian`] — byte-order-aware primitive reads/writes (C1).
//! - [`shape`] — per-type-family encode/decode/hash/print rules (C2).
//! - [`hash`] — the fingerprint engine (C3).
//! - [`registry`] — the compile-time-assembled catalog of record types (C4).
//! - [`encoder`] / [`decoder`] / [`tracer`] — the public read/write/inspect
//!   entry points (C5, C6, C7).
//!
//! Deriving [`Record`][derive@Record] on a struct or fieldless enum
//! implements the C2 operations for it and registers it with the registry.
//!
//! [`registry::ident`]/[`registry::alias`] resolve a type's fingerprint and
//! canonical name against each other; [`print`] pretty-prints a value whose
//! type is already known, without going through a fingerprint at all.
//!
//! [`parse`]/[`trace`] bound any dynamic sequence/string length a payload
//! claims by [`config::Limit::default`]; [`parse_with_limit`]/
//! [`trace_with_codec`] take a [`config::Limit`]/[`config::Codec`]
//! explicitly.

pub mod config;
pub mod cursor;
pub mod endian;
pub mod error;
pub mod hash;
pub mod registry;
pub mod shape;
pub mod sink;

mod bitset;
mod complex;
mod container;
mod null;
mod primitive;
mod string;
mod time;
mod tuple;

mod decoder;
mod encoder;
mod tracer;

pub use bitset::Bitset;
pub use complex::Complex;
pub use config::{Codec, CodecBuilder, Limit};
pub use cursor::{ReadCursor, WriteCursor};
pub use decoder::{parse, parse_into, parse_with_limit, peek_fingerprint};
pub use encoder::{byte_size, serialize, serialize_into};
pub use endian::{BigEndian, ByteOrder, Endian, LittleEndian, NativeEndian, BE, LE};
pub use error::{Error, Result};
pub use hash::Fingerprint;
pub use null::Null;
pub use registry::{
    alias, alias_of_ident, check_version, check_version_for, ident, ident_of_alias, serial_version,
};
pub use shape::{Decode, Encode, Family, Shape};
pub use sink::{print, Print, Sink};
pub use string::Utf16String;
pub use time::{type_aliases, Clock, Duration, SteadyClock, SystemClock, TimePoint};
pub use tracer::{trace, trace_with_codec};

#[cfg(feature = "derive")]
pub use structwire_derive::Record;

#[doc(hidden)]
pub mod __private {
    //! Re-exports consumed by code generated by `#[derive(Record)]`.
    //!
    //! Nothing in this module is part of the public API and it may change
    //! without notice between patch releases.
    pub use crate::hash::{alias_hash, StructuralHasher};
    pub use crate::registry::TypeEntry;
    pub use inventory;
}
