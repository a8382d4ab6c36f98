//! End-to-end tests exercising `structwire`'s public API through
//! `#[derive(Record)]` types, matching the boundary scenarios and universal
//! invariants from `spec.md` §8.

use structwire::config::{Codec, Limit};
use structwire::endian::{BigEndian, LittleEndian};
use structwire::{byte_size, parse, parse_with_limit, serialize, Bitset, Record};

#[derive(Record, Clone, Debug, PartialEq)]
struct Article {
    name: String,
    refs: Vec<Article>,
}

#[derive(Record, Clone, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Record, Clone, Debug, PartialEq)]
struct Coordinate {
    x: i32,
    y: i32,
}

mod v1 {
    use structwire::Record;

    #[derive(Record, Clone, Debug, PartialEq)]
    pub struct Shape {
        pub x: i32,
    }
}

mod v2 {
    use structwire::Record;

    #[derive(Record, Clone, Debug, PartialEq)]
    pub struct Shape {
        pub x: i64,
    }
}

/// Boundary scenario 1 (`spec.md` §8): a recursively nested aggregate
/// round-trips, and the encoded length matches the size fidelity property
/// (property 2) exactly, whatever the precise byte count works out to.
#[test]
fn recursive_aggregate_round_trips() {
    let value = Article {
        name: "A".into(),
        refs: vec![
            Article { name: "B".into(), refs: vec![] },
            Article { name: "C".into(), refs: vec![] },
        ],
    };
    let bytes = serialize::<Article, LittleEndian>(&value).unwrap();
    assert_eq!(bytes.len(), byte_size(&value));
    let decoded = parse::<Article, LittleEndian>(&bytes).unwrap();
    assert_eq!(decoded, value);
}

/// Property 7: truncating a valid payload by at least one byte is rejected,
/// never silently corrupted.
#[test]
fn truncated_payload_is_rejected() {
    let value = Article { name: "hello".into(), refs: vec![Article { name: "x".into(), refs: vec![] }] };
    let bytes = serialize::<Article, LittleEndian>(&value).unwrap();
    for cut in 1..=8 {
        let mut truncated = bytes.clone();
        truncated.truncate(bytes.len() - cut);
        assert!(parse::<Article, LittleEndian>(&truncated).is_err(), "cut={cut}");
    }
}

/// Boundary scenario 6: `Bitset<13>` with bits {0, 1, 12} set encodes to
/// exactly `0x03 0x10` after the fingerprint prefix.
#[test]
fn bitset_wire_bytes_match_spec() {
    let mut set = Bitset::<13>::new();
    set.set(0, true);
    set.set(1, true);
    set.set(12, true);

    let bytes = serialize::<Bitset<13>, LittleEndian>(&set).unwrap();
    assert_eq!(&bytes[8..], &[0x03, 0x10]);

    let decoded = parse::<Bitset<13>, LittleEndian>(&bytes).unwrap();
    assert_eq!(decoded, set);
}

/// Property 6: encoding and decoding in the same storage order round-trips
/// for both big and little endian, and the two encodings of the same value
/// differ (at minimum in their fingerprint prefix bytes).
#[test]
fn endian_orthogonality() {
    let value = Article { name: "x".into(), refs: vec![] };
    let le = serialize::<Article, LittleEndian>(&value).unwrap();
    let be = serialize::<Article, BigEndian>(&value).unwrap();

    assert_eq!(parse::<Article, LittleEndian>(&le).unwrap(), value);
    assert_eq!(parse::<Article, BigEndian>(&be).unwrap(), value);
    assert_ne!(le, be);
}

/// Boundary scenario 3: a type renamed (here, `Point` -> `Coordinate`) but
/// otherwise structurally identical still parses via the structural-match
/// fallback.
#[test]
fn rename_with_identical_structure_is_structurally_compatible() {
    let value = Point { x: 3, y: 4 };
    let bytes = serialize::<Point, LittleEndian>(&value).unwrap();
    let decoded = parse::<Coordinate, LittleEndian>(&bytes).unwrap();
    assert_eq!(decoded, Coordinate { x: 3, y: 4 });
}

/// Boundary scenario 4: same alias, different structural hash, is rejected
/// as `BinaryIncompatible` rather than silently misread.
#[test]
fn same_alias_different_shape_is_binary_incompatible() {
    let value = v1::Shape { x: 3 };
    let bytes = serialize::<v1::Shape, LittleEndian>(&value).unwrap();
    let err = parse::<v2::Shape, LittleEndian>(&bytes).unwrap_err();
    assert!(err.fingerprint().is_some());
    assert!(err.to_string().contains("matches the expected alias"));
}

/// `spec.md` §6's `ident`/`alias` lookups resolve a registered type's
/// fingerprint and canonical name both ways.
#[test]
fn ident_and_alias_resolve_through_registry() {
    let fp = structwire::ident::<Point>();
    assert_eq!(structwire::alias::<Point>(), "Point");
    assert_eq!(structwire::ident_of_alias("Point"), Some(fp));
    assert_eq!(structwire::alias_of_ident(fp), Some("Point"));
}

/// `trace` resolves a payload's type purely from its fingerprint prefix and
/// prints it without the caller naming the type.
#[test]
fn trace_resolves_registered_type_and_prints() {
    let value = Point { x: 1, y: 2 };
    let bytes = serialize::<Point, LittleEndian>(&value).unwrap();

    let mut out = String::new();
    structwire::trace(&bytes, structwire::Endian::Little, &mut out);
    assert!(out.contains("Point"));
    assert!(out.contains('1'));
    assert!(out.contains('2'));
}

/// A [`Codec`]'s [`Limit`] bounds a dynamic sequence's claimed length
/// before any of its elements are read, both through `parse_with_limit`
/// and through `trace_with_codec`.
#[test]
fn configured_limit_rejects_an_oversized_sequence_before_decoding() {
    #[derive(Record, Clone, Debug, PartialEq)]
    struct Listing {
        items: Vec<i32>,
    }

    let value = Listing { items: vec![1, 2, 3, 4, 5] };
    let bytes = serialize::<Listing, LittleEndian>(&value).unwrap();

    assert!(parse::<Listing, LittleEndian>(&bytes).is_ok());
    assert!(parse_with_limit::<Listing, LittleEndian>(&bytes, Limit::new(2)).is_err());

    let tight = Codec::builder().with_little_endian().with_limit(Limit::new(2)).try_build().unwrap();
    let mut out = String::new();
    structwire::trace_with_codec(&bytes, tight, &mut out);
    assert!(out.is_empty());
}

/// Property 8: the registry's reduced digest is exactly the wrapping sum of
/// every registered type's full fingerprint.
#[test]
fn catalog_digest_matches_sum_of_fingerprints() {
    use structwire::registry;

    let mut sum = 0u64;
    registry::for_each(|entry| sum = sum.wrapping_add(entry.fingerprint));
    assert_eq!(sum, registry::serial_version());
}
