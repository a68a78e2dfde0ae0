#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn find_after_create() {
    let mut table = SymbolTable::new();
    assert!(table.find(b"x").is_none());
    let id = table.create(Kind::Scalar, b"x", false);
    assert_eq!(table.find(b"x"), Some(id));
    let symbol = table.get(id).unwrap();
    assert_eq!(symbol.name(), b"x");
    assert_eq!(symbol.value(), ValueId::NULL);
    assert!(!symbol.is_external());
    assert_eq!(table.len(), 1);
}

#[test]
fn empty_name_is_never_found() {
    let mut table = SymbolTable::new();
    table.create(Kind::Scalar, b"", false);
    assert!(table.find(b"").is_none());
}

#[test]
fn lookup_moves_to_front() {
    let mut table = SymbolTable::new();
    // three two-byte names sharing a bucket
    let names: Vec<Vec<u8>> = (0u8..=255)
        .map(|b| vec![b'k', b])
        .filter(|n| hash_bytes(n, SYMBOL_BUCKETS) == hash_bytes(b"k\x00", SYMBOL_BUCKETS))
        .take(3)
        .collect();
    assert_eq!(names.len(), 3);

    let ids: Vec<SymbolId> = names
        .iter()
        .map(|n| table.create(Kind::Scalar, n, false))
        .collect();
    let bucket = hash_bytes(&names[0], SYMBOL_BUCKETS);
    assert_eq!(table.buckets[bucket], [ids[2], ids[1], ids[0]]);

    table.find(&names[0]);
    assert_eq!(table.buckets[bucket], [ids[0], ids[2], ids[1]]);
}

#[test]
fn create_shadows_without_checking() {
    let mut table = SymbolTable::new();
    let first = table.create(Kind::Scalar, b"dup", false);
    let second = table.create(Kind::Code, b"dup", false);
    assert_ne!(first, second);
    assert_eq!(table.find(b"dup"), Some(second));
    assert_eq!(table.len(), 2);
}

#[test]
fn remove_unlinks() {
    let mut table = SymbolTable::new();
    let id = table.create(Kind::Scalar, b"gone", false);
    let symbol = table.remove(id).unwrap();
    assert_eq!(symbol.name(), b"gone");
    assert!(table.find(b"gone").is_none());
    assert!(table.get(id).is_none());
    assert!(table.remove(id).is_none());
    assert!(table.is_empty());
}

#[test]
fn prefix_listing() {
    let mut table = SymbolTable::new();
    for name in ["filp_real", "filp_error", "dup", "filp"] {
        table.create(Kind::Scalar, name.as_bytes(), false);
    }
    let mut names: Vec<&[u8]> = table.names_with_prefix(b"filp_");
    names.sort_unstable();
    assert_eq!(names, [&b"filp_error"[..], &b"filp_real"[..]]);
    assert_eq!(table.names_with_prefix(b"").len(), 4);
}
