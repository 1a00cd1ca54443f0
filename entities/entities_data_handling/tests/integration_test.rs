//! Integration tests for entities_data_handling crate
//!
//! These tests verify that terms, atoms and maps work together the way the
//! codec relies on.

use entities_data_handling::*;

#[test]
fn test_nested_term_construction() {
    let mut map = Map::new();
    map.put(Term::atom("name"), Term::text("port"));
    map.put(Term::atom("ids"), Term::list(vec![Term::from(1), Term::from(300)]));

    let term = Term::tuple(vec![Term::atom("ok"), Term::Map(map)]);
    let elements = term.as_tuple().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].as_atom().unwrap(), "ok");

    let inner = elements[1].as_map().unwrap();
    let ids = inner.get(&Term::text("ids")).unwrap().as_list().unwrap();
    assert_eq!(ids, &[Term::SmallInt(1), Term::Int32(300)]);
}

#[test]
fn test_map_key_space_spans_atom_and_text() {
    let map = Map::from_pairs(vec![(Term::atom("a"), Term::from(1))]);
    let (key, _) = map.find(&Term::text("a")).unwrap();
    assert!(keys_equivalent(key, &Term::text("a")));
    assert_eq!(key.as_atom().unwrap(), "a");
}

#[test]
fn test_integer_boundaries() {
    assert!(matches!(Term::integer(INT32_MAX), Term::Int32(_)));
    assert!(matches!(Term::integer(INT32_MAX + 1), Term::BigInt(_)));
    assert_eq!(Term::integer(INT32_MAX + 1).as_i64(), Some(INT32_MAX + 1));

    let huge = Integer::from(1u64 << 40) * Integer::from(1u64 << 40);
    let term = Term::integer(huge.clone());
    assert_eq!(term.as_integer(), Some(huge));
}

#[test]
fn test_equal_terms_across_construction_paths() {
    assert_eq!(Term::from(Vec::<Term>::new()), Term::Nil);
    assert_eq!(Term::from(Atom::new("x")), Term::atom("x"));
    assert_eq!(Term::from("x"), Term::text("x"));
    assert_eq!(Term::from(vec![1u8, 2]), Term::binary([1u8, 2]));
    assert_eq!(Term::from(Integer::from(12)), Term::SmallInt(12));
    assert_eq!(Term::from(-2i64), Term::Int32(-2));
}

#[test]
fn test_display_nested() {
    let term = Term::tuple(vec![
        Term::atom("error"),
        Term::tuple(vec![Term::atom("user"), Term::from(0), Term::text("boom")]),
    ]);
    assert_eq!(term.to_string(), "{error,{user,0,\"boom\"}}");
}

#[test]
fn test_map_key_space_includes_utf8_binaries() {
    let map = Map::from_pairs(vec![(Term::binary(b"a".to_vec()), Term::from(1))]);
    assert_eq!(map.get(&Term::atom("a")), Some(&Term::from(1)));
    assert_eq!(
        map,
        Map::from_pairs(vec![(Term::text("a"), Term::from(1))])
    );
}
