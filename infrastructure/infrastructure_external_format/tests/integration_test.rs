//! Integration tests for infrastructure_external_format
//!
//! Exercises the public facade: message envelope, value round-trips,
//! configuration switches and every error kind.

use entities_data_handling::{Integer, Map, Term};
use infrastructure_external_format::{
    decode, decode_prefix, encode, encode_into, encoded_size, pp_bytes, Codec, CodecConfig,
    CodecError, Convention, ScratchBuffer,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn round_trip(term: &Term, config: &CodecConfig) -> Term {
    let bytes = encode(term, config).unwrap();
    decode(&bytes, config).unwrap()
}

#[test]
fn test_empty_list_message() {
    let config = CodecConfig::default();
    assert_eq!(encode(&Term::Nil, &config).unwrap(), vec![131, 106]);
    assert_eq!(encode(&Term::list(vec![]), &config).unwrap(), vec![131, 106]);
    let decoded = decode(&[131, 106], &config).unwrap();
    assert_eq!(decoded.as_list(), Some(&[][..]));
}

#[test]
fn test_integer_boundaries() {
    let config = CodecConfig::default();
    let cases: [(i64, u8); 7] = [
        (0, 97),
        (255, 97),
        (256, 98),
        (-1, 98),
        ((1 << 27) - 1, 98),
        (-(1 << 27), 98),
        (1 << 27, 110),
    ];
    for (value, tag) in cases {
        let bytes = encode(&Term::from(value), &config).unwrap();
        assert_eq!(bytes[1], tag, "tag for {}", value);
        assert_eq!(decode(&bytes, &config).unwrap(), Term::from(value));
    }
}

#[test]
fn test_negative_bignum() {
    let config = CodecConfig::default();
    let value = -(1i64 << 40);
    let bytes = encode(&Term::from(value), &config).unwrap();
    assert_eq!(bytes, vec![131, 110, 6, 1, 0, 0, 0, 0, 0, 1]);
    assert_eq!(decode(&bytes, &config).unwrap().as_i64(), Some(value));
}

#[test]
fn test_huge_bignums_are_exact() {
    let config = CodecConfig::default();
    let mut value = Integer::from(1);
    for _ in 0..40 {
        value *= Integer::from(u64::MAX);
    }
    let positive = Term::integer(value.clone());
    let negative = Term::integer(-value);
    assert_eq!(encode(&positive, &config).unwrap()[1], 111);
    assert_eq!(round_trip(&positive, &config), positive);
    assert_eq!(round_trip(&negative, &config), negative);
}

#[test]
fn test_floats_round_trip_bit_exact() {
    let config = CodecConfig::default();
    for value in [0.0, -0.0, 1.0, f64::MIN_POSITIVE, f64::MAX, f64::NAN] {
        let decoded = round_trip(&Term::Float64(value), &config);
        assert_eq!(decoded.as_f64().map(f64::to_bits), Some(value.to_bits()));
    }
}

#[test]
fn test_nested_round_trip() {
    init_logger();
    let config = CodecConfig::default();
    let mut map = Map::new();
    map.put(Term::atom("user"), Term::binary(b"joe".to_vec()));
    map.put(Term::from(1), Term::tuple(vec![Term::Boolean(true), Term::Float64(0.5)]));
    map.put(Term::atom("tags"), Term::list(vec![Term::atom("a"), Term::atom("b c")]));

    let term = Term::tuple(vec![
        Term::atom("reply"),
        Term::from(70_000),
        Term::integer(Integer::from(u64::MAX)),
        Term::Map(map),
        Term::list(vec![Term::Nil, Term::tuple(vec![])]),
        Term::tuple(vec![Term::Nil; 300]),
    ]);
    assert_eq!(round_trip(&term, &config), term);
}

#[test]
fn test_atom_and_text_stay_distinct() {
    let config = CodecConfig::default().with_binaries_as_string(true);
    let atom = round_trip(&Term::atom("ok"), &config);
    let text = round_trip(&Term::text("ok"), &config);
    assert!(atom.as_atom().is_some());
    assert!(text.as_text().is_some());
    assert_ne!(atom, text);
}

#[test]
fn test_map_key_promoted_to_atom() {
    let config = CodecConfig::default();
    let map = Map::from_pairs(vec![(Term::text("a"), Term::from(1))]);
    let decoded = round_trip(&Term::Map(map), &config);
    let decoded = decoded.as_map().unwrap();
    assert_eq!(decoded.len(), 1);
    let (key, value) = decoded.iter().next().unwrap();
    assert_eq!(key, &Term::atom("a"));
    assert_eq!(decoded.get(&Term::text("a")), Some(value));
    assert_eq!(value, &Term::from(1));
}

#[test]
fn test_erlang_convention() {
    let config = CodecConfig::default()
        .with_convention(Convention::Erlang)
        .with_null_values(true);
    assert_eq!(round_trip(&Term::text("hello"), &config), Term::text("hello"));
    assert_eq!(round_trip(&Term::Null, &config), Term::Null);
    assert_eq!(
        encode(&Term::Null, &config).unwrap(),
        vec![131, 100, 0, 9, b'u', b'n', b'd', b'e', b'f', b'i', b'n', b'e', b'd']
    );
}

#[test]
fn test_null_without_decode_flag_is_an_atom() {
    let config = CodecConfig::default();
    assert_eq!(round_trip(&Term::Null, &config), Term::atom("nil"));
}

#[test]
fn test_invalid_header() {
    let config = CodecConfig::default();
    assert_eq!(
        decode(&[130, 106], &config),
        Err(CodecError::InvalidHeader { found: Some(130) })
    );
    assert_eq!(
        decode(&[], &config),
        Err(CodecError::InvalidHeader { found: None })
    );
}

#[test]
fn test_trailing_data() {
    let config = CodecConfig::default();
    assert_eq!(
        decode(&[131, 106, 0, 0], &config),
        Err(CodecError::TrailingData { remaining: 2 })
    );
    let (_, rest) = decode_prefix(&[131, 106, 0, 0], &config).unwrap();
    assert_eq!(rest, &[0, 0]);
}

#[test]
fn test_improper_list() {
    let config = CodecConfig::default();
    let bytes = [131, 108, 0, 0, 0, 1, 97, 1, 97, 2];
    assert_eq!(
        decode(&bytes, &config),
        Err(CodecError::ImproperList { found: 97, offset: 8 })
    );
}

#[test]
fn test_unknown_tag_and_truncation() {
    let config = CodecConfig::default();
    assert_eq!(
        decode(&[131, 255], &config),
        Err(CodecError::UnknownTag { tag: 255, offset: 1 })
    );
    assert_eq!(
        decode(&[131, 100, 0, 5, b'a'], &config),
        Err(CodecError::Truncated { needed: 5, available: 1, offset: 4 })
    );
}

#[test]
fn test_legacy_wire_forms_decode() {
    let config = CodecConfig::default();
    assert_eq!(
        decode(&[131, 107, 0, 3, 1, 2, 3], &config).unwrap(),
        Term::text("\u{1}\u{2}\u{3}")
    );

    let mut bytes = vec![131, 99];
    let mut field = b"-2.50000000000000000000e+01".to_vec();
    field.resize(31, 0);
    bytes.extend_from_slice(&field);
    assert_eq!(decode(&bytes, &config).unwrap(), Term::Float64(-25.0));
}

#[test]
fn test_buffer_overflow() {
    let config = CodecConfig::default().with_buffer_capacity(16);
    let big = Term::binary(vec![0u8; 32]);
    assert_eq!(
        encode(&big, &config),
        Err(CodecError::BufferOverflow { capacity: 16, needed: 38 })
    );
    assert_eq!(encode(&Term::from(1), &config).unwrap(), vec![131, 97, 1]);
}

#[test]
fn test_message_of_exactly_capacity_fits() {
    let term = Term::binary(vec![7u8; 10]);
    let size = encoded_size(&term, &CodecConfig::default()).unwrap();
    assert_eq!(size, 16);
    let config = CodecConfig::default().with_buffer_capacity(size);
    assert_eq!(encode(&term, &config).unwrap().len(), size);

    let mut buffer = ScratchBuffer::new(size);
    assert_eq!(encode_into(&term, &config, &mut buffer).unwrap().len(), size);
    let mut small = ScratchBuffer::new(size - 1);
    assert!(matches!(
        encode_into(&term, &config, &mut small),
        Err(CodecError::BufferOverflow { .. })
    ));
}

#[test]
fn test_codec_handle_reuses_its_buffer() {
    init_logger();
    let mut codec = Codec::new(CodecConfig::default().with_buffer_capacity(64));
    let first = codec.encode(&Term::atom("first")).unwrap();
    assert!(codec.encode_nocopy(&Term::binary(vec![0u8; 100])).is_err());
    let second = codec.encode_nocopy(&Term::atom("first")).unwrap().to_vec();
    assert_eq!(first, second);
    assert_eq!(codec.decode(&second).unwrap(), Term::atom("first"));
}

#[test]
fn test_unsupported_value() {
    let config = CodecConfig::default();
    let atom = Term::atom("x".repeat(70_000));
    assert!(matches!(encode(&atom, &config), Err(CodecError::UnsupportedValue(_))));
}

#[test]
fn test_pp_bytes_of_message() {
    let bytes = encode(&Term::from(1), &CodecConfig::default()).unwrap();
    assert_eq!(pp_bytes(&bytes), "<<131,97,1>>");
}

#[test]
fn test_decode_prefix_rest_outlives_config() {
    let bytes = encode(&Term::atom("ok"), &CodecConfig::default()).unwrap();
    let mut stream = bytes.clone();
    stream.extend_from_slice(&[131, 106]);

    let rest = {
        let config = CodecConfig::default();
        let (term, rest) = decode_prefix(&stream, &config).unwrap();
        assert_eq!(term, Term::atom("ok"));
        rest
    };
    assert_eq!(rest, &[131, 106]);
}

#[test]
fn test_binary_map_keys_round_trip() {
    let config = CodecConfig::default().with_string_key_as_atom(false);
    let map = Term::Map(Map::from_pairs(vec![(Term::text("a"), Term::from(1))]));
    let bytes = encode(&map, &config).unwrap();
    assert_eq!(&bytes[6..8], &[109, 0]);

    let decoded = decode(&bytes, &config).unwrap();
    assert_eq!(decoded, map);
    let decoded = decoded.as_map().unwrap();
    assert_eq!(decoded.iter().next().unwrap().0, &Term::binary(b"a".to_vec()));
    assert_eq!(decoded.get(&Term::text("a")), Some(&Term::from(1)));
    assert_eq!(decoded.get(&Term::atom("a")), Some(&Term::from(1)));
}

#[test]
fn test_binary_and_atom_keys_share_one_slot() {
    let config = CodecConfig::default();
    // {a => 1, <<"a">> => 2}
    let bytes = [
        131, 116, 0, 0, 0, 2, 100, 0, 1, b'a', 97, 1, 109, 0, 0, 0, 1, b'a', 97, 2,
    ];
    let decoded = decode(&bytes, &config).unwrap();
    let decoded = decoded.as_map().unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.get(&Term::text("a")), Some(&Term::from(2)));
}

#[test]
fn test_every_strict_prefix_is_truncated() {
    init_logger();
    let elixir = CodecConfig::default();
    let erlang = CodecConfig::default().with_convention(Convention::Erlang);

    let mut huge = Integer::from(1);
    for _ in 0..40 {
        huge *= Integer::from(u64::MAX);
    }
    let mut map = Map::new();
    map.put(Term::text("key"), Term::list(vec![Term::from(1), Term::Float64(2.5)]));
    map.put(Term::from(7), Term::binary(b"seven".to_vec()));

    let mut messages = vec![
        encode(&Term::text("hello"), &erlang).unwrap(),
        encode(&Term::atom("ok"), &elixir).unwrap(),
        encode(&Term::tuple(vec![Term::from(1), Term::atom("x")]), &elixir).unwrap(),
        encode(&Term::tuple(vec![Term::Nil; 300]), &elixir).unwrap(),
        encode(&Term::Float64(-1.25), &elixir).unwrap(),
        encode(&Term::from(70_000), &elixir).unwrap(),
        encode(&Term::from(-5), &elixir).unwrap(),
        encode(&Term::list(vec![Term::from(1), Term::Nil]), &elixir).unwrap(),
        encode(&Term::Map(map), &elixir).unwrap(),
        encode(&Term::from(1i64 << 40), &elixir).unwrap(),
        encode(&Term::integer(huge), &elixir).unwrap(),
        encode(&Term::binary(b"bytes".to_vec()), &elixir).unwrap(),
    ];
    // Wire forms the encoder never produces
    messages.push(vec![131, 115, 2, b'o', b'k']);
    messages.push(vec![131, 118, 0, 2, b'o', b'k']);
    messages.push(vec![131, 119, 2, b'o', b'k']);
    let mut legacy_float = vec![131, 99];
    let mut field = b"1.50000000000000000000e+00".to_vec();
    field.resize(31, 0);
    legacy_float.extend_from_slice(&field);
    messages.push(legacy_float);

    for message in &messages {
        assert!(decode(message, &elixir).is_ok(), "{}", pp_bytes(message));
        for end in 1..message.len() {
            let prefix = &message[..end];
            assert!(
                matches!(decode(prefix, &elixir), Err(CodecError::Truncated { .. })),
                "prefix {} of {}",
                end,
                pp_bytes(message)
            );
        }
    }
}

#[test]
fn test_max_depth_bounds_encode_size_and_decode() {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let mut term = Term::from(1);
            for _ in 0..2000 {
                term = Term::tuple(vec![term]);
            }
            let default = CodecConfig::default();
            assert!(matches!(
                encode(&term, &default),
                Err(CodecError::NestingTooDeep { .. })
            ));
            assert!(matches!(
                encoded_size(&term, &default),
                Err(CodecError::NestingTooDeep { .. })
            ));

            let deep = CodecConfig::default().with_max_depth(4096);
            let bytes = encode(&term, &deep).unwrap();
            assert_eq!(encoded_size(&term, &deep).unwrap(), bytes.len());
            assert!(matches!(
                decode(&bytes, &default),
                Err(CodecError::NestingTooDeep { .. })
            ));
            assert_eq!(decode(&bytes, &deep).unwrap(), term);
        })
        .unwrap()
        .join()
        .unwrap();
}
