use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use qs_form::{Any, Config, FloatFormat, record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Encodes to a querystring and decodes it back into a default value, with
/// and without form encoding.
macro_rules! roundtrip_test {
    ($config:expr, $data:expr) => {
        let data = &$data;

        for form_encoding in [false, true] {
            let config = $config.use_form_encoding(form_encoding);

            let serialized = config.encode_string(data).expect("encode");
            let mut deserialized = default_like(data);
            config
                .decode_str(&mut deserialized, &serialized)
                .expect("decode");

            pretty_assertions::assert_eq!(data, &deserialized, "via {serialized}");
        }
    };
    ($data:expr) => {
        roundtrip_test!(Config::new(), $data);
    };
}

fn default_like<T: Default>(_: &T) -> T {
    T::default()
}

// ========== BASIC RECORDS ==========

record! {
    #[derive(Debug, Default, PartialEq)]
    struct FlatStruct {
        a: u8,
        b: u8,
    }
}

#[test]
fn flat_struct() {
    roundtrip_test!(FlatStruct { a: 1, b: 2 });
}

// ========== PRIMITIVE TYPES ==========

record! {
    #[derive(Debug, Default, PartialEq)]
    struct PrimitiveTypes {
        bool_val: bool,
        i8_val: i8,
        i16_val: i16,
        i32_val: i32,
        i64_val: i64,
        isize_val: isize,
        u8_val: u8,
        u16_val: u16,
        u32_val: u32,
        u64_val: u64,
        usize_val: usize,
        f32_val: f32,
        f64_val: f64,
        string_val: String,
    }
}

#[test]
fn primitive_types() {
    roundtrip_test!(PrimitiveTypes {
        bool_val: true,
        i8_val: i8::MIN,
        i16_val: i16::MIN,
        i32_val: i32::MIN,
        i64_val: i64::MIN,
        isize_val: -1,
        u8_val: u8::MAX,
        u16_val: u16::MAX,
        u32_val: u32::MAX,
        u64_val: u64::MAX,
        usize_val: 7,
        f32_val: 2.5,
        f64_val: 6.02214076,
        string_val: "Hello, world! 你好世界 🦀".to_string(),
    });
}

#[test]
fn shortest_floats() {
    roundtrip_test!(
        Config::new().float_format(FloatFormat::Shortest),
        PrimitiveTypes {
            f32_val: 0.1,
            f64_val: 1e-300,
            ..Default::default()
        }
    );
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct TinyFloats {
        subnormal: f64,
        small: f64,
        tiny32: f32,
        subnormal32: f32,
        huge: f64,
    }
}

#[test]
fn tiny_floats() {
    roundtrip_test!(TinyFloats {
        subnormal: 5e-324,
        small: 1e-40,
        tiny32: 1e-20,
        subnormal32: 1e-40,
        huge: -1.7e308,
    });
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct EdgeCasePrimitives {
        empty_string: String,
        zero_int: i32,
        zero_float: f64,
        false_bool: bool,
        space_string: String,
        special_chars: String,
        percent_escape: String,
    }
}

#[test]
fn edge_case_primitives() {
    roundtrip_test!(EdgeCasePrimitives {
        empty_string: String::new(),
        zero_int: 0,
        zero_float: 0.0,
        false_bool: false,
        space_string: "   ".to_string(),
        special_chars: "!@#$%^&*()_+-=[]{}|;':,.<>?/~`".to_string(),
        percent_escape: "%41%zz+".to_string(),
    });
}

// ========== POINTERS ==========

record! {
    #[derive(Debug, Default, PartialEq)]
    struct OptionTypes {
        opt_none: Option<String>,
        opt_some_string: Option<String>,
        opt_some_int: Option<i32>,
        opt_some_bool: Option<bool>,
        opt_empty_string: Option<String>,
        opt_struct: Option<FlatStruct>,
    }
}

#[test]
fn option_types() {
    roundtrip_test!(OptionTypes {
        opt_none: None,
        opt_some_string: Some("Hello".to_string()),
        opt_some_int: Some(42),
        opt_some_bool: Some(true),
        opt_empty_string: Some(String::new()),
        opt_struct: Some(FlatStruct { a: 10, b: 20 }),
    });

    roundtrip_test!(OptionTypes {
        opt_none: None,
        opt_some_string: None,
        opt_some_int: None,
        opt_some_bool: None,
        opt_empty_string: None,
        opt_struct: None,
    });
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct OmittedPointers {
        kept: Option<u8>,
        omitted: Option<u8> = ",omitempty",
    }
}

#[test]
fn omitted_pointer_comes_back_allocated() {
    let data = OmittedPointers {
        kept: None,
        omitted: None,
    };
    let serialized = qs_form::to_string(&data).unwrap();
    assert_eq!(serialized, "kept=null");

    let mut deserialized = OmittedPointers::default();
    qs_form::from_str(&mut deserialized, &serialized).unwrap();
    assert_eq!(deserialized.kept, None);
    assert_eq!(deserialized.omitted, Some(0));
}

// ========== SEQUENCES ==========

record! {
    #[derive(Debug, Default, PartialEq)]
    struct VectorTypes {
        empty_vec: Vec<i32>,
        single_vec: Vec<String>,
        multi_vec: Vec<u8>,
        any_vec: Vec<Any>,
    }
}

#[test]
fn vector_types() {
    roundtrip_test!(VectorTypes {
        empty_vec: vec![],
        single_vec: vec!["only one".to_string()],
        multi_vec: vec![1, 2, 3, 4, 5],
        any_vec: vec![Any::from("x"), Any::from("")],
    });
}

// ========== NESTING AND CATCH-ALL ==========

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Address {
        city: String,
        postcode: String = "zip",
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Person {
        name: String,
        address: Address,
        tags: Vec<String> = "tag,omitempty",
        extra: BTreeMap<String, String>,
    }
}

#[test]
fn nested_with_catch_all() {
    roundtrip_test!(Person {
        name: "Ada".to_string(),
        address: Address {
            city: "London".to_string(),
            postcode: "N1".to_string(),
        },
        tags: vec!["math".to_string(), "engines".to_string()],
        extra: BTreeMap::from([
            ("born".to_string(), "1815".to_string()),
            ("lang".to_string(), "en".to_string()),
        ]),
    });
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct TypedCatchAll {
        id: u32,
        scores: IndexMap<String, f64>,
    }
}

#[test]
fn typed_catch_all() {
    roundtrip_test!(
        Config::new().float_format(FloatFormat::Shortest),
        TypedCatchAll {
            id: 3,
            scores: IndexMap::from([("alice".to_string(), 9.5), ("bob".to_string(), -1.25)]),
        }
    );
}

// ========== RANDOMIZED ==========

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Random {
        flag: bool,
        signed: i64,
        unsigned: u16,
        float: f64,
        text: String,
        maybe: Option<u32>,
        list: Vec<String>,
        rest: HashMap<String, i32>,
    }
}

const ALPHABET: &[char] = &[
    'a', 'b', 'Z', '0', ' ', '&', '=', '+', '%', '#', '?', '/', '[', ']', 'é', '😀',
];

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.random_range(0..12);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect()
}

fn random_record(rng: &mut StdRng) -> Random {
    let list_len = rng.random_range(0..4);
    let rest_len = rng.random_range(0..4);
    Random {
        flag: rng.random(),
        signed: rng.random(),
        unsigned: rng.random(),
        float: rng.random_range(-1.0..1.0) * 10f64.powi(rng.random_range(-320..300)),
        text: random_text(rng),
        maybe: rng.random_bool(0.5).then(|| rng.random()),
        list: (0..list_len).map(|_| random_text(rng)).collect(),
        // the prefix keeps catch-all keys clear of field names
        rest: (0..rest_len)
            .map(|_| (format!("x_{}", random_text(rng)), rng.random()))
            .collect(),
    }
}

#[test]
fn randomized_records() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let data = random_record(&mut rng);
        roundtrip_test!(data);
    }
}

#[test]
fn reencoding_reproduces_the_multimap() {
    let input: qs_form::Multimap = [
        ("name", "Ada"),
        ("city", "London"),
        ("zip", "N1"),
        ("tag", "a"),
        ("tag", "b"),
        ("born", "1815"),
    ]
    .into_iter()
    .collect();

    let mut person = Person::default();
    qs_form::decode(&mut person, &input).unwrap();
    assert_eq!(qs_form::encode(&person).unwrap(), input);
}
