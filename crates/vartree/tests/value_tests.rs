use vartree::{Kind, Payload, VarError, Value, EMPTY_HASH, EMPTY_TOKEN};

/// One representative value of every non-empty kind.
fn one_of_each() -> Vec<Value> {
    vec![
        Value::from(true),
        Value::from(i8::MIN),
        Value::from(u8::MAX),
        Value::from(i16::MIN),
        Value::from(u16::MAX),
        Value::from(i32::MIN),
        Value::from(u32::MAX),
        Value::from(i64::MIN),
        Value::from(u64::MAX),
        Value::from(1.5f32),
        Value::from(2.5f64),
        Value::extended(3.5),
        Value::from(vec!["one".to_string(), "two".to_string()]),
    ]
}

/// Which accessors succeed, as kinds.
fn successful_accessors(value: &Value) -> Vec<Kind> {
    let mut ok = Vec::new();
    let mut check = |kind, succeeded: bool| {
        if succeeded {
            ok.push(kind);
        }
    };
    check(Kind::Bool, value.as_bool().is_ok());
    check(Kind::Int8, value.as_int8().is_ok());
    check(Kind::UInt8, value.as_uint8().is_ok());
    check(Kind::Int16, value.as_int16().is_ok());
    check(Kind::UInt16, value.as_uint16().is_ok());
    check(Kind::Int32, value.as_int32().is_ok());
    check(Kind::UInt32, value.as_uint32().is_ok());
    check(Kind::Int64, value.as_int64().is_ok());
    check(Kind::UInt64, value.as_uint64().is_ok());
    check(Kind::Float, value.as_float().is_ok());
    check(Kind::Double, value.as_double().is_ok());
    check(Kind::ExtendedFloat, value.as_extended().is_ok());
    check(Kind::String, value.as_string().is_ok());
    check(Kind::StringList, value.as_string_list().is_ok());
    ok
}

// ============================================================================
// Construction and round-trip
// ============================================================================

#[test]
fn default_is_empty() {
    let value = Value::new();
    assert!(value.is_empty());
    assert!(!value.has_payload());
    assert_eq!(value.kind(), Kind::Empty);
    assert_eq!(value.hash_code(), EMPTY_HASH);
    assert_eq!(value.to_string(), EMPTY_TOKEN);
}

#[test]
fn integers_round_trip_at_bounds() {
    assert_eq!(Value::from(i8::MIN).as_int8(), Ok(i8::MIN));
    assert_eq!(Value::from(i8::MAX).as_int8(), Ok(i8::MAX));
    assert_eq!(Value::from(u8::MAX).as_uint8(), Ok(u8::MAX));
    assert_eq!(Value::from(i16::MIN).as_int16(), Ok(i16::MIN));
    assert_eq!(Value::from(u16::MAX).as_uint16(), Ok(u16::MAX));
    assert_eq!(Value::from(i32::MIN).as_int32(), Ok(i32::MIN));
    assert_eq!(Value::from(u32::MAX).as_uint32(), Ok(u32::MAX));
    assert_eq!(Value::from(i64::MIN).as_int64(), Ok(i64::MIN));
    assert_eq!(Value::from(u64::MAX).as_uint64(), Ok(u64::MAX));
    assert_eq!(Value::from(0u64).as_uint64(), Ok(0));
}

#[test]
fn floats_round_trip_at_bounds() {
    assert_eq!(Value::from(f32::MAX).as_float(), Ok(f32::MAX));
    assert_eq!(Value::from(f32::MIN_POSITIVE).as_float(), Ok(f32::MIN_POSITIVE));
    assert_eq!(Value::from(f64::MAX).as_double(), Ok(f64::MAX));
    assert_eq!(Value::from(f64::MIN).as_double(), Ok(f64::MIN));
    assert_eq!(Value::extended(f64::MIN_POSITIVE).as_extended(), Ok(f64::MIN_POSITIVE));
}

#[test]
fn bools_and_strings_round_trip() {
    assert_eq!(Value::from(true).as_bool(), Ok(true));
    assert_eq!(Value::from(false).as_bool(), Ok(false));
    assert_eq!(Value::from("hello").as_string(), Ok("hello"));
    assert_eq!(Value::from(String::from("owned")).as_string(), Ok("owned"));
    let list = Value::from(&["a", "b", "a"][..]);
    assert_eq!(
        list.as_string_list().unwrap(),
        &["a".to_string(), "b".to_string(), "a".to_string()]
    );
}

#[test]
fn none_str_builds_empty_not_empty_string() {
    assert!(Value::from(None::<&str>).is_empty());
    let empty_string = Value::from("");
    assert_eq!(empty_string.kind(), Kind::String);
    assert_eq!(empty_string.as_string(), Ok(""));
}

#[test]
fn generic_get_matches_accessors() {
    assert_eq!(Value::from(42i32).get::<i32>(), Ok(42));
    assert_eq!(Value::from(7u16).get::<u16>(), Ok(7));
    assert_eq!(Value::from(1.25f32).get::<f32>(), Ok(1.25));
    assert_eq!(Value::from("s").get::<String>(), Ok("s".to_string()));
    assert_eq!(
        Value::from_iter(["x", "y"]).get::<Vec<String>>(),
        Ok(vec!["x".to_string(), "y".to_string()])
    );
    assert!(Value::from(1i64).get::<i32>().is_err());
}

// ============================================================================
// Discriminant invariant
// ============================================================================

#[test]
fn exactly_one_accessor_succeeds() {
    for value in one_of_each() {
        assert_eq!(
            successful_accessors(&value),
            vec![value.kind()],
            "value {value} of kind {}",
            value.kind()
        );
    }
}

#[test]
fn empty_fails_every_accessor() {
    assert!(successful_accessors(&Value::new()).is_empty());
}

#[test]
fn mismatch_names_both_kinds() {
    let err = Value::from(5u8).as_int8().unwrap_err();
    assert_eq!(
        err,
        VarError::TypeMismatch {
            expected: Kind::Int8,
            found: Kind::UInt8,
        }
    );
    assert_eq!(
        err.to_string(),
        "illegal cast to int8, while the value type is uint8"
    );
}

#[test]
fn string_accessors_never_coerce() {
    let err = Value::from(12i32).as_string().unwrap_err();
    assert!(matches!(err, VarError::TypeMismatch { expected: Kind::String, .. }));
    let err = Value::from("a,b").as_string_list().unwrap_err();
    assert!(matches!(
        err,
        VarError::TypeMismatch {
            expected: Kind::StringList,
            found: Kind::String
        }
    ));
}

#[test]
fn bool_accessor_does_not_parse_strings() {
    assert!(matches!(
        Value::from("true").as_bool(),
        Err(VarError::TypeMismatch { .. })
    ));
}

// ============================================================================
// Stringification
// ============================================================================

#[test]
fn canonical_strings() {
    assert_eq!(Value::from(true).to_string(), "true");
    assert_eq!(Value::from(false).to_string(), "false");
    assert_eq!(Value::from(-128i8).to_string(), "-128");
    assert_eq!(Value::from(u64::MAX).to_string(), "18446744073709551615");
    assert_eq!(Value::from(0.5f32).to_string(), "0.500000");
    assert_eq!(Value::from(3.25f64).to_string(), "3.250000");
    assert_eq!(Value::extended(-2.0).to_string(), "-2.000000");
    assert_eq!(Value::from("as is, verbatim").to_string(), "as is, verbatim");
}

#[test]
fn floats_render_with_six_decimals() {
    assert_eq!(Value::from(1.5f32).to_string(), "1.500000");
    assert_eq!(Value::from(1e20f64).to_string(), "100000000000000000000.000000");
    assert_eq!(Value::from(1.0f64 / 3.0).to_string(), "0.333333");
    assert_eq!(Value::from(2.0f64 / 3.0).to_string(), "0.666667");
    assert_eq!(Value::from(1e-7f64).to_string(), "0.000000");
    assert_eq!(Value::extended(0.125).to_string(), "0.125000");
}

#[test]
fn string_list_joins_with_commas() {
    assert_eq!(Value::from_iter(["One", "Two", "Three"]).to_string(), "One,Two,Three");
    assert_eq!(Value::from_iter(["solo"]).to_string(), "solo");
    assert_eq!(Value::from(Vec::<String>::new()).to_string(), "");
}

#[test]
fn display_and_to_string_agree() {
    for value in one_of_each() {
        assert_eq!(format!("{value}"), value.to_string());
    }
}

#[test]
fn type_names() {
    assert_eq!(Value::new().type_name(), "empty");
    assert_eq!(Value::from(1u32).type_name(), "uint32");
    assert_eq!(Value::extended(1.0).type_name(), "long double");
    assert_eq!(Value::from_iter(["a"]).type_name(), "string list");
    assert_eq!(format!("{}", Kind::Int16), "int16");
}

// ============================================================================
// Hashing and equality
// ============================================================================

#[test]
fn hash_is_stable() {
    for value in one_of_each() {
        assert_eq!(value.hash_code(), value.hash_code());
        assert_eq!(value.clone().hash_code(), value.hash_code());
    }
}

#[test]
fn equal_content_equal_hash() {
    assert_eq!(Value::from(42i32).hash_code(), Value::from(42i32).hash_code());
    assert_eq!(Value::from("k").hash_code(), Value::from(String::from("k")).hash_code());
    assert_eq!(
        Value::from_iter(["a", "b"]).hash_code(),
        Value::from(vec!["a".to_string(), "b".to_string()]).hash_code()
    );
}

#[test]
fn string_list_hash_is_order_sensitive() {
    assert_ne!(
        Value::from_iter(["a", "b"]).hash_code(),
        Value::from_iter(["b", "a"]).hash_code()
    );
}

#[test]
fn different_kinds_never_equal() {
    assert_ne!(Value::from(1i32), Value::from(1i64));
    assert_ne!(Value::from(1u8), Value::from(1i8));
    assert_ne!(Value::from(1.0f32), Value::from(1.0f64));
    assert_ne!(Value::from(1.0f64), Value::extended(1.0));
    assert_ne!(Value::from("1"), Value::from(1i32));
    assert_ne!(Value::new(), Value::from(""));
}

#[test]
fn equality_ignores_hash_collisions_across_kinds() {
    // 0 and an empty value share the empty hash but are different kinds.
    let zero = Value::from(0i32);
    let empty = Value::new();
    assert_eq!(zero.hash_code(), empty.hash_code());
    assert_ne!(zero, empty);
}

#[test]
fn empties_are_equal() {
    assert_eq!(Value::new(), Value::default());
    assert_eq!(Value::new(), Value::from(None::<&str>));
}

#[test]
fn floats_use_ieee_equality() {
    assert_eq!(Value::from(0.0f64), Value::from(-0.0f64));
    assert_eq!(Value::from(0.0f64).hash_code(), Value::from(-0.0f64).hash_code());
    let nan = Value::from(f64::NAN);
    assert_ne!(nan, nan.clone());
}

// ============================================================================
// Reset, take, replace
// ============================================================================

#[test]
fn take_leaves_source_empty() {
    let mut source = Value::from("moved");
    let original_hash = source.hash_code();
    let destination = source.take();
    assert!(source.is_empty());
    assert_eq!(source.hash_code(), EMPTY_HASH);
    assert_eq!(destination.as_string(), Ok("moved"));
    assert_eq!(destination.hash_code(), original_hash);
}

#[test]
fn reset_is_idempotent() {
    let mut value = Value::from_iter(["a"]);
    value.reset();
    assert!(value.is_empty());
    assert_eq!(value.hash_code(), EMPTY_HASH);
    value.reset();
    assert!(value.is_empty());
    assert_eq!(value.hash_code(), EMPTY_HASH);
}

#[test]
fn replace_rehashes() {
    let mut value = Value::from(1u8);
    let old = value.replace("now a string");
    assert_eq!(old, Value::from(1u8));
    assert_eq!(value.kind(), Kind::String);
    assert_eq!(value.hash_code(), Value::from("now a string").hash_code());
}

#[test]
fn clone_is_deep() {
    let original = Value::from_iter(["a", "b"]);
    let mut copy = original.clone();
    copy.reset();
    assert_eq!(original.as_string_list().unwrap().len(), 2);
}

#[test]
fn payload_exposes_variant() {
    let value = Value::from(2.5f32);
    assert!(matches!(value.payload(), Payload::Float(v) if **v == 2.5));
    assert_eq!(value.into_payload().kind(), Kind::Float);
}
