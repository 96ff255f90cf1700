//! Byte-for-byte wire format vectors and malformed-input behavior.
//!
//! Every expected text here matches what PHP's own `serialize()` produces
//! for the equivalent value.

use serde::{Deserialize, Serialize};
use serde_php::{from_str, to_string, Error, PhpValue};

#[test]
fn null_and_unit() {
    assert_eq!(to_string(&()).unwrap(), "N;");
    assert_eq!(to_string(&None::<i32>).unwrap(), "N;");
    let unit: () = from_str("N;").unwrap();
    assert_eq!(unit, ());
    assert_eq!(from_str::<Option<i32>>("N;").unwrap(), None);
    assert_eq!(from_str::<Option<i32>>("i:5;").unwrap(), Some(5));
}

#[test]
fn booleans() {
    assert_eq!(to_string(&true).unwrap(), "b:1;");
    assert_eq!(to_string(&false).unwrap(), "b:0;");
    assert!(from_str::<bool>("b:1;").unwrap());
    assert!(!from_str::<bool>("b:0;").unwrap());
    // PHP maps any non-1 digit to false
    assert!(!from_str::<bool>("b:5;").unwrap());
}

#[test]
fn integers() {
    assert_eq!(to_string(&2147483647i32).unwrap(), "i:2147483647;");
    assert_eq!(to_string(&-42i64).unwrap(), "i:-42;");
    assert_eq!(to_string(&i64::MIN).unwrap(), "i:-9223372036854775808;");
    assert_eq!(from_str::<i32>("i:2147483647;").unwrap(), 2147483647);
    assert_eq!(from_str::<i64>("i:-42;").unwrap(), -42);
}

#[test]
fn u64_uses_plain_decimal_digits() {
    assert_eq!(to_string(&u64::MAX).unwrap(), "i:18446744073709551615;");
    assert_eq!(
        from_str::<u64>("i:18446744073709551615;").unwrap(),
        u64::MAX
    );
}

#[test]
fn narrowing_reports_the_out_of_range_literal() {
    let err = from_str::<i8>("i:300;").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidNumber {
            position: 2,
            text: "300".to_string(),
        }
    );
}

#[test]
fn floats() {
    assert_eq!(to_string(&2.5f64).unwrap(), "d:2.5;");
    assert_eq!(to_string(&f64::MAX).unwrap(), "d:1.7976931348623157E308;");
    assert_eq!(to_string(&f32::MAX).unwrap(), "d:3.4028235E38;");
    assert_eq!(from_str::<f64>("d:2.5;").unwrap(), 2.5);
    assert_eq!(from_str::<f64>("d:1.7976931348623157E308;").unwrap(), f64::MAX);
    // lowercase exponent markers are accepted on decode
    assert_eq!(from_str::<f64>("d:1.5e3;").unwrap(), 1500.0);
    assert_eq!(from_str::<f32>("d:3.4028235E38;").unwrap(), f32::MAX);
}

#[test]
fn non_finite_floats_use_php_literals() {
    assert_eq!(to_string(&f64::INFINITY).unwrap(), "d:INF;");
    assert_eq!(to_string(&f64::NEG_INFINITY).unwrap(), "d:-INF;");
    assert_eq!(to_string(&f64::NAN).unwrap(), "d:NAN;");
    assert_eq!(from_str::<f64>("d:INF;").unwrap(), f64::INFINITY);
    assert_eq!(from_str::<f64>("d:-INF;").unwrap(), f64::NEG_INFINITY);
    assert!(from_str::<f64>("d:NAN;").unwrap().is_nan());
}

#[test]
fn strings_declare_byte_lengths() {
    assert_eq!(
        to_string("Hello, World!").unwrap(),
        r#"s:13:"Hello, World!";"#
    );
    // 6 bytes, 5 characters
    assert_eq!(to_string("héllo").unwrap(), r#"s:6:"héllo";"#);
    // 15 bytes, 5 characters
    assert_eq!(to_string("こんにちは").unwrap(), r#"s:15:"こんにちは";"#);
    assert_eq!(
        from_str::<String>(r#"s:15:"こんにちは";"#).unwrap(),
        "こんにちは"
    );
}

#[test]
fn multi_codepoint_clusters_count_bytes() {
    // Family emoji: four 4-byte emoji joined by three 3-byte ZWJs
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";
    assert_eq!(family.len(), 25);
    let text = to_string(family).unwrap();
    assert_eq!(text, format!("s:25:\"{}\";", family));
    assert_eq!(from_str::<String>(&text).unwrap(), family);
}

#[test]
fn strings_decode_borrowed() {
    let text = r#"s:5:"hello";"#.to_string();
    let s: &str = from_str(&text).unwrap();
    assert_eq!(s, "hello");
}

#[test]
fn chars_encode_their_true_byte_length() {
    assert_eq!(to_string(&'a').unwrap(), r#"s:1:"a";"#);
    assert_eq!(to_string(&'好').unwrap(), r#"s:3:"好";"#);
    assert_eq!(from_str::<char>(r#"s:3:"好";"#).unwrap(), '好');
    assert!(from_str::<char>(r#"s:2:"ab";"#).is_err());
}

#[test]
fn lists_carry_implicit_integer_keys() {
    assert_eq!(
        to_string(&vec![1, 2, 3]).unwrap(),
        "a:3:{i:0;i:1;i:1;i:2;i:2;i:3;}"
    );
    assert_eq!(
        from_str::<Vec<i64>>("a:3:{i:0;i:1;i:1;i:2;i:2;i:3;}").unwrap(),
        vec![1, 2, 3]
    );
    assert_eq!(to_string::<Vec<i32>>(&vec![]).unwrap(), "a:0:{}");
}

#[test]
fn list_decode_skips_string_keys() {
    // PHP arrays can mix key kinds; list targets ignore the keys entirely
    let values: Vec<i64> = from_str(r#"a:2:{s:1:"a";i:1;s:1:"b";i:2;}"#).unwrap();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn maps_write_explicit_keys() {
    let mut map = std::collections::BTreeMap::new();
    map.insert("key1", 1);
    map.insert("key2", 2);
    assert_eq!(
        to_string(&map).unwrap(),
        r#"a:2:{s:4:"key1";i:1;s:4:"key2";i:2;}"#
    );

    let back: std::collections::BTreeMap<String, i64> =
        from_str(r#"a:2:{s:4:"key1";i:1;s:4:"key2";i:2;}"#).unwrap();
    assert_eq!(back.get("key1"), Some(&1));
    assert_eq!(back.get("key2"), Some(&2));
}

#[test]
fn integer_map_keys() {
    let mut map = std::collections::BTreeMap::new();
    map.insert(10i64, "ten");
    assert_eq!(to_string(&map).unwrap(), r#"a:1:{i:10;s:3:"ten";}"#);
    let back: std::collections::BTreeMap<i64, String> =
        from_str(r#"a:1:{i:10;s:3:"ten";}"#).unwrap();
    assert_eq!(back.get(&10).map(String::as_str), Some("ten"));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SimpleClass {
    a: i32,
    b: String,
}

#[test]
fn objects_carry_class_name_and_field_order() {
    let value = SimpleClass {
        a: 123,
        b: "hello".to_string(),
    };
    let expected = r#"O:11:"SimpleClass":2:{s:1:"a";i:123;s:1:"b";s:5:"hello";}"#;
    assert_eq!(to_string(&value).unwrap(), expected);
    assert_eq!(from_str::<SimpleClass>(expected).unwrap(), value);
}

#[test]
fn object_class_name_is_informational_on_decode() {
    // A different class name on the wire still decodes into the target
    let value: SimpleClass =
        from_str(r#"O:5:"Other":2:{s:1:"a";i:1;s:1:"b";s:1:"x";}"#).unwrap();
    assert_eq!(value.a, 1);
}

#[derive(Serialize)]
#[serde(rename = "invalid_name")]
struct BadName {
    a: i32,
}

#[test]
fn encoding_rejects_non_psr1_class_names() {
    let err = to_string(&BadName { a: 1 }).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidClassName {
            name: "invalid_name".to_string(),
        }
    );
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum TestEnum {
    EnumA,
    EnumB,
}

#[test]
fn unit_variants_encode_as_enum_cases() {
    assert_eq!(to_string(&TestEnum::EnumB).unwrap(), r#"E:14:"TestEnum:EnumB";"#);
    assert_eq!(
        from_str::<TestEnum>(r#"E:14:"TestEnum:EnumB";"#).unwrap(),
        TestEnum::EnumB
    );
}

#[test]
fn unknown_enum_member_fails_lookup() {
    assert!(from_str::<TestEnum>(r#"E:14:"TestEnum:EnumC";"#).is_err());
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Sealed {
    SealedA { a: i32 },
    SealedB(i64),
}

#[derive(Serialize, Debug, PartialEq)]
struct SealedA {
    a: i32,
}

#[test]
fn data_variants_drop_the_discriminator_on_encode() {
    // Struct variants emit an object named after the variant, so the output
    // equals encoding the payload directly
    let as_variant = to_string(&Sealed::SealedA { a: 1 }).unwrap();
    let as_payload = to_string(&SealedA { a: 1 }).unwrap();
    assert_eq!(as_variant, as_payload);
    assert_eq!(as_variant, r#"O:7:"SealedA":1:{s:1:"a";i:1;}"#);

    // Newtype variants emit the bare payload
    assert_eq!(to_string(&Sealed::SealedB(9)).unwrap(), "i:9;");
}

#[test]
fn data_variants_cannot_be_decoded() {
    let err = from_str::<Sealed>(r#"O:7:"SealedA":1:{s:1:"a";i:1;}"#).unwrap_err();
    assert_eq!(err, Error::MissingDiscriminator);
    // The failure is independent of input content
    assert_eq!(from_str::<Sealed>("i:9;").unwrap_err(), Error::MissingDiscriminator);
}

#[test]
fn dynamic_values_keep_full_fidelity() {
    let text = r#"O:11:"SimpleClass":2:{s:1:"a";i:123;s:1:"b";s:5:"hello";}"#;
    let value = PhpValue::from_php_str(text).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.class, "SimpleClass");
    assert_eq!(object.get("a"), Some(&PhpValue::Int(123)));
    assert_eq!(value.to_php_string().unwrap(), text);
}

#[test]
fn wrong_delimiter_reports_position_and_both_chars() {
    let err = from_str::<i64>("x:1;").unwrap_err();
    assert_eq!(
        err,
        Error::UnexpectedChar {
            position: 0,
            expected: 'i',
            found: 'x',
        }
    );
}

#[test]
fn bad_numeric_literal_reports_the_text() {
    let err = from_str::<i64>("i:12x;").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidNumber {
            position: 2,
            text: "12x".to_string(),
        }
    );
}

#[test]
fn truncated_input_reports_eof() {
    assert!(matches!(
        from_str::<i64>("i:12").unwrap_err(),
        Error::UnexpectedEof { .. }
    ));
}

#[test]
fn overlong_string_length_is_malformed() {
    let err = from_str::<String>(r#"s:10:"abc";"#).unwrap_err();
    assert_eq!(
        err,
        Error::StringLengthMismatch {
            position: 6,
            declared: 10,
            available: 5,
        }
    );
}

#[test]
fn string_length_splitting_a_character_is_malformed() {
    let err = from_str::<String>(r#"s:1:"é";"#).unwrap_err();
    assert_eq!(
        err,
        Error::StringBoundary {
            position: 5,
            declared: 1,
        }
    );
}

#[test]
fn excess_elements_fail_at_the_closing_brace() {
    let err = from_str::<Vec<i64>>("a:1:{i:0;i:1;i:1;i:2;}").unwrap_err();
    assert_eq!(
        err,
        Error::UnexpectedChar {
            position: 13,
            expected: '}',
            found: 'i',
        }
    );
}

#[test]
fn early_closing_brace_terminates_decoding() {
    // Declared count of 3 but only 2 entries: the brace wins
    let values: Vec<i64> = from_str("a:3:{i:0;i:1;i:1;i:2;}").unwrap();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn reference_tokens_are_rejected() {
    let err = PhpValue::from_php_str("R:1;").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownTypeMarker {
            position: 0,
            found: 'R',
        }
    );
    assert!(PhpValue::from_php_str(r#"C:3:"Foo":1:{}"#).is_err());
}

#[test]
fn trailing_text_is_rejected() {
    let err = from_str::<bool>("b:1;N;").unwrap_err();
    assert_eq!(err, Error::TrailingCharacters { position: 4 });
}
