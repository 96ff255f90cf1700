//! Derive-based round trips through realistic data shapes.

use serde::{Deserialize, Serialize};
use serde_php::{from_str, to_string};
use std::collections::BTreeMap;

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(value: &T) {
    let text = to_string(value).expect("serialize failed");
    let back: T = from_str(&text).unwrap_or_else(|e| {
        panic!("deserialize failed: {} (wire text was {})", e, text);
    });
    assert_eq!(*value, back, "wire text was {}", text);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Address {
    street: String,
    city: String,
    zip: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Customer {
    id: u64,
    name: String,
    address: Address,
    orders: Vec<Order>,
    balance: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    sku: String,
    quantity: u32,
}

#[test]
fn nested_structs_roundtrip() {
    roundtrip(&Customer {
        id: 42,
        name: "Alice Müller".to_string(),
        address: Address {
            street: "Hauptstraße 5".to_string(),
            city: "Berlin".to_string(),
            zip: None,
        },
        orders: vec![
            Order {
                sku: "A-100".to_string(),
                quantity: 2,
            },
            Order {
                sku: "B-200".to_string(),
                quantity: 1,
            },
        ],
        balance: -13.37,
    });
}

#[test]
fn option_fields_roundtrip() {
    roundtrip(&Address {
        street: "Main St".to_string(),
        city: "Springfield".to_string(),
        zip: Some("12345".to_string()),
    });
}

#[test]
fn scalar_roundtrips() {
    roundtrip(&true);
    roundtrip(&i8::MIN);
    roundtrip(&u16::MAX);
    roundtrip(&i64::MIN);
    roundtrip(&u64::MAX);
    roundtrip(&0.1f64);
    roundtrip(&f32::MIN_POSITIVE);
    roundtrip(&'é');
    roundtrip(&"multi-byte 好 text".to_string());
    roundtrip(&None::<String>);
}

#[test]
fn collection_roundtrips() {
    roundtrip(&vec!["a".to_string(), String::new(), "ccc".to_string()]);
    roundtrip(&vec![vec![1i64], vec![], vec![2, 3]]);
    roundtrip(&(1i32, "pair".to_string(), false));

    let mut by_name = BTreeMap::new();
    by_name.insert("alice".to_string(), 30i64);
    by_name.insert("bob".to_string(), 25);
    roundtrip(&by_name);

    let mut by_id = BTreeMap::new();
    by_id.insert(-1i64, "negative".to_string());
    by_id.insert(7, "seven".to_string());
    roundtrip(&by_id);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper(i64);

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Pair(i32, i32);

#[test]
fn newtype_is_transparent() {
    assert_eq!(to_string(&Wrapper(5)).unwrap(), "i:5;");
    roundtrip(&Wrapper(5));
}

#[test]
fn tuple_struct_is_an_array() {
    assert_eq!(to_string(&Pair(1, 2)).unwrap(), "a:2:{i:0;i:1;i:1;i:2;}");
    roundtrip(&Pair(1, 2));
}

#[derive(Deserialize, Debug, PartialEq)]
struct Narrow {
    a: i32,
}

#[test]
fn unknown_wire_fields_are_skipped() {
    let value: Narrow = from_str(
        r#"O:6:"Narrow":3:{s:1:"a";i:1;s:5:"extra";s:3:"foo";s:4:"more";a:1:{i:0;i:9;}}"#,
    )
    .unwrap();
    assert_eq!(value, Narrow { a: 1 });
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct TwoFields {
    a: i32,
    b: String,
}

#[test]
fn missing_field_is_an_error() {
    let err = from_str::<TwoFields>(r#"O:9:"TwoFields":1:{s:1:"a";i:1;}"#).unwrap_err();
    assert!(err.to_string().contains('b'), "error was: {}", err);
}

#[derive(Deserialize, Debug, PartialEq)]
struct Borrowed<'a> {
    #[serde(borrow)]
    name: &'a str,
}

#[test]
fn string_fields_can_borrow_from_the_input() {
    let text = r#"O:8:"Borrowed":1:{s:4:"name";s:5:"Alice";}"#.to_string();
    let value: Borrowed<'_> = from_str(&text).unwrap();
    assert_eq!(value, Borrowed { name: "Alice" });
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Hand {
    trump: Suit,
    cards: Vec<Suit>,
}

#[test]
fn unit_enums_roundtrip_inside_structures() {
    roundtrip(&Hand {
        trump: Suit::Heart,
        cards: vec![Suit::Club, Suit::Spade],
    });
}

#[test]
fn enum_map_keys_write_the_bare_variant_name() {
    let mut map = BTreeMap::new();
    map.insert(Suit::Club, 1i64);
    assert_eq!(to_string(&map).unwrap(), r#"a:1:{s:4:"Club";i:1;}"#);
}
