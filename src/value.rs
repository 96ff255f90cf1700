//! Dynamic value representation for PHP data.
//!
//! This module provides the [`PhpValue`] enum which represents any value the
//! wire format can carry. It's useful when the structure isn't known at
//! compile time, or when objects must keep their PHP class names (the serde
//! data model has no place for a class name, so typed decoding discards it).
//!
//! ## Core Types
//!
//! - [`PhpValue`]: one variant per wire-format kind (null, bool, int, float,
//!   string, array, object, enum case)
//! - [`ArrayKey`]: the two key kinds PHP arrays allow (integer and string)
//! - [`PhpObject`]: a class name plus ordered fields
//!
//! ## Usage Patterns
//!
//! ### Parsing unknown payloads
//!
//! ```rust
//! use serde_php::PhpValue;
//!
//! let value = PhpValue::from_php_str(r#"O:4:"User":1:{s:2:"id";i:7;}"#)?;
//! if let PhpValue::Object(user) = &value {
//!     assert_eq!(user.class, "User");
//!     assert_eq!(user.get("id").and_then(|v| v.as_i64()), Some(7));
//! }
//! assert_eq!(value.to_php_string()?, r#"O:4:"User":1:{s:2:"id";i:7;}"#);
//! # Ok::<(), serde_php::Error>(())
//! ```
//!
//! ### Building values programmatically
//!
//! ```rust
//! use serde_php::{php_array, PhpValue};
//!
//! let value = php_array! { "name" => "Alice", "age" => 30 };
//! assert!(value.is_array());
//! ```
//!
//! ### Converting from Rust types
//!
//! ```rust
//! use serde_php::{to_value, PhpValue};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 10, y: 20 })?;
//! if let PhpValue::Object(obj) = &value {
//!     assert_eq!(obj.class, "Point");
//!     assert_eq!(obj.len(), 2);
//! }
//! # Ok::<(), serde_php::Error>(())
//! ```

use indexmap::IndexMap;
use std::fmt;

use crate::error::Result;
use crate::map::PhpArray;
use crate::options::PhpOptions;

/// A dynamically-typed representation of any wire-format value.
///
/// Unlike typed decoding through serde, a `PhpValue` tree preserves
/// everything the text carries: object class names, enum type names, and
/// mixed integer/string array keys.
///
/// `PhpValue` deliberately does not implement `Serialize`/`Deserialize`;
/// round-tripping through the serde data model would drop class names and
/// silently disagree with [`PhpValue::from_php_str`]. Use
/// [`to_php_string`](PhpValue::to_php_string) and
/// [`from_php_str`](PhpValue::from_php_str) instead.
///
/// # Examples
///
/// ```rust
/// use serde_php::PhpValue;
///
/// let null = PhpValue::Null;
/// let num = PhpValue::Int(42);
/// let text = PhpValue::from("hello");
///
/// assert!(null.is_null());
/// assert!(num.is_int());
/// assert!(text.is_str());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum PhpValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(PhpArray),
    Object(PhpObject),
    /// A PHP 8.1 backed-enum case, e.g. `Suit::Club` on the wire as
    /// `E:9:"Suit:Club";`.
    Enum {
        class: String,
        member: String,
    },
}

/// A key of a PHP array: an integer or a string.
///
/// # Examples
///
/// ```rust
/// use serde_php::ArrayKey;
///
/// assert_eq!(ArrayKey::from(3).as_int(), Some(3));
/// assert_eq!(ArrayKey::from("id").as_str(), Some("id"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

/// An object value: a class name plus its fields in declaration order.
///
/// # Examples
///
/// ```rust
/// use serde_php::{PhpObject, PhpValue};
///
/// let mut user = PhpObject::new("User");
/// user.insert("id", PhpValue::Int(7));
/// assert_eq!(user.get("id"), Some(&PhpValue::Int(7)));
/// assert_eq!(user.into_value().to_php_string()?, r#"O:4:"User":1:{s:2:"id";i:7;}"#);
/// # Ok::<(), serde_php::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PhpObject {
    /// The PHP class name. Validated against the PSR-1 rule when rendered.
    pub class: String,
    /// Field name to value, in declaration order.
    pub fields: IndexMap<String, PhpValue>,
}

impl PhpValue {
    /// Parses one wire-format value with full fidelity.
    ///
    /// Trailing text after the value is an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::{ArrayKey, PhpValue};
    ///
    /// let value = PhpValue::from_php_str(r#"a:1:{s:3:"key";i:5;}"#)?;
    /// if let PhpValue::Array(array) = &value {
    ///     assert_eq!(array.get_str("key").and_then(|v| v.as_i64()), Some(5));
    /// }
    /// # Ok::<(), serde_php::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid wire text.
    pub fn from_php_str(input: &str) -> Result<PhpValue> {
        Self::from_php_str_with_options(input, PhpOptions::default())
    }

    /// Parses one wire-format value with explicit decoding options.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid wire text or exceeds the
    /// configured nesting depth.
    pub fn from_php_str_with_options(input: &str, options: PhpOptions) -> Result<PhpValue> {
        let mut deserializer = crate::de::Deserializer::with_options(input, options);
        let value = deserializer.read_value()?;
        deserializer.end()?;
        Ok(value)
    }

    /// Renders this value as wire text.
    ///
    /// # Errors
    ///
    /// Returns an error if an object or enum class name fails PSR-1
    /// validation.
    pub fn to_php_string(&self) -> Result<String> {
        let mut serializer = crate::ser::Serializer::new();
        serializer.write_value(self)?;
        Ok(serializer.into_inner())
    }

    /// Returns `true` if the value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, PhpValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, PhpValue::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, PhpValue::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, PhpValue::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, PhpValue::Str(_))
    }

    /// Returns `true` if the value is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, PhpValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, PhpValue::Object(_))
    }

    /// Returns `true` if the value is an enum case.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, PhpValue::Enum { .. })
    }

    /// Returns the boolean if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            PhpValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            PhpValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers convert losslessly enough for
    /// PHP's own arithmetic semantics.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PhpValue::Float(f) => Some(*f),
            PhpValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PhpValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the array if this is an `Array`.
    #[must_use]
    pub const fn as_array(&self) -> Option<&PhpArray> {
        match self {
            PhpValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the object if this is an `Object`.
    #[must_use]
    pub const fn as_object(&self) -> Option<&PhpObject> {
        match self {
            PhpValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl ArrayKey {
    /// Returns the integer if this is an `Int` key.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            ArrayKey::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `Str` key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArrayKey::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{}", i),
            ArrayKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl PhpObject {
    /// Creates an object with no fields.
    pub fn new(class: impl Into<String>) -> Self {
        PhpObject {
            class: class.into(),
            fields: IndexMap::new(),
        }
    }

    /// Inserts a field, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: PhpValue) -> Option<PhpValue> {
        self.fields.insert(name.into(), value)
    }

    /// Returns a reference to the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PhpValue> {
        self.fields.get(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the object has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wraps the object as a [`PhpValue`].
    #[must_use]
    pub fn into_value(self) -> PhpValue {
        PhpValue::Object(self)
    }
}

impl From<bool> for PhpValue {
    fn from(b: bool) -> Self {
        PhpValue::Bool(b)
    }
}

impl From<i8> for PhpValue {
    fn from(i: i8) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<i16> for PhpValue {
    fn from(i: i16) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<i32> for PhpValue {
    fn from(i: i32) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<i64> for PhpValue {
    fn from(i: i64) -> Self {
        PhpValue::Int(i)
    }
}

impl From<u8> for PhpValue {
    fn from(i: u8) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<u16> for PhpValue {
    fn from(i: u16) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<u32> for PhpValue {
    fn from(i: u32) -> Self {
        PhpValue::Int(i64::from(i))
    }
}

impl From<f32> for PhpValue {
    fn from(f: f32) -> Self {
        PhpValue::Float(f64::from(f))
    }
}

impl From<f64> for PhpValue {
    fn from(f: f64) -> Self {
        PhpValue::Float(f)
    }
}

impl From<&str> for PhpValue {
    fn from(s: &str) -> Self {
        PhpValue::Str(s.to_string())
    }
}

impl From<String> for PhpValue {
    fn from(s: String) -> Self {
        PhpValue::Str(s)
    }
}

impl From<PhpArray> for PhpValue {
    fn from(a: PhpArray) -> Self {
        PhpValue::Array(a)
    }
}

impl From<PhpObject> for PhpValue {
    fn from(o: PhpObject) -> Self {
        PhpValue::Object(o)
    }
}

impl<T: Into<PhpValue>> From<Option<T>> for PhpValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => PhpValue::Null,
        }
    }
}

impl From<i64> for ArrayKey {
    fn from(i: i64) -> Self {
        ArrayKey::Int(i)
    }
}

impl From<i32> for ArrayKey {
    fn from(i: i32) -> Self {
        ArrayKey::Int(i64::from(i))
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        ArrayKey::Str(s.to_string())
    }
}

impl From<String> for ArrayKey {
    fn from(s: String) -> Self {
        ArrayKey::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variants() {
        assert!(PhpValue::Null.is_null());
        assert_eq!(PhpValue::from(42).as_i64(), Some(42));
        assert_eq!(PhpValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(PhpValue::from(3).as_f64(), Some(3.0));
        assert_eq!(PhpValue::from("x").as_str(), Some("x"));
        assert_eq!(PhpValue::from(true).as_bool(), Some(true));
        assert_eq!(PhpValue::Null.as_i64(), None);
    }

    #[test]
    fn object_round_trips_through_wire_text() {
        let mut obj = PhpObject::new("SimpleClass");
        obj.insert("a", PhpValue::Int(123));
        obj.insert("b", PhpValue::from("hello"));

        let text = obj.clone().into_value().to_php_string().unwrap();
        assert_eq!(text, r#"O:11:"SimpleClass":2:{s:1:"a";i:123;s:1:"b";s:5:"hello";}"#);

        let parsed = PhpValue::from_php_str(&text).unwrap();
        assert_eq!(parsed, PhpValue::Object(obj));
    }

    #[test]
    fn enum_case_survives_the_round_trip() {
        let value = PhpValue::from_php_str(r#"E:14:"TestEnum:EnumB";"#).unwrap();
        assert_eq!(
            value,
            PhpValue::Enum {
                class: "TestEnum".to_string(),
                member: "EnumB".to_string(),
            }
        );
        assert_eq!(value.to_php_string().unwrap(), r#"E:14:"TestEnum:EnumB";"#);
    }

    #[test]
    fn rendering_rejects_invalid_class_names() {
        let obj = PhpObject::new("not a class").into_value();
        assert!(obj.to_php_string().is_err());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(PhpValue::from(None::<i64>), PhpValue::Null);
        assert_eq!(PhpValue::from(Some(5)), PhpValue::Int(5));
    }
}
