//! # serde_php
//!
//! A Serde-compatible codec for PHP's native `serialize()`/`unserialize()`
//! textual wire format.
//!
//! ## What the format looks like
//!
//! PHP renders every value as a one-byte type marker followed by a length or
//! payload: `N;` for null, `b:1;` for `true`, `i:42;`, `d:2.5;`,
//! `s:5:"hello";`, and brace-delimited aggregates for arrays and objects.
//! All declared lengths count UTF-8 **bytes**, never characters, which is
//! the main thing naive parsers get wrong.
//!
//! ## Key features
//!
//! - **Serde compatible**: works with `#[derive(Serialize, Deserialize)]`
//! - **Byte-exact strings**: multi-byte text, including multi-codepoint emoji
//!   clusters, is counted and sliced at byte granularity
//! - **Stable float text**: floats render to the same wire text on every
//!   runtime, with PHP's uppercase `E` exponent marker and `INF`/`-INF`/`NAN`
//!   literals
//! - **Zero-copy strings**: decoding borrows string content from the input
//!   when the target type allows it
//! - **Bounded nesting**: an explicit frame stack with a configurable depth
//!   limit guards against hostile deeply-nested payloads
//!
//! ## Quick start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_php = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic serialization and deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_php::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user)?;
//! assert_eq!(
//!     text,
//!     r#"O:4:"User":3:{s:2:"id";i:123;s:4:"name";s:5:"Alice";s:6:"active";b:1;}"#
//! );
//!
//! let user_back: User = from_str(&text)?;
//! assert_eq!(user, user_back);
//! # Ok::<(), serde_php::Error>(())
//! ```
//!
//! ### Arrays and maps
//!
//! PHP has a single array construct for both. Rust sequences get implicit
//! `0..n` integer keys; Rust maps write their own keys:
//!
//! ```rust
//! use serde_php::to_string;
//! use std::collections::BTreeMap;
//!
//! assert_eq!(to_string(&vec![1, 2, 3])?, "a:3:{i:0;i:1;i:1;i:2;i:2;i:3;}");
//!
//! let mut scores = BTreeMap::new();
//! scores.insert("key1", 1);
//! scores.insert("key2", 2);
//! assert_eq!(
//!     to_string(&scores)?,
//!     r#"a:2:{s:4:"key1";i:1;s:4:"key2";i:2;}"#
//! );
//! # Ok::<(), serde_php::Error>(())
//! ```
//!
//! ### Dynamic values
//!
//! When the structure is not known at compile time, or when object class
//! names must survive the round trip, use [`PhpValue`]:
//!
//! ```rust
//! use serde_php::{php_array, PhpValue};
//!
//! let parsed = PhpValue::from_php_str(r#"a:1:{s:4:"name";s:5:"Alice";}"#)?;
//! assert_eq!(parsed, php_array! { "name" => "Alice" });
//! # Ok::<(), serde_php::Error>(())
//! ```
//!
//! ## Enums and the missing discriminator
//!
//! Unit variants encode as PHP 8.1 backed-enum cases
//! (`E:9:"Suit:Club";`) and round-trip. Variants that carry data encode as
//! their bare payload: the wire format has no slot for the variant name, so
//! the discriminator is dropped and such enums cannot be decoded back. See
//! [`Error::MissingDiscriminator`].
//!
//! ## What is not supported
//!
//! PHP object internals beyond public fields: visibility name mangling,
//! references (`R:`/`r:`), `Serializable` payloads (`C:`) and shared object
//! identity. Those tokens are rejected as malformed input.

#![forbid(unsafe_code)]

pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod number;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::PhpArray;
pub use number::{format_double, format_float};
pub use options::{PhpOptions, DEFAULT_MAX_DEPTH};
pub use ser::Serializer;
pub use value::{ArrayKey, PhpObject, PhpValue};

use serde::{Deserialize, Serialize};
use std::io;

/// Serializes any `T: Serialize` to a PHP wire-format string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_php::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 })?;
/// assert_eq!(text, r#"O:5:"Point":2:{s:1:"x";i:1;s:1:"y";i:2;}"#);
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if a struct or enum type name fails PSR-1 validation, a
/// map key is neither an integer nor a string, or a sequence/map has no
/// upfront length.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Converts any `T: Serialize` to a [`PhpValue`] tree.
///
/// Structs become [`PhpValue::Object`] carrying the struct name, unit enum
/// variants become [`PhpValue::Enum`], and data-carrying variants lose their
/// discriminator exactly as in text encoding.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_php::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 })?;
/// assert!(value.is_object());
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error under the same conditions as [`to_string`], or if an
/// integer exceeds the PHP integer range.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<PhpValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(crate::ser::ValueSerializer)
}

/// Serializes any `T: Serialize` to a writer in PHP wire format.
///
/// # Examples
///
/// ```rust
/// use serde_php::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &42)?;
/// assert_eq!(buffer, b"i:42;");
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from a string of PHP wire text.
///
/// String content is borrowed from the input where the target type allows.
/// Text remaining after the top-level value is an error.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_php::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(r#"O:5:"Point":2:{s:1:"x";i:1;s:1:"y";i:2;}"#)?;
/// assert_eq!(point, Point { x: 1, y: 2 });
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid wire text or cannot be
/// deserialized to type `T`. Error messages include the byte offset of the
/// problem.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_str_with_options(s, PhpOptions::default())
}

/// Deserializes an instance of type `T` with explicit decoding options.
///
/// # Examples
///
/// ```rust
/// use serde_php::{from_str_with_options, PhpOptions};
///
/// let options = PhpOptions::new().with_max_depth(2);
/// let nested: Vec<Vec<i64>> =
///     from_str_with_options("a:1:{i:0;a:1:{i:0;i:7;}}", options)?;
/// assert_eq!(nested, vec![vec![7]]);
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error under the same conditions as [`from_str`], or if the
/// input nests deeper than the configured limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: PhpOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options);
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deserializes an instance of type `T` from bytes of PHP wire text.
///
/// # Examples
///
/// ```rust
/// use serde_php::from_slice;
///
/// let n: i64 = from_slice(b"i:42;")?;
/// assert_eq!(n, 42);
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid wire text,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of type `T` from an I/O stream of PHP wire text.
///
/// # Examples
///
/// ```rust
/// use serde_php::from_reader;
/// use std::io::Cursor;
///
/// let n: i64 = from_reader(Cursor::new(b"i:42;"))?;
/// assert_eq!(n, 42);
/// # Ok::<(), serde_php::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid wire text, or
/// the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
