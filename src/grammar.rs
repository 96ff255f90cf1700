//! The PHP `serialize()` wire grammar.
//!
//! This module documents the textual format as implemented by this library
//! and holds the token alphabet shared by the encoder and the decoder.
//!
//! # Overview
//!
//! The format is the text produced by PHP's built-in `serialize()` function
//! and consumed by `unserialize()`. Every value starts with a one-byte type
//! marker and ends with `;` (scalars) or `}` (aggregates). All declared
//! lengths count UTF-8 **bytes**, never characters.
//!
//! # Productions
//!
//! | Kind | Production | Example |
//! |------|-----------|---------|
//! | Null | `N;` | `N;` |
//! | Bool | `b:` (`0` \| `1`) `;` | `b:1;` |
//! | Int | `i:` \[`-`\] digits `;` | `i:-42;` |
//! | Float | `d:` number `;` | `d:3.4028235E38;` |
//! | String | `s:` len `:"` bytes `";` | `s:6:"héllo";` (`é` is two bytes) |
//! | Array | `a:` n `:{` (key value)*n* `}` | `a:1:{i:0;i:7;}` |
//! | Object | `O:` len `:"` Name `":` n `:{` (field value)*n* `}` | `O:4:"User":1:{s:2:"id";i:9;}` |
//! | Enum | `E:` len `:"` Type `:` Member `";` | `E:9:"Suit:Club";` |
//!
//! Array keys are restricted to integers and strings. The enum length covers
//! the type name, the separating colon and the member name. Float literals may
//! use scientific notation with an uppercase `E` marker, or the non-finite
//! literals `INF`, `-INF` and `NAN`.
//!
//! # Class names
//!
//! Object and enum type names must satisfy the PSR-1 class-name rule: an
//! ASCII uppercase letter followed by ASCII letters and digits. The encoder
//! rejects anything else; the decoder reads names without validating them.

use crate::error::{Error, Result};

/// Type marker for `N;`.
pub const MARKER_NULL: u8 = b'N';
/// Type marker for booleans.
pub const MARKER_BOOL: u8 = b'b';
/// Type marker for integers.
pub const MARKER_INT: u8 = b'i';
/// Type marker for floats.
pub const MARKER_FLOAT: u8 = b'd';
/// Type marker for strings.
pub const MARKER_STRING: u8 = b's';
/// Type marker for arrays.
pub const MARKER_ARRAY: u8 = b'a';
/// Type marker for objects.
pub const MARKER_OBJECT: u8 = b'O';
/// Type marker for enum cases.
pub const MARKER_ENUM: u8 = b'E';

/// Wire literal for positive infinity.
pub const INF: &str = "INF";
/// Wire literal for negative infinity.
pub const NEG_INF: &str = "-INF";
/// Wire literal for not-a-number.
pub const NAN: &str = "NAN";

/// Returns `true` if `name` is a valid PSR-1 class name.
///
/// PSR-1 requires an ASCII uppercase first letter and ASCII alphanumeric
/// remainder. Underscores, hyphens and non-ASCII letters are rejected.
///
/// # Examples
///
/// ```rust
/// use serde_php::grammar::is_valid_class_name;
///
/// assert!(is_valid_class_name("SimpleClass"));
/// assert!(is_valid_class_name("Rfc7231"));
/// assert!(!is_valid_class_name("snake_case"));
/// assert!(!is_valid_class_name("1Class"));
/// ```
pub fn is_valid_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Validates a class name for encoding, passing it through on success.
pub(crate) fn validate_class_name(name: &str) -> Result<&str> {
    if is_valid_class_name(name) {
        Ok(name)
    } else {
        Err(Error::invalid_class_name(name))
    }
}
