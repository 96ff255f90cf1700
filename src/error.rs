//! Error types for PHP serialization and deserialization.
//!
//! Decode errors carry the byte offset where the problem was found, so a
//! failing payload can be diagnosed without re-parsing it by hand.
//!
//! ## Error Categories
//!
//! - **Malformed input**: the text does not match the wire grammar (wrong
//!   delimiter, truncated string, bad numeric literal)
//! - **Validation**: a class name rejected by the PSR-1 rule on encode
//! - **Unsupported shape**: a Rust shape the wire format cannot carry, such as
//!   a tagged union on decode or a map key that is neither integer nor string
//! - **Protocol misuse**: the driving framework called the codec out of order
//! - **I/O**: reader/writer failures from the streaming helpers
//!
//! ## Examples
//!
//! ```rust
//! use serde_php::{from_str, Error};
//!
//! let result: Result<i64, Error> = from_str("i:12x;");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Decode error: {}", err);
//!     // Error messages include the byte offset of the problem
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during PHP serialization/deserialization.
///
/// Decode variants include the byte position within the input to aid debugging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A delimiter or type marker did not match the grammar
    #[error("expected '{expected}' but found '{found}' at position {position}")]
    UnexpectedChar {
        position: usize,
        expected: char,
        found: char,
    },

    /// Input ended before the current token was complete
    #[error("unexpected end of input at position {position}, expected {expected}")]
    UnexpectedEof { position: usize, expected: String },

    /// A numeric literal could not be parsed for the requested type
    #[error("invalid numeric literal '{text}' at position {position}")]
    InvalidNumber { position: usize, text: String },

    /// A string declared more bytes than the input holds
    #[error("string declares {declared} bytes but only {available} remain at position {position}")]
    StringLengthMismatch {
        position: usize,
        declared: usize,
        available: usize,
    },

    /// A declared string length lands inside a multi-byte character
    #[error("string length {declared} splits a multi-byte character at position {position}")]
    StringBoundary { position: usize, declared: usize },

    /// A type marker byte outside the wire alphabet, such as the unsupported
    /// reference (`R:`) or custom-serialization (`C:`) tokens
    #[error("unknown type marker '{found}' at position {position}")]
    UnknownTypeMarker { position: usize, found: char },

    /// An array key token was neither an integer nor a string
    #[error("array key must be an integer or a string, found '{found}' at position {position}")]
    InvalidArrayKey { position: usize, found: char },

    /// Input continued past the end of the top-level value
    #[error("trailing characters after the top-level value at position {position}")]
    TrailingCharacters { position: usize },

    /// A class name failed PSR-1 validation on encode
    #[error("invalid PHP class name '{name}': must be a valid PSR-1 class name")]
    InvalidClassName { name: String },

    /// Decoding into an enum with data-carrying variants
    #[error("cannot decode an enum with data-carrying variants: the wire format does not encode a variant discriminator")]
    MissingDiscriminator,

    /// A sequence or map was serialized without an upfront length
    #[error("sequences and maps must have a known length")]
    LengthRequired,

    /// A map key of a kind the wire format cannot represent
    #[error("map keys must be integers or strings")]
    InvalidMapKey,

    /// Unsupported type for serialization
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A structure operation ran with no open structure frame
    #[error("{operation} called with no open structure")]
    MissingFrame { operation: &'static str },

    /// A map value was requested before its key
    #[error("map value requested before its key")]
    KeyExpected,

    /// Nesting exceeded the configured limit
    #[error("maximum nesting depth ({limit}) exceeded")]
    DepthLimitExceeded { limit: usize },

    /// Custom error raised by serde
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a wrong-delimiter error at a byte position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::Error;
    ///
    /// let err = Error::unexpected_char(4, ';', 'x');
    /// assert!(err.to_string().contains("position 4"));
    /// ```
    pub fn unexpected_char(position: usize, expected: char, found: char) -> Self {
        Error::UnexpectedChar {
            position,
            expected,
            found,
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(position: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            position,
            expected: expected.into(),
        }
    }

    /// Creates an invalid numeric literal error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::Error;
    ///
    /// let err = Error::invalid_number(2, "12x");
    /// assert!(err.to_string().contains("'12x'"));
    /// ```
    pub fn invalid_number(position: usize, text: &str) -> Self {
        Error::InvalidNumber {
            position,
            text: text.to_string(),
        }
    }

    /// Creates a PSR-1 class-name validation error.
    pub fn invalid_class_name(name: &str) -> Self {
        Error::InvalidClassName {
            name: name.to_string(),
        }
    }

    /// Creates an unsupported type error for shapes the wire format cannot carry.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_php::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
