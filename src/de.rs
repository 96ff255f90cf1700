//! Deserialization of PHP wire text into Rust values.
//!
//! The deserializer is pull-style: serde asks for the next field or element
//! and the decoder advances a byte cursor over the borrowed input. An explicit
//! stack of structure frames tracks where the cursor is inside nested
//! aggregates, so nesting depth is bounded by [`PhpOptions::max_depth`]
//! instead of the call stack.
//!
//! ## Protocol
//!
//! - Sequences read an `a:<n>:{` header, then skip the integer key in front
//!   of each element. Decoding stops at the declared count or at the closing
//!   `}`, whichever comes first.
//! - Maps read the same header but hand both keys and values to serde,
//!   alternating by parity.
//! - Structs read an `O:<len>:"<Name>":<n>:{` header. The class name is
//!   informational and is not checked against the target type. Each field
//!   name is read from the stream and resolved by serde; unknown names are
//!   skipped, missing ones surface as serde's missing-field error.
//! - Unit enum variants read an `E:<len>:"<Type>:<Member>";` token and
//!   resolve the text after the last `:` as the member name.
//!
//! Enums with data-carrying variants cannot be decoded at all: the encoder
//! drops the variant discriminator, so there is nothing on the wire to
//! dispatch on and [`deserialize_enum`](serde::Deserializer::deserialize_enum)
//! fails with [`Error::MissingDiscriminator`] before looking at the input.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct SimpleClass {
//!     a: i32,
//!     b: String,
//! }
//!
//! let text = r#"O:11:"SimpleClass":2:{s:1:"a";i:123;s:1:"b";s:5:"hello";}"#;
//! let value: SimpleClass = serde_php::from_str(text)?;
//! assert_eq!(value, SimpleClass { a: 123, b: "hello".to_string() });
//! # Ok::<(), serde_php::Error>(())
//! ```
//!
//! Strings decode zero-copy when the target allows it:
//!
//! ```rust
//! let s: &str = serde_php::from_str(r#"s:5:"hello";"#)?;
//! assert_eq!(s, "hello");
//! # Ok::<(), serde_php::Error>(())
//! ```

use serde::de::{self, IntoDeserializer};

use crate::error::{Error, Result};
use crate::grammar;
use crate::map::PhpArray;
use crate::options::PhpOptions;
use crate::value::{ArrayKey, PhpObject, PhpValue};

/// Decode-side record of one in-progress aggregate.
#[derive(Debug)]
struct Frame {
    /// Element count declared in the aggregate header. For maps the frame
    /// counts keys and values separately, so the limit is `2 * declared`.
    declared: usize,
    /// Keys, values or fields consumed so far.
    index: usize,
    /// Set while a map key is pending its value.
    reading_key: bool,
}

/// The PHP wire-text deserializer.
///
/// Owns a byte cursor over a borrowed input string and a stack of structure
/// frames, both private to a single decode call. Created via
/// [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    input: &'de str,
    position: usize,
    frames: Vec<Frame>,
    options: PhpOptions,
}

impl<'de> Deserializer<'de> {
    /// Creates a deserializer over `input` with default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, PhpOptions::default())
    }

    /// Creates a deserializer over `input` with explicit options.
    pub fn with_options(input: &'de str, options: PhpOptions) -> Self {
        Deserializer {
            input,
            position: 0,
            frames: Vec::new(),
            options,
        }
    }

    /// Checks that the whole input was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingCharacters`] if text remains after the
    /// top-level value.
    pub fn end(&mut self) -> Result<()> {
        if self.position < self.input.len() {
            return Err(Error::TrailingCharacters {
                position: self.position,
            });
        }
        Ok(())
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    /// Consumes one expected delimiter or marker byte.
    fn expect(&mut self, expected: u8) -> Result<()> {
        match self.peek_byte() {
            Some(found) if found == expected => {
                self.position += 1;
                Ok(())
            }
            Some(_) => {
                let found = self.input[self.position..]
                    .chars()
                    .next()
                    .unwrap_or('\u{FFFD}');
                Err(Error::unexpected_char(
                    self.position,
                    expected as char,
                    found,
                ))
            }
            None => Err(Error::unexpected_eof(
                self.position,
                format!("'{}'", expected as char),
            )),
        }
    }

    /// Returns the text before `delimiter` without consuming the delimiter.
    fn read_until(&mut self, delimiter: u8) -> Result<&'de str> {
        let start = self.position;
        while let Some(byte) = self.peek_byte() {
            if byte == delimiter {
                return Ok(&self.input[start..self.position]);
            }
            self.position += 1;
        }
        Err(Error::unexpected_eof(
            self.position,
            format!("'{}'", delimiter as char),
        ))
    }

    /// True at the closing `}` of the innermost aggregate or at end of input.
    /// Element selectors treat both as "done" regardless of declared counts.
    fn at_structure_end(&self) -> bool {
        matches!(self.peek_byte(), None | Some(b'}'))
    }

    fn frame_mut(&mut self, operation: &'static str) -> Result<&mut Frame> {
        self.frames
            .last_mut()
            .ok_or(Error::MissingFrame { operation })
    }

    fn push_frame(&mut self, declared: usize) -> Result<()> {
        if self.frames.len() >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        self.frames.push(Frame {
            declared,
            index: 0,
            reading_key: false,
        });
        Ok(())
    }

    fn parse_null(&mut self) -> Result<()> {
        self.expect(grammar::MARKER_NULL)?;
        self.expect(b';')
    }

    fn parse_bool(&mut self) -> Result<bool> {
        self.expect(grammar::MARKER_BOOL)?;
        self.expect(b':')?;
        let start = self.position;
        let text = self.read_until(b';')?;
        let digits: i64 = text
            .parse()
            .map_err(|_| Error::invalid_number(start, text))?;
        self.expect(b';')?;
        Ok(digits == 1)
    }

    /// Parses an `i:` token into any integer width. Out-of-range literals
    /// fail the parse and surface as [`Error::InvalidNumber`].
    fn parse_int<T: std::str::FromStr>(&mut self) -> Result<T> {
        self.expect(grammar::MARKER_INT)?;
        self.expect(b':')?;
        let start = self.position;
        let text = self.read_until(b';')?;
        let value = text
            .parse()
            .map_err(|_| Error::invalid_number(start, text))?;
        self.expect(b';')?;
        Ok(value)
    }

    fn parse_float_text(&mut self) -> Result<(usize, &'de str)> {
        self.expect(grammar::MARKER_FLOAT)?;
        self.expect(b':')?;
        let start = self.position;
        let text = self.read_until(b';')?;
        self.expect(b';')?;
        Ok((start, text))
    }

    fn parse_double(&mut self) -> Result<f64> {
        let (start, text) = self.parse_float_text()?;
        match text {
            grammar::INF => Ok(f64::INFINITY),
            grammar::NEG_INF => Ok(f64::NEG_INFINITY),
            grammar::NAN => Ok(f64::NAN),
            _ => text
                .parse()
                .map_err(|_| Error::invalid_number(start, text)),
        }
    }

    fn parse_float(&mut self) -> Result<f32> {
        let (start, text) = self.parse_float_text()?;
        match text {
            grammar::INF => Ok(f32::INFINITY),
            grammar::NEG_INF => Ok(f32::NEG_INFINITY),
            grammar::NAN => Ok(f32::NAN),
            _ => text
                .parse()
                .map_err(|_| Error::invalid_number(start, text)),
        }
    }

    /// Reads the `:<len>:"<bytes>"` tail shared by string, enum and object
    /// headers. The declared length counts UTF-8 bytes, so the content is
    /// taken as an exact byte slice of the input; a length that overruns the
    /// input or lands inside a multi-byte character is malformed.
    fn read_quoted(&mut self) -> Result<&'de str> {
        self.expect(b':')?;
        let len_start = self.position;
        let len_text = self.read_until(b':')?;
        let declared: usize = len_text
            .parse()
            .map_err(|_| Error::invalid_number(len_start, len_text))?;
        self.expect(b':')?;
        self.expect(b'"')?;
        let start = self.position;
        let available = self.input.len() - start;
        if declared > available {
            return Err(Error::StringLengthMismatch {
                position: start,
                declared,
                available,
            });
        }
        let end = start + declared;
        if !self.input.is_char_boundary(end) {
            return Err(Error::StringBoundary {
                position: start,
                declared,
            });
        }
        let content = &self.input[start..end];
        self.position = end;
        self.expect(b'"')?;
        Ok(content)
    }

    fn parse_string(&mut self) -> Result<&'de str> {
        self.expect(grammar::MARKER_STRING)?;
        let content = self.read_quoted()?;
        self.expect(b';')?;
        Ok(content)
    }

    /// Reads an `E:` token and returns the full `Type:Member` text.
    fn parse_enum_text(&mut self) -> Result<&'de str> {
        self.expect(grammar::MARKER_ENUM)?;
        let content = self.read_quoted()?;
        self.expect(b';')?;
        Ok(content)
    }

    /// Reads the `<n>:{` tail of an aggregate header.
    fn read_count_and_open(&mut self) -> Result<usize> {
        let start = self.position;
        let text = self.read_until(b':')?;
        let count: usize = text
            .parse()
            .map_err(|_| Error::invalid_number(start, text))?;
        self.expect(b':')?;
        self.expect(b'{')?;
        Ok(count)
    }

    /// Consumes an `a:<n>:{` header and opens a frame for it.
    fn begin_array(&mut self) -> Result<usize> {
        self.expect(grammar::MARKER_ARRAY)?;
        self.expect(b':')?;
        let count = self.read_count_and_open()?;
        self.push_frame(count)?;
        Ok(count)
    }

    /// Consumes an `O:<len>:"<Name>":<n>:{` header and opens a frame for it.
    /// The class name is returned for callers that want it; typed decoding
    /// discards it.
    fn begin_object(&mut self) -> Result<(&'de str, usize)> {
        self.expect(grammar::MARKER_OBJECT)?;
        let class = self.read_quoted()?;
        self.expect(b':')?;
        let count = self.read_count_and_open()?;
        self.push_frame(count)?;
        Ok((class, count))
    }

    /// Consumes the closing `}` and pops the frame for it.
    fn end_structure(&mut self) -> Result<()> {
        self.frames.pop().ok_or(Error::MissingFrame {
            operation: "end_structure",
        })?;
        self.expect(b'}')
    }

    /// Decodes and discards the PHP array key in front of a list element.
    /// Lists carry their `0..n` keys on the wire; the element order already
    /// encodes them, so the token is only validated, never surfaced.
    fn skip_array_key(&mut self) -> Result<()> {
        match self.peek_byte() {
            Some(grammar::MARKER_INT) => {
                self.parse_int::<i64>()?;
                Ok(())
            }
            Some(grammar::MARKER_STRING) => {
                self.parse_string()?;
                Ok(())
            }
            Some(found) => Err(Error::InvalidArrayKey {
                position: self.position,
                found: found as char,
            }),
            None => Err(Error::unexpected_eof(self.position, "an array key")),
        }
    }

    /// Parses one complete value into a [`PhpValue`] tree, keeping the
    /// details typed decoding drops: object class names, enum type names and
    /// mixed array keys.
    pub(crate) fn read_value(&mut self) -> Result<PhpValue> {
        self.read_value_at_depth(0)
    }

    fn read_value_at_depth(&mut self, depth: usize) -> Result<PhpValue> {
        match self.peek_byte() {
            Some(grammar::MARKER_NULL) => {
                self.parse_null()?;
                Ok(PhpValue::Null)
            }
            Some(grammar::MARKER_BOOL) => Ok(PhpValue::Bool(self.parse_bool()?)),
            Some(grammar::MARKER_INT) => Ok(PhpValue::Int(self.parse_int()?)),
            Some(grammar::MARKER_FLOAT) => Ok(PhpValue::Float(self.parse_double()?)),
            Some(grammar::MARKER_STRING) => Ok(PhpValue::Str(self.parse_string()?.to_string())),
            Some(grammar::MARKER_ARRAY) => {
                if depth >= self.options.max_depth {
                    return Err(Error::DepthLimitExceeded {
                        limit: self.options.max_depth,
                    });
                }
                self.expect(grammar::MARKER_ARRAY)?;
                self.expect(b':')?;
                let count = self.read_count_and_open()?;
                let mut array = PhpArray::with_capacity(count);
                for _ in 0..count {
                    let key = match self.peek_byte() {
                        Some(grammar::MARKER_INT) => ArrayKey::Int(self.parse_int()?),
                        Some(grammar::MARKER_STRING) => {
                            ArrayKey::Str(self.parse_string()?.to_string())
                        }
                        Some(found) => {
                            return Err(Error::InvalidArrayKey {
                                position: self.position,
                                found: found as char,
                            })
                        }
                        None => {
                            return Err(Error::unexpected_eof(self.position, "an array key"))
                        }
                    };
                    let value = self.read_value_at_depth(depth + 1)?;
                    array.insert(key, value);
                }
                self.expect(b'}')?;
                Ok(PhpValue::Array(array))
            }
            Some(grammar::MARKER_OBJECT) => {
                if depth >= self.options.max_depth {
                    return Err(Error::DepthLimitExceeded {
                        limit: self.options.max_depth,
                    });
                }
                self.expect(grammar::MARKER_OBJECT)?;
                let class = self.read_quoted()?;
                self.expect(b':')?;
                let count = self.read_count_and_open()?;
                let mut object = PhpObject::new(class);
                for _ in 0..count {
                    let name = self.parse_string()?.to_string();
                    let value = self.read_value_at_depth(depth + 1)?;
                    object.insert(name, value);
                }
                self.expect(b'}')?;
                Ok(PhpValue::Object(object))
            }
            Some(grammar::MARKER_ENUM) => {
                let position = self.position;
                let text = self.parse_enum_text()?;
                match text.rsplit_once(':') {
                    Some((class, member)) => Ok(PhpValue::Enum {
                        class: class.to_string(),
                        member: member.to_string(),
                    }),
                    None => Err(Error::unexpected_char(position, ':', ';')),
                }
            }
            Some(_) => {
                let found = self.input[self.position..]
                    .chars()
                    .next()
                    .unwrap_or('\u{FFFD}');
                Err(Error::UnknownTypeMarker {
                    position: self.position,
                    found,
                })
            }
            None => Err(Error::unexpected_eof(self.position, "a value")),
        }
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    /// The format is self-describing, so `deserialize_any` dispatches on the
    /// type marker. Arrays surface as maps (their keys may be integers or
    /// strings), objects surface as maps of their fields with the class name
    /// discarded, and enum tokens surface as the full `Type:Member` string.
    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.peek_byte() {
            Some(grammar::MARKER_NULL) => {
                self.parse_null()?;
                visitor.visit_unit()
            }
            Some(grammar::MARKER_BOOL) => visitor.visit_bool(self.parse_bool()?),
            Some(grammar::MARKER_INT) => {
                self.expect(grammar::MARKER_INT)?;
                self.expect(b':')?;
                let start = self.position;
                let text = self.read_until(b';')?;
                self.expect(b';')?;
                if let Ok(signed) = text.parse::<i64>() {
                    visitor.visit_i64(signed)
                } else {
                    let unsigned = text
                        .parse::<u64>()
                        .map_err(|_| Error::invalid_number(start, text))?;
                    visitor.visit_u64(unsigned)
                }
            }
            Some(grammar::MARKER_FLOAT) => visitor.visit_f64(self.parse_double()?),
            Some(grammar::MARKER_STRING) => visitor.visit_borrowed_str(self.parse_string()?),
            Some(grammar::MARKER_ARRAY) => {
                self.begin_array()?;
                let value = visitor.visit_map(EntryAccess { de: &mut *self })?;
                self.end_structure()?;
                Ok(value)
            }
            Some(grammar::MARKER_OBJECT) => {
                self.begin_object()?;
                let value = visitor.visit_map(FieldAccess { de: &mut *self })?;
                self.end_structure()?;
                Ok(value)
            }
            Some(grammar::MARKER_ENUM) => visitor.visit_borrowed_str(self.parse_enum_text()?),
            Some(_) => {
                let found = self.input[self.position..]
                    .chars()
                    .next()
                    .unwrap_or('\u{FFFD}');
                Err(Error::UnknownTypeMarker {
                    position: self.position,
                    found,
                })
            }
            None => Err(Error::unexpected_eof(self.position, "a value")),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(self.parse_bool()?)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i8(self.parse_int()?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i16(self.parse_int()?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i32(self.parse_int()?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.parse_int()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u8(self.parse_int()?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u16(self.parse_int()?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u32(self.parse_int()?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u64(self.parse_int()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(self.parse_float()?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.parse_double()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let content = self.parse_string()?;
        let mut chars = content.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::custom(format!(
                "expected a single-character string, found {:?}",
                content
            ))),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.parse_string()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // Bytes encode as an array of integers
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.input[self.position..].starts_with("N;") {
            self.parse_null()?;
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.parse_null()?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_array()?;
        let value = visitor.visit_seq(ElementAccess { de: &mut *self })?;
        self.end_structure()?;
        Ok(value)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_array()?;
        let value = visitor.visit_map(EntryAccess { de: &mut *self })?;
        self.end_structure()?;
        Ok(value)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_object()?;
        let value = visitor.visit_map(FieldAccess { de: &mut *self })?;
        self.end_structure()?;
        Ok(value)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.peek_byte() {
            Some(grammar::MARKER_ENUM) => {
                let text = self.parse_enum_text()?;
                let member = match text.rfind(':') {
                    Some(at) => &text[at + 1..],
                    None => text,
                };
                visitor.visit_enum(member.into_deserializer())
            }
            // The wire never records which variant a data-carrying enum held
            _ => Err(Error::MissingDiscriminator),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.read_value()?;
        visitor.visit_unit()
    }
}

/// Streams list elements, skipping the wire key in front of each one.
struct ElementAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de> de::SeqAccess<'de> for ElementAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.de.at_structure_end() {
            return Ok(None);
        }
        let frame = self.de.frame_mut("next element")?;
        if frame.index >= frame.declared {
            return Ok(None);
        }
        frame.index += 1;
        self.de.skip_array_key()?;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        let frame = self.de.frames.last()?;
        Some(frame.declared - frame.index)
    }
}

/// Streams map entries, alternating key and value by frame parity.
struct EntryAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de> de::MapAccess<'de> for EntryAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if self.de.at_structure_end() {
            return Ok(None);
        }
        let frame = self.de.frame_mut("next map key")?;
        if frame.index >= frame.declared * 2 {
            return Ok(None);
        }
        frame.index += 1;
        frame.reading_key = true;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let frame = self.de.frame_mut("next map value")?;
        if !frame.reading_key {
            return Err(Error::KeyExpected);
        }
        frame.reading_key = false;
        frame.index += 1;
        seed.deserialize(&mut *self.de)
    }

    fn size_hint(&self) -> Option<usize> {
        let frame = self.de.frames.last()?;
        Some((frame.declared * 2 - frame.index) / 2)
    }
}

/// Streams object fields. Field names come off the wire and are resolved to
/// the target's fields by serde; names the target does not know are skipped
/// through `deserialize_ignored_any`.
struct FieldAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de> de::MapAccess<'de> for FieldAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if self.de.at_structure_end() {
            return Ok(None);
        }
        let frame = self.de.frame_mut("next field")?;
        if frame.index >= frame.declared {
            return Ok(None);
        }
        frame.index += 1;
        let name = self.de.parse_string()?;
        seed.deserialize(de::value::BorrowedStrDeserializer::new(name))
            .map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }

    fn size_hint(&self) -> Option<usize> {
        let frame = self.de.frames.last()?;
        Some(frame.declared - frame.index)
    }
}
