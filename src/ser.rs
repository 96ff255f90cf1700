//! Serialization of Rust values into PHP wire text.
//!
//! The serializer is push-style and single-pass: serde drives it through the
//! visitor methods and every call appends tokens to a growing `String` in
//! output order. Aggregate headers carry their element count up front, which
//! is why sequences and maps of unknown length are rejected instead of
//! buffered.
//!
//! ## Mapping
//!
//! - `()`, `None` and unit structs become `N;`
//! - integers become `i:<decimal>;`, booleans `b:0;`/`b:1;`
//! - floats become `d:<number>;` with presentation fixed by
//!   [`format_float`](crate::format_float)/[`format_double`](crate::format_double)
//! - strings become `s:<byte len>:"<text>";` with no escaping
//! - sequences and tuples become arrays with implicit `i:<index>;` keys
//! - maps become arrays with explicit integer or string keys
//! - structs become objects named after the struct, fields in declaration order
//! - unit enum variants become `E:<len>:"<Type>:<Member>";`
//!
//! Enum variants that carry data lose their discriminator: newtype and tuple
//! variants emit the bare payload, struct variants emit an object named after
//! the variant. The text can be read back as the payload type but not as the
//! enum, because nothing on the wire records which variant it was.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct SimpleClass {
//!     a: i32,
//!     b: String,
//! }
//!
//! let value = SimpleClass { a: 123, b: "hello".to_string() };
//! let text = serde_php::to_string(&value)?;
//! assert_eq!(text, r#"O:11:"SimpleClass":2:{s:1:"a";i:123;s:1:"b";s:5:"hello";}"#);
//! # Ok::<(), serde_php::Error>(())
//! ```
//!
//! ## Direct Serializer Usage
//!
//! A serializer can be driven by hand when several values share one buffer:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_php::Serializer;
//!
//! let mut serializer = Serializer::new();
//! vec![1, 2].serialize(&mut serializer)?;
//! assert_eq!(serializer.into_inner(), "a:2:{i:0;i:1;i:1;i:2;}");
//! # Ok::<(), serde_php::Error>(())
//! ```

use serde::ser::{self, Impossible, Serialize};

use crate::error::{Error, Result};
use crate::grammar;
use crate::map::PhpArray;
use crate::number::{format_double, format_float};
use crate::value::{ArrayKey, PhpObject, PhpValue};

/// The PHP wire-text serializer.
///
/// Converts Rust values implementing `Serialize` into `serialize()` output.
/// Created via [`Serializer::new`]; the accumulated text is taken with
/// [`Serializer::into_inner`].
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
}

impl Serializer {
    #[must_use]
    pub fn new() -> Self {
        // 256 bytes covers typical structs without reallocation
        Serializer {
            output: String::with_capacity(256),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_null(&mut self) {
        self.output.push_str("N;");
    }

    fn write_bool(&mut self, value: bool) {
        self.output.push_str(if value { "b:1;" } else { "b:0;" });
    }

    fn write_i64(&mut self, value: i64) {
        self.output.push_str("i:");
        self.output.push_str(&value.to_string());
        self.output.push(';');
    }

    fn write_u64(&mut self, value: u64) {
        self.output.push_str("i:");
        self.output.push_str(&value.to_string());
        self.output.push(';');
    }

    fn write_float(&mut self, value: f32) {
        self.output.push_str("d:");
        self.output.push_str(&format_float(value));
        self.output.push(';');
    }

    fn write_double(&mut self, value: f64) {
        self.output.push_str("d:");
        self.output.push_str(&format_double(value));
        self.output.push(';');
    }

    /// Writes a string token. The declared length counts UTF-8 bytes and the
    /// content goes out verbatim; the format has no escape sequences.
    fn write_str(&mut self, value: &str) {
        self.output.push_str("s:");
        self.output.push_str(&value.len().to_string());
        self.output.push_str(":\"");
        self.output.push_str(value);
        self.output.push_str("\";");
    }

    /// Writes an enum-case token. The declared length covers the class name,
    /// the separating colon and the member name.
    fn write_enum_case(&mut self, class: &str, member: &str) -> Result<()> {
        grammar::validate_class_name(class)?;
        let len = class.len() + member.len() + 1;
        self.output.push_str("E:");
        self.output.push_str(&len.to_string());
        self.output.push_str(":\"");
        self.output.push_str(class);
        self.output.push(':');
        self.output.push_str(member);
        self.output.push_str("\";");
        Ok(())
    }

    fn begin_array(&mut self, count: usize) {
        self.output.push_str("a:");
        self.output.push_str(&count.to_string());
        self.output.push_str(":{");
    }

    fn begin_object(&mut self, class: &str, count: usize) -> Result<()> {
        grammar::validate_class_name(class)?;
        self.output.push_str("O:");
        self.output.push_str(&class.len().to_string());
        self.output.push_str(":\"");
        self.output.push_str(class);
        self.output.push_str("\":");
        self.output.push_str(&count.to_string());
        self.output.push_str(":{");
        Ok(())
    }

    fn end_structure(&mut self) {
        self.output.push('}');
    }

    /// Implicit key written before each element of a list-style array.
    fn write_array_index(&mut self, index: usize) {
        self.output.push_str("i:");
        self.output.push_str(&index.to_string());
        self.output.push(';');
    }

    fn write_array_key(&mut self, key: &ArrayKey) {
        match key {
            ArrayKey::Int(i) => self.write_i64(*i),
            ArrayKey::Str(s) => self.write_str(s),
        }
    }

    /// Renders a dynamic value tree as wire text.
    pub(crate) fn write_value(&mut self, value: &PhpValue) -> Result<()> {
        match value {
            PhpValue::Null => self.write_null(),
            PhpValue::Bool(b) => self.write_bool(*b),
            PhpValue::Int(i) => self.write_i64(*i),
            PhpValue::Float(f) => self.write_double(*f),
            PhpValue::Str(s) => self.write_str(s),
            PhpValue::Array(array) => {
                self.begin_array(array.len());
                for (key, element) in array {
                    self.write_array_key(key);
                    self.write_value(element)?;
                }
                self.end_structure();
            }
            PhpValue::Object(object) => {
                self.begin_object(&object.class, object.fields.len())?;
                for (name, field) in &object.fields {
                    self.write_str(name);
                    self.write_value(field)?;
                }
                self.end_structure();
            }
            PhpValue::Enum { class, member } => self.write_enum_case(class, member)?,
        }
        Ok(())
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = TupleSerializer<'a>;
    type SerializeTupleStruct = TupleStructSerializer<'a>;
    type SerializeTupleVariant = TupleVariantSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = StructVariantSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_bool(v);
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_i64(v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_u64(v);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_float(v);
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_double(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_str(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.begin_array(v.len());
        for (index, byte) in v.iter().enumerate() {
            self.write_array_index(index);
            self.write_u64(u64::from(*byte));
        }
        self.end_structure();
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.write_null();
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.write_null();
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.write_enum_case(name, variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let len = len.ok_or(Error::LengthRequired)?;
        self.begin_array(len);
        Ok(SeqSerializer {
            ser: self,
            index: 0,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.begin_array(len);
        Ok(TupleSerializer {
            ser: self,
            index: 0,
        })
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.begin_array(len);
        Ok(TupleStructSerializer {
            ser: self,
            index: 0,
        })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.begin_array(len);
        Ok(TupleVariantSerializer {
            ser: self,
            index: 0,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        let len = len.ok_or(Error::LengthRequired)?;
        self.begin_array(len);
        Ok(MapSerializer {
            ser: self,
            key_pending: false,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.begin_object(name, len)?;
        Ok(StructSerializer { ser: self })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.begin_object(variant, len)?;
        Ok(StructVariantSerializer { ser: self })
    }
}

/// Streams sequence elements with their implicit integer keys.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    index: usize,
}

impl<'a> ser::SerializeSeq for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.ser.write_array_index(self.index);
        self.index += 1;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

pub struct TupleSerializer<'a> {
    ser: &'a mut Serializer,
    index: usize,
}

impl<'a> ser::SerializeTuple for TupleSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.ser.write_array_index(self.index);
        self.index += 1;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

pub struct TupleStructSerializer<'a> {
    ser: &'a mut Serializer,
    index: usize,
}

impl<'a> ser::SerializeTupleStruct for TupleStructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.ser.write_array_index(self.index);
        self.index += 1;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

pub struct TupleVariantSerializer<'a> {
    ser: &'a mut Serializer,
    index: usize,
}

impl<'a> ser::SerializeTupleVariant for TupleVariantSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.ser.write_array_index(self.index);
        self.index += 1;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

/// Streams map entries. Keys go through [`MapKeySerializer`] so only integer
/// and string keys reach the output.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    key_pending: bool,
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        key.serialize(MapKeySerializer {
            ser: &mut *self.ser,
        })?;
        self.key_pending = true;
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        if !self.key_pending {
            return Err(Error::KeyExpected);
        }
        self.key_pending = false;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
}

impl<'a> ser::SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.ser.write_str(key);
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

pub struct StructVariantSerializer<'a> {
    ser: &'a mut Serializer,
}

impl<'a> ser::SerializeStructVariant for StructVariantSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.ser.write_str(key);
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<()> {
        self.ser.end_structure();
        Ok(())
    }
}

/// Serializes map keys straight into the output buffer. The wire format
/// restricts keys to integers and strings; every other kind fails with
/// [`Error::InvalidMapKey`].
struct MapKeySerializer<'a> {
    ser: &'a mut Serializer,
}

impl<'a> ser::Serializer for MapKeySerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Impossible<(), Error>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.ser.write_i64(v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.ser.write_u64(v);
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.ser.write_str(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        // Enum cases work as string keys, the way PHP casts them
        self.ser.write_str(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::InvalidMapKey)
    }
}

/// Serializes a Rust value into a [`PhpValue`] tree instead of text.
///
/// Follows the same shape mapping as the text serializer, so building a tree
/// with [`to_value`](crate::to_value) and rendering it with
/// [`PhpValue::to_php_string`] agrees with [`to_string`](crate::to_string)
/// for everything the tree can hold.
pub(crate) struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = PhpValue;
    type Error = Error;

    type SerializeSeq = ValueSeqSerializer;
    type SerializeTuple = ValueSeqSerializer;
    type SerializeTupleStruct = ValueSeqSerializer;
    type SerializeTupleVariant = ValueSeqSerializer;
    type SerializeMap = ValueMapSerializer;
    type SerializeStruct = ValueStructSerializer;
    type SerializeStructVariant = ValueStructSerializer;

    fn serialize_bool(self, v: bool) -> Result<PhpValue> {
        Ok(PhpValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<PhpValue> {
        Ok(PhpValue::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<PhpValue> {
        Ok(PhpValue::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<PhpValue> {
        Ok(PhpValue::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<PhpValue> {
        Ok(PhpValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<PhpValue> {
        Ok(PhpValue::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<PhpValue> {
        Ok(PhpValue::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<PhpValue> {
        Ok(PhpValue::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<PhpValue> {
        let v = i64::try_from(v)
            .map_err(|_| Error::unsupported_type("u64 value exceeds the PHP integer range"))?;
        Ok(PhpValue::Int(v))
    }

    fn serialize_f32(self, v: f32) -> Result<PhpValue> {
        // PHP floats are doubles; the tree has no single-precision kind
        Ok(PhpValue::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<PhpValue> {
        Ok(PhpValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<PhpValue> {
        Ok(PhpValue::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<PhpValue> {
        Ok(PhpValue::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<PhpValue> {
        let array = v.iter().map(|b| PhpValue::Int(i64::from(*b))).collect();
        Ok(PhpValue::Array(array))
    }

    fn serialize_none(self) -> Result<PhpValue> {
        Ok(PhpValue::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<PhpValue> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<PhpValue> {
        Ok(PhpValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<PhpValue> {
        Ok(PhpValue::Null)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<PhpValue> {
        grammar::validate_class_name(name)?;
        Ok(PhpValue::Enum {
            class: name.to_string(),
            member: variant.to_string(),
        })
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<PhpValue> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<PhpValue> {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ValueSeqSerializer {
            array: PhpArray::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(ValueMapSerializer {
            array: PhpArray::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        grammar::validate_class_name(name)?;
        Ok(ValueStructSerializer {
            object: PhpObject::new(name),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        grammar::validate_class_name(variant)?;
        Ok(ValueStructSerializer {
            object: PhpObject::new(variant),
        })
    }
}

pub(crate) struct ValueSeqSerializer {
    array: PhpArray,
}

impl ser::SerializeSeq for ValueSeqSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.array.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        Ok(PhpValue::Array(self.array))
    }
}

impl ser::SerializeTuple for ValueSeqSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PhpValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for ValueSeqSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PhpValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for ValueSeqSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PhpValue> {
        ser::SerializeSeq::end(self)
    }
}

pub(crate) struct ValueMapSerializer {
    array: PhpArray,
    pending_key: Option<ArrayKey>,
}

impl ser::SerializeMap for ValueMapSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(key.serialize(ValueKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self.pending_key.take().ok_or(Error::KeyExpected)?;
        self.array.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        Ok(PhpValue::Array(self.array))
    }
}

pub(crate) struct ValueStructSerializer {
    object: PhpObject,
}

impl ser::SerializeStruct for ValueStructSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.object.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<PhpValue> {
        Ok(PhpValue::Object(self.object))
    }
}

impl ser::SerializeStructVariant for ValueStructSerializer {
    type Ok = PhpValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<PhpValue> {
        ser::SerializeStruct::end(self)
    }
}

/// Serializes map keys for the value tree under the same integer-or-string
/// restriction as the text path.
struct ValueKeySerializer;

impl ser::Serializer for ValueKeySerializer {
    type Ok = ArrayKey;
    type Error = Error;

    type SerializeSeq = Impossible<ArrayKey, Error>;
    type SerializeTuple = Impossible<ArrayKey, Error>;
    type SerializeTupleStruct = Impossible<ArrayKey, Error>;
    type SerializeTupleVariant = Impossible<ArrayKey, Error>;
    type SerializeMap = Impossible<ArrayKey, Error>;
    type SerializeStruct = Impossible<ArrayKey, Error>;
    type SerializeStructVariant = Impossible<ArrayKey, Error>;

    fn serialize_i8(self, v: i8) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<ArrayKey> {
        Ok(ArrayKey::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<ArrayKey> {
        let v = i64::try_from(v).map_err(|_| Error::InvalidMapKey)?;
        Ok(ArrayKey::Int(v))
    }

    fn serialize_str(self, v: &str) -> Result<ArrayKey> {
        Ok(ArrayKey::Str(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<ArrayKey> {
        Ok(ArrayKey::Str(v.to_string()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<ArrayKey> {
        Ok(ArrayKey::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<ArrayKey> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_f32(self, _v: f32) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_f64(self, _v: f64) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_none(self) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_unit(self) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<ArrayKey> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::InvalidMapKey)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::InvalidMapKey)
    }
}
