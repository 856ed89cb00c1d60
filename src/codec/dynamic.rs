//! Type-erased component values
//!
//! `KeyValue` is the tagged union the ghost reader decodes into when the static
//! component types are unknown.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::temporal::duration_to_ticks;
use super::{Decimal, ValueCodec};
use crate::error::{Result, ShardKeyError};
use crate::types::KeyDataType;

/// One decoded component, tagged with its kind
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    Guid(Uuid),
    Blob(Vec<u8>),
    Byte(u8),
    SByte(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Char(char),
    Decimal(Decimal),
    Double(f64),
    Float(f32),
    DateTime(NaiveDateTime),
    DateOnly(NaiveDate),
    TimeOnly(NaiveTime),
    TimeSpan(Duration),
    String(String),
    EnumInt32(i32),
    EnumByte(u8),
    EnumInt16(i16),
    EnumInt64(i64),
}

impl KeyValue {
    pub fn data_type(&self) -> KeyDataType {
        match self {
            KeyValue::Guid(_) => KeyDataType::Guid,
            KeyValue::Blob(_) => KeyDataType::Blob,
            KeyValue::Byte(_) => KeyDataType::Byte,
            KeyValue::SByte(_) => KeyDataType::SByte,
            KeyValue::Int16(_) => KeyDataType::Int16,
            KeyValue::Int32(_) => KeyDataType::Int32,
            KeyValue::Int64(_) => KeyDataType::Int64,
            KeyValue::Char(_) => KeyDataType::Char,
            KeyValue::Decimal(_) => KeyDataType::Decimal,
            KeyValue::Double(_) => KeyDataType::Double,
            KeyValue::Float(_) => KeyDataType::Float,
            KeyValue::DateTime(_) => KeyDataType::DateTime,
            KeyValue::DateOnly(_) => KeyDataType::DateOnly,
            KeyValue::TimeOnly(_) => KeyDataType::TimeOnly,
            KeyValue::TimeSpan(_) => KeyDataType::TimeSpan,
            KeyValue::String(_) => KeyDataType::String,
            KeyValue::EnumInt32(_) => KeyDataType::EnumInt32,
            KeyValue::EnumByte(_) => KeyDataType::EnumByte,
            KeyValue::EnumInt16(_) => KeyDataType::EnumInt16,
            KeyValue::EnumInt64(_) => KeyDataType::EnumInt64,
        }
    }

    /// Re-encode with the same rules as the static codec
    pub fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            KeyValue::Guid(v) => v.encode_value(buf),
            KeyValue::Blob(v) => v.encode_value(buf),
            KeyValue::Byte(v) | KeyValue::EnumByte(v) => v.encode_value(buf),
            KeyValue::SByte(v) => v.encode_value(buf),
            KeyValue::Int16(v) | KeyValue::EnumInt16(v) => v.encode_value(buf),
            KeyValue::Int32(v) | KeyValue::EnumInt32(v) => v.encode_value(buf),
            KeyValue::Int64(v) | KeyValue::EnumInt64(v) => v.encode_value(buf),
            KeyValue::Char(v) => v.encode_value(buf),
            KeyValue::Decimal(v) => v.encode_value(buf),
            KeyValue::Double(v) => v.encode_value(buf),
            KeyValue::Float(v) => v.encode_value(buf),
            KeyValue::DateTime(v) => v.encode_value(buf),
            KeyValue::DateOnly(v) => v.encode_value(buf),
            KeyValue::TimeOnly(v) => v.encode_value(buf),
            KeyValue::TimeSpan(v) => v.encode_value(buf),
            KeyValue::String(v) => v.encode_value(buf),
        }
    }
}

/// Decode one value of the given tag from the front of `buf`
///
/// The tag's descriptor gates the dispatch: tags without a decode rule are
/// rejected before any bytes are consumed.
pub fn decode_dynamic(buf: &mut &[u8], data_type: KeyDataType) -> Result<KeyValue> {
    let descriptor = data_type
        .descriptor()
        .ok_or(ShardKeyError::UnsupportedType {
            component: 0,
            type_name: data_type.name(),
        })?;

    decode_described(buf, descriptor.data_type).map_err(|e| {
        tracing::debug!(
            rust_type = descriptor.rust_name,
            width = ?descriptor.width,
            remaining = buf.len(),
            error = %e,
            "type-erased decode failed"
        );
        e
    })
}

fn decode_described(buf: &mut &[u8], data_type: KeyDataType) -> Result<KeyValue> {
    let value = match data_type {
        KeyDataType::Undefined => {
            return Err(ShardKeyError::UnsupportedType {
                component: 0,
                type_name: data_type.name(),
            })
        }
        KeyDataType::Guid => KeyValue::Guid(Uuid::decode_value(buf)?),
        KeyDataType::Blob => KeyValue::Blob(Vec::<u8>::decode_value(buf)?),
        KeyDataType::Byte => KeyValue::Byte(u8::decode_value(buf)?),
        KeyDataType::SByte => KeyValue::SByte(i8::decode_value(buf)?),
        KeyDataType::Int16 => KeyValue::Int16(i16::decode_value(buf)?),
        KeyDataType::Int32 => KeyValue::Int32(i32::decode_value(buf)?),
        KeyDataType::Int64 => KeyValue::Int64(i64::decode_value(buf)?),
        KeyDataType::Char => KeyValue::Char(char::decode_value(buf)?),
        KeyDataType::Decimal => KeyValue::Decimal(Decimal::decode_value(buf)?),
        KeyDataType::Double => KeyValue::Double(f64::decode_value(buf)?),
        KeyDataType::Float => KeyValue::Float(f32::decode_value(buf)?),
        KeyDataType::DateTime => KeyValue::DateTime(NaiveDateTime::decode_value(buf)?),
        KeyDataType::DateOnly => KeyValue::DateOnly(NaiveDate::decode_value(buf)?),
        KeyDataType::TimeOnly => KeyValue::TimeOnly(NaiveTime::decode_value(buf)?),
        KeyDataType::TimeSpan => KeyValue::TimeSpan(Duration::decode_value(buf)?),
        KeyDataType::String => KeyValue::String(String::decode_value(buf)?),
        KeyDataType::EnumInt32 => KeyValue::EnumInt32(i32::decode_value(buf)?),
        KeyDataType::EnumByte => KeyValue::EnumByte(u8::decode_value(buf)?),
        KeyDataType::EnumInt16 => KeyValue::EnumInt16(i16::decode_value(buf)?),
        KeyDataType::EnumInt64 => KeyValue::EnumInt64(i64::decode_value(buf)?),
    };
    Ok(value)
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Guid(v) => write!(f, "{}", v),
            KeyValue::Blob(v) => {
                f.write_str("0x")?;
                for byte in v {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            KeyValue::Byte(v) | KeyValue::EnumByte(v) => write!(f, "{}", v),
            KeyValue::SByte(v) => write!(f, "{}", v),
            KeyValue::Int16(v) | KeyValue::EnumInt16(v) => write!(f, "{}", v),
            KeyValue::Int32(v) | KeyValue::EnumInt32(v) => write!(f, "{}", v),
            KeyValue::Int64(v) | KeyValue::EnumInt64(v) => write!(f, "{}", v),
            KeyValue::Char(v) => write!(f, "{:?}", v),
            KeyValue::Decimal(v) => write!(f, "{}", v),
            KeyValue::Double(v) => write!(f, "{}", v),
            KeyValue::Float(v) => write!(f, "{}", v),
            KeyValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            KeyValue::DateOnly(v) => write!(f, "{}", v),
            KeyValue::TimeOnly(v) => write!(f, "{}", v),
            KeyValue::TimeSpan(v) => match duration_to_ticks(v) {
                Ok(ticks) => write!(f, "{} ticks", ticks),
                Err(_) => write!(f, "{}", v),
            },
            KeyValue::String(v) => write!(f, "{:?}", v),
        }
    }
}

/// Serialized as `{ "type": <tag>, "value": <display text> }`
impl Serialize for KeyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("KeyValue", 2)?;
        state.serialize_field("type", &self.data_type())?;
        state.serialize_field("value", &self.to_string())?;
        state.end()
    }
}
