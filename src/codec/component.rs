//! Key component kinds
//!
//! `KeyComponent` is sealed: only the closed set of tagged types (plus user
//! enums through `KeyEnum`) can appear in a compound key.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use super::temporal::{
    epoch_date, epoch_datetime, midnight, validate_date, validate_datetime, validate_duration,
    validate_time,
};
use super::{Decimal, KeyValue, ValueCodec, MAX_VARIABLE_LEN};
use crate::error::{Result, ShardKeyError};
use crate::types::KeyDataType;

mod sealed {
    pub trait Sealed {}
}

/// A value that can be one component of a compound key
pub trait KeyComponent:
    ValueCodec + sealed::Sealed + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// Tag recorded in the key metadata
    const DATA_TYPE: KeyDataType;

    /// The type's default ("empty") value
    fn zero() -> Self;

    fn is_zero(&self) -> bool;

    /// Reject values the wire format cannot carry
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Feed the hash input; equal values must feed equal input
    fn hash_component<H: Hasher>(&self, state: &mut H);

    /// Type-erased copy of the value
    fn to_key_value(&self) -> KeyValue;
}

macro_rules! hashable_component {
    ($ty:ty, $tag:ident, $zero:expr, $variant:ident $(, validate = $check:path)?) => {
        impl sealed::Sealed for $ty {}

        impl KeyComponent for $ty {
            const DATA_TYPE: KeyDataType = KeyDataType::$tag;

            fn zero() -> Self {
                $zero
            }

            fn is_zero(&self) -> bool {
                *self == $zero
            }

            $(
                fn validate(&self) -> Result<()> {
                    $check(self)
                }
            )?

            fn hash_component<H: Hasher>(&self, state: &mut H) {
                self.hash(state);
            }

            fn to_key_value(&self) -> KeyValue {
                KeyValue::$variant(self.clone())
            }
        }
    };
}

hashable_component!(u8, Byte, 0, Byte);
hashable_component!(i8, SByte, 0, SByte);
hashable_component!(i16, Int16, 0, Int16);
hashable_component!(i32, Int32, 0, Int32);
hashable_component!(i64, Int64, 0, Int64);
hashable_component!(Uuid, Guid, Uuid::nil(), Guid);
hashable_component!(Decimal, Decimal, Decimal::ZERO, Decimal);
hashable_component!(NaiveDateTime, DateTime, epoch_datetime(), DateTime, validate = validate_datetime);
hashable_component!(NaiveDate, DateOnly, epoch_date(), DateOnly, validate = validate_date);
hashable_component!(NaiveTime, TimeOnly, midnight(), TimeOnly, validate = validate_time);
hashable_component!(Duration, TimeSpan, Duration::zero(), TimeSpan, validate = validate_duration);

impl sealed::Sealed for char {}

impl KeyComponent for char {
    const DATA_TYPE: KeyDataType = KeyDataType::Char;

    fn zero() -> Self {
        '\0'
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn validate(&self) -> Result<()> {
        if u32::from(*self) > 0xFFFF {
            return Err(ShardKeyError::InvalidValue(format!(
                "char U+{:04X} does not fit one UTF-16 code unit",
                u32::from(*self)
            )));
        }
        Ok(())
    }

    fn hash_component<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn to_key_value(&self) -> KeyValue {
        KeyValue::Char(*self)
    }
}

// Floats: -0.0 == 0.0 must hash alike.
macro_rules! float_component {
    ($ty:ty, $tag:ident, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl KeyComponent for $ty {
            const DATA_TYPE: KeyDataType = KeyDataType::$tag;

            fn zero() -> Self {
                0.0
            }

            fn is_zero(&self) -> bool {
                *self == 0.0
            }

            fn hash_component<H: Hasher>(&self, state: &mut H) {
                let normalized = if *self == 0.0 { 0.0 } else { *self };
                normalized.to_bits().hash(state);
            }

            fn to_key_value(&self) -> KeyValue {
                KeyValue::$variant(*self)
            }
        }
    };
}

float_component!(f32, Float, Float);
float_component!(f64, Double, Double);

fn validate_length(len: usize) -> Result<()> {
    if len > MAX_VARIABLE_LEN {
        return Err(ShardKeyError::OversizeValue {
            len,
            max: MAX_VARIABLE_LEN,
        });
    }
    Ok(())
}

impl sealed::Sealed for String {}

impl KeyComponent for String {
    const DATA_TYPE: KeyDataType = KeyDataType::String;

    fn zero() -> Self {
        String::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn validate(&self) -> Result<()> {
        validate_length(self.len())
    }

    fn hash_component<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn to_key_value(&self) -> KeyValue {
        KeyValue::String(self.clone())
    }
}

impl sealed::Sealed for Vec<u8> {}

impl KeyComponent for Vec<u8> {
    const DATA_TYPE: KeyDataType = KeyDataType::Blob;

    fn zero() -> Self {
        Vec::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn validate(&self) -> Result<()> {
        validate_length(self.len())
    }

    fn hash_component<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn to_key_value(&self) -> KeyValue {
        KeyValue::Blob(self.clone())
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Integer types that can back a key enum
pub trait EnumRepr: KeyComponent + Copy {
    /// Tag used for enums stored as this integer
    const ENUM_TAG: KeyDataType;

    fn to_enum_value(self) -> KeyValue;
}

impl EnumRepr for i32 {
    const ENUM_TAG: KeyDataType = KeyDataType::EnumInt32;

    fn to_enum_value(self) -> KeyValue {
        KeyValue::EnumInt32(self)
    }
}

impl EnumRepr for u8 {
    const ENUM_TAG: KeyDataType = KeyDataType::EnumByte;

    fn to_enum_value(self) -> KeyValue {
        KeyValue::EnumByte(self)
    }
}

impl EnumRepr for i16 {
    const ENUM_TAG: KeyDataType = KeyDataType::EnumInt16;

    fn to_enum_value(self) -> KeyValue {
        KeyValue::EnumInt16(self)
    }
}

impl EnumRepr for i64 {
    const ENUM_TAG: KeyDataType = KeyDataType::EnumInt64;

    fn to_enum_value(self) -> KeyValue {
        KeyValue::EnumInt64(self)
    }
}

/// A fieldless enum stored as its integer representation
///
/// ```
/// use shardkey::KeyEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Default)]
/// enum Region { #[default] North = 0, South = 1 }
///
/// impl KeyEnum for Region {
///     type Repr = u8;
///     fn to_repr(self) -> u8 { self as u8 }
///     fn from_repr(repr: u8) -> Option<Self> {
///         match repr { 0 => Some(Region::North), 1 => Some(Region::South), _ => None }
///     }
/// }
/// ```
pub trait KeyEnum: Copy + PartialEq + fmt::Debug + Default + Send + Sync + 'static {
    type Repr: EnumRepr;

    fn to_repr(self) -> Self::Repr;

    /// `None` when no variant has this representation
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

impl<E: KeyEnum> ValueCodec for E {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        self.to_repr().encode_value(buf)
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        let repr = <E::Repr as ValueCodec>::decode_value(buf)?;
        E::from_repr(repr).ok_or_else(|| {
            ShardKeyError::InvalidValue(format!("no enum variant for {:?}", repr))
        })
    }
}

impl<E: KeyEnum> sealed::Sealed for E {}

impl<E: KeyEnum> KeyComponent for E {
    const DATA_TYPE: KeyDataType = <E::Repr as EnumRepr>::ENUM_TAG;

    fn zero() -> Self {
        E::default()
    }

    fn is_zero(&self) -> bool {
        self.to_repr().is_zero()
    }

    fn hash_component<H: Hasher>(&self, state: &mut H) {
        self.to_repr().hash_component(state);
    }

    fn to_key_value(&self) -> KeyValue {
        self.to_repr().to_enum_value()
    }
}
