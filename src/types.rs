//! Type Tag Registry
//!
//! Maps the closed set of supported component types to a 6-bit code and back.
//!
//! ## Codes
//! ```text
//! ┌────┬───────────┬─────────────────────┬──────────────────┐
//! │Code│ Tag       │ Rust type           │ Wire width       │
//! ├────┼───────────┼─────────────────────┼──────────────────┤
//! │  0 │ Undefined │ -                   │ -                │
//! │  1 │ Guid      │ uuid::Uuid          │ 16               │
//! │  2 │ Blob      │ Vec<u8>             │ 1 + len          │
//! │  3 │ Byte      │ u8                  │ 1                │
//! │  4 │ SByte     │ i8                  │ 1                │
//! │  5 │ Int16     │ i16                 │ 2                │
//! │  6 │ Int32     │ i32                 │ 4                │
//! │  7 │ Int64     │ i64                 │ 8                │
//! │  8 │ Char      │ char (BMP)          │ 2                │
//! │  9 │ Decimal   │ Decimal             │ 16               │
//! │ 10 │ Double    │ f64                 │ 8                │
//! │ 11 │ Float     │ f32                 │ 4                │
//! │ 12 │ DateTime  │ NaiveDateTime       │ 8                │
//! │ 13 │ DateOnly  │ NaiveDate           │ 4                │
//! │ 14 │ TimeOnly  │ NaiveTime           │ 8                │
//! │ 15 │ TimeSpan  │ chrono::Duration    │ 8                │
//! │ 16 │ String    │ String              │ 1 + len          │
//! │ 17 │ EnumInt32 │ KeyEnum<Repr = i32> │ 4                │
//! │ 18 │ EnumByte  │ KeyEnum<Repr = u8>  │ 1                │
//! │ 19 │ EnumInt16 │ KeyEnum<Repr = i16> │ 2                │
//! │ 20 │ EnumInt64 │ KeyEnum<Repr = i64> │ 8                │
//! └────┴───────────┴─────────────────────┴──────────────────┘
//! ```

use std::any::TypeId;
use std::fmt;

use serde::Serialize;

use crate::codec::Decimal;

/// Largest code that fits the 6-bit metadata field
pub const MAX_TAG_CODE: u8 = 0x3F;

/// Type tag of a key component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum KeyDataType {
    Undefined = 0,
    Guid = 1,
    Blob = 2,
    Byte = 3,
    SByte = 4,
    Int16 = 5,
    Int32 = 6,
    Int64 = 7,
    Char = 8,
    Decimal = 9,
    Double = 10,
    Float = 11,
    DateTime = 12,
    DateOnly = 13,
    TimeOnly = 14,
    TimeSpan = 15,
    String = 16,
    EnumInt32 = 17,
    EnumByte = 18,
    EnumInt16 = 19,
    EnumInt64 = 20,
}

/// How many bytes a tagged value occupies on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireWidth {
    /// Always exactly this many bytes
    Fixed(usize),
    /// One length byte followed by up to 127 payload bytes
    LengthPrefixed,
}

/// Decode-side description of a tag, used by the type-erased reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub data_type: KeyDataType,
    pub rust_name: &'static str,
    pub width: WireWidth,
}

impl KeyDataType {
    /// Every tag that can appear in a valid key, in code order
    pub const ALL: [KeyDataType; 20] = [
        KeyDataType::Guid,
        KeyDataType::Blob,
        KeyDataType::Byte,
        KeyDataType::SByte,
        KeyDataType::Int16,
        KeyDataType::Int32,
        KeyDataType::Int64,
        KeyDataType::Char,
        KeyDataType::Decimal,
        KeyDataType::Double,
        KeyDataType::Float,
        KeyDataType::DateTime,
        KeyDataType::DateOnly,
        KeyDataType::TimeOnly,
        KeyDataType::TimeSpan,
        KeyDataType::String,
        KeyDataType::EnumInt32,
        KeyDataType::EnumByte,
        KeyDataType::EnumInt16,
        KeyDataType::EnumInt64,
    ];

    /// The 6-bit wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a tag by its wire code
    ///
    /// Returns `None` for codes with no assigned tag. Code 0 maps to `Undefined`.
    pub fn from_code(code: u8) -> Option<Self> {
        if code == 0 {
            return Some(KeyDataType::Undefined);
        }
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    pub fn is_defined(self) -> bool {
        self != KeyDataType::Undefined
    }

    pub fn is_enum(self) -> bool {
        matches!(
            self,
            KeyDataType::EnumInt32
                | KeyDataType::EnumByte
                | KeyDataType::EnumInt16
                | KeyDataType::EnumInt64
        )
    }

    /// Tag of the integer type backing an enum tag; identity for everything else
    pub fn underlying(self) -> KeyDataType {
        match self {
            KeyDataType::EnumInt32 => KeyDataType::Int32,
            KeyDataType::EnumByte => KeyDataType::Byte,
            KeyDataType::EnumInt16 => KeyDataType::Int16,
            KeyDataType::EnumInt64 => KeyDataType::Int64,
            other => other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyDataType::Undefined => "Undefined",
            KeyDataType::Guid => "Guid",
            KeyDataType::Blob => "Blob",
            KeyDataType::Byte => "Byte",
            KeyDataType::SByte => "SByte",
            KeyDataType::Int16 => "Int16",
            KeyDataType::Int32 => "Int32",
            KeyDataType::Int64 => "Int64",
            KeyDataType::Char => "Char",
            KeyDataType::Decimal => "Decimal",
            KeyDataType::Double => "Double",
            KeyDataType::Float => "Float",
            KeyDataType::DateTime => "DateTime",
            KeyDataType::DateOnly => "DateOnly",
            KeyDataType::TimeOnly => "TimeOnly",
            KeyDataType::TimeSpan => "TimeSpan",
            KeyDataType::String => "String",
            KeyDataType::EnumInt32 => "EnumInt32",
            KeyDataType::EnumByte => "EnumByte",
            KeyDataType::EnumInt16 => "EnumInt16",
            KeyDataType::EnumInt64 => "EnumInt64",
        }
    }

    /// Partial inverse of [`tag_of`]: the decode rule for a tag
    ///
    /// `None` for `Undefined`, which has no decode rule.
    pub fn descriptor(self) -> Option<TypeDescriptor> {
        let (rust_name, width) = match self {
            KeyDataType::Undefined => return None,
            KeyDataType::Guid => ("uuid::Uuid", WireWidth::Fixed(16)),
            KeyDataType::Blob => ("Vec<u8>", WireWidth::LengthPrefixed),
            KeyDataType::Byte => ("u8", WireWidth::Fixed(1)),
            KeyDataType::SByte => ("i8", WireWidth::Fixed(1)),
            KeyDataType::Int16 => ("i16", WireWidth::Fixed(2)),
            KeyDataType::Int32 => ("i32", WireWidth::Fixed(4)),
            KeyDataType::Int64 => ("i64", WireWidth::Fixed(8)),
            KeyDataType::Char => ("char", WireWidth::Fixed(2)),
            KeyDataType::Decimal => ("Decimal", WireWidth::Fixed(16)),
            KeyDataType::Double => ("f64", WireWidth::Fixed(8)),
            KeyDataType::Float => ("f32", WireWidth::Fixed(4)),
            KeyDataType::DateTime => ("chrono::NaiveDateTime", WireWidth::Fixed(8)),
            KeyDataType::DateOnly => ("chrono::NaiveDate", WireWidth::Fixed(4)),
            KeyDataType::TimeOnly => ("chrono::NaiveTime", WireWidth::Fixed(8)),
            KeyDataType::TimeSpan => ("chrono::Duration", WireWidth::Fixed(8)),
            KeyDataType::String => ("String", WireWidth::LengthPrefixed),
            KeyDataType::EnumInt32 => ("enum(i32)", WireWidth::Fixed(4)),
            KeyDataType::EnumByte => ("enum(u8)", WireWidth::Fixed(1)),
            KeyDataType::EnumInt16 => ("enum(i16)", WireWidth::Fixed(2)),
            KeyDataType::EnumInt64 => ("enum(i64)", WireWidth::Fixed(8)),
        };
        Some(TypeDescriptor {
            data_type: self,
            rust_name,
            width,
        })
    }
}

impl fmt::Display for KeyDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Tag for an arbitrary `'static` type
///
/// Total over every type: anything outside the supported set yields `Undefined`,
/// which callers must treat as an encoding error. Enums carry their tag through
/// [`KeyComponent`](crate::codec::KeyComponent) and are not visible here.
pub fn tag_of<T: ?Sized + 'static>() -> KeyDataType {
    let id = TypeId::of::<T>();
    let table: [(TypeId, KeyDataType); 16] = [
        (TypeId::of::<uuid::Uuid>(), KeyDataType::Guid),
        (TypeId::of::<Vec<u8>>(), KeyDataType::Blob),
        (TypeId::of::<u8>(), KeyDataType::Byte),
        (TypeId::of::<i8>(), KeyDataType::SByte),
        (TypeId::of::<i16>(), KeyDataType::Int16),
        (TypeId::of::<i32>(), KeyDataType::Int32),
        (TypeId::of::<i64>(), KeyDataType::Int64),
        (TypeId::of::<char>(), KeyDataType::Char),
        (TypeId::of::<Decimal>(), KeyDataType::Decimal),
        (TypeId::of::<f64>(), KeyDataType::Double),
        (TypeId::of::<f32>(), KeyDataType::Float),
        (TypeId::of::<chrono::NaiveDateTime>(), KeyDataType::DateTime),
        (TypeId::of::<chrono::NaiveDate>(), KeyDataType::DateOnly),
        (TypeId::of::<chrono::NaiveTime>(), KeyDataType::TimeOnly),
        (TypeId::of::<chrono::Duration>(), KeyDataType::TimeSpan),
        (TypeId::of::<String>(), KeyDataType::String),
    ];
    table
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, tag)| *tag)
        .unwrap_or(KeyDataType::Undefined)
}
