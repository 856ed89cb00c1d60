//! Value Codec
//!
//! Per-type byte encoding of a single component value.
//!
//! ## Rules
//! ```text
//! integers / floats   little-endian, native width (1/2/4/8)
//! char                one UTF-16 code unit, 2 bytes LE
//! Guid                16 bytes, mixed-endian GUID order
//! Decimal             lo | mid | flags | hi   (4 x u32 LE)
//! DateTime/TimeOnly   i64 ticks (100ns)       DateOnly: i32 day number
//! TimeSpan            i64 ticks
//! String / Blob       [len << 1 | 1][bytes]   (0x00 = null, len <= 127)
//! enum                as its underlying integer
//! Option<T>           [0 = present | 1 = null][T]
//! ```
//!
//! Encode and decode are strict pairs: `decode` consumes exactly what `encode`
//! produced. Short input fails with `TruncatedInput`, except `Guid` and
//! `Decimal`, which swallow what is left and yield zero.

mod component;
mod decimal;
mod dynamic;
mod primitive;
mod temporal;

use bytes::Buf;

use crate::error::{Result, ShardKeyError};

pub use component::{EnumRepr, KeyComponent, KeyEnum};
pub use decimal::Decimal;
pub use dynamic::{decode_dynamic, KeyValue};
pub use primitive::MAX_VARIABLE_LEN;
pub use temporal::{TICKS_PER_DAY, TICKS_PER_SECOND};

pub(crate) use primitive::{decode_length_prefixed, encode_length_prefixed};

/// A value with a wire encoding
pub trait ValueCodec: Sized {
    /// Append the encoding of `self` to `buf`
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()>;

    /// Read one value from the front of `buf`, advancing it
    fn decode_value(buf: &mut &[u8]) -> Result<Self>;
}

/// Encode a single value to a fresh buffer
pub fn encode<T: ValueCodec>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    value.encode_value(&mut buf)?;
    Ok(buf)
}

/// Decode a single value starting at `position`
///
/// Returns the value and the number of bytes consumed.
pub fn decode<T: ValueCodec>(bytes: &[u8], position: usize) -> Result<(T, usize)> {
    let mut buf = bytes
        .get(position..)
        .ok_or_else(|| ShardKeyError::truncated("value", position, bytes.len()))?;
    let start = buf.remaining();
    let value = T::decode_value(&mut buf)?;
    Ok((value, start - buf.remaining()))
}

/// Fail with `TruncatedInput` unless `needed` bytes remain
pub(crate) fn ensure_remaining(buf: &&[u8], needed: usize, context: &'static str) -> Result<()> {
    if buf.remaining() < needed {
        return Err(ShardKeyError::truncated(context, needed, buf.remaining()));
    }
    Ok(())
}
