//! Fixed-width, GUID, char, length-prefixed and nullable encodings

use bytes::{Buf, BufMut};
use uuid::Uuid;

use super::{ensure_remaining, ValueCodec};
use crate::error::{Result, ShardKeyError};

/// Longest string / blob payload the one-byte length prefix can carry
pub const MAX_VARIABLE_LEN: usize = 127;

/// Length byte marking a null string or blob
const NULL_MARKER: u8 = 0x00;

/// GUID width on the wire
const GUID_LEN: usize = 16;

// =============================================================================
// Fixed-width numerics
// =============================================================================

macro_rules! fixed_width_codec {
    ($ty:ty, $width:expr, $put:ident, $get:ident) => {
        impl ValueCodec for $ty {
            fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
                buf.$put(*self);
                Ok(())
            }

            fn decode_value(buf: &mut &[u8]) -> Result<Self> {
                ensure_remaining(buf, $width, stringify!($ty))?;
                Ok(buf.$get())
            }
        }
    };
}

fixed_width_codec!(u8, 1, put_u8, get_u8);
fixed_width_codec!(i8, 1, put_i8, get_i8);
fixed_width_codec!(i16, 2, put_i16_le, get_i16_le);
fixed_width_codec!(i32, 4, put_i32_le, get_i32_le);
fixed_width_codec!(i64, 8, put_i64_le, get_i64_le);
fixed_width_codec!(f32, 4, put_f32_le, get_f32_le);
fixed_width_codec!(f64, 8, put_f64_le, get_f64_le);

// =============================================================================
// Char (one UTF-16 code unit)
// =============================================================================

impl ValueCodec for char {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        let unit = u16::try_from(u32::from(*self)).map_err(|_| {
            ShardKeyError::InvalidValue(format!(
                "char U+{:04X} does not fit one UTF-16 code unit",
                u32::from(*self)
            ))
        })?;
        buf.put_u16_le(unit);
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        ensure_remaining(buf, 2, "char")?;
        let unit = buf.get_u16_le();
        char::from_u32(u32::from(unit)).ok_or_else(|| {
            ShardKeyError::InvalidValue(format!("lone surrogate 0x{:04X}", unit))
        })
    }
}

// =============================================================================
// GUID
// =============================================================================

impl ValueCodec for Uuid {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.put_slice(&self.to_bytes_le());
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        if buf.remaining() < GUID_LEN {
            // Short GUIDs read as nil; the remainder belongs to this component.
            tracing::debug!(
                remaining = buf.remaining(),
                "short GUID payload, decoding as nil"
            );
            buf.advance(buf.remaining());
            return Ok(Uuid::nil());
        }
        let mut raw = [0u8; GUID_LEN];
        buf.copy_to_slice(&mut raw);
        Ok(Uuid::from_bytes_le(raw))
    }
}

// =============================================================================
// Length-prefixed (String / Blob)
// =============================================================================

/// Write `[len << 1 | 1][bytes]`
pub(crate) fn encode_length_prefixed(bytes: &[u8], buf: &mut Vec<u8>) -> Result<()> {
    if bytes.len() > MAX_VARIABLE_LEN {
        return Err(ShardKeyError::OversizeValue {
            len: bytes.len(),
            max: MAX_VARIABLE_LEN,
        });
    }
    buf.put_u8(((bytes.len() as u8) << 1) | 1);
    buf.put_slice(bytes);
    Ok(())
}

/// Read a length-prefixed payload; `None` for the null marker
pub(crate) fn decode_length_prefixed(
    buf: &mut &[u8],
    context: &'static str,
) -> Result<Option<Vec<u8>>> {
    ensure_remaining(buf, 1, context)?;
    let header = buf.get_u8();
    if header == NULL_MARKER {
        return Ok(None);
    }
    if header & 1 == 0 {
        return Err(ShardKeyError::InvalidValue(format!(
            "malformed {} length byte 0x{:02x}",
            context, header
        )));
    }
    let len = (header >> 1) as usize;
    ensure_remaining(buf, len, context)?;
    let mut payload = vec![0u8; len];
    buf.copy_to_slice(&mut payload);
    Ok(Some(payload))
}

impl ValueCodec for String {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        encode_length_prefixed(self.as_bytes(), buf)
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        match decode_length_prefixed(buf, "string")? {
            None => Ok(String::new()),
            Some(raw) => String::from_utf8(raw)
                .map_err(|e| ShardKeyError::InvalidValue(format!("string is not UTF-8: {}", e))),
        }
    }
}

impl ValueCodec for Vec<u8> {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        encode_length_prefixed(self, buf)
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        Ok(decode_length_prefixed(buf, "blob")?.unwrap_or_default())
    }
}

// =============================================================================
// Nullable wrapper
// =============================================================================

/// Presence byte: 0 = a value follows, anything else = null
impl<T: ValueCodec> ValueCodec for Option<T> {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            Some(value) => {
                buf.put_u8(0);
                value.encode_value(buf)
            }
            None => {
                buf.put_u8(1);
                Ok(())
            }
        }
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        ensure_remaining(buf, 1, "nullable")?;
        if buf.get_u8() != 0 {
            return Ok(None);
        }
        T::decode_value(buf).map(Some)
    }
}
