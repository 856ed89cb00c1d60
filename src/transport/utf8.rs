//! UTF8-safe byte envelope

use crate::error::{Result, ShardKeyError};

/// Wrap arbitrary bytes so the result is valid UTF-8
pub fn encode_to_utf8(bytes: &[u8]) -> Vec<u8> {
    let high = bytes.iter().filter(|b| **b >= 0x80).count();
    let mut out = Vec::with_capacity(bytes.len() + high);
    for &byte in bytes {
        if byte < 0x80 {
            out.push(byte);
        } else {
            out.push(0xC0 | (byte >> 6));
            out.push(0x80 | (byte & 0x3F));
        }
    }
    out
}

/// Inverse of [`encode_to_utf8`]
pub fn decode_utf8(envelope: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(envelope)
        .map_err(|e| ShardKeyError::Envelope(format!("not valid UTF-8: {}", e)))?;
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                ShardKeyError::Envelope(format!("code point U+{:04X} outside envelope range", u32::from(c)))
            })
        })
        .collect()
}
