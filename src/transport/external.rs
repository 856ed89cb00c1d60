//! URL-safe, checksummed text form of raw bytes

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::error::{Result, ShardKeyError};

/// Checksum trailer size
const CRC_LEN: usize = 4;

/// Encode raw bytes as URL-safe text carrying a CRC32 trailer
pub fn serialize_to_external_string(bytes: &[u8]) -> String {
    let mut payload = Vec::with_capacity(bytes.len() + CRC_LEN);
    payload.extend_from_slice(bytes);
    payload.extend_from_slice(&crc32fast::hash(bytes).to_le_bytes());
    URL_SAFE_NO_PAD.encode(payload)
}

/// Inverse of [`serialize_to_external_string`]
///
/// Fails on a bad alphabet, a missing trailer or a checksum mismatch.
pub fn serialize_from_external_string(text: &str) -> Result<Vec<u8>> {
    let mut payload = URL_SAFE_NO_PAD
        .decode(text.trim())
        .map_err(|e| ShardKeyError::ExternalString(format!("malformed text: {}", e)))?;

    if payload.len() < CRC_LEN {
        return Err(ShardKeyError::ExternalString(format!(
            "payload of {} bytes is shorter than the checksum",
            payload.len()
        )));
    }

    let split = payload.len() - CRC_LEN;
    let stored = u32::from_le_bytes([
        payload[split],
        payload[split + 1],
        payload[split + 2],
        payload[split + 3],
    ]);
    payload.truncate(split);

    let computed = crc32fast::hash(&payload);
    if stored != computed {
        return Err(ShardKeyError::ExternalString(format!(
            "checksum mismatch: expected 0x{:08x}, computed 0x{:08x}",
            stored, computed
        )));
    }
    Ok(payload)
}
