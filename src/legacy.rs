//! Legacy origin-prefixed layout
//!
//! ```text
//! ┌────────────┬──────────────┬─────────────────────────┐
//! │ Origin (1) │ Shard id (2) │ Component 1 .. N        │
//! └────────────┴──────────────┴─────────────────────────┘
//! ```
//!
//! The origin is one ASCII letter naming the system that minted the key. There
//! is no type metadata, so a reader must trust its own static types. Decoding
//! is opt-in through [`LegacyFormat::Accept`].

use bytes::{Buf, BufMut};

use crate::codec::ensure_remaining;
use crate::config::{Config, LegacyFormat};
use crate::error::{Result, ShardKeyError};

pub fn is_valid_origin(origin: u8) -> bool {
    origin.is_ascii_alphabetic()
}

/// Reject an origin other than the one the reader expects
pub fn ensure_origin(expected: u8, found: u8) -> Result<()> {
    if expected != found {
        return Err(ShardKeyError::InvalidOrigin {
            expected: expected as char,
            found: found as char,
        });
    }
    Ok(())
}

pub(crate) fn write_header(buf: &mut Vec<u8>, origin: u8, shard_id: i16) -> Result<()> {
    if !is_valid_origin(origin) {
        return Err(ShardKeyError::InvalidValue(format!(
            "origin 0x{:02x} is not an ASCII letter",
            origin
        )));
    }
    buf.put_u8(origin);
    buf.put_i16_le(shard_id);
    Ok(())
}

/// Read origin and shard id, applying the configured origin guard
///
/// Returns `Ok(None)` when the configuration does not accept legacy keys.
pub fn read_header(buf: &mut &[u8], config: &Config) -> Result<Option<(u8, i16)>> {
    let expected_origin = match config.legacy_format {
        LegacyFormat::Reject => return Ok(None),
        LegacyFormat::Accept { expected_origin } => expected_origin,
    };

    ensure_remaining(buf, 1, "origin")?;
    let origin = buf.get_u8();
    if !is_valid_origin(origin) {
        return Err(ShardKeyError::InvalidControlByte(origin));
    }
    if let Some(expected) = expected_origin {
        ensure_origin(expected, origin)?;
    }

    ensure_remaining(buf, 2, "shard id")?;
    let shard_id = buf.get_i16_le();
    tracing::trace!(origin = %(origin as char), shard_id, "decoding legacy key");
    Ok(Some((origin, shard_id)))
}
