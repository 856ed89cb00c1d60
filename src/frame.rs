//! Wire framing
//!
//! ## Binary Layout
//! ```text
//! ┌──────────┬──────────────┬──────────────┬─────────────────────────┐
//! │ Ctrl (1) │ Metadata (M) │ Shard id (2) │ Component 1 .. N        │
//! └──────────┴──────────────┴──────────────┴─────────────────────────┘
//!
//! Ctrl:  bit 7     1 = raw bytes follow, 0 = UTF8 envelope follows
//!        bits 2-6  zero
//!        bits 0-1  M (1..=3)
//! ```
//!
//! A control byte is produced fresh on every encode; the UTF8 form differs from
//! the raw form only in bit 7 and in the envelope applied after it.

use std::borrow::Cow;

use bytes::{Buf, BufMut};

use crate::codec::ensure_remaining;
use crate::config::Config;
use crate::error::{Result, ShardKeyError};
use crate::metadata::{Metadata, MAX_METADATA_LEN};
use crate::transport::{decode_utf8, encode_to_utf8};

/// Bit 7: raw bytes follow
pub const RAW_FLAG: u8 = 0x80;

/// Bits 0-1: metadata length
pub const METADATA_LEN_MASK: u8 = 0x03;

/// Bits 2-6: always zero in the canonical layout
const RESERVED_MASK: u8 = 0x7C;

/// Smallest possible canonical key: ctrl + 1 metadata byte + shard id + 1 byte
pub const MIN_KEY_LEN: usize = 5;

pub fn control_byte(metadata_len: usize, raw: bool) -> u8 {
    let len = (metadata_len as u8) & METADATA_LEN_MASK;
    if raw {
        RAW_FLAG | len
    } else {
        len
    }
}

/// Whether `byte` can start a canonical (metadata-based) key
pub fn is_canonical_control(byte: u8) -> bool {
    byte & RESERVED_MASK == 0 && byte & METADATA_LEN_MASK != 0
}

/// Control byte + metadata + shard id
pub(crate) fn write_header(buf: &mut Vec<u8>, metadata: &Metadata, shard_id: i16) {
    buf.put_u8(control_byte(metadata.len(), true));
    buf.put_slice(metadata.as_bytes());
    buf.put_i16_le(shard_id);
}

/// A canonical key with its envelope (if any) removed
#[derive(Debug)]
pub(crate) struct Opened<'a> {
    pub metadata_len: usize,
    /// Bytes after the control byte
    pub body: Cow<'a, [u8]>,
}

/// Validate the control byte and unwrap the envelope it announces
pub(crate) fn open(bytes: &[u8]) -> Result<Opened<'_>> {
    let (&control, rest) = bytes
        .split_first()
        .ok_or_else(|| ShardKeyError::truncated("control byte", 1, 0))?;
    if !is_canonical_control(control) {
        return Err(ShardKeyError::InvalidControlByte(control));
    }

    let body = if control & RAW_FLAG != 0 {
        Cow::Borrowed(rest)
    } else {
        Cow::Owned(decode_utf8(rest)?)
    };

    Ok(Opened {
        metadata_len: (control & METADATA_LEN_MASK) as usize,
        body,
    })
}

/// Read metadata and shard id from the front of an opened body
pub(crate) fn read_header<'a>(buf: &mut &'a [u8], metadata_len: usize) -> Result<(&'a [u8], i16)> {
    debug_assert!(metadata_len <= MAX_METADATA_LEN);
    ensure_remaining(buf, metadata_len, "metadata")?;
    let (metadata, rest) = buf.split_at(metadata_len);
    *buf = rest;

    ensure_remaining(buf, 2, "shard id")?;
    let shard_id = buf.get_i16_le();
    Ok((metadata, shard_id))
}

/// Enforce the trailing-bytes policy once all components are read
pub(crate) fn finish(buf: &[u8], config: &Config) -> Result<()> {
    if !buf.is_empty() && !config.allow_trailing_bytes {
        return Err(ShardKeyError::TrailingBytes(buf.len()));
    }
    Ok(())
}

/// Convert a raw-form key to its UTF8 form
pub(crate) fn raw_to_utf8(raw: &[u8]) -> Result<Vec<u8>> {
    let (&control, rest) = raw
        .split_first()
        .ok_or_else(|| ShardKeyError::truncated("control byte", 1, 0))?;
    let mut out = Vec::with_capacity(raw.len() * 2);
    out.push(control & !RAW_FLAG);
    out.extend_from_slice(&encode_to_utf8(rest));
    Ok(out)
}
