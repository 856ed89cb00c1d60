//! Type-erased key reconstruction
//!
//! Rebuilds a key's shape from bytes alone, for diagnostics where the caller
//! does not know the static component types.
//!
//! ```text
//! bytes ──► control byte ──► envelope? ──► metadata ──► arity + tags
//!                                                          │
//!                     shard id ◄───────────────────────────┘
//!                        │
//!                        ▼
//!          decode_dynamic(tag) per component ──► GhostKey
//! ```
//!
//! Any structural problem yields `None`. Legacy keys carry no metadata and
//! are never reconstructed.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::codec::{decode_dynamic, KeyValue};
use crate::config::Config;
use crate::error::Result;
use crate::frame::{self, MIN_KEY_LEN};
use crate::key::render;
use crate::metadata::Metadata;
use crate::types::KeyDataType;

/// One decoded component of a ghost key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostComponent {
    #[serde(rename = "type")]
    pub data_type: KeyDataType,
    #[serde(serialize_with = "as_display")]
    pub value: KeyValue,
    /// Exact bytes this component occupied on the wire
    #[serde(serialize_with = "as_hex")]
    pub raw: Vec<u8>,
}

/// Metadata-driven view of a serialized key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GhostKey {
    pub shard_id: i16,
    pub components: Vec<GhostComponent>,
}

impl GhostKey {
    pub fn arity(&self) -> usize {
        self.components.len()
    }

    pub fn types(&self) -> Vec<KeyDataType> {
        self.components.iter().map(|c| c.data_type).collect()
    }

    pub fn values(&self) -> Vec<KeyValue> {
        self.components.iter().map(|c| c.value.clone()).collect()
    }
}

impl fmt::Display for GhostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.shard_id, &self.values())
    }
}

/// Reconstruct with the default (strict) policy
pub fn reconstruct(bytes: &[u8]) -> Option<GhostKey> {
    reconstruct_with(bytes, &Config::default())
}

pub fn reconstruct_with(bytes: &[u8], config: &Config) -> Option<GhostKey> {
    if bytes.len() < MIN_KEY_LEN {
        tracing::debug!(len = bytes.len(), "ghost key input too short");
        return None;
    }
    match decode_ghost(bytes, config) {
        Ok(ghost) => {
            tracing::trace!(shard_id = ghost.shard_id, arity = ghost.arity(), "ghost key reconstructed");
            Some(ghost)
        }
        Err(e) => {
            tracing::debug!(error = %e, kind = e.kind(), "ghost key reconstruction failed");
            None
        }
    }
}

fn decode_ghost(bytes: &[u8], config: &Config) -> Result<GhostKey> {
    let opened = frame::open(bytes)?;
    let mut buf: &[u8] = &opened.body;
    let (saved, shard_id) = frame::read_header(&mut buf, opened.metadata_len)?;
    let types = Metadata::from_bytes(saved)?.types()?;

    let mut components = Vec::with_capacity(types.len());
    for data_type in types {
        let before = buf;
        let value = decode_dynamic(&mut buf, data_type)?;
        let consumed = before.len() - buf.len();
        components.push(GhostComponent {
            data_type,
            value,
            raw: before[..consumed].to_vec(),
        });
    }

    frame::finish(buf, config)?;
    Ok(GhostKey {
        shard_id,
        components,
    })
}

fn as_display<S: Serializer>(value: &KeyValue, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn as_hex<S: Serializer>(raw: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let hex: String = raw.iter().map(|b| format!("{:02x}", b)).collect();
    serializer.serialize_str(&hex)
}
