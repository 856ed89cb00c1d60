//! Compound Key Module
//!
//! Four immutable key shapes, one per arity:
//!
//! ```text
//! RecordKey<R>                        shard │ record
//! ChildKey<R, C>                      shard │ record │ child
//! GrandchildKey<R, C, G>              shard │ record │ child │ grandchild
//! GreatGrandchildKey<R, C, G, GG>     shard │ record │ child │ grandchild │ great-grandchild
//! ```
//!
//! Each shape caches its metadata at construction. Equality and hashing cover
//! the shard id and components only, never the metadata.

mod child;
mod empty;
mod grandchild;
mod great_grandchild;
mod record;

use std::fmt;

use crate::codec::KeyValue;
use crate::config::Config;
use crate::error::{Result, ShardKeyError};
use crate::frame;
use crate::legacy;
use crate::metadata::Metadata;
use crate::transport::{serialize_from_external_string, serialize_to_external_string};
use crate::types::KeyDataType;

pub use child::ChildKey;
pub use grandchild::GrandchildKey;
pub use great_grandchild::GreatGrandchildKey;
pub use record::RecordKey;

pub(crate) use empty::memoized;

/// Behaviour shared by every key arity
///
/// Implementors supply component access and the component codec; framing,
/// metadata validation and the text forms are provided.
pub trait CompoundKey: Sized + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Number of identifier components
    const ARITY: usize;

    /// Virtual partition owning the record
    fn shard_id(&self) -> i16;

    /// Metadata computed when the key was built
    fn metadata(&self) -> &Metadata;

    /// Static component tags, in declared order
    fn component_types() -> Vec<KeyDataType>;

    /// Type-erased copies of the components, in declared order
    fn components(&self) -> Vec<KeyValue>;

    /// Shard id is zero and every component holds its type's default
    fn is_empty(&self) -> bool;

    /// The all-default key, built once per concrete key type
    fn empty() -> &'static Self;

    #[doc(hidden)]
    fn encode_components(&self, buf: &mut Vec<u8>) -> Result<()>;

    #[doc(hidden)]
    fn decode_components(shard_id: i16, metadata: Metadata, buf: &mut &[u8]) -> Result<Self>;

    // -------------------------------------------------------------------------
    // Binary form
    // -------------------------------------------------------------------------

    /// Raw binary form: control byte, metadata, shard id, components
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(16);
        frame::write_header(&mut buf, self.metadata(), self.shard_id());
        self.encode_components(&mut buf)?;
        Ok(buf)
    }

    /// Decode either the raw or the UTF8 form with the default policy
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &Config::default())
    }

    fn from_bytes_with(bytes: &[u8], config: &Config) -> Result<Self> {
        let result = decode_key::<Self>(bytes, config);
        if let Err(e) = &result {
            tracing::debug!(arity = Self::ARITY, error = %e, "key decode failed");
        }
        result
    }

    /// Non-failing decode
    fn try_parse(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes).ok()
    }

    /// Decode, or fall back to [`CompoundKey::empty`]
    fn parse_or_empty(bytes: &[u8]) -> Self {
        Self::try_parse(bytes).unwrap_or_else(|| Self::empty().clone())
    }

    // -------------------------------------------------------------------------
    // Text forms
    // -------------------------------------------------------------------------

    /// URL-safe, checksummed string
    fn to_external_string(&self) -> Result<String> {
        Ok(serialize_to_external_string(&self.to_bytes()?))
    }

    fn from_external_string(text: &str) -> Result<Self> {
        Self::from_bytes(&serialize_from_external_string(text)?)
    }

    /// UTF8-safe byte form (control byte with the raw flag cleared + envelope)
    fn to_utf8(&self) -> Result<Vec<u8>> {
        frame::raw_to_utf8(&self.to_bytes()?)
    }

    fn from_utf8(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }

    // -------------------------------------------------------------------------
    // Legacy form
    // -------------------------------------------------------------------------

    /// Origin-prefixed layout without metadata
    fn to_legacy_bytes(&self, origin: u8) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(16);
        legacy::write_header(&mut buf, origin, self.shard_id())?;
        self.encode_components(&mut buf)?;
        Ok(buf)
    }
}

fn decode_key<K: CompoundKey>(bytes: &[u8], config: &Config) -> Result<K> {
    let first = *bytes
        .first()
        .ok_or_else(|| ShardKeyError::truncated("control byte", 1, 0))?;

    if !frame::is_canonical_control(first) {
        let mut buf = bytes;
        if let Some((_origin, shard_id)) = legacy::read_header(&mut buf, config)? {
            let key = K::decode_components(shard_id, *K::empty().metadata(), &mut buf)?;
            frame::finish(buf, config)?;
            return Ok(key);
        }
        return Err(ShardKeyError::InvalidControlByte(first));
    }

    let opened = frame::open(bytes)?;
    let mut buf: &[u8] = &opened.body;
    let (saved, shard_id) = frame::read_header(&mut buf, opened.metadata_len)?;

    let expected = *K::empty().metadata();
    Metadata::validate(saved, &expected)?;

    let key = K::decode_components(shard_id, expected, &mut buf)?;
    frame::finish(buf, config)?;
    Ok(key)
}

/// Validate a component value, tagging failures with its position
pub(crate) fn check_component<T: crate::codec::KeyComponent>(
    component: usize,
    value: &T,
) -> Result<()> {
    value.validate().map_err(|e| {
        tracing::debug!(component, error = %e, "invalid key component");
        e
    })
}

/// `shard <id>: <c1>, <c2>, ...`
pub(crate) fn render(f: &mut fmt::Formatter<'_>, shard_id: i16, values: &[KeyValue]) -> fmt::Result {
    write!(f, "shard {}:", shard_id)?;
    for (i, value) in values.iter().enumerate() {
        if i == 0 {
            write!(f, " {}", value)?;
        } else {
            write!(f, ", {}", value)?;
        }
    }
    Ok(())
}
