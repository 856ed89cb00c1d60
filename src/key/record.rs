//! Arity-1 key: shard id + record id

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{check_component, memoized, render, CompoundKey};
use crate::codec::{KeyComponent, KeyValue};
use crate::error::Result;
use crate::metadata::Metadata;
use crate::types::KeyDataType;

/// Key of a top-level record
#[derive(Clone)]
pub struct RecordKey<R: KeyComponent> {
    shard_id: i16,
    record_id: R,
    metadata: Metadata,
}

impl<R: KeyComponent> RecordKey<R> {
    pub fn new(shard_id: i16, record_id: R) -> Result<Self> {
        check_component(1, &record_id)?;
        Ok(Self {
            shard_id,
            record_id,
            metadata: Metadata::pack(&Self::component_types())?,
        })
    }

    pub fn record_id(&self) -> &R {
        &self.record_id
    }

    /// Same record on another shard
    pub fn with_shard_id(&self, shard_id: i16) -> Self {
        Self {
            shard_id,
            ..self.clone()
        }
    }
}

impl<R: KeyComponent> CompoundKey for RecordKey<R> {
    const ARITY: usize = 1;

    fn shard_id(&self) -> i16 {
        self.shard_id
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn component_types() -> Vec<KeyDataType> {
        vec![R::DATA_TYPE]
    }

    fn components(&self) -> Vec<KeyValue> {
        vec![self.record_id.to_key_value()]
    }

    fn is_empty(&self) -> bool {
        self.shard_id == 0 && self.record_id.is_zero()
    }

    fn empty() -> &'static Self {
        memoized(|| Self::new(0, R::zero()).expect("default components are always encodable"))
    }

    fn encode_components(&self, buf: &mut Vec<u8>) -> Result<()> {
        self.record_id.encode_value(buf)
    }

    fn decode_components(shard_id: i16, metadata: Metadata, buf: &mut &[u8]) -> Result<Self> {
        let record_id = R::decode_value(buf)?;
        Ok(Self {
            shard_id,
            record_id,
            metadata,
        })
    }
}

impl<R: KeyComponent> PartialEq for RecordKey<R> {
    fn eq(&self, other: &Self) -> bool {
        self.shard_id == other.shard_id && self.record_id == other.record_id
    }
}

impl<R: KeyComponent + Eq> Eq for RecordKey<R> {}

impl<R: KeyComponent> Hash for RecordKey<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shard_id.hash(state);
        self.record_id.hash_component(state);
    }
}

impl<R: KeyComponent> fmt::Debug for RecordKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordKey")
            .field("shard_id", &self.shard_id)
            .field("record_id", &self.record_id)
            .finish()
    }
}

impl<R: KeyComponent> fmt::Display for RecordKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.shard_id, &self.components())
    }
}
