//! Arity-2 key: shard id + record id + child id

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{check_component, memoized, render, CompoundKey, RecordKey};
use crate::codec::{KeyComponent, KeyValue};
use crate::error::Result;
use crate::metadata::Metadata;
use crate::types::KeyDataType;

/// Key of a record nested one level under a parent record
#[derive(Clone)]
pub struct ChildKey<R: KeyComponent, C: KeyComponent> {
    shard_id: i16,
    record_id: R,
    child_id: C,
    metadata: Metadata,
}

impl<R: KeyComponent, C: KeyComponent> ChildKey<R, C> {
    pub fn new(shard_id: i16, record_id: R, child_id: C) -> Result<Self> {
        check_component(1, &record_id)?;
        check_component(2, &child_id)?;
        Ok(Self {
            shard_id,
            record_id,
            child_id,
            metadata: Metadata::pack(&Self::component_types())?,
        })
    }

    pub fn record_id(&self) -> &R {
        &self.record_id
    }

    pub fn child_id(&self) -> &C {
        &self.child_id
    }

    /// Key of the parent record
    pub fn parent(&self) -> Result<RecordKey<R>> {
        RecordKey::new(self.shard_id, self.record_id.clone())
    }

    pub fn with_shard_id(&self, shard_id: i16) -> Self {
        Self {
            shard_id,
            ..self.clone()
        }
    }
}

impl<R: KeyComponent, C: KeyComponent> CompoundKey for ChildKey<R, C> {
    const ARITY: usize = 2;

    fn shard_id(&self) -> i16 {
        self.shard_id
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn component_types() -> Vec<KeyDataType> {
        vec![R::DATA_TYPE, C::DATA_TYPE]
    }

    fn components(&self) -> Vec<KeyValue> {
        vec![self.record_id.to_key_value(), self.child_id.to_key_value()]
    }

    fn is_empty(&self) -> bool {
        self.shard_id == 0 && self.record_id.is_zero() && self.child_id.is_zero()
    }

    fn empty() -> &'static Self {
        memoized(|| {
            Self::new(0, R::zero(), C::zero()).expect("default components are always encodable")
        })
    }

    fn encode_components(&self, buf: &mut Vec<u8>) -> Result<()> {
        self.record_id.encode_value(buf)?;
        self.child_id.encode_value(buf)
    }

    fn decode_components(shard_id: i16, metadata: Metadata, buf: &mut &[u8]) -> Result<Self> {
        let record_id = R::decode_value(buf)?;
        let child_id = C::decode_value(buf)?;
        Ok(Self {
            shard_id,
            record_id,
            child_id,
            metadata,
        })
    }
}

impl<R: KeyComponent, C: KeyComponent> PartialEq for ChildKey<R, C> {
    fn eq(&self, other: &Self) -> bool {
        self.shard_id == other.shard_id
            && self.record_id == other.record_id
            && self.child_id == other.child_id
    }
}

impl<R: KeyComponent + Eq, C: KeyComponent + Eq> Eq for ChildKey<R, C> {}

impl<R: KeyComponent, C: KeyComponent> Hash for ChildKey<R, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shard_id.hash(state);
        self.record_id.hash_component(state);
        self.child_id.hash_component(state);
    }
}

impl<R: KeyComponent, C: KeyComponent> fmt::Debug for ChildKey<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildKey")
            .field("shard_id", &self.shard_id)
            .field("record_id", &self.record_id)
            .field("child_id", &self.child_id)
            .finish()
    }
}

impl<R: KeyComponent, C: KeyComponent> fmt::Display for ChildKey<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.shard_id, &self.components())
    }
}
