//! Arity-4 key: shard id + record id + child id + grandchild id + great-grandchild id

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{check_component, memoized, render, CompoundKey, GrandchildKey};
use crate::codec::{KeyComponent, KeyValue};
use crate::error::Result;
use crate::metadata::Metadata;
use crate::types::KeyDataType;

#[derive(Clone)]
pub struct GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    shard_id: i16,
    record_id: R,
    child_id: C,
    grandchild_id: G,
    great_grandchild_id: GG,
    metadata: Metadata,
}

impl<R, C, G, GG> GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    pub fn new(
        shard_id: i16,
        record_id: R,
        child_id: C,
        grandchild_id: G,
        great_grandchild_id: GG,
    ) -> Result<Self> {
        check_component(1, &record_id)?;
        check_component(2, &child_id)?;
        check_component(3, &grandchild_id)?;
        check_component(4, &great_grandchild_id)?;
        Ok(Self {
            shard_id,
            record_id,
            child_id,
            grandchild_id,
            great_grandchild_id,
            metadata: Metadata::pack(&Self::component_types())?,
        })
    }

    pub fn record_id(&self) -> &R {
        &self.record_id
    }

    pub fn child_id(&self) -> &C {
        &self.child_id
    }

    pub fn grandchild_id(&self) -> &G {
        &self.grandchild_id
    }

    pub fn great_grandchild_id(&self) -> &GG {
        &self.great_grandchild_id
    }

    pub fn parent(&self) -> Result<GrandchildKey<R, C, G>> {
        GrandchildKey::new(
            self.shard_id,
            self.record_id.clone(),
            self.child_id.clone(),
            self.grandchild_id.clone(),
        )
    }

    pub fn with_shard_id(&self, shard_id: i16) -> Self {
        Self {
            shard_id,
            ..self.clone()
        }
    }
}

impl<R, C, G, GG> CompoundKey for GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    const ARITY: usize = 4;

    fn shard_id(&self) -> i16 {
        self.shard_id
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn component_types() -> Vec<KeyDataType> {
        vec![R::DATA_TYPE, C::DATA_TYPE, G::DATA_TYPE, GG::DATA_TYPE]
    }

    fn components(&self) -> Vec<KeyValue> {
        vec![
            self.record_id.to_key_value(),
            self.child_id.to_key_value(),
            self.grandchild_id.to_key_value(),
            self.great_grandchild_id.to_key_value(),
        ]
    }

    fn is_empty(&self) -> bool {
        self.shard_id == 0
            && self.record_id.is_zero()
            && self.child_id.is_zero()
            && self.grandchild_id.is_zero()
            && self.great_grandchild_id.is_zero()
    }

    fn empty() -> &'static Self {
        memoized(|| {
            Self::new(0, R::zero(), C::zero(), G::zero(), GG::zero())
                .expect("default components are always encodable")
        })
    }

    fn encode_components(&self, buf: &mut Vec<u8>) -> Result<()> {
        self.record_id.encode_value(buf)?;
        self.child_id.encode_value(buf)?;
        self.grandchild_id.encode_value(buf)?;
        self.great_grandchild_id.encode_value(buf)
    }

    fn decode_components(shard_id: i16, metadata: Metadata, buf: &mut &[u8]) -> Result<Self> {
        let record_id = R::decode_value(buf)?;
        let child_id = C::decode_value(buf)?;
        let grandchild_id = G::decode_value(buf)?;
        let great_grandchild_id = GG::decode_value(buf)?;
        Ok(Self {
            shard_id,
            record_id,
            child_id,
            grandchild_id,
            great_grandchild_id,
            metadata,
        })
    }
}

impl<R, C, G, GG> PartialEq for GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    fn eq(&self, other: &Self) -> bool {
        self.shard_id == other.shard_id
            && self.record_id == other.record_id
            && self.child_id == other.child_id
            && self.grandchild_id == other.grandchild_id
            && self.great_grandchild_id == other.great_grandchild_id
    }
}

impl<R, C, G, GG> Eq for GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent + Eq,
    C: KeyComponent + Eq,
    G: KeyComponent + Eq,
    GG: KeyComponent + Eq,
{
}

impl<R, C, G, GG> Hash for GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shard_id.hash(state);
        self.record_id.hash_component(state);
        self.child_id.hash_component(state);
        self.grandchild_id.hash_component(state);
        self.great_grandchild_id.hash_component(state);
    }
}

impl<R, C, G, GG> fmt::Debug for GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreatGrandchildKey")
            .field("shard_id", &self.shard_id)
            .field("record_id", &self.record_id)
            .field("child_id", &self.child_id)
            .field("grandchild_id", &self.grandchild_id)
            .field("great_grandchild_id", &self.great_grandchild_id)
            .finish()
    }
}

impl<R, C, G, GG> fmt::Display for GreatGrandchildKey<R, C, G, GG>
where
    R: KeyComponent,
    C: KeyComponent,
    G: KeyComponent,
    GG: KeyComponent,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.shard_id, &self.components())
    }
}
