//! Shard grouping and list merge over keyed records
//!
//! Plain set and list operations layered on key equality and shard ids.

use std::collections::{BTreeMap, BTreeSet};

use crate::key::CompoundKey;

/// A record that carries a compound key
pub trait KeyedRecord {
    type Key: CompoundKey;

    fn record_key(&self) -> &Self::Key;
}

/// Distinct shard ids in `records`, leaving out `exclude`
pub fn foreign_shards<'a, R, I>(records: I, exclude: i16) -> BTreeSet<i16>
where
    R: KeyedRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .map(|r| r.record_key().shard_id())
        .filter(|&shard| shard != exclude)
        .collect()
}

/// Group keys by shard id, keeping input order within each shard
pub fn to_shard_values<K, I>(keys: I) -> BTreeMap<i16, Vec<K>>
where
    K: CompoundKey,
    I: IntoIterator<Item = K>,
{
    let mut groups: BTreeMap<i16, Vec<K>> = BTreeMap::new();
    for key in keys {
        groups.entry(key.shard_id()).or_default().push(key);
    }
    groups
}

/// Replace master entries by key
///
/// Each master entry takes the first unused replacement with an equal key.
/// A replacement is used at most once. Unused replacements are appended in
/// their original order when `append_unmatched` is set.
pub fn merge<R: KeyedRecord>(master: Vec<R>, replacements: Vec<R>, append_unmatched: bool) -> Vec<R> {
    let mut pending: Vec<Option<R>> = replacements.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(master.len() + pending.len());

    for entry in master {
        let slot = pending.iter_mut().find(|slot| {
            slot.as_ref()
                .is_some_and(|r| r.record_key() == entry.record_key())
        });
        match slot.and_then(Option::take) {
            Some(replacement) => merged.push(replacement),
            None => merged.push(entry),
        }
    }

    if append_unmatched {
        merged.extend(pending.into_iter().flatten());
    }
    merged
}
