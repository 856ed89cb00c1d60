//! Grouping Tests
//!
//! Shard grouping and merge over keyed records.
//!
//! ```bash
//! cargo test --test grouping_tests
//! ```

use shardkey::grouping::{foreign_shards, merge, to_shard_values, KeyedRecord};
use shardkey::{ChildKey, RecordKey};

#[derive(Debug, Clone, PartialEq)]
struct Model {
    key: RecordKey<i32>,
    v: String,
}

impl KeyedRecord for Model {
    type Key = RecordKey<i32>;

    fn record_key(&self) -> &RecordKey<i32> {
        &self.key
    }
}

fn model(id: i32, v: &str) -> Model {
    Model {
        key: RecordKey::new(0, id).unwrap(),
        v: v.to_string(),
    }
}

// =============================================================================
// Merge
// =============================================================================

#[test]
fn test_merge_without_append() {
    let master = vec![model(1, "a"), model(2, "b")];
    let replacements = vec![model(2, "B")];
    assert_eq!(
        merge(master, replacements, false),
        vec![model(1, "a"), model(2, "B")]
    );
}

#[test]
fn test_merge_with_append() {
    let master = vec![model(1, "a"), model(2, "b")];
    let replacements = vec![model(2, "B"), model(3, "C")];
    assert_eq!(
        merge(master, replacements, true),
        vec![model(1, "a"), model(2, "B"), model(3, "C")]
    );
}

#[test]
fn test_merge_drops_unmatched_without_append() {
    let merged = merge(vec![model(1, "a")], vec![model(3, "C")], false);
    assert_eq!(merged, vec![model(1, "a")]);
}

#[test]
fn test_merge_first_match_wins() {
    let master = vec![model(1, "a")];
    let replacements = vec![model(1, "first"), model(1, "second")];
    assert_eq!(merge(master.clone(), replacements.clone(), false), vec![model(1, "first")]);
    assert_eq!(
        merge(master, replacements, true),
        vec![model(1, "first"), model(1, "second")]
    );
}

#[test]
fn test_merge_keys_include_shard() {
    let mut other_shard = model(1, "elsewhere");
    other_shard.key = other_shard.key.with_shard_id(9);
    let merged = merge(vec![model(1, "a")], vec![other_shard], false);
    assert_eq!(merged, vec![model(1, "a")]);
}

// =============================================================================
// Shards
// =============================================================================

#[test]
fn test_foreign_shards_excludes_home() {
    let records: Vec<Model> = [(3, 1), (4, 2), (3, 3), (0, 4)]
        .iter()
        .map(|&(shard, id)| Model {
            key: RecordKey::new(shard, id).unwrap(),
            v: String::new(),
        })
        .collect();
    let shards: Vec<i16> = foreign_shards(&records, 0).into_iter().collect();
    assert_eq!(shards, vec![3, 4]);
    assert!(foreign_shards(&Vec::<Model>::new(), 0).is_empty());
}

#[test]
fn test_to_shard_values() {
    let keys = vec![
        ChildKey::new(5, 1i64, 1i64).unwrap(),
        ChildKey::new(-1, 2i64, 2i64).unwrap(),
        ChildKey::new(5, 3i64, 3i64).unwrap(),
    ];
    let groups = to_shard_values(keys);
    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![-1, 5]);
    assert_eq!(
        groups[&5],
        vec![
            ChildKey::new(5, 1i64, 1i64).unwrap(),
            ChildKey::new(5, 3i64, 3i64).unwrap()
        ]
    );
}
