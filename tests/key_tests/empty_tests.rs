//! Empty Key Tests

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use shardkey::{ChildKey, CompoundKey, Decimal, GrandchildKey, GreatGrandchildKey, RecordKey};
use uuid::Uuid;

use crate::test_utils::{Status, Tier};

#[test]
fn test_empty_every_arity() {
    assert!(RecordKey::<Uuid>::empty().is_empty());
    assert!(ChildKey::<String, Vec<u8>>::empty().is_empty());
    assert!(GrandchildKey::<NaiveDateTime, NaiveDate, NaiveTime>::empty().is_empty());
    assert!(GreatGrandchildKey::<Duration, Decimal, Status, Tier>::empty().is_empty());
}

#[test]
fn test_empty_defaults() {
    let empty = GreatGrandchildKey::<i32, String, Uuid, f64>::empty();
    assert_eq!(empty.shard_id(), 0);
    assert_eq!(*empty.record_id(), 0);
    assert_eq!(empty.child_id(), "");
    assert!(empty.grandchild_id().is_nil());
    assert_eq!(*empty.great_grandchild_id(), 0.0);
}

#[test]
fn test_empty_is_shared() {
    let a = ChildKey::<i64, i64>::empty();
    let b = ChildKey::<i64, i64>::empty();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn test_empty_distinct_per_type_combination() {
    let a = ChildKey::<i64, i32>::empty();
    let b = ChildKey::<i32, i64>::empty();
    assert_ne!(a.metadata(), b.metadata());
}

#[test]
fn test_any_non_default_field_breaks_empty() {
    assert!(!GrandchildKey::new(1, 0i32, 0i32, 0i32).unwrap().is_empty());
    assert!(!GrandchildKey::new(0, 1i32, 0i32, 0i32).unwrap().is_empty());
    assert!(!GrandchildKey::new(0, 0i32, 1i32, 0i32).unwrap().is_empty());
    assert!(!GrandchildKey::new(0, 0i32, 0i32, 1i32).unwrap().is_empty());
    assert!(GrandchildKey::new(0, 0i32, 0i32, 0i32).unwrap().is_empty());
}

#[test]
fn test_empty_string_and_blob_count_as_default() {
    assert!(ChildKey::new(0, String::new(), Vec::<u8>::new()).unwrap().is_empty());
    assert!(!ChildKey::new(0, " ".to_string(), Vec::<u8>::new()).unwrap().is_empty());
}

#[test]
fn test_empty_round_trips() {
    let empty = RecordKey::<NaiveDateTime>::empty();
    let bytes = empty.to_bytes().unwrap();
    assert!(RecordKey::<NaiveDateTime>::from_bytes(&bytes).unwrap().is_empty());
}

#[test]
fn test_empty_from_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                GrandchildKey::<u8, i8, i16>::empty() as *const GrandchildKey<u8, i8, i16> as usize
            })
        })
        .collect();
    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
}
