//! Legacy Layout Tests
//!
//! Origin-prefixed keys without metadata, accepted only on request.

use shardkey::legacy::ensure_origin;
use shardkey::{ChildKey, CompoundKey, Config, LegacyFormat, RecordKey, ShardKeyError};

#[test]
fn test_legacy_layout() {
    let key = RecordKey::new(258, 7i32).unwrap();
    assert_eq!(
        key.to_legacy_bytes(b'A').unwrap(),
        vec![b'A', 0x02, 0x01, 0x07, 0x00, 0x00, 0x00]
    );
}

#[test]
fn test_rejected_by_default() {
    let legacy = RecordKey::new(1, 7i32).unwrap().to_legacy_bytes(b'A').unwrap();
    assert_eq!(
        RecordKey::<i32>::from_bytes(&legacy).unwrap_err(),
        ShardKeyError::InvalidControlByte(b'A')
    );
}

#[test]
fn test_accepted_any_origin() {
    let key = ChildKey::new(-4, "abc".to_string(), 9i64).unwrap();
    let legacy = key.to_legacy_bytes(b'z').unwrap();
    let config = Config::builder().accept_legacy().build();
    assert_eq!(ChildKey::from_bytes_with(&legacy, &config).unwrap(), key);
}

#[test]
fn test_origin_guard() {
    let legacy = RecordKey::new(1, 7i32).unwrap().to_legacy_bytes(b'B').unwrap();
    let config = Config::builder()
        .legacy_format(LegacyFormat::Accept {
            expected_origin: Some(b'A'),
        })
        .build();
    assert_eq!(
        RecordKey::<i32>::from_bytes_with(&legacy, &config).unwrap_err(),
        ShardKeyError::InvalidOrigin {
            expected: 'A',
            found: 'B'
        }
    );
    assert!(ensure_origin(b'B', b'B').is_ok());
}

#[test]
fn test_canonical_still_decodes_with_legacy_enabled() {
    let key = RecordKey::new(1, 7i32).unwrap();
    let config = Config::builder().accept_legacy().build();
    assert_eq!(
        RecordKey::from_bytes_with(&key.to_bytes().unwrap(), &config).unwrap(),
        key
    );
}

#[test]
fn test_invalid_origin_on_encode() {
    let key = RecordKey::new(1, 7i32).unwrap();
    assert!(key.to_legacy_bytes(b'3').is_err());
}
