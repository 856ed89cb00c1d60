//! Validation Tests
//!
//! Wrong shapes, truncation, bounds and trailing bytes.

use chrono::{Duration, NaiveDate, NaiveTime};
use shardkey::{
    ChildKey, CompoundKey, Config, GrandchildKey, GreatGrandchildKey, KeyComponent, KeyDataType,
    RecordKey, ShardKeyError,
};
use uuid::Uuid;

use crate::test_utils::Status;

// =============================================================================
// Metadata rejection per position
// =============================================================================

#[test]
fn test_mismatch_each_position_arity_four() {
    let source = GreatGrandchildKey::new(1, 1i32, 2i32, 3i32, 4i32).unwrap();
    let bytes = source.to_bytes().unwrap();

    let err = GreatGrandchildKey::<i64, i32, i32, i32>::from_bytes(&bytes).unwrap_err();
    assert_eq!(
        err,
        ShardKeyError::MetadataMismatch {
            component: 1,
            expected: KeyDataType::Int64,
            found: KeyDataType::Int32
        }
    );

    let err = GreatGrandchildKey::<i32, String, i32, i32>::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ShardKeyError::MetadataMismatch { component: 2, expected: KeyDataType::String, .. }
    ));

    let err = GreatGrandchildKey::<i32, i32, Uuid, i32>::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ShardKeyError::MetadataMismatch { component: 3, expected: KeyDataType::Guid, .. }
    ));

    let err = GreatGrandchildKey::<i32, i32, i32, Status>::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ShardKeyError::MetadataMismatch { component: 4, expected: KeyDataType::EnumInt32, .. }
    ));
}

#[test]
fn test_mismatch_each_position_arity_two_and_three() {
    let bytes = ChildKey::new(1, 1u8, 'c').unwrap().to_bytes().unwrap();
    assert!(matches!(
        ChildKey::<i8, char>::from_bytes(&bytes).unwrap_err(),
        ShardKeyError::MetadataMismatch { component: 1, .. }
    ));
    assert!(matches!(
        ChildKey::<u8, i16>::from_bytes(&bytes).unwrap_err(),
        ShardKeyError::MetadataMismatch { component: 2, .. }
    ));

    let bytes = GrandchildKey::new(1, 1u8, 2u8, 3u8).unwrap().to_bytes().unwrap();
    assert!(matches!(
        GrandchildKey::<u8, u8, i8>::from_bytes(&bytes).unwrap_err(),
        ShardKeyError::MetadataMismatch { component: 3, .. }
    ));
}

#[test]
fn test_wrong_arity_rejected() {
    let one = RecordKey::new(1, 5i32).unwrap().to_bytes().unwrap();
    assert!(ChildKey::<i32, i32>::from_bytes(&one).is_err());

    let two = ChildKey::new(1, 5i32, 6i32).unwrap().to_bytes().unwrap();
    assert!(RecordKey::<i32>::from_bytes(&two).is_err());

    let four = GreatGrandchildKey::new(1, 5i32, 6i32, 7i32, 8i32).unwrap().to_bytes().unwrap();
    assert!(GrandchildKey::<i32, i32, i32>::from_bytes(&four).is_err());
}

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn test_truncated_header_never_panics() {
    let bytes = ChildKey::new(7, 42i32, "x".to_string()).unwrap().to_bytes().unwrap();
    for len in 0..=3 {
        let slice = &bytes[..len];
        assert!(ChildKey::<i32, String>::from_bytes(slice).is_err());
        assert!(ChildKey::<i32, String>::try_parse(slice).is_none());
        assert!(ChildKey::<i32, String>::parse_or_empty(slice).is_empty());
    }
}

#[test]
fn test_truncated_component_fails() {
    let bytes = ChildKey::new(7, 42i32, "xyz".to_string()).unwrap().to_bytes().unwrap();
    for len in 4..bytes.len() {
        let err = ChildKey::<i32, String>::from_bytes(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), "truncated_input", "len {}", len);
    }
}

#[test]
fn test_truncated_guid_degrades_to_nil() {
    let key = RecordKey::new(3, Uuid::from_u128(u128::MAX)).unwrap();
    let bytes = key.to_bytes().unwrap();
    // header is 4 bytes; keep 5 of the 16 GUID bytes
    let decoded = RecordKey::<Uuid>::from_bytes(&bytes[..9]).unwrap();
    assert_eq!(decoded.shard_id(), 3);
    assert!(decoded.record_id().is_nil());
}

#[test]
fn test_truncated_decimal_degrades_to_zero() {
    let key = RecordKey::new(3, shardkey::Decimal::from(99i64)).unwrap();
    let bytes = key.to_bytes().unwrap();
    let decoded = RecordKey::<shardkey::Decimal>::from_bytes(&bytes[..10]).unwrap();
    assert!(decoded.record_id().is_zero());
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn test_string_127_ok_128_oversize() {
    assert!(RecordKey::new(0, "a".repeat(127)).is_ok());
    assert_eq!(
        RecordKey::new(0, "a".repeat(128)).unwrap_err(),
        ShardKeyError::OversizeValue { len: 128, max: 127 }
    );
    assert_eq!(
        ChildKey::new(0, 1u8, vec![0u8; 128]).unwrap_err().kind(),
        "oversize_value"
    );
}

#[test]
fn test_char_outside_bmp_rejected() {
    assert!(RecordKey::new(0, '😀').is_err());
}

#[test]
fn test_sub_tick_temporal_values_rejected() {
    let time = NaiveTime::from_hms_nano_opt(1, 2, 3, 123_456_789).unwrap();
    assert_eq!(RecordKey::new(1, time).unwrap_err().kind(), "invalid_value");

    // 50ns is non-empty but would encode as the empty span
    assert!(!Duration::nanoseconds(50).is_zero());
    assert_eq!(
        RecordKey::new(0, Duration::nanoseconds(50)).unwrap_err().kind(),
        "invalid_value"
    );

    let when = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_nano_opt(0, 0, 0, 7)
        .unwrap();
    assert!(ChildKey::new(0, 1i32, when).is_err());
}

#[test]
fn test_dates_outside_calendar_rejected() {
    let before = NaiveDate::from_ymd_opt(0, 6, 1).unwrap();
    assert_eq!(RecordKey::new(1, before).unwrap_err().kind(), "invalid_value");

    let after = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
    assert!(RecordKey::new(1, after).is_err());
    assert!(RecordKey::new(1, after.and_hms_opt(0, 0, 0).unwrap()).is_err());
    assert!(RecordKey::new(1, before.and_hms_opt(12, 0, 0).unwrap()).is_err());
}

#[test]
fn test_out_of_range_day_number_rejected_on_read() {
    let mut bytes = RecordKey::new(1, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())
        .unwrap()
        .to_bytes()
        .unwrap();
    bytes[4..].copy_from_slice(&(-214i32).to_le_bytes());
    assert!(RecordKey::<NaiveDate>::from_bytes(&bytes).is_err());
}

// =============================================================================
// Framing
// =============================================================================

#[test]
fn test_reserved_control_bits_rejected() {
    let mut bytes = RecordKey::new(1, 1i32).unwrap().to_bytes().unwrap();
    bytes[0] |= 0x04;
    assert!(matches!(
        RecordKey::<i32>::from_bytes(&bytes).unwrap_err(),
        ShardKeyError::InvalidControlByte(_)
    ));
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = RecordKey::new(1, 1i32).unwrap().to_bytes().unwrap();
    bytes.extend_from_slice(&[0, 0]);
    assert_eq!(
        RecordKey::<i32>::from_bytes(&bytes).unwrap_err(),
        ShardKeyError::TrailingBytes(2)
    );
    let lenient = Config::builder().allow_trailing_bytes(true).build();
    assert_eq!(
        RecordKey::<i32>::from_bytes_with(&bytes, &lenient).unwrap(),
        RecordKey::new(1, 1i32).unwrap()
    );
}

#[test]
fn test_corrupt_external_string_fails() {
    let text = RecordKey::new(1, 1i32).unwrap().to_external_string().unwrap();
    let tampered = format!("A{}", &text[1..]);
    if tampered != text {
        assert!(RecordKey::<i32>::from_external_string(&tampered).is_err());
    }
}

#[test]
fn test_utf8_and_raw_share_decoder() {
    let key = ChildKey::new(-2, 0x80u8, 0xFFu8).unwrap();
    let raw = key.to_bytes().unwrap();
    let utf8 = key.to_utf8().unwrap();
    assert_ne!(raw, utf8);
    assert_eq!(utf8[0], raw[0] & 0x7F);
    assert_eq!(ChildKey::from_bytes(&utf8).unwrap(), key);
}
