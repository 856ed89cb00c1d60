//! Value Codec Tests
//!
//! Per-type byte rules for single component values.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use shardkey::codec::{decode, decode_dynamic, encode, Decimal, KeyValue, ValueCodec};
use shardkey::{KeyDataType, ShardKeyError};
use uuid::Uuid;

fn round_trip<T: ValueCodec + PartialEq + std::fmt::Debug>(value: T) {
    let bytes = encode(&value).unwrap();
    let (decoded, consumed) = decode::<T>(&bytes, 0).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, bytes.len());
}

// =============================================================================
// Fixed-width
// =============================================================================

#[test]
fn test_integers_are_little_endian() {
    assert_eq!(encode(&0x0102i16).unwrap(), vec![0x02, 0x01]);
    assert_eq!(encode(&-2i32).unwrap(), vec![0xFE, 0xFF, 0xFF, 0xFF]);
    assert_eq!(encode(&1i64).unwrap(), vec![1, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(encode(&0xABu8).unwrap(), vec![0xAB]);
    assert_eq!(encode(&-1i8).unwrap(), vec![0xFF]);
}

#[test]
fn test_floats_use_ieee_bits() {
    assert_eq!(encode(&1.0f32).unwrap(), 1.0f32.to_le_bytes().to_vec());
    assert_eq!(encode(&-0.5f64).unwrap(), (-0.5f64).to_le_bytes().to_vec());
}

#[test]
fn test_short_integer_fails() {
    let err = decode::<i32>(&[1, 2, 3], 0).unwrap_err();
    assert_eq!(err.kind(), "truncated_input");
}

#[test]
fn test_decode_at_position() {
    let bytes = [0xEE, 0xEE, 0x2A, 0x00];
    let (value, consumed) = decode::<i16>(&bytes, 2).unwrap();
    assert_eq!(value, 42);
    assert_eq!(consumed, 2);
    assert!(decode::<i16>(&bytes, 5).is_err());
}

// =============================================================================
// Char
// =============================================================================

#[test]
fn test_char_is_one_utf16_unit() {
    assert_eq!(encode(&'A').unwrap(), vec![0x41, 0x00]);
    assert_eq!(encode(&'€').unwrap(), vec![0xAC, 0x20]);
    round_trip('ß');
}

#[test]
fn test_char_outside_bmp_fails() {
    assert_eq!(encode(&'😀').unwrap_err().kind(), "invalid_value");
}

#[test]
fn test_lone_surrogate_fails() {
    assert!(decode::<char>(&[0x00, 0xD8], 0).is_err());
}

// =============================================================================
// GUID / Decimal degrade to zero
// =============================================================================

#[test]
fn test_guid_uses_mixed_endian_order() {
    let guid = Uuid::parse_str("00112233-4455-6677-8899-aabbccddeeff").unwrap();
    assert_eq!(
        encode(&guid).unwrap(),
        vec![
            0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD,
            0xEE, 0xFF
        ]
    );
    round_trip(guid);
}

#[test]
fn test_short_guid_is_nil() {
    let (guid, consumed) = decode::<Uuid>(&[1, 2, 3], 0).unwrap();
    assert!(guid.is_nil());
    assert_eq!(consumed, 3);
}

#[test]
fn test_decimal_word_order() {
    let value = Decimal::new(-12345, 2).unwrap();
    let bytes = encode(&value).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[0..4], &12345u32.to_le_bytes());
    // flags word third: sign + scale 2
    assert_eq!(&bytes[8..12], &0x8002_0000u32.to_le_bytes());
    round_trip(value);
}

#[test]
fn test_short_decimal_is_zero() {
    let (value, _) = decode::<Decimal>(&[9, 9, 9], 0).unwrap();
    assert!(value.is_zero());
}

#[test]
fn test_decimal_equality_is_numeric() {
    assert_eq!(Decimal::new(150, 2).unwrap(), Decimal::new(15, 1).unwrap());
    assert_eq!(Decimal::new(150, 2).unwrap().to_string(), "1.50");
    assert!(Decimal::new(1, 29).is_err());
}

// =============================================================================
// Calendar
// =============================================================================

#[test]
fn test_date_only_is_day_number() {
    let epoch = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
    assert_eq!(encode(&epoch).unwrap(), vec![0, 0, 0, 0]);
    let next = NaiveDate::from_ymd_opt(1, 1, 2).unwrap();
    assert_eq!(encode(&next).unwrap(), vec![1, 0, 0, 0]);
}

#[test]
fn test_datetime_ticks() {
    let value = NaiveDate::from_ymd_opt(1, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 1)
        .unwrap();
    let ticks = 864_000_000_000i64 + 10_000_000;
    assert_eq!(encode(&value).unwrap(), ticks.to_le_bytes().to_vec());
    round_trip(value);
}

#[test]
fn test_time_and_span() {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    assert_eq!(encode(&noon).unwrap(), (432_000_000_000i64).to_le_bytes().to_vec());
    round_trip(noon);
    round_trip(Duration::milliseconds(-1500));
}

// =============================================================================
// Length-prefixed
// =============================================================================

#[test]
fn test_string_length_byte() {
    assert_eq!(encode(&"ab".to_string()).unwrap(), vec![0x05, b'a', b'b']);
    assert_eq!(encode(&String::new()).unwrap(), vec![0x01]);
}

#[test]
fn test_string_bound() {
    let max = "a".repeat(127);
    let bytes = encode(&max).unwrap();
    assert_eq!(bytes[0], 0xFF);
    round_trip(max);

    let err = encode(&"a".repeat(128)).unwrap_err();
    assert_eq!(err, ShardKeyError::OversizeValue { len: 128, max: 127 });
}

#[test]
fn test_multibyte_string_counts_bytes() {
    // 64 two-byte chars = 128 bytes
    assert!(encode(&"é".repeat(64)).is_err());
    round_trip("é".repeat(63));
}

#[test]
fn test_null_marker_reads_empty() {
    let (value, consumed) = decode::<String>(&[0x00], 0).unwrap();
    assert_eq!(value, "");
    assert_eq!(consumed, 1);
    let (blob, _) = decode::<Vec<u8>>(&[0x00], 0).unwrap();
    assert!(blob.is_empty());
}

#[test]
fn test_even_length_byte_is_malformed() {
    assert_eq!(decode::<String>(&[0x04, b'a', b'b'], 0).unwrap_err().kind(), "invalid_value");
}

#[test]
fn test_blob_same_scheme() {
    assert_eq!(encode(&vec![0u8, 1, 2]).unwrap(), vec![0x07, 0, 1, 2]);
    assert!(encode(&vec![0u8; 128]).is_err());
}

// =============================================================================
// Nullable
// =============================================================================

#[test]
fn test_option_presence_byte() {
    assert_eq!(encode(&Some(5i16)).unwrap(), vec![0x00, 0x05, 0x00]);
    assert_eq!(encode(&None::<i16>).unwrap(), vec![0x01]);
    round_trip(Some("x".to_string()));
    round_trip(None::<i64>);
}

// =============================================================================
// Dynamic dispatch
// =============================================================================

#[test]
fn test_decode_dynamic_matches_static() {
    let bytes = encode(&"hello".to_string()).unwrap();
    let mut buf = bytes.as_slice();
    let value = decode_dynamic(&mut buf, KeyDataType::String).unwrap();
    assert_eq!(value, KeyValue::String("hello".to_string()));
    assert!(buf.is_empty());
}

#[test]
fn test_decode_dynamic_enum_tags() {
    let bytes = encode(&3u8).unwrap();
    let value = decode_dynamic(&mut bytes.as_slice(), KeyDataType::EnumByte).unwrap();
    assert_eq!(value.data_type(), KeyDataType::EnumByte);
}

#[test]
fn test_decode_dynamic_undefined_fails() {
    let err = decode_dynamic(&mut [0u8; 4].as_slice(), KeyDataType::Undefined).unwrap_err();
    assert_eq!(err.kind(), "unsupported_type");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_i64_round_trip(value in any::<i64>()) {
        round_trip(value);
    }

    #[test]
    fn prop_string_round_trip(value in "\\PC{0,30}") {
        prop_assume!(value.len() <= 127);
        round_trip(value);
    }

    #[test]
    fn prop_blob_round_trip(value in proptest::collection::vec(any::<u8>(), 0..=127)) {
        round_trip(value);
    }

    #[test]
    fn prop_decimal_round_trip(mantissa in any::<i64>(), scale in 0u32..=28) {
        round_trip(Decimal::new(i128::from(mantissa), scale).unwrap());
    }

    #[test]
    fn prop_date_round_trip(days in 1i32..3_652_059) {
        round_trip(NaiveDate::from_num_days_from_ce_opt(days).unwrap());
    }
}
