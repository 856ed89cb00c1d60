//! Calendar encodings
//!
//! All values count 100ns ticks from 0001-01-01T00:00:00 (proleptic Gregorian),
//! except `NaiveDate`, which counts whole days from the same epoch.

use bytes::{Buf, BufMut};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::{ensure_remaining, ValueCodec};
use crate::error::{Result, ShardKeyError};

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_DAY: i64 = 86_400 * TICKS_PER_SECOND;

const NANOS_PER_TICK: i64 = 100;

/// Ticks of 9999-12-31T23:59:59.9999999
const MAX_DATETIME_TICKS: i64 = 3_155_378_975_999_999_999;

/// Day number of 9999-12-31
const MAX_DAY_NUMBER: i32 = 3_652_058;

/// Day 0 of the tick calendar
pub(crate) fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).expect("0001-01-01 is a valid date")
}

pub(crate) fn midnight() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is a valid time")
}

pub(crate) fn epoch_datetime() -> NaiveDateTime {
    NaiveDateTime::new(epoch_date(), midnight())
}

fn invalid(what: &str, value: i64) -> ShardKeyError {
    ShardKeyError::InvalidValue(format!("{} out of range: {}", what, value))
}

// =============================================================================
// Conversions
// =============================================================================

pub(crate) fn date_to_day_number(date: &NaiveDate) -> i32 {
    date.num_days_from_ce() - 1
}

pub(crate) fn day_number_to_date(day: i32) -> Result<NaiveDate> {
    if !(0..=MAX_DAY_NUMBER).contains(&day) {
        return Err(invalid("day number", i64::from(day)));
    }
    day.checked_add(1)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| invalid("day number", i64::from(day)))
}

pub(crate) fn time_to_ticks(time: &NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * TICKS_PER_SECOND
        + i64::from(time.nanosecond()) / NANOS_PER_TICK
}

pub(crate) fn ticks_to_time(ticks: i64) -> Result<NaiveTime> {
    if !(0..TICKS_PER_DAY).contains(&ticks) {
        return Err(invalid("time of day ticks", ticks));
    }
    let secs = (ticks / TICKS_PER_SECOND) as u32;
    let nanos = ((ticks % TICKS_PER_SECOND) * NANOS_PER_TICK) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        .ok_or_else(|| invalid("time of day ticks", ticks))
}

pub(crate) fn datetime_to_ticks(value: &NaiveDateTime) -> Result<i64> {
    let days = i64::from(date_to_day_number(&value.date()));
    let ticks = days
        .checked_mul(TICKS_PER_DAY)
        .and_then(|t| t.checked_add(time_to_ticks(&value.time())))
        .ok_or_else(|| invalid("date time", days))?;
    if !(0..=MAX_DATETIME_TICKS).contains(&ticks) {
        return Err(invalid("date time ticks", ticks));
    }
    Ok(ticks)
}

pub(crate) fn ticks_to_datetime(ticks: i64) -> Result<NaiveDateTime> {
    if !(0..=MAX_DATETIME_TICKS).contains(&ticks) {
        return Err(invalid("date time ticks", ticks));
    }
    let date = day_number_to_date((ticks / TICKS_PER_DAY) as i32)?;
    let time = ticks_to_time(ticks % TICKS_PER_DAY)?;
    Ok(NaiveDateTime::new(date, time))
}

/// Whole seconds and the signed nanosecond remainder
fn split_duration(value: &Duration) -> (i64, i64) {
    let secs = value.num_seconds();
    let sub_nanos = (*value - Duration::seconds(secs))
        .num_nanoseconds()
        .unwrap_or(0);
    (secs, sub_nanos)
}

pub(crate) fn duration_to_ticks(value: &Duration) -> Result<i64> {
    let (secs, sub_nanos) = split_duration(value);
    secs.checked_mul(TICKS_PER_SECOND)
        .and_then(|t| t.checked_add(sub_nanos / NANOS_PER_TICK))
        .ok_or_else(|| invalid("time span seconds", secs))
}

pub(crate) fn ticks_to_duration(ticks: i64) -> Duration {
    Duration::seconds(ticks / TICKS_PER_SECOND)
        + Duration::nanoseconds((ticks % TICKS_PER_SECOND) * NANOS_PER_TICK)
}

// =============================================================================
// Validation
// =============================================================================

fn check_tick_precision(what: &str, nanos: i64) -> Result<()> {
    if nanos % NANOS_PER_TICK != 0 {
        return Err(ShardKeyError::InvalidValue(format!(
            "{} has sub-tick nanoseconds: {}",
            what, nanos
        )));
    }
    Ok(())
}

/// Dates must fall in 0001-01-01..=9999-12-31
pub(crate) fn validate_date(date: &NaiveDate) -> Result<()> {
    let day = date_to_day_number(date);
    if !(0..=MAX_DAY_NUMBER).contains(&day) {
        return Err(invalid("date", i64::from(date.year())));
    }
    Ok(())
}

/// Times must land on a whole tick and cannot be a leap second
pub(crate) fn validate_time(time: &NaiveTime) -> Result<()> {
    let nanos = time.nanosecond();
    if nanos >= 1_000_000_000 {
        return Err(ShardKeyError::InvalidValue(format!(
            "leap second {} cannot be stored",
            time
        )));
    }
    check_tick_precision("time of day", i64::from(nanos))
}

pub(crate) fn validate_datetime(value: &NaiveDateTime) -> Result<()> {
    validate_date(&value.date())?;
    validate_time(&value.time())
}

pub(crate) fn validate_duration(value: &Duration) -> Result<()> {
    let (_, sub_nanos) = split_duration(value);
    check_tick_precision("time span", sub_nanos)?;
    duration_to_ticks(value).map(|_| ())
}

// =============================================================================
// Codecs
// =============================================================================

impl ValueCodec for NaiveDateTime {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        validate_datetime(self)?;
        buf.put_i64_le(datetime_to_ticks(self)?);
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        ensure_remaining(buf, 8, "date time")?;
        ticks_to_datetime(buf.get_i64_le())
    }
}

impl ValueCodec for NaiveDate {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        validate_date(self)?;
        buf.put_i32_le(date_to_day_number(self));
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        ensure_remaining(buf, 4, "date")?;
        day_number_to_date(buf.get_i32_le())
    }
}

impl ValueCodec for NaiveTime {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        validate_time(self)?;
        buf.put_i64_le(time_to_ticks(self));
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        ensure_remaining(buf, 8, "time")?;
        ticks_to_time(buf.get_i64_le())
    }
}

impl ValueCodec for Duration {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        validate_duration(self)?;
        buf.put_i64_le(duration_to_ticks(self)?);
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        ensure_remaining(buf, 8, "time span")?;
        Ok(ticks_to_duration(buf.get_i64_le()))
    }
}
