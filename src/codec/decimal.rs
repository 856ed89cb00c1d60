//! 128-bit fixed-point decimal
//!
//! A 96-bit unsigned mantissa, a power-of-ten scale (0..=28) and a sign,
//! laid out as four 32-bit words: `lo`, `mid`, `hi` and `flags`.
//!
//! ```text
//! flags:  bit 31      sign (1 = negative)
//!         bits 16-23  scale
//!         all others  zero
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::{Buf, BufMut};

use super::ValueCodec;
use crate::error::{Result, ShardKeyError};

/// Largest supported scale
pub const MAX_SCALE: u32 = 28;

const SIGN_MASK: u32 = 0x8000_0000;
const SCALE_MASK: u32 = 0x00FF_0000;
const SCALE_SHIFT: u32 = 16;
const MANTISSA_LIMIT: u128 = 1 << 96;
const WIRE_LEN: usize = 16;

#[derive(Clone, Copy, Default)]
pub struct Decimal {
    lo: u32,
    mid: u32,
    hi: u32,
    flags: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        lo: 0,
        mid: 0,
        hi: 0,
        flags: 0,
    };

    /// Build from a signed mantissa and a scale, i.e. `mantissa / 10^scale`
    pub fn new(mantissa: i128, scale: u32) -> Result<Self> {
        if scale > MAX_SCALE {
            return Err(ShardKeyError::InvalidValue(format!(
                "decimal scale {} exceeds {}",
                scale, MAX_SCALE
            )));
        }
        let magnitude = mantissa.unsigned_abs();
        if magnitude >= MANTISSA_LIMIT {
            return Err(ShardKeyError::InvalidValue(
                "decimal mantissa exceeds 96 bits".to_string(),
            ));
        }
        let mut flags = scale << SCALE_SHIFT;
        if mantissa < 0 {
            flags |= SIGN_MASK;
        }
        Ok(Decimal {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: (magnitude >> 64) as u32,
            flags,
        })
    }

    /// Build from the raw words, validating the flags word
    pub fn from_words(lo: u32, mid: u32, hi: u32, flags: u32) -> Result<Self> {
        let scale = (flags & SCALE_MASK) >> SCALE_SHIFT;
        if flags & !(SIGN_MASK | SCALE_MASK) != 0 || scale > MAX_SCALE {
            return Err(ShardKeyError::InvalidValue(format!(
                "invalid decimal flags 0x{:08x}",
                flags
            )));
        }
        Ok(Decimal { lo, mid, hi, flags })
    }

    /// Raw words as `[lo, mid, hi, flags]`
    pub fn words(&self) -> [u32; 4] {
        [self.lo, self.mid, self.hi, self.flags]
    }

    pub fn scale(&self) -> u32 {
        (self.flags & SCALE_MASK) >> SCALE_SHIFT
    }

    pub fn is_sign_negative(&self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude() == 0
    }

    /// Signed mantissa
    pub fn mantissa(&self) -> i128 {
        let magnitude = self.magnitude() as i128;
        if self.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    fn magnitude(&self) -> u128 {
        (u128::from(self.hi) << 64) | (u128::from(self.mid) << 32) | u128::from(self.lo)
    }

    /// (negative, magnitude, scale) with trailing zeros stripped; zero is unsigned
    fn normalized(&self) -> (bool, u128, u32) {
        let mut magnitude = self.magnitude();
        let mut scale = self.scale();
        if magnitude == 0 {
            return (false, 0, 0);
        }
        while scale > 0 && magnitude % 10 == 0 {
            magnitude /= 10;
            scale -= 1;
        }
        (self.is_sign_negative(), magnitude, scale)
    }
}

fn cmp_magnitudes(a: u128, a_scale: u32, b: u128, b_scale: u32) -> Ordering {
    // Raise the smaller-scale operand; overflow means it is the larger one.
    if a_scale <= b_scale {
        match 10u128
            .checked_pow(b_scale - a_scale)
            .and_then(|factor| a.checked_mul(factor))
        {
            Some(scaled) => scaled.cmp(&b),
            None => Ordering::Greater,
        }
    } else {
        cmp_magnitudes(b, b_scale, a, a_scale).reverse()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_neg, a, a_scale) = self.normalized();
        let (b_neg, b, b_scale) = other.normalized();
        match (a_neg, b_neg) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_magnitudes(a, a_scale, b, b_scale),
            (true, true) => cmp_magnitudes(b, b_scale, a, a_scale),
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        let magnitude = value.unsigned_abs();
        Decimal {
            lo: magnitude as u32,
            mid: (magnitude >> 32) as u32,
            hi: 0,
            flags: if value < 0 { SIGN_MASK } else { 0 },
        }
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Decimal::from(i64::from(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.magnitude().to_string();
        let scale = self.scale() as usize;
        if self.is_sign_negative() && !self.is_zero() {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", int_part, frac_part)
        } else {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

/// Wire order: lo, mid, flags, hi
impl ValueCodec for Decimal {
    fn encode_value(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.put_u32_le(self.lo);
        buf.put_u32_le(self.mid);
        buf.put_u32_le(self.flags);
        buf.put_u32_le(self.hi);
        Ok(())
    }

    fn decode_value(buf: &mut &[u8]) -> Result<Self> {
        if buf.remaining() < WIRE_LEN {
            tracing::debug!(
                remaining = buf.remaining(),
                "short decimal payload, decoding as zero"
            );
            buf.advance(buf.remaining());
            return Ok(Decimal::ZERO);
        }
        let lo = buf.get_u32_le();
        let mid = buf.get_u32_le();
        let flags = buf.get_u32_le();
        let hi = buf.get_u32_le();
        Decimal::from_words(lo, mid, hi, flags)
    }
}
