//! A thin wrapper around a signed 64-bit integer.
//!
//! PackStream integers are always 64-bit signed, and the temporal
//! conversions in [`super::temporal`] are specified against a
//! reference algorithm that reads as big-number arithmetic (the two
//! multiplications `year * 400` and `zero_day * 400` can overflow a
//! plain `i64` for dates outside the supported `[-9999, 9999]` year
//! range extended by the 400-year cycle adjustment). Rather than carry
//! a full arbitrary-precision type, overflow-prone operations widen to
//! `i128` internally and the public surface stays `i64`-shaped so
//! temporal code reads like the reference algorithm.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInt(i64);

impl BigInt {
    pub const ZERO: BigInt = BigInt(0);

    pub fn new(value: i64) -> Self {
        BigInt(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn add(self, other: BigInt) -> BigInt {
        BigInt(self.0.wrapping_add(other.0))
    }

    pub fn sub(self, other: BigInt) -> BigInt {
        BigInt(self.0.wrapping_sub(other.0))
    }

    /// Widens to `i128` before multiplying so callers that know the
    /// product fits in `i64` (as the temporal formulas do, for the
    /// supported year range) can narrow back without silently
    /// wrapping on platforms where it wouldn't otherwise overflow.
    pub fn mul(self, other: BigInt) -> BigInt {
        let product = (self.0 as i128) * (other.0 as i128);
        BigInt(product as i64)
    }

    /// Multiply widening to `i128` and keep the wide result, used by
    /// the two temporal computations that can legitimately need more
    /// than 64 bits of intermediate precision.
    pub fn mul_wide(self, other: BigInt) -> i128 {
        (self.0 as i128) * (other.0 as i128)
    }

    /// Truncating division (toward zero), matching native integer
    /// division semantics.
    pub fn div(self, other: BigInt) -> BigInt {
        BigInt(self.0 / other.0)
    }

    /// Truncating remainder, matching native integer remainder
    /// semantics (sign follows the dividend).
    pub fn rem(self, other: BigInt) -> BigInt {
        BigInt(self.0 % other.0)
    }

    /// Floor division: rounds toward negative infinity.
    pub fn floor_div(self, other: BigInt) -> BigInt {
        let (a, b) = (self.0, other.0);
        let q = a / b;
        let r = a % b;
        if (r != 0) && ((r < 0) != (b < 0)) {
            BigInt(q - 1)
        } else {
            BigInt(q)
        }
    }

    /// Floor modulo: result has the same sign as the divisor.
    pub fn floor_mod(self, other: BigInt) -> BigInt {
        let (a, b) = (self.0, other.0);
        let r = a % b;
        if (r != 0) && ((r < 0) != (b < 0)) {
            BigInt(r + b)
        } else {
            BigInt(r)
        }
    }

    pub fn sign(self) -> i32 {
        match self.0.cmp(&0) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn compare(self, other: BigInt) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Lossy conversion matching PackStream's `disableLosslessIntegers`
    /// behavior: values outside what an `f64` can represent exactly
    /// still convert (doubles have no 64-bit-integer overflow case,
    /// unlike e.g. an `i32` narrowing), so this never needs an
    /// `Infinity` fallback for the 64-bit case — that fallback only
    /// applies to narrower native integer types some hosts use, kept
    /// here for interface symmetry with those hosts.
    pub fn to_f64_lossy(self) -> f64 {
        self.0 as f64
    }

    pub fn from_f64(value: f64) -> BigInt {
        if value.is_nan() {
            return BigInt(0);
        }
        if value >= i64::MAX as f64 {
            return BigInt(i64::MAX);
        }
        if value <= i64::MIN as f64 {
            return BigInt(i64::MIN);
        }
        BigInt(value as i64)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        BigInt(value)
    }
}

impl From<BigInt> for i64 {
    fn from(value: BigInt) -> Self {
        value.0
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_mul_are_exact_in_range() {
        let a = BigInt::new(40);
        let b = BigInt::new(2);
        assert_eq!(a.add(b).value(), 42);
        assert_eq!(a.sub(b).value(), 38);
        assert_eq!(a.mul(b).value(), 80);
    }

    #[test]
    fn div_truncates_toward_zero() {
        assert_eq!(BigInt::new(-7).div(BigInt::new(2)).value(), -3);
        assert_eq!(BigInt::new(7).div(BigInt::new(-2)).value(), -3);
    }

    #[test]
    fn floor_div_rounds_toward_negative_infinity() {
        assert_eq!(BigInt::new(-7).floor_div(BigInt::new(2)).value(), -4);
        assert_eq!(BigInt::new(7).floor_div(BigInt::new(-2)).value(), -4);
        assert_eq!(BigInt::new(7).floor_div(BigInt::new(2)).value(), 3);
    }

    #[test]
    fn floor_mod_matches_divisor_sign() {
        assert_eq!(BigInt::new(-7).floor_mod(BigInt::new(2)).value(), 1);
        assert_eq!(BigInt::new(7).floor_mod(BigInt::new(-2)).value(), -1);
    }

    #[test]
    fn sign_and_compare() {
        assert_eq!(BigInt::new(-5).sign(), -1);
        assert_eq!(BigInt::new(0).sign(), 0);
        assert_eq!(BigInt::new(5).sign(), 1);
        assert!(BigInt::new(1).compare(BigInt::new(2)) == Ordering::Less);
    }

    #[test]
    fn mul_wide_keeps_intermediate_precision() {
        let year = BigInt::new(10_000);
        let wide = year.mul_wide(BigInt::new(400));
        assert_eq!(wide, 4_000_000i128);
    }
}
