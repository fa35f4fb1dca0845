//! Arbitrary-precision decimal numbers.
//!
//! A [`Decimal`] is `(-1)^sign * coefficient * 10^exponent` with an unbounded
//! coefficient. Trailing zeros are significant: `10.0` and `10` compare equal
//! but keep different exponents, which is what lets a rounded value carry the
//! precision it was rounded to.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Mul, Neg};
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{FvError, FvResult};
use crate::rounding::RoundingPolicy;

/// Exact decimal number with sign, coefficient and decimal exponent.
#[derive(Clone, Default)]
pub struct Decimal {
    negative: bool,
    coefficient: BigUint,
    exponent: i64,
}

/// Largest decimal exponent magnitude accepted when parsing.
pub const MAX_EXPONENT: i64 = 999_999;

/// `10^n` for `n >= 0`.
pub fn pow10(n: i64) -> BigUint {
    let n = u32::try_from(n.max(0)).unwrap_or(u32::MAX);
    BigUint::from(10u32).pow(n)
}

impl Decimal {
    /// `coefficient * 10^exponent`.
    pub fn new(coefficient: i64, exponent: i64) -> Self {
        Self {
            negative: coefficient < 0,
            coefficient: BigUint::from(coefficient.unsigned_abs()),
            exponent,
        }
    }

    pub fn from_parts(negative: bool, coefficient: BigUint, exponent: i64) -> Self {
        Self {
            negative,
            coefficient,
            exponent,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::new(1, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Sign bit, including the sign of a negative zero.
    pub fn is_sign_negative(&self) -> bool {
        self.negative
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn coefficient(&self) -> &BigUint {
        &self.coefficient
    }

    /// Number of digits in the coefficient. Zero has one digit.
    pub fn digits(&self) -> i64 {
        if self.is_zero() {
            1
        } else {
            self.coefficient.to_str_radix(10).len() as i64
        }
    }

    /// Digits after the decimal point in fixed-point form.
    pub fn fractional_digits(&self) -> u64 {
        if self.exponent < 0 {
            self.exponent.unsigned_abs()
        } else {
            0
        }
    }

    /// Scientific-notation exponent `E` with `10^E <= |self| < 10^(E+1)`.
    ///
    /// `None` for zero, which has no such exponent.
    pub fn adjusted(&self) -> Option<i64> {
        if self.is_zero() {
            None
        } else {
            Some(self.exponent.saturating_add(self.digits() - 1))
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            ..self.clone()
        }
    }

    /// Exact multiplication by `10^n`; only the exponent moves.
    pub fn scale_pow10(&self, n: i64) -> Self {
        Self {
            exponent: self.exponent.saturating_add(n),
            ..self.clone()
        }
    }

    /// Round to the decimal place `10^exponent` using `policy`.
    ///
    /// The result always has exactly `exponent` as its exponent; moving to a
    /// finer place pads the coefficient with zeros.
    pub fn quantize(&self, exponent: i64, policy: RoundingPolicy) -> Self {
        if exponent <= self.exponent {
            let coefficient = &self.coefficient * pow10(self.exponent.saturating_sub(exponent));
            return Self::from_parts(self.negative, coefficient, exponent);
        }

        let shift = exponent.saturating_sub(self.exponent);
        let digits = self.digits();
        // Past the leading digit the quotient is zero and only the remainder's
        // relation to the divisor matters, so a divisor one place above the
        // coefficient decides identically.
        let (quotient, remainder, divisor) = if shift > digits {
            (BigUint::zero(), self.coefficient.clone(), pow10(digits + 1))
        } else {
            let divisor = pow10(shift);
            (
                &self.coefficient / &divisor,
                &self.coefficient % &divisor,
                divisor,
            )
        };

        let mut coefficient = quotient;
        if policy.rounds_away(self.negative, &coefficient, &remainder, &divisor) {
            coefficient += 1u32;
        }
        Self::from_parts(self.negative, coefficient, exponent)
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.adjusted(), other.adjusted()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) if a != b => a.cmp(&b),
            _ => {
                let common = self.exponent.min(other.exponent);
                let lhs = &self.coefficient * pow10(self.exponent.saturating_sub(common));
                let rhs = &other.coefficient * pow10(other.exponent.saturating_sub(common));
                lhs.cmp(&rhs)
            }
        }
    }

    fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.signum().cmp(&other.signum()) {
            Ordering::Equal => {
                let magnitude = self.cmp_magnitude(other);
                if self.signum() < 0 {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
            unequal => unequal,
        }
    }
}

impl Mul<&Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::from_parts(
            self.negative != rhs.negative,
            &self.coefficient * &rhs.coefficient,
            self.exponent.saturating_add(rhs.exponent),
        )
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        &self * &rhs
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            negative: !self.negative,
            ..self
        }
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self::new(v, 0)
    }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Self {
        Self::new(i64::from(v), 0)
    }
}

impl From<u64> for Decimal {
    fn from(v: u64) -> Self {
        Self::from_parts(false, BigUint::from(v), 0)
    }
}

impl From<u32> for Decimal {
    fn from(v: u32) -> Self {
        Self::from_parts(false, BigUint::from(v), 0)
    }
}

impl TryFrom<f64> for Decimal {
    type Error = FvError;

    /// Exact value of the binary float, e.g. `0.1` becomes
    /// `0.1000000000000000055511151231257827021181583404541015625`.
    fn try_from(v: f64) -> FvResult<Self> {
        if !v.is_finite() {
            return Err(FvError::NonFinite {
                what: "decimal",
                value: v,
            });
        }

        let bits = v.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mut mantissa, mut exp2) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };

        if mantissa == 0 {
            return Ok(Self::from_parts(negative, BigUint::zero(), 0));
        }

        while mantissa & 1 == 0 && exp2 < 0 {
            mantissa >>= 1;
            exp2 += 1;
        }

        if exp2 >= 0 {
            let coefficient = BigUint::from(mantissa) << (exp2 as usize);
            Ok(Self::from_parts(negative, coefficient, 0))
        } else {
            // m * 2^-k == m * 5^k * 10^-k
            let k = exp2.unsigned_abs() as u32;
            let coefficient = BigUint::from(mantissa) * BigUint::from(5u32).pow(k);
            Ok(Self::from_parts(negative, coefficient, exp2))
        }
    }
}

impl FromStr for Decimal {
    type Err = FvError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`.
    ///
    /// The resulting exponent must lie within `±MAX_EXPONENT`.
    fn from_str(input: &str) -> FvResult<Self> {
        let invalid = || FvError::InvalidDecimal {
            input: input.to_string(),
        };

        let s = input.trim();
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exp_part) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => (&body[..i], Some(&body[i + 1..])),
            None => (body, None),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        let explicit_exponent = match exp_part {
            Some(raw) => raw.parse::<i64>().map_err(|_| invalid())?,
            None => 0,
        };

        let digits = format!("{int_part}{frac_part}");
        let coefficient = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let exponent = explicit_exponent
            .checked_sub(frac_part.len() as i64)
            .filter(|e| (-MAX_EXPONENT..=MAX_EXPONENT).contains(e))
            .ok_or_else(invalid)?;

        Ok(Self::from_parts(negative, coefficient, exponent))
    }
}

impl fmt::Display for Decimal {
    /// Fixed-point rendering; never switches to scientific notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.coefficient.to_str_radix(10);
        let mut out = String::with_capacity(digits.len() + 4);
        if self.negative {
            out.push('-');
        }

        if self.exponent >= 0 {
            out.push_str(&digits);
            if !self.is_zero() {
                out.extend(core::iter::repeat_n('0', self.exponent as usize));
            }
        } else {
            let frac = self.exponent.unsigned_abs() as usize;
            if digits.len() > frac {
                let (int_part, frac_part) = digits.split_at(digits.len() - frac);
                out.push_str(int_part);
                out.push('.');
                out.push_str(frac_part);
            } else {
                out.push_str("0.");
                out.extend(core::iter::repeat_n('0', frac - digits.len()));
                out.push_str(&digits);
            }
        }

        f.write_str(&out)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Decimal;
    use core::fmt;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Decimal {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    struct DecimalVisitor;

    impl Visitor<'_> for DecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal number or decimal string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Decimal::try_from(v).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Decimal {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
            deserializer.deserialize_any(DecimalVisitor)
        }
    }
}
