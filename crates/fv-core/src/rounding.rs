//! Decimal tie-breaking policies.
//!
//! Each policy decides, for a magnitude that has been truncated to the target
//! decimal place, whether one unit in the last retained place must be added
//! back. The decision sees the truncated quotient, the discarded remainder and
//! the divisor the remainder is measured against.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::ValidationError;

/// Closed set of decimal rounding modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingPolicy {
    /// Round to nearest, ties to the even neighbour.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "half-even", alias = "ROUND_HALF_EVEN"))]
    HalfEven,
    /// Round to nearest, ties away from zero.
    #[cfg_attr(feature = "serde", serde(rename = "half-up", alias = "ROUND_HALF_UP"))]
    HalfUp,
    /// Round to nearest, ties toward zero.
    #[cfg_attr(feature = "serde", serde(rename = "half-down", alias = "ROUND_HALF_DOWN"))]
    HalfDown,
    /// Away from zero.
    #[cfg_attr(feature = "serde", serde(rename = "up", alias = "ROUND_UP"))]
    Up,
    /// Toward zero (truncation).
    #[cfg_attr(feature = "serde", serde(rename = "down", alias = "ROUND_DOWN"))]
    Down,
    /// Toward positive infinity.
    #[cfg_attr(feature = "serde", serde(rename = "ceiling", alias = "ROUND_CEILING"))]
    Ceiling,
    /// Toward negative infinity.
    #[cfg_attr(feature = "serde", serde(rename = "floor", alias = "ROUND_FLOOR"))]
    Floor,
    /// Away from zero only if the truncated last digit is 0 or 5, otherwise
    /// toward zero.
    #[cfg_attr(feature = "serde", serde(rename = "05up", alias = "ROUND_05UP"))]
    ZeroFiveUp,
}

impl RoundingPolicy {
    pub const ALL: [RoundingPolicy; 8] = [
        RoundingPolicy::HalfEven,
        RoundingPolicy::HalfUp,
        RoundingPolicy::HalfDown,
        RoundingPolicy::Up,
        RoundingPolicy::Down,
        RoundingPolicy::Ceiling,
        RoundingPolicy::Floor,
        RoundingPolicy::ZeroFiveUp,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            RoundingPolicy::HalfEven => "half-even",
            RoundingPolicy::HalfUp => "half-up",
            RoundingPolicy::HalfDown => "half-down",
            RoundingPolicy::Up => "up",
            RoundingPolicy::Down => "down",
            RoundingPolicy::Ceiling => "ceiling",
            RoundingPolicy::Floor => "floor",
            RoundingPolicy::ZeroFiveUp => "05up",
        }
    }

    /// Whether the truncated magnitude `quotient` must be bumped by one unit.
    ///
    /// `remainder` is the discarded part, `0 <= remainder < divisor`.
    /// `negative` is the sign of the number being rounded; only the
    /// directional policies look at it.
    pub fn rounds_away(
        self,
        negative: bool,
        quotient: &BigUint,
        remainder: &BigUint,
        divisor: &BigUint,
    ) -> bool {
        if remainder.is_zero() {
            return false;
        }
        let twice = remainder * 2u32;
        match self {
            RoundingPolicy::HalfEven => match twice.cmp(divisor) {
                core::cmp::Ordering::Greater => true,
                core::cmp::Ordering::Less => false,
                core::cmp::Ordering::Equal => last_digit(quotient) % 2 == 1,
            },
            RoundingPolicy::HalfUp => twice >= *divisor,
            RoundingPolicy::HalfDown => twice > *divisor,
            RoundingPolicy::Up => true,
            RoundingPolicy::Down => false,
            RoundingPolicy::Ceiling => !negative,
            RoundingPolicy::Floor => negative,
            RoundingPolicy::ZeroFiveUp => matches!(last_digit(quotient), 0 | 5),
        }
    }
}

fn last_digit(n: &BigUint) -> u32 {
    (n % 10u32).to_u32().unwrap_or(0)
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingPolicy {
    type Err = ValidationError;

    /// Accepts `half-even`, `half_even` and `ROUND_HALF_EVEN` spellings,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase().replace('_', "-");
        let key = lowered.strip_prefix("round-").unwrap_or(&lowered);
        RoundingPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == key)
            .ok_or_else(|| ValidationError::UnknownRoundingPolicy {
                name: s.to_string(),
            })
    }
}
