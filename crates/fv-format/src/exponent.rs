//! Choice between plain-decimal and scientific display.
//!
//! A rounded pair is shown as `(value ± error) x 10^exponent`. The shift moves
//! the decimal point by a whole power of ten so the digits themselves never
//! change; only how many of them sit before the point.

use fv_core::Decimal;
use tracing::debug;

/// Rounded value, rounded error and the power of ten they are displayed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedTriple {
    pub value: Decimal,
    pub error: Decimal,
    pub exponent: i64,
}

impl RoundedTriple {
    /// Apply the display shift to an already rounded pair.
    pub fn from_rounded(
        value: Decimal,
        error: Decimal,
        significant_figures: u32,
        leading_zero_threshold: u32,
    ) -> Self {
        let shift = display_shift(&value, &error, significant_figures, leading_zero_threshold);
        Self {
            value: value.scale_pow10(shift),
            error: error.scale_pow10(shift),
            exponent: -shift,
        }
    }
}

/// Magnitude of a negative scientific exponent, `0` for `|x| >= 1`.
///
/// A zero uses the place it was rounded to, so `0.00000` measures like
/// `0.00001`.
pub fn zero_measure(x: &Decimal) -> i64 {
    let exponent = x.adjusted().unwrap_or_else(|| x.exponent());
    exponent.saturating_neg().max(0)
}

/// Power of ten to multiply the pair by before display.
pub fn display_shift(
    value: &Decimal,
    error: &Decimal,
    significant_figures: u32,
    leading_zero_threshold: u32,
) -> i64 {
    let base = if error.is_zero() {
        zero_measure(value)
    } else {
        zero_measure(value).min(zero_measure(error))
    };

    let mut shift = if base > i64::from(leading_zero_threshold) {
        base
    } else {
        0
    };

    if let Some(magnitude) = error.adjusted() {
        let sig = i64::from(significant_figures);
        if magnitude >= sig {
            shift -= magnitude - sig + 1;
        }
    }

    debug!(base, shift, leading_zero_threshold, "selected display shift");
    shift
}
