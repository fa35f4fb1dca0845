//! Significant-figure rounding of the error and precision-matched rounding of
//! the value.
//!
//! The error decides the decimal place; the value follows it. Both steps use
//! the same [`RoundingPolicy`], and both scale by the same optional multiplier
//! first. `None` means "no scaling"; `Some(0)` scales to zero. The error only
//! takes the multiplier's magnitude, so a negative multiplier flips the value
//! and leaves the error non-negative.

use fv_core::{Decimal, RoundingPolicy};
use tracing::trace;

fn scaled(x: &Decimal, multiplier: Option<&Decimal>) -> Decimal {
    match multiplier {
        Some(m) => x * m,
        None => x.clone(),
    }
}

/// Decimal exponent at which `x` keeps exactly `significant_figures` digits.
///
/// Zero keeps the requested digits as trailing zeros. When the policy carries
/// `x` up to the next power of ten at the first candidate place (`0.96` to
/// `1.0` at one figure), the place moves up by one.
pub fn significant_exponent(x: &Decimal, significant_figures: u32, policy: RoundingPolicy) -> i64 {
    let sig = i64::from(significant_figures);
    let Some(adjusted) = x.adjusted() else {
        return 1 - sig;
    };

    let candidate = adjusted.saturating_sub(sig) + 1;
    let rounded = x.quantize(candidate, policy);
    if rounded.digits() > sig {
        trace!(%x, candidate, %policy, "rounding carried past a power of ten");
        candidate + 1
    } else {
        candidate
    }
}

/// Round the (optionally scaled) error to `significant_figures` digits.
///
/// The result is never negative, whatever the multiplier's sign.
pub fn round_error(
    error: &Decimal,
    multiplier: Option<&Decimal>,
    significant_figures: u32,
    policy: RoundingPolicy,
) -> Decimal {
    let error = scaled(error, multiplier).abs();
    let exponent = significant_exponent(&error, significant_figures, policy);
    trace!(%error, exponent, significant_figures, "rounding error");
    error.quantize(exponent, policy)
}

/// Round the (optionally scaled) value to the decimal place of `rounded_error`.
///
/// A zero error carries no precision to match, so the value comes back scaled
/// but unrounded.
pub fn round_value(
    value: &Decimal,
    rounded_error: &Decimal,
    multiplier: Option<&Decimal>,
    policy: RoundingPolicy,
) -> Decimal {
    let value = scaled(value, multiplier);
    if rounded_error.is_zero() {
        return value;
    }
    value.quantize(rounded_error.exponent(), policy)
}
