//! A measured value and its uncertainty.

use core::fmt;

use fv_core::{Decimal, RoundingPolicy, ValidationError};
use tracing::debug;

use crate::engine::{round_error, round_value};
use crate::error::FormatResult;
use crate::exponent::RoundedTriple;
use crate::options::FormatOptions;
use crate::template::{RenderArgs, Template};

/// Central value, non-negative error and the configuration used to round
/// and lay them out.
///
/// Every setter checks its own invariant first; a rejected write leaves the
/// previous value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredValue {
    value: Decimal,
    error: Decimal,
    options: FormatOptions,
}

fn check_error(error: &Decimal) -> Result<(), ValidationError> {
    if error.is_sign_negative() && !error.is_zero() {
        return Err(ValidationError::NegativeError {
            error: error.clone(),
        });
    }
    Ok(())
}

fn log_rejection<T>(
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Result<T, ValidationError> {
    if let Err(err) = &result {
        debug!(field, %err, "rejected field write");
    }
    result
}

impl MeasuredValue {
    /// Default configuration: one significant figure, threshold 3, half-even.
    pub fn new(value: Decimal, error: Decimal) -> Result<Self, ValidationError> {
        Self::with_options(value, error, FormatOptions::default())
    }

    pub fn with_options(
        value: Decimal,
        error: Decimal,
        options: FormatOptions,
    ) -> Result<Self, ValidationError> {
        log_rejection("error", check_error(&error))?;
        Ok(Self {
            value,
            error,
            options,
        })
    }

    /// Convenience for binary floats; each is converted exactly.
    pub fn from_f64(value: f64, error: f64) -> FormatResult<Self> {
        let value = Decimal::try_from(value)?;
        let error = Decimal::try_from(error)?;
        Ok(Self::new(value, error)?)
    }

    pub fn builder(value: Decimal) -> MeasuredValueBuilder {
        MeasuredValueBuilder::new(value)
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }

    pub fn error(&self) -> &Decimal {
        &self.error
    }

    pub fn error_significant_figures(&self) -> u32 {
        self.options.error_significant_figures()
    }

    pub fn leading_zero_threshold(&self) -> u32 {
        self.options.leading_zero_threshold()
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.options.rounding()
    }

    pub fn options(&self) -> FormatOptions {
        self.options
    }

    pub fn set_value(&mut self, value: Decimal) {
        self.value = value;
    }

    pub fn set_error(&mut self, error: Decimal) -> Result<(), ValidationError> {
        log_rejection("error", check_error(&error))?;
        self.error = error;
        Ok(())
    }

    pub fn set_error_significant_figures(&mut self, value: i64) -> Result<(), ValidationError> {
        self.options = log_rejection(
            "error_significant_figures",
            self.options.with_error_significant_figures(value),
        )?;
        Ok(())
    }

    pub fn set_leading_zero_threshold(&mut self, value: i64) -> Result<(), ValidationError> {
        self.options = log_rejection(
            "leading_zero_threshold",
            self.options.with_leading_zero_threshold(value),
        )?;
        Ok(())
    }

    pub fn set_rounding(&mut self, rounding: RoundingPolicy) {
        self.options = self.options.with_rounding(rounding);
    }

    /// Set the policy by name (`half-up`, `ROUND_HALF_UP`, ...).
    pub fn set_rounding_name(&mut self, name: &str) -> Result<(), ValidationError> {
        let rounding = log_rejection("rounding", name.parse::<RoundingPolicy>())?;
        self.set_rounding(rounding);
        Ok(())
    }

    pub fn apply_options(&mut self, options: FormatOptions) {
        self.options = options;
    }

    /// Value and error exactly as supplied.
    pub fn raw_pair(&self) -> (&Decimal, &Decimal) {
        (&self.value, &self.error)
    }

    pub fn rounded_error(&self, multiplier: Option<&Decimal>) -> Decimal {
        round_error(
            &self.error,
            multiplier,
            self.error_significant_figures(),
            self.rounding(),
        )
    }

    pub fn rounded_value(&self, rounded_error: &Decimal, multiplier: Option<&Decimal>) -> Decimal {
        round_value(&self.value, rounded_error, multiplier, self.rounding())
    }

    /// `(value, error)` rounded to the error's significant figures, before
    /// any display shift.
    pub fn rounded_pair(&self, multiplier: Option<&Decimal>) -> (Decimal, Decimal) {
        let error = self.rounded_error(multiplier);
        let value = self.rounded_value(&error, multiplier);
        (value, error)
    }

    /// Rounded pair with the power of ten it is displayed at.
    pub fn rounded_triple(&self, multiplier: Option<&Decimal>) -> RoundedTriple {
        let (value, error) = self.rounded_pair(multiplier);
        RoundedTriple::from_rounded(
            value,
            error,
            self.error_significant_figures(),
            self.leading_zero_threshold(),
        )
    }

    pub fn render(&self, template: &Template, multiplier: Option<&Decimal>, units: &str) -> String {
        let triple = self.rounded_triple(multiplier);
        let value = triple.value.to_string();
        let error = triple.error.to_string();
        let exponent = triple.exponent.to_string();
        template.render(&RenderArgs {
            value: &value,
            error: &error,
            exponent: &exponent,
            units,
        })
    }
}

impl fmt::Display for MeasuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Template::natural(), None, ""))
    }
}

/// Builder for [`MeasuredValue`].
///
/// Nothing is checked until [`build`](Self::build), which validates every
/// field before creating the value.
#[derive(Debug, Clone)]
pub struct MeasuredValueBuilder {
    value: Decimal,
    error: Decimal,
    error_significant_figures: i64,
    leading_zero_threshold: i64,
    rounding: RoundingPolicy,
}

impl MeasuredValueBuilder {
    pub fn new(value: Decimal) -> Self {
        let defaults = FormatOptions::default();
        Self {
            value,
            error: Decimal::zero(),
            error_significant_figures: i64::from(defaults.error_significant_figures()),
            leading_zero_threshold: i64::from(defaults.leading_zero_threshold()),
            rounding: defaults.rounding(),
        }
    }

    pub fn error(mut self, error: Decimal) -> Self {
        self.error = error;
        self
    }

    pub fn error_significant_figures(mut self, value: i64) -> Self {
        self.error_significant_figures = value;
        self
    }

    pub fn leading_zero_threshold(mut self, value: i64) -> Self {
        self.leading_zero_threshold = value;
        self
    }

    pub fn rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Replace all three configuration fields at once.
    pub fn options(mut self, options: FormatOptions) -> Self {
        self.error_significant_figures = i64::from(options.error_significant_figures());
        self.leading_zero_threshold = i64::from(options.leading_zero_threshold());
        self.rounding = options.rounding();
        self
    }

    pub fn build(self) -> Result<MeasuredValue, ValidationError> {
        log_rejection("error", check_error(&self.error))?;
        let options = log_rejection(
            "options",
            FormatOptions::new(
                self.error_significant_figures,
                self.leading_zero_threshold,
                self.rounding,
            ),
        )?;
        MeasuredValue::with_options(self.value, self.error, options)
    }
}
