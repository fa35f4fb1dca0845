//! Rounding configuration.
//!
//! [`FormatOptions`] groups the three knobs that control how a measurement is
//! rounded and laid out. It can be built in code or loaded from a YAML or JSON
//! document:
//!
//! ```yaml
//! error_significant_figures: 2
//! leading_zero_threshold: 3
//! rounding: half-up
//! ```
//!
//! Missing keys take their defaults. Counts must be written as integers; `2.0`
//! is rejected the same way `"two"` is.

use std::path::Path;

use fv_core::{RoundingPolicy, ValidationError};
use serde::{Deserialize, Serialize};

use crate::error::FormatResult;

pub const DEFAULT_ERROR_SIGNIFICANT_FIGURES: u32 = 1;
pub const DEFAULT_LEADING_ZERO_THRESHOLD: u32 = 3;

/// Rendering pads the error to this many digits at most.
pub const MAX_ERROR_SIGNIFICANT_FIGURES: u32 = 1000;
pub const MAX_LEADING_ZERO_THRESHOLD: u32 = u32::MAX;

/// Validated rounding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFormatOptions")]
pub struct FormatOptions {
    error_significant_figures: u32,
    leading_zero_threshold: u32,
    rounding: RoundingPolicy,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            error_significant_figures: DEFAULT_ERROR_SIGNIFICANT_FIGURES,
            leading_zero_threshold: DEFAULT_LEADING_ZERO_THRESHOLD,
            rounding: RoundingPolicy::default(),
        }
    }
}

impl FormatOptions {
    pub fn new(
        error_significant_figures: i64,
        leading_zero_threshold: i64,
        rounding: RoundingPolicy,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            error_significant_figures: check_significant_figures(error_significant_figures)?,
            leading_zero_threshold: check_threshold(leading_zero_threshold)?,
            rounding,
        })
    }

    pub fn error_significant_figures(&self) -> u32 {
        self.error_significant_figures
    }

    pub fn leading_zero_threshold(&self) -> u32 {
        self.leading_zero_threshold
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    pub fn with_error_significant_figures(self, value: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            error_significant_figures: check_significant_figures(value)?,
            ..self
        })
    }

    pub fn with_leading_zero_threshold(self, value: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            leading_zero_threshold: check_threshold(value)?,
            ..self
        })
    }

    pub fn with_rounding(self, rounding: RoundingPolicy) -> Self {
        Self { rounding, ..self }
    }

    pub fn from_yaml_str(content: &str) -> FormatResult<Self> {
        let raw: RawFormatOptions = serde_yaml::from_str(content)?;
        Ok(raw.validate()?)
    }

    pub fn from_json_str(content: &str) -> FormatResult<Self> {
        let raw: RawFormatOptions = serde_json::from_str(content)?;
        Ok(raw.validate()?)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> FormatResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn to_yaml_string(&self) -> FormatResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> FormatResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_significant_figures(value: i64) -> Result<u32, ValidationError> {
    if value < 1 {
        return Err(ValidationError::SignificantFiguresNotPositive { value });
    }
    u32::try_from(value)
        .ok()
        .filter(|&sig| sig <= MAX_ERROR_SIGNIFICANT_FIGURES)
        .ok_or(ValidationError::SignificantFiguresTooLarge {
            value,
            max: MAX_ERROR_SIGNIFICANT_FIGURES,
        })
}

fn check_threshold(value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::ThresholdNegative { value });
    }
    u32::try_from(value).map_err(|_| ValidationError::ThresholdTooLarge {
        value,
        max: MAX_LEADING_ZERO_THRESHOLD,
    })
}

/// A count as written in a configuration document, before the integer check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawCount {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawCount {
    fn integer(self) -> Result<i64, String> {
        match self {
            RawCount::Integer(n) => Ok(n),
            RawCount::Float(x) => Err(format!("{x:?}")),
            RawCount::Text(s) => Err(format!("{s:?}")),
        }
    }
}

fn default_significant_figures() -> RawCount {
    RawCount::Integer(i64::from(DEFAULT_ERROR_SIGNIFICANT_FIGURES))
}

fn default_threshold() -> RawCount {
    RawCount::Integer(i64::from(DEFAULT_LEADING_ZERO_THRESHOLD))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawFormatOptions {
    #[serde(default = "default_significant_figures")]
    error_significant_figures: RawCount,
    #[serde(default = "default_threshold")]
    leading_zero_threshold: RawCount,
    #[serde(default)]
    rounding: Option<String>,
}

impl RawFormatOptions {
    fn validate(self) -> Result<FormatOptions, ValidationError> {
        let significant_figures = self
            .error_significant_figures
            .integer()
            .map_err(|raw| ValidationError::SignificantFiguresNotInteger { raw })?;
        let threshold = self
            .leading_zero_threshold
            .integer()
            .map_err(|raw| ValidationError::ThresholdNotInteger { raw })?;
        let rounding = match self.rounding {
            Some(name) => name.parse::<RoundingPolicy>()?,
            None => RoundingPolicy::default(),
        };
        FormatOptions::new(significant_figures, threshold, rounding)
    }
}

impl TryFrom<RawFormatOptions> for FormatOptions {
    type Error = ValidationError;

    fn try_from(raw: RawFormatOptions) -> Result<Self, Self::Error> {
        raw.validate()
    }
}
