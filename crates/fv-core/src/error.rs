use thiserror::Error;

use crate::Decimal;

pub type FvResult<T> = Result<T, FvError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FvError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid decimal literal: {input:?}")]
    InvalidDecimal { input: String },
}

/// Rejected field writes on a measured value.
///
/// Every variant corresponds to one field invariant. A setter that returns
/// one of these has left the field untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("The error on a value should be non-negative, not {error}")]
    NegativeError { error: Decimal },

    #[error("The significant figures in the error should be integral, not {raw}")]
    SignificantFiguresNotInteger { raw: String },

    #[error("The significant figures in the error should be positive, not {value}")]
    SignificantFiguresNotPositive { value: i64 },

    #[error("The significant figures in the error should be at most {max}, not {value}")]
    SignificantFiguresTooLarge { value: i64, max: u32 },

    #[error("The leading zero threshold should be integral, not {raw}")]
    ThresholdNotInteger { raw: String },

    #[error("The leading zero threshold should be non-negative, not {value}")]
    ThresholdNegative { value: i64 },

    #[error("The leading zero threshold should be at most {max}, not {value}")]
    ThresholdTooLarge { value: i64, max: u32 },

    #[error("Unsupported rounding option {name:?}")]
    UnknownRoundingPolicy { name: String },
}
