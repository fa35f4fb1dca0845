//! fv-core: exact decimal foundation for fvalue.
//!
//! Contains:
//! - decimal (arbitrary-precision `Decimal` with quantize-with-policy)
//! - rounding (the closed set of decimal tie-breaking policies)
//! - error (shared error types, including field validation errors)

pub mod decimal;
pub mod error;
pub mod rounding;

pub use decimal::{Decimal, MAX_EXPONENT, pow10};
pub use error::{FvError, FvResult, ValidationError};
pub use rounding::RoundingPolicy;
