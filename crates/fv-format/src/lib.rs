//! fv-format: render a measurement and its uncertainty as text.
//!
//! Provides:
//! - `MeasuredValue` (validated value/error record with rounding configuration)
//! - engine (significant-figure rounding of the error, value matched to it)
//! - exponent (leading-zero heuristic choosing plain or scientific layout)
//! - template (positional patterns and renderer functions)
//! - options (`FormatOptions`, loadable from YAML or JSON)
//!
//! # Example
//!
//! ```
//! use fv_format::{Decimal, MeasuredValue, Template};
//!
//! let mv = MeasuredValue::new("100".parse().unwrap(), "10".parse().unwrap()).unwrap();
//! assert_eq!(mv.to_string(), "(10 ± 1) x 10");
//!
//! let mv = MeasuredValue::new("10".parse().unwrap(), "0.1".parse().unwrap()).unwrap();
//! let hundredth: Decimal = "0.01".parse().unwrap();
//! let out = mv.render(&Template::siunitx(), Some(&hundredth), r"\meter");
//! assert_eq!(out, r"\SI{0.100 \pm 0.001 e0}{\meter}");
//! ```

pub mod engine;
pub mod error;
pub mod exponent;
pub mod measured;
pub mod options;
pub mod template;

// Re-exports for ergonomics
pub use error::{FormatError, FormatResult};
pub use exponent::RoundedTriple;
pub use fv_core::{Decimal, FvError, RoundingPolicy, ValidationError};
pub use measured::{MeasuredValue, MeasuredValueBuilder};
pub use options::FormatOptions;
pub use template::{Pattern, RenderArgs, Slot, Template};
