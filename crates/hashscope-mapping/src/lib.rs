//! Coordinate mappings for unconstrained parameter search.
//!
//! Search procedures such as evolutionary or random-walk optimizers are
//! easiest to run on the whole real line. Model hyperparameters rarely live
//! there: a learning rate must be positive, a decay must stay in `(0, 1)`.
//! A [`Mapping`] sits between the two and turns an unconstrained candidate
//! coordinate into a valid parameter value.
//!
//! # Available Mappings
//!
//! - [`Mapping::Identity`] - no constraint
//! - [`Mapping::Exponential`] - positive reals
//! - [`Mapping::SoftLimit`] - bounded open interval, sigmoid shaped
//! - [`Mapping::LogLimit`] - positive open interval, roughly log-uniform
//!
//! A [`MappingSet`] applies one mapping per coordinate of a candidate vector.
//!
//! # Example
//!
//! ```
//! use hashscope_mapping::{Mapping, MappingSet};
//!
//! let space = MappingSet::new()
//!     .with("learning_rate", Mapping::log_limit(1e-5, 1e-1).unwrap())
//!     .with("decay", Mapping::soft_limit(0.0, 1.0))
//!     .with("l2", Mapping::exponential());
//!
//! let params = space.map(&[0.0, 0.0, 0.0]).unwrap();
//! assert!((params[1] - 0.5).abs() < 1e-12);
//! assert!((params[2] - 1.0).abs() < 1e-12);
//! ```

use thiserror::Error;

mod mapping;
mod set;

pub use mapping::{LogLimit, Mapping, SoftLimit, DEFAULT_SCALE};
pub use set::MappingSet;

/// Errors that can occur when building or applying mappings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// Log limit lower bound is not strictly positive.
    #[error("Lower bound for log limit must be > 0 but was {value}")]
    InvalidLowerBound {
        /// The rejected bound.
        value: f64,
    },

    /// Log limit upper bound is not strictly positive.
    #[error("Upper bound for log limit must be > 0 but was {value}")]
    InvalidUpperBound {
        /// The rejected bound.
        value: f64,
    },

    /// Candidate vector length does not match the number of mappings.
    #[error("Coordinate count mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Number of mappings in the set.
        expected: usize,
        /// Number of coordinates supplied.
        actual: usize,
    },
}
