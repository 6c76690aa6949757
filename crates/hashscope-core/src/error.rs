//! Error types for the hashscope core library.
//!
//! This module defines the error type shared by the feature vector, trace and
//! classifier abstractions, and by the dissector built on top of them.

use thiserror::Error;

/// The main error type for hashscope-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Error when a vector or matrix dimension does not match what was expected.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The expected dimension.
        expected: usize,
        /// The actual dimension that was provided.
        actual: usize,
    },

    /// Error when a slot index falls outside of a feature vector.
    #[error("Index {index} out of bounds for vector of dimension {dim}")]
    IndexOutOfBounds {
        /// The offending slot index.
        index: usize,
        /// The dimension of the vector.
        dim: usize,
    },

    /// Error raised by a classifier while producing scores.
    #[error("Classifier scoring failed: {message}")]
    ScoringFailed {
        /// A description of the scoring failure.
        message: String,
    },

    /// Error during configuration validation.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// A description of the configuration error.
        message: String,
    },
}

/// A specialized Result type for hashscope-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
