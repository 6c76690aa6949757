//! Core traits and types for hashscope.
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace:
//!
//! - **Feature vectors**: the [`FeatureVector`] trait with dense and sparse layouts.
//! - **Feature traces**: [`FeatureTrace`], the record of which hashed slots each
//!   named feature touched.
//! - **Classifiers**: the [`VectorClassifier`] seam through which trained models
//!   are scored, and a [`LinearClassifier`] reference model.
//! - **Error types**: [`CoreError`] and the [`Result`] alias.
//!
//! # Example
//!
//! ```
//! use hashscope_core::{DenseVector, FeatureTrace, FeatureVector, LinearClassifier, VectorClassifier};
//!
//! let mut model = LinearClassifier::zeros(1, 4);
//! model.set_weight(0, 2, 1.5).unwrap();
//!
//! let mut trace = FeatureTrace::new();
//! trace.record("word=rust", 2);
//!
//! let mut x = DenseVector::zeros(4);
//! x.set(2, 1.0).unwrap();
//! assert_eq!(model.classify_no_link(&x).unwrap(), vec![1.5]);
//! ```

pub mod classifier;
pub mod error;
pub mod score;
pub mod trace;
pub mod vector;

pub use classifier::{LinearClassifier, VectorClassifier};
pub use error::{CoreError, Result};
pub use score::{l1_norm, max_value_index};
pub use trace::FeatureTrace;
pub use vector::{DenseVector, FeatureVector, SparseVector};
