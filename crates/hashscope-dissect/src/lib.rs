//! Reverse engineering of feature-hashed models.
//!
//! Given a trained model over a hashed feature vector and a trace of which
//! slots each named feature touched, this crate estimates the effect of every
//! original feature name and reports the most important ones.
//!
//! # Overview
//!
//! - [`ModelDissector`] - scores each named feature in isolation and keeps the
//!   resulting attribution vectors
//! - [`Weight`] - one summary record: name, importance and most affected output
//! - [`DissectorConfig`] - capacity and summary size settings
//!
//! # Example
//!
//! ```
//! use hashscope_core::{FeatureTrace, LinearClassifier, SparseVector};
//! use hashscope_dissect::ModelDissector;
//!
//! let mut model = LinearClassifier::zeros(2, 1024);
//! model.set_weight(1, 7, 4.0).unwrap();
//!
//! let trace: FeatureTrace = vec![("user=42", 7), ("user=99", 11)].into_iter().collect();
//!
//! let mut features = SparseVector::new(1024);
//! let mut dissector = ModelDissector::new();
//! dissector.update(&mut features, &trace, &model).unwrap();
//!
//! let best = &dissector.summary(1)[0];
//! assert_eq!(best.feature(), "user=42");
//! assert_eq!(best.max_impact(), Some(1));
//! ```

pub mod config;
pub mod dissector;
pub mod weight;

pub use config::{DissectorConfig, DissectorConfigBuilder};
pub use dissector::ModelDissector;
pub use weight::Weight;
