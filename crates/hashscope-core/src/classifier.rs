//! Classifier abstraction over hashed feature vectors.
//!
//! The dissector never trains anything: it only needs a model that turns a
//! feature vector into raw scores. [`VectorClassifier`] is that seam.
//! [`LinearClassifier`] is a plain `W x + b` model used by tests and demos.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::vector::FeatureVector;

/// A trained model scoring fixed-width feature vectors.
///
/// Implementations must be deterministic for a fixed input, otherwise
/// attributions computed from them carry no meaning.
pub trait VectorClassifier {
    /// Returns the number of scores produced per input.
    ///
    /// [`classify_no_link`](Self::classify_no_link) must return exactly this
    /// many values; the dissector rejects score vectors of any other length.
    fn num_outputs(&self) -> usize;

    /// Scores `features` without applying the output link function.
    ///
    /// For a logistic or softmax model these are the logits.
    ///
    /// # Errors
    ///
    /// Implementations report failures as [`CoreError`], typically
    /// [`CoreError::ScoringFailed`] or [`CoreError::DimensionMismatch`].
    fn classify_no_link(&self, features: &dyn FeatureVector) -> Result<Vec<f64>>;
}

/// Linear model with one weight row per output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearClassifier")]
pub struct LinearClassifier {
    dim: usize,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

#[derive(Deserialize)]
struct RawLinearClassifier {
    dim: usize,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl TryFrom<RawLinearClassifier> for LinearClassifier {
    type Error = CoreError;

    fn try_from(raw: RawLinearClassifier) -> Result<Self> {
        if raw.bias.len() != raw.weights.len() {
            return Err(CoreError::DimensionMismatch {
                expected: raw.weights.len(),
                actual: raw.bias.len(),
            });
        }
        if let Some(row) = raw.weights.iter().find(|row| row.len() != raw.dim) {
            return Err(CoreError::DimensionMismatch {
                expected: raw.dim,
                actual: row.len(),
            });
        }
        Ok(Self {
            dim: raw.dim,
            weights: raw.weights,
            bias: raw.bias,
        })
    }
}

impl LinearClassifier {
    /// Creates a model from explicit weight rows and biases.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the rows have different
    /// lengths or if `bias` does not have one entry per row.
    pub fn new(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> Result<Self> {
        if bias.len() != weights.len() {
            return Err(CoreError::DimensionMismatch {
                expected: weights.len(),
                actual: bias.len(),
            });
        }
        let dim = weights.first().map(Vec::len).unwrap_or(0);
        if let Some(row) = weights.iter().find(|row| row.len() != dim) {
            return Err(CoreError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            });
        }
        Ok(Self { dim, weights, bias })
    }

    /// Creates an all-zero model.
    pub fn zeros(num_outputs: usize, dim: usize) -> Self {
        Self {
            dim,
            weights: vec![vec![0.0; dim]; num_outputs],
            bias: vec![0.0; num_outputs],
        }
    }

    /// Returns the input dimensionality.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Sets one coefficient.
    pub fn set_weight(&mut self, output: usize, index: usize, value: f64) -> Result<()> {
        let outputs = self.weights.len();
        let row = self
            .weights
            .get_mut(output)
            .ok_or(CoreError::IndexOutOfBounds {
                index: output,
                dim: outputs,
            })?;
        let slot = row.get_mut(index).ok_or(CoreError::IndexOutOfBounds {
            index,
            dim: self.dim,
        })?;
        *slot = value;
        Ok(())
    }

    /// Returns the weight row for `output`.
    pub fn row(&self, output: usize) -> Option<&[f64]> {
        self.weights.get(output).map(Vec::as_slice)
    }

    /// Scores `features` and applies the logistic link to every output.
    pub fn classify(&self, features: &dyn FeatureVector) -> Result<Vec<f64>> {
        Ok(self
            .classify_no_link(features)?
            .into_iter()
            .map(|z| 1.0 / (1.0 + (-z).exp()))
            .collect())
    }
}

impl VectorClassifier for LinearClassifier {
    fn num_outputs(&self) -> usize {
        self.weights.len()
    }

    fn classify_no_link(&self, features: &dyn FeatureVector) -> Result<Vec<f64>> {
        if features.dim() != self.dim {
            return Err(CoreError::DimensionMismatch {
                expected: self.dim,
                actual: features.dim(),
            });
        }
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| features.dot(row).map(|score| score + b))
            .collect()
    }
}
