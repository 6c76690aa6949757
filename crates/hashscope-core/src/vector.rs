//! Fixed-width feature vectors.
//!
//! A hashed model sees its input as a vector of fixed dimension where each
//! named feature has been folded into one or more slots. This module provides
//! the [`FeatureVector`] trait and two storage layouts:
//!
//! - [`DenseVector`]: one `f64` per slot, suited to small hash spaces.
//! - [`SparseVector`]: only non-zero slots are stored, suited to wide hash
//!   spaces where a handful of slots are active at a time.
//!
//! # Example
//!
//! ```
//! use hashscope_core::vector::{DenseVector, FeatureVector, SparseVector};
//!
//! let mut dense = DenseVector::zeros(4);
//! dense.set(1, 2.0).unwrap();
//! assert_eq!(dense.get(1).unwrap(), 2.0);
//!
//! let mut sparse = SparseVector::new(1 << 20);
//! sparse.set(77, 1.0).unwrap();
//! assert_eq!(sparse.nonzero_entries(), vec![(77, 1.0)]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A mutable numeric vector of fixed dimensionality.
///
/// The trait is object safe so that classifiers and the dissector can work
/// against `&dyn FeatureVector` regardless of the storage layout.
pub trait FeatureVector {
    /// Returns the dimensionality of the vector.
    fn dim(&self) -> usize;

    /// Returns the value stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `index >= dim()`.
    fn get(&self, index: usize) -> Result<f64>;

    /// Stores `value` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `index >= dim()`.
    fn set(&mut self, index: usize, value: f64) -> Result<()>;

    /// Resets every slot to zero.
    fn clear(&mut self);

    /// Returns the `(index, value)` pairs of all non-zero slots in index order.
    fn nonzero_entries(&self) -> Vec<(usize, f64)>;

    /// Returns `true` if every slot is zero.
    fn is_zero(&self) -> bool {
        self.nonzero_entries().is_empty()
    }

    /// Computes the dot product with a dense weight row.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if `weights.len() != dim()`.
    fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dim() {
            return Err(CoreError::DimensionMismatch {
                expected: self.dim(),
                actual: weights.len(),
            });
        }
        let dim = self.dim();
        self.nonzero_entries()
            .into_iter()
            .map(|(index, value)| {
                weights
                    .get(index)
                    .map(|w| value * w)
                    .ok_or(CoreError::IndexOutOfBounds { index, dim })
            })
            .sum()
    }
}

#[inline]
fn check_bounds(index: usize, dim: usize) -> Result<()> {
    if index >= dim {
        return Err(CoreError::IndexOutOfBounds { index, dim });
    }
    Ok(())
}

/// A feature vector that stores every slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseVector {
    values: Vec<f64>,
}

impl DenseVector {
    /// Creates an all-zero vector of dimension `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self {
            values: vec![0.0; dim],
        }
    }

    /// Wraps existing values.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Returns the stored values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl FeatureVector for DenseVector {
    fn dim(&self) -> usize {
        self.values.len()
    }

    fn get(&self, index: usize) -> Result<f64> {
        check_bounds(index, self.values.len())?;
        Ok(self.values[index])
    }

    fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_bounds(index, self.values.len())?;
        self.values[index] = value;
        Ok(())
    }

    fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    fn nonzero_entries(&self) -> Vec<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .collect()
    }

    fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.values.len() {
            return Err(CoreError::DimensionMismatch {
                expected: self.values.len(),
                actual: weights.len(),
            });
        }
        Ok(self.values.iter().zip(weights).map(|(x, w)| x * w).sum())
    }
}

/// A feature vector that only stores non-zero slots.
///
/// Writing zero to a slot removes it, so the map never holds explicit zeros.
/// Deserialization enforces the same rules as [`FeatureVector::set`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSparseVector")]
pub struct SparseVector {
    dim: usize,
    values: HashMap<usize, f64>,
}

/// Unchecked serialized form of [`SparseVector`].
#[derive(Deserialize)]
struct RawSparseVector {
    dim: usize,
    values: HashMap<usize, f64>,
}

impl TryFrom<RawSparseVector> for SparseVector {
    type Error = CoreError;

    fn try_from(raw: RawSparseVector) -> Result<Self> {
        let mut vector = SparseVector::new(raw.dim);
        for (index, value) in raw.values {
            vector.set(index, value)?;
        }
        Ok(vector)
    }
}

impl SparseVector {
    /// Creates an empty vector of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            values: HashMap::new(),
        }
    }

    /// Returns the number of stored (non-zero) slots.
    #[inline]
    pub fn num_nonzero(&self) -> usize {
        self.values.len()
    }
}

impl FeatureVector for SparseVector {
    fn dim(&self) -> usize {
        self.dim
    }

    fn get(&self, index: usize) -> Result<f64> {
        check_bounds(index, self.dim)?;
        Ok(self.values.get(&index).copied().unwrap_or(0.0))
    }

    fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_bounds(index, self.dim)?;
        if value == 0.0 {
            self.values.remove(&index);
        } else {
            self.values.insert(index, value);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn nonzero_entries(&self) -> Vec<(usize, f64)> {
        let mut entries: Vec<(usize, f64)> = self.values.iter().map(|(i, v)| (*i, *v)).collect();
        entries.sort_unstable_by_key(|(i, _)| *i);
        entries
    }

    fn is_zero(&self) -> bool {
        self.values.is_empty()
    }
}
