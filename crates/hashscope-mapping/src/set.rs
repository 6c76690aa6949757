//! Per-coordinate mappings for a search vector.

use serde::{Deserialize, Serialize};

use crate::{Mapping, MappingError};

/// An ordered list of named mappings, one per search coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSet {
    coordinates: Vec<(String, Mapping)>,
}

impl MappingSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a coordinate, builder style.
    pub fn with(mut self, name: impl Into<String>, mapping: Mapping) -> Self {
        self.push(name, mapping);
        self
    }

    /// Appends a coordinate.
    pub fn push(&mut self, name: impl Into<String>, mapping: Mapping) {
        self.coordinates.push((name.into(), mapping));
    }

    /// Returns the mapping registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Mapping> {
        self.coordinates
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    /// Returns the coordinate names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.coordinates.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns `true` if there are no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Maps a raw candidate into parameter space.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::LengthMismatch`] if `raw` does not have one
    /// value per coordinate.
    pub fn map(&self, raw: &[f64]) -> Result<Vec<f64>, MappingError> {
        if raw.len() != self.coordinates.len() {
            return Err(MappingError::LengthMismatch {
                expected: self.coordinates.len(),
                actual: raw.len(),
            });
        }
        Ok(self
            .coordinates
            .iter()
            .zip(raw)
            .map(|((_, mapping), v)| mapping.apply(*v))
            .collect())
    }
}
