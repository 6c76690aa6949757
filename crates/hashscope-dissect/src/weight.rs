//! Summary records produced by the dissector.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use hashscope_core::{l1_norm, max_value_index};

/// Importance of one named feature.
///
/// The natural order is importance ascending, then feature name ascending.
/// Summaries are presented in the reverse of this order. Equality follows
/// the same order, so the attribution vector itself is not compared.
///
/// Only `feature` and `weights` are read back when deserializing; the
/// importance and max impact are always derived from the vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawWeight")]
pub struct Weight {
    feature: String,
    value: f64,
    max_impact: Option<usize>,
    weights: Vec<f64>,
}

#[derive(Deserialize)]
struct RawWeight {
    feature: String,
    weights: Vec<f64>,
}

impl From<RawWeight> for Weight {
    fn from(raw: RawWeight) -> Self {
        Weight::new(raw.feature, raw.weights)
    }
}

impl Weight {
    /// Builds a record from a feature's attribution vector.
    pub fn new(feature: impl Into<String>, weights: Vec<f64>) -> Self {
        Self {
            feature: feature.into(),
            value: l1_norm(&weights),
            max_impact: max_value_index(&weights),
            weights,
        }
    }

    /// Returns the feature name.
    #[inline]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Returns the importance, the L1 norm of the attribution vector.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.value
    }

    /// Returns the output index with the largest raw score.
    ///
    /// This is an argmax over values: a large negative score never wins.
    #[inline]
    pub fn max_impact(&self) -> Option<usize> {
        self.max_impact
    }

    /// Returns the attribution vector.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.feature.cmp(&other.feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_and_max_impact() {
        let w = Weight::new("x", vec![-10.0, 2.0, 3.0]);
        assert_eq!(w.feature(), "x");
        assert!((w.weight() - 15.0).abs() < 1e-12);
        assert_eq!(w.max_impact(), Some(2));
        assert_eq!(w.weights(), &[-10.0, 2.0, 3.0]);
    }

    #[test]
    fn test_order_by_value_then_name() {
        let a = Weight::new("a", vec![1.0]);
        let b = Weight::new("b", vec![1.0]);
        let c = Weight::new("c", vec![-0.5]);

        assert!(a < b);
        assert!(c < a);
        assert_eq!(a, Weight::new("a", vec![-1.0]));
    }

    #[test]
    fn test_deserialize_recomputes_derived_fields() {
        let json = r#"{"feature":"f","value":99.0,"max_impact":0,"weights":[-10.0,2.0,3.0]}"#;
        let w: Weight = serde_json::from_str(json).unwrap();
        assert!((w.weight() - 15.0).abs() < 1e-12);
        assert_eq!(w.max_impact(), Some(2));

        let back: Weight = serde_json::from_str(&serde_json::to_string(&w).unwrap()).unwrap();
        assert_eq!(back.weights(), w.weights());
        assert_eq!(back.max_impact(), w.max_impact());
    }
}
