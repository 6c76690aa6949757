//! Attribution of hashed model scores back to named features.
//!
//! A model trained on hashed features only knows about slots, and many names
//! share a slot. [`ModelDissector`] recovers an approximate per-name effect by
//! switching on the slots of one name at a time and recording the raw scores
//! the model produces for that isolated input.
//!
//! # Example
//!
//! ```
//! use hashscope_core::{DenseVector, FeatureTrace, LinearClassifier};
//! use hashscope_dissect::ModelDissector;
//!
//! let mut model = LinearClassifier::zeros(1, 8);
//! model.set_weight(0, 3, 2.0).unwrap();
//! model.set_weight(0, 5, -0.5).unwrap();
//!
//! let mut trace = FeatureTrace::new();
//! trace.record("word=big", 3);
//! trace.record_all("word=small", [3, 5]);
//!
//! let mut features = DenseVector::zeros(8);
//! let mut dissector = ModelDissector::new();
//! dissector.update(&mut features, &trace, &model).unwrap();
//!
//! let top = dissector.summary(1);
//! assert_eq!(top[0].feature(), "word=big");
//! ```

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use hashscope_core::{l1_norm, CoreError, FeatureTrace, FeatureVector, Result, VectorClassifier};

use crate::config::DissectorConfig;
use crate::weight::Weight;

/// Accumulates per-feature attribution vectors for a hashed model.
///
/// Each feature name is scored at most once over the lifetime of the
/// dissector; later updates that mention a known name leave it untouched.
///
/// # Thread Safety
///
/// `update` takes `&mut self` and a mutable borrow of the shared feature
/// vector, so concurrent updates need external synchronization.
#[derive(Debug, Clone)]
pub struct ModelDissector {
    config: DissectorConfig,
    weight_map: HashMap<String, Vec<f64>>,
}

impl Default for ModelDissector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelDissector {
    /// Creates a dissector with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DissectorConfig::default())
    }

    /// Creates a dissector with the given configuration.
    pub fn with_config(config: DissectorConfig) -> Self {
        let weight_map = HashMap::with_capacity(config.capacity_hint());
        Self { config, weight_map }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &DissectorConfig {
        &self.config
    }

    /// Scores every feature of `trace` that has not been seen before.
    ///
    /// `features` is cleared on entry. For each new name its slots are set to
    /// one, the classifier's raw scores are recorded under the name, and the
    /// slots are reset to zero. The vector is all zero again when this
    /// returns, whether or not an error occurred.
    ///
    /// # Returns
    ///
    /// The number of names that were newly dissected.
    ///
    /// # Errors
    ///
    /// Propagates classifier errors and [`CoreError::IndexOutOfBounds`] for
    /// slots outside of `features`. Returns [`CoreError::DimensionMismatch`]
    /// if the classifier produces a score vector whose length differs from
    /// its `num_outputs`. The failing name gets no entry, and names dissected
    /// earlier in the same call keep theirs.
    pub fn update<C>(
        &mut self,
        features: &mut dyn FeatureVector,
        trace: &FeatureTrace,
        classifier: &C,
    ) -> Result<usize>
    where
        C: VectorClassifier + ?Sized,
    {
        features.clear();

        let outputs = classifier.num_outputs();
        let mut added = 0;
        for (feature, slots) in trace {
            if self.weight_map.contains_key(feature) {
                continue;
            }

            let scores = {
                let active = ActiveSlots::activate(&mut *features, slots);
                active
                    .and_then(|active| classifier.classify_no_link(active.features()))
                    .and_then(|scores| check_outputs(scores, outputs))
            };
            let scores = match scores {
                Ok(scores) => scores,
                Err(err) => {
                    tracing::warn!(feature = %feature, error = %err, "Failed to dissect feature");
                    return Err(err);
                }
            };

            tracing::trace!(
                feature = %feature,
                slots = slots.len(),
                outputs = scores.len(),
                "Dissected feature"
            );
            self.weight_map.insert(feature.clone(), scores);
            added += 1;
        }

        tracing::debug!(
            traced = trace.len(),
            added,
            known = self.weight_map.len(),
            "Dissector update finished"
        );
        Ok(added)
    }

    /// Returns the `n` most important features, most important first.
    ///
    /// Importance is the L1 norm of the attribution vector. Equal importances
    /// are ordered by feature name, descending. Every feature ever dissected
    /// is considered; if fewer than `n` are known, all of them are returned.
    pub fn summary(&self, n: usize) -> Vec<Weight> {
        if n == 0 {
            return Vec::new();
        }

        let mut heap = BinaryHeap::with_capacity(n.min(self.weight_map.len()) + 1);
        for (feature, weights) in &self.weight_map {
            heap.push(Reverse(Ranked {
                value: l1_norm(weights),
                feature,
                weights,
            }));
            if heap.len() > n {
                heap.pop();
            }
        }

        let mut ranked = heap.into_vec();
        ranked.sort();
        let summary: Vec<Weight> = ranked
            .into_iter()
            .map(|Reverse(r)| Weight::new(r.feature, r.weights.to_vec()))
            .collect();

        tracing::debug!(requested = n, returned = summary.len(), "Built dissector summary");
        summary
    }

    /// Returns `summary` of the configured default size.
    pub fn top_features(&self) -> Vec<Weight> {
        self.summary(self.config.default_summary_size())
    }

    /// Returns the attribution vector recorded for `feature`.
    pub fn attribution(&self, feature: &str) -> Option<&[f64]> {
        self.weight_map.get(feature).map(Vec::as_slice)
    }

    /// Returns the summary record for `feature`.
    pub fn weight(&self, feature: &str) -> Option<Weight> {
        self.weight_map
            .get(feature)
            .map(|weights| Weight::new(feature, weights.clone()))
    }

    /// Returns `true` if `feature` has been dissected.
    #[inline]
    pub fn contains(&self, feature: &str) -> bool {
        self.weight_map.contains_key(feature)
    }

    /// Returns the number of dissected features.
    #[inline]
    pub fn len(&self) -> usize {
        self.weight_map.len()
    }

    /// Returns `true` if nothing has been dissected yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weight_map.is_empty()
    }
}

fn check_outputs(scores: Vec<f64>, expected: usize) -> Result<Vec<f64>> {
    if scores.len() != expected {
        return Err(CoreError::DimensionMismatch {
            expected,
            actual: scores.len(),
        });
    }
    Ok(scores)
}

/// Borrowed heap entry for `summary`, ordered like [`Weight`].
struct Ranked<'a> {
    value: f64,
    feature: &'a str,
    weights: &'a [f64],
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.feature.cmp(other.feature))
    }
}

/// Slots switched on for one feature; switched back off on drop.
struct ActiveSlots<'a> {
    features: &'a mut dyn FeatureVector,
    touched: Vec<usize>,
}

impl<'a> ActiveSlots<'a> {
    fn activate(features: &'a mut dyn FeatureVector, slots: &BTreeSet<usize>) -> Result<Self> {
        let mut active = Self {
            features,
            touched: Vec::with_capacity(slots.len()),
        };
        for &slot in slots {
            active.features.set(slot, 1.0)?;
            active.touched.push(slot);
        }
        Ok(active)
    }

    fn features(&self) -> &dyn FeatureVector {
        &*self.features
    }
}

impl Drop for ActiveSlots<'_> {
    fn drop(&mut self) {
        for &slot in &self.touched {
            // Only slots that were written successfully are recorded.
            let _ = self.features.set(slot, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashscope_core::{DenseVector, SparseVector};
    use std::cell::Cell;

    /// Returns a fixed score vector per active slot pattern and counts calls.
    struct SlotEcho {
        outputs: usize,
        calls: Cell<usize>,
    }

    impl SlotEcho {
        fn new(outputs: usize) -> Self {
            Self {
                outputs,
                calls: Cell::new(0),
            }
        }
    }

    impl VectorClassifier for SlotEcho {
        fn num_outputs(&self) -> usize {
            self.outputs
        }

        fn classify_no_link(&self, features: &dyn FeatureVector) -> Result<Vec<f64>> {
            self.calls.set(self.calls.get() + 1);
            let active: f64 = features
                .nonzero_entries()
                .iter()
                .map(|(i, v)| (*i as f64 + 1.0) * v)
                .sum();
            Ok(vec![active; self.outputs])
        }
    }

    #[test]
    fn test_update_isolates_each_feature() {
        let mut trace = FeatureTrace::new();
        trace.record_all("a", [0, 2]);
        trace.record_all("b", [2]);

        let model = SlotEcho::new(1);
        let mut x = DenseVector::zeros(4);
        let mut dissector = ModelDissector::new();

        assert_eq!(dissector.update(&mut x, &trace, &model).unwrap(), 2);
        assert_eq!(dissector.attribution("a"), Some(&[4.0][..]));
        assert_eq!(dissector.attribution("b"), Some(&[3.0][..]));
        assert!(x.is_zero());
    }

    #[test]
    fn test_update_clears_caller_vector() {
        let mut x = SparseVector::new(8);
        x.set(7, 9.0).unwrap();

        let mut trace = FeatureTrace::new();
        trace.record("a", 1);

        let model = SlotEcho::new(1);
        let mut dissector = ModelDissector::new();
        dissector.update(&mut x, &trace, &model).unwrap();

        // Slot 7 must not leak into the isolated score.
        assert_eq!(dissector.attribution("a"), Some(&[2.0][..]));
        assert!(x.is_zero());
    }

    #[test]
    fn test_update_is_memoized() {
        let mut trace = FeatureTrace::new();
        trace.record("a", 0);
        trace.record("b", 1);

        let model = SlotEcho::new(2);
        let mut x = DenseVector::zeros(2);
        let mut dissector = ModelDissector::new();

        dissector.update(&mut x, &trace, &model).unwrap();
        assert_eq!(model.calls.get(), 2);

        assert_eq!(dissector.update(&mut x, &trace, &model).unwrap(), 0);
        assert_eq!(model.calls.get(), 2);
        assert_eq!(dissector.len(), 2);
    }

    #[test]
    fn test_out_of_range_slot_restores_vector() {
        let mut trace = FeatureTrace::new();
        trace.record_all("wide", [1, 3, 10]);

        let model = SlotEcho::new(1);
        let mut x = DenseVector::zeros(4);
        let mut dissector = ModelDissector::new();

        let err = dissector.update(&mut x, &trace, &model).unwrap_err();
        assert!(matches!(err, CoreError::IndexOutOfBounds { index: 10, dim: 4 }));
        assert!(x.is_zero());
        assert!(!dissector.contains("wide"));
        assert_eq!(model.calls.get(), 0);
    }

    /// Declares more outputs than it returns.
    struct ShortScores;

    impl VectorClassifier for ShortScores {
        fn num_outputs(&self) -> usize {
            3
        }

        fn classify_no_link(&self, _features: &dyn FeatureVector) -> Result<Vec<f64>> {
            Ok(vec![1.0])
        }
    }

    #[test]
    fn test_update_rejects_wrong_output_count() {
        let mut trace = FeatureTrace::new();
        trace.record_all("a", [0, 1]);

        let mut x = DenseVector::zeros(2);
        let mut dissector = ModelDissector::new();

        let err = dissector.update(&mut x, &trace, &ShortScores).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DimensionMismatch {
                expected: 3,
                actual: 1
            }
        ));
        assert!(x.is_zero());
        assert!(dissector.is_empty());
    }

    #[test]
    fn test_summary_matches_weight_records() {
        let mut dissector = ModelDissector::new();
        dissector.weight_map.insert("p".to_string(), vec![-4.0, 1.0]);
        dissector.weight_map.insert("q".to_string(), vec![2.0, 2.5]);
        dissector.weight_map.insert("r".to_string(), vec![0.5, -0.25]);

        let top = dissector.summary(2);
        assert_eq!(top.len(), 2);
        for w in &top {
            let expected = dissector.weight(w.feature()).unwrap();
            assert_eq!(w.weight(), expected.weight());
            assert_eq!(w.max_impact(), expected.max_impact());
            assert_eq!(w.weights(), expected.weights());
        }
        assert_eq!(top[0].feature(), "p");
        assert_eq!(top[1].feature(), "q");
    }

    #[test]
    fn test_summary_orders_ties_by_descending_name() {
        let mut dissector = ModelDissector::new();
        for (name, score) in [("A", 3.0), ("B", 5.0), ("C", 5.0), ("D", 1.0)] {
            dissector.weight_map.insert(name.to_string(), vec![score]);
        }

        let names: Vec<String> = dissector
            .summary(2)
            .iter()
            .map(|w| w.feature().to_string())
            .collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn test_summary_zero_and_saturation() {
        let mut dissector = ModelDissector::new();
        for (name, score) in [("x", -2.0), ("y", 0.5), ("z", 1.0)] {
            dissector.weight_map.insert(name.to_string(), vec![score]);
        }

        assert!(dissector.summary(0).is_empty());

        let all = dissector.summary(10);
        let names: Vec<&str> = all.iter().map(|w| w.feature()).collect();
        assert_eq!(names, vec!["x", "z", "y"]);
    }

    #[test]
    fn test_top_features_uses_config() {
        let config = DissectorConfig::builder()
            .default_summary_size(1)
            .build()
            .unwrap();
        let mut dissector = ModelDissector::with_config(config);
        dissector.weight_map.insert("p".to_string(), vec![1.0]);
        dissector.weight_map.insert("q".to_string(), vec![2.0]);

        let top = dissector.top_features();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].feature(), "q");
    }

    #[test]
    fn test_weight_lookup() {
        let mut dissector = ModelDissector::new();
        dissector
            .weight_map
            .insert("f".to_string(), vec![-10.0, 2.0, 3.0]);

        let w = dissector.weight("f").unwrap();
        assert_eq!(w.max_impact(), Some(2));
        assert!(dissector.weight("missing").is_none());
    }
}
