//! Feature traces.
//!
//! When a named feature is hashed into a fixed-width vector it touches one or
//! more slots, and distinct names routinely collide in the same slot. A
//! [`FeatureTrace`] records, for every name, the set of slots it touched so
//! that the effect of each name can later be isolated.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Mapping from feature name to the slot indices that feature activates.
///
/// Names and slots are kept in sorted order so that iteration is
/// deterministic. Overlapping slot sets across names are allowed.
///
/// # Example
///
/// ```
/// use hashscope_core::FeatureTrace;
///
/// let mut trace = FeatureTrace::new();
/// trace.record("country=fr", 3);
/// trace.record_all("word=paris", [3, 17]);
///
/// assert_eq!(trace.len(), 2);
/// assert!(trace.slots("word=paris").unwrap().contains(&17));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTrace {
    entries: BTreeMap<String, BTreeSet<usize>>,
}

impl FeatureTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `name` touched `slot`.
    pub fn record(&mut self, name: impl Into<String>, slot: usize) {
        self.entries.entry(name.into()).or_default().insert(slot);
    }

    /// Records that `name` touched every slot in `slots`.
    pub fn record_all(&mut self, name: impl Into<String>, slots: impl IntoIterator<Item = usize>) {
        self.entries.entry(name.into()).or_default().extend(slots);
    }

    /// Returns the slots touched by `name`, if it was recorded.
    pub fn slots(&self, name: &str) -> Option<&BTreeSet<usize>> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` was recorded.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of distinct names.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, slots)` pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<usize>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureTrace {
    type Item = (&'a String, &'a BTreeSet<usize>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for FeatureTrace {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut trace = FeatureTrace::new();
        for (name, slot) in iter {
            trace.record(name, slot);
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_merges_slots() {
        let mut trace = FeatureTrace::new();
        trace.record("a", 4);
        trace.record("a", 1);
        trace.record("a", 4);

        let slots: Vec<usize> = trace.slots("a").unwrap().iter().copied().collect();
        assert_eq!(slots, vec![1, 4]);
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_collisions_are_kept_per_name() {
        let trace: FeatureTrace = vec![("a", 2), ("b", 2), ("b", 5)].into_iter().collect();

        assert!(trace.slots("a").unwrap().contains(&2));
        assert!(trace.slots("b").unwrap().contains(&2));
        assert_eq!(trace.slots("b").unwrap().len(), 2);
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut trace = FeatureTrace::new();
        trace.record("zeta", 0);
        trace.record("alpha", 1);
        trace.record("mid", 2);

        let names: Vec<&str> = trace.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut trace = FeatureTrace::new();
        trace.record_all("x", [1, 2, 3]);

        let json = serde_json::to_string(&trace).unwrap();
        let back: FeatureTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, back);
    }
}
