//! Reductions over raw classifier score vectors.

/// Sum of absolute values.
#[inline]
pub fn l1_norm(scores: &[f64]) -> f64 {
    scores.iter().map(|v| v.abs()).sum()
}

/// Index of the largest value, not the largest magnitude.
///
/// Ties resolve to the first index. NaN entries are ignored. Returns `None`
/// when there is no comparable entry.
///
/// # Examples
///
/// ```
/// use hashscope_core::score::max_value_index;
///
/// assert_eq!(max_value_index(&[-10.0, 2.0, 3.0]), Some(2));
/// assert_eq!(max_value_index(&[]), None);
/// ```
pub fn max_value_index(scores: &[f64]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (index, &value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((index, value)),
        })
        .map(|(index, _)| index)
}
