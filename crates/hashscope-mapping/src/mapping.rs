//! Scalar coordinate transforms.
//!
//! Each [`Mapping`] is a monotone function from the whole real line onto a
//! range that is meaningful for one parameter: positive reals, a bounded open
//! interval, or a bounded interval sampled roughly geometrically.

use serde::{Deserialize, Serialize};

use crate::MappingError;

/// Logistic squashing onto the open interval `(min, max)`.
///
/// `0` maps to the midpoint. A large `scale` pushes more of the line towards
/// the bounds; a small one keeps values in the interior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftLimit {
    min: f64,
    max: f64,
    scale: f64,
}

impl SoftLimit {
    /// Creates a soft limit over `(min, max)`.
    pub fn new(min: f64, max: f64, scale: f64) -> Self {
        Self { min, max, scale }
    }

    /// Returns the greatest lower bound of the output.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the least upper bound of the output.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the sharpness of the transition.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps `v` into `(min, max)`.
    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        self.min + (self.max - self.min) / (1.0 + (-v * self.scale).exp())
    }
}

/// Soft limit in log space, exponentiated.
///
/// Output lies in `(low, high)` with `0` mapping to the geometric mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogLimit {
    wrapped: SoftLimit,
}

impl LogLimit {
    /// Creates a log limit over `(low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidLowerBound`] or
    /// [`MappingError::InvalidUpperBound`] if a bound is not strictly positive.
    pub fn new(low: f64, high: f64) -> Result<Self, MappingError> {
        if low.is_nan() || low <= 0.0 {
            return Err(MappingError::InvalidLowerBound { value: low });
        }
        if high.is_nan() || high <= 0.0 {
            return Err(MappingError::InvalidUpperBound { value: high });
        }
        Ok(Self {
            wrapped: SoftLimit::new(low.ln(), high.ln(), DEFAULT_SCALE),
        })
    }

    /// Returns the greatest lower bound of the output.
    #[inline]
    pub fn low(&self) -> f64 {
        self.wrapped.min.exp()
    }

    /// Returns the least upper bound of the output.
    #[inline]
    pub fn high(&self) -> f64 {
        self.wrapped.max.exp()
    }

    /// Returns the underlying soft limit over `(ln low, ln high)`.
    #[inline]
    pub fn wrapped(&self) -> &SoftLimit {
        &self.wrapped
    }

    /// Maps `v` into `(low, high)`.
    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        self.wrapped.apply(v).exp()
    }
}

/// Scale used when none is given.
pub const DEFAULT_SCALE: f64 = 1.0;

/// A coordinate transform for unconstrained parameter search.
///
/// Mappings hold only construction-time constants and can be shared freely
/// between threads.
///
/// # Example
///
/// ```
/// use hashscope_mapping::Mapping;
///
/// let rate = Mapping::log_limit(1e-4, 1.0).unwrap();
/// let momentum = Mapping::soft_limit(0.0, 1.0);
///
/// assert!((momentum.apply(0.0) - 0.5).abs() < 1e-12);
/// assert!((rate.apply(0.0) - 1e-2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mapping {
    /// Returns the input unchanged.
    #[default]
    Identity,

    /// `exp(v * scale)`, onto the positive reals.
    Exponential {
        /// Multiplier applied before exponentiation.
        scale: f64,
    },

    /// Logistic squashing onto a bounded open interval.
    SoftLimit(SoftLimit),

    /// Logistic squashing in log space onto a positive open interval.
    LogLimit(LogLimit),
}

impl Mapping {
    /// Maps values to themselves.
    pub fn identity() -> Self {
        Mapping::Identity
    }

    /// Maps values onto the positive reals with unit scale.
    pub fn exponential() -> Self {
        Self::exponential_with_scale(DEFAULT_SCALE)
    }

    /// Maps values onto the positive reals. With a larger `scale`, large
    /// outputs become more likely.
    pub fn exponential_with_scale(scale: f64) -> Self {
        Mapping::Exponential { scale }
    }

    /// Maps values onto `(min, max)` with unit scale.
    pub fn soft_limit(min: f64, max: f64) -> Self {
        Self::soft_limit_with_scale(min, max, DEFAULT_SCALE)
    }

    /// Maps values onto `(min, max)`; see [`SoftLimit`].
    pub fn soft_limit_with_scale(min: f64, max: f64, scale: f64) -> Self {
        Mapping::SoftLimit(SoftLimit::new(min, max, scale))
    }

    /// Maps values onto `(low, high)`, roughly geometrically.
    ///
    /// # Errors
    ///
    /// Fails if `low` or `high` is not strictly positive.
    pub fn log_limit(low: f64, high: f64) -> Result<Self, MappingError> {
        LogLimit::new(low, high).map(Mapping::LogLimit)
    }

    /// Applies the transform.
    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        match self {
            Mapping::Identity => v,
            Mapping::Exponential { scale } => (v * scale).exp(),
            Mapping::SoftLimit(limit) => limit.apply(v),
            Mapping::LogLimit(limit) => limit.apply(v),
        }
    }

    /// Applies the transform to every value in place.
    pub fn apply_all(&self, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.apply(*v);
        }
    }

    /// Returns a short name for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Mapping::Identity => "identity",
            Mapping::Exponential { .. } => "exponential",
            Mapping::SoftLimit(_) => "soft_limit",
            Mapping::LogLimit(_) => "log_limit",
        }
    }
}
