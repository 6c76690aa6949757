//! Dissector configuration.

use serde::{Deserialize, Serialize};

use hashscope_core::{CoreError, Result};

/// Configuration for a [`ModelDissector`](crate::ModelDissector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DissectorConfig {
    /// Expected number of distinct feature names; pre-sizes the attribution map.
    capacity_hint: usize,

    /// Number of records returned by `top_features`.
    default_summary_size: usize,
}

impl Default for DissectorConfig {
    fn default() -> Self {
        Self {
            capacity_hint: 0,
            default_summary_size: 10,
        }
    }
}

impl DissectorConfig {
    /// Creates a builder starting from the defaults.
    pub fn builder() -> DissectorConfigBuilder {
        DissectorConfigBuilder::default()
    }

    /// Returns the capacity hint.
    #[inline]
    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    /// Returns the default summary size.
    #[inline]
    pub fn default_summary_size(&self) -> usize {
        self.default_summary_size
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.default_summary_size == 0 {
            return Err(CoreError::ConfigError {
                message: "Default summary size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`DissectorConfig`].
#[derive(Debug, Default)]
pub struct DissectorConfigBuilder {
    config: DissectorConfig,
}

impl DissectorConfigBuilder {
    /// Sets the capacity hint.
    pub fn capacity_hint(mut self, capacity_hint: usize) -> Self {
        self.config.capacity_hint = capacity_hint;
        self
    }

    /// Sets the default summary size.
    pub fn default_summary_size(mut self, size: usize) -> Self {
        self.config.default_summary_size = size;
        self
    }

    /// Builds the configuration, validating it first.
    pub fn build(self) -> Result<DissectorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
