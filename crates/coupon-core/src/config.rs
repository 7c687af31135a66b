//! # Pricing Configuration
//!
//! Engine-wide settings that are not part of any single coupon.
//!
//! ## Configuration Format
//! ```toml
//! # pricing.toml
//! rounding = "half_even"   # half_even | half_away_from_zero
//! ```
//!
//! Reading the file is the caller's job; this module only parses and
//! validates the contents, keeping the crate free of I/O.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::money::RoundingMode;

/// Settings shared by every strategy the engine builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Rounding applied when a discount produces a fraction of a cent.
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl PricingConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// ```rust
    /// use coupon_core::config::PricingConfig;
    /// use coupon_core::money::RoundingMode;
    ///
    /// let config = PricingConfig::from_toml_str("rounding = \"half_away_from_zero\"").unwrap();
    /// assert_eq!(config.rounding, RoundingMode::HalfAwayFromZero);
    /// ```
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: PricingConfig = toml::from_str(contents)?;
        debug!(rounding = %config.rounding, "Pricing config loaded");
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert_eq!(config.rounding, RoundingMode::HalfEven);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PricingConfig::from_toml_str("").unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_parse_rounding() {
        let config = PricingConfig::from_toml_str("rounding = \"half_away_from_zero\"").unwrap();
        assert_eq!(config.rounding, RoundingMode::HalfAwayFromZero);

        let err = PricingConfig::from_toml_str("rounding = \"down\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let config = PricingConfig {
            rounding: RoundingMode::HalfAwayFromZero,
        };
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("rounding = \"half_away_from_zero\""));
        assert_eq!(PricingConfig::from_toml_str(&toml_str).unwrap(), config);
    }
}
