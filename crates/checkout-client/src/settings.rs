//! # Client Settings
//!
//! Merchant display metadata, pricing adjustments and the checkout server
//! address, loaded from `config/checkout.toml`. Every key has a default.

use crate::pricing::PricingRules;
use crate::sheet::MerchantDisplay;
use checkout_core::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    pub merchant: MerchantDisplay,
    pub pricing: PricingRules,
    pub server: ServerSettings,
}

impl CheckoutSettings {
    pub fn from_toml_str(content: &str) -> CheckoutResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| CheckoutError::Configuration(format!("Invalid checkout settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> CheckoutResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CheckoutError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::info!("Loaded checkout settings from {}", path.display());
        Ok(settings)
    }

    /// Try the usual locations, falling back to defaults
    pub fn discover() -> CheckoutResult<Self> {
        let config_paths = [
            "config/checkout.toml",
            "../config/checkout.toml",
            "../../config/checkout.toml",
        ];

        for path in config_paths {
            if Path::new(path).exists() {
                return Self::load(path);
            }
        }

        tracing::warn!("No checkout settings found, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> CheckoutResult<()> {
        if self.pricing.delivery_fee.is_sign_negative() || self.pricing.discount.is_sign_negative() {
            return Err(CheckoutError::Configuration(
                "delivery_fee and discount must not be negative".to_string(),
            ));
        }
        if self.merchant.display_name.trim().is_empty() {
            return Err(CheckoutError::Configuration(
                "merchant.display_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = CheckoutSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CheckoutSettings::default());
        assert_eq!(settings.pricing.delivery_fee, dec!(5.00));
        assert_eq!(settings.pricing.discount, dec!(0.50));
        assert_eq!(settings.merchant.display_name, "Example, Inc.");
    }

    #[test]
    fn test_partial_overrides() {
        let settings = CheckoutSettings::from_toml_str(
            r#"
            [merchant]
            display_name = "Food Hub"

            [pricing]
            currency = "eur"
            delivery_fee = "3.00"

            [server]
            base_url = "https://checkout.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(settings.merchant.display_name, "Food Hub");
        assert_eq!(settings.merchant.default_billing_name, "Jane Doe");
        assert_eq!(settings.pricing.currency, Currency::EUR);
        assert_eq!(settings.pricing.delivery_fee, dec!(3.00));
        assert_eq!(settings.pricing.discount, dec!(0.50));
        assert_eq!(settings.server.base_url, "https://checkout.example.com");
    }

    #[test]
    fn test_rejects_negative_fee() {
        let result = CheckoutSettings::from_toml_str("[pricing]\ndelivery_fee = \"-1\"");
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }

    #[test]
    fn test_bundled_config_parses() {
        let content = include_str!("../../../config/checkout.toml");
        let settings = CheckoutSettings::from_toml_str(content).unwrap();
        assert_eq!(settings.pricing, PricingRules::default());
    }
}
