//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! Secrets are loaded from environment variables.

use shop_core::{Currency, ShopError, ShopResult};
use std::env;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";
const DEFAULT_DESCRIPTION: &str = "Storefront order";
const DEFAULT_MERCHANT_DISPLAY_NAME: &str = "Storefront";

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Currency charged when the request does not name one
    pub currency: Currency,

    /// Description attached to every payment intent
    pub description: String,

    /// Stored as intent metadata so the dashboard shows who sold it
    pub merchant_display_name: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_CURRENCY` (default `usd`)
    /// - `STRIPE_PAYMENT_DESCRIPTION`
    /// - `STRIPE_MERCHANT_DISPLAY_NAME`
    pub fn from_env() -> ShopResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ShopResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .ok_or_else(|| ShopError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(ShopError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        let currency = match lookup("STRIPE_CURRENCY") {
            Some(code) => code.parse()?,
            None => Currency::USD,
        };

        let mut config = Self::new(secret_key).with_currency(currency);
        if let Some(description) = lookup("STRIPE_PAYMENT_DESCRIPTION") {
            config.description = description;
        }
        if let Some(name) = lookup("STRIPE_MERCHANT_DISPLAY_NAME") {
            config.merchant_display_name = name;
        }

        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            currency: Currency::USD,
            description: DEFAULT_DESCRIPTION.to_string(),
            merchant_display_name: DEFAULT_MERCHANT_DISPLAY_NAME.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set default currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_key_modes() {
        let config = StripeConfig::new("sk_test_abc123");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = StripeConfig::new("sk_live_abc123");
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_missing_key() {
        let result = StripeConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ShopError::Configuration(_))));
    }

    #[test]
    fn test_rejects_publishable_key() {
        let result = StripeConfig::from_lookup(lookup_from(&[("STRIPE_SECRET_KEY", "pk_test_x")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_settings() {
        let config = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc"),
            ("STRIPE_CURRENCY", "EUR"),
            ("STRIPE_MERCHANT_DISPLAY_NAME", "Corner Shop"),
        ]))
        .unwrap();

        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.merchant_display_name, "Corner Shop");
        assert_eq!(config.description, "Storefront order");
        assert_eq!(config.api_base_url, "https://api.stripe.com");
    }
}
