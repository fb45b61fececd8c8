//! # Client Configuration
//!
//! Endpoints, local paths and checkout presentation settings for the storefront client.
//! Loaded from `config/storefront.toml` when present, then overridden from the environment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shop_core::{Currency, ShopError, ShopResult};
use std::path::{Path, PathBuf};

const CONFIG_PATHS: [&str; 3] = [
    "config/storefront.toml",
    "../config/storefront.toml",
    "../../config/storefront.toml",
];

/// Date window used when listing past orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistoryWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for OrderHistoryWindow {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2019, 12, 10).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2024, 10, 10).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Storefront client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Fake Store API base URL
    pub api_base_url: String,
    /// Payment relay base URL
    pub payment_backend_url: String,
    /// Where the session (token + user) is persisted
    pub session_path: PathBuf,
    /// Currency used to price the cart
    pub currency: Currency,
    /// Shown on the payment sheet
    pub merchant_display_name: String,
    pub country_code: String,
    pub order_history: OrderHistoryWindow,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://fakestoreapi.com".to_string(),
            payment_backend_url: "http://127.0.0.1:4242".to_string(),
            session_path: PathBuf::from(".storefront/session.json"),
            currency: Currency::USD,
            merchant_display_name: "Your Store Name".to_string(),
            country_code: "US".to_string(),
            order_history: OrderHistoryWindow::default(),
        }
    }
}

impl ClientConfig {
    /// Load from the first config file found, then apply environment overrides
    pub fn load() -> ShopResult<Self> {
        dotenvy::dotenv().ok();
        let paths: Vec<&Path> = CONFIG_PATHS.iter().map(Path::new).collect();
        Self::load_from(&paths, |key| std::env::var(key).ok())
    }

    /// Load from explicit candidate paths and an arbitrary variable source
    pub fn load_from<F>(paths: &[&Path], lookup: F) -> ShopResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        for path in paths {
            if let Ok(content) = std::fs::read_to_string(path) {
                config = Self::from_toml(&content).map_err(|e| {
                    ShopError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                tracing::debug!("Loaded client config from {}", path.display());
                break;
            }
        }

        if let Some(url) = lookup("STOREFRONT_API_URL") {
            config.api_base_url = url;
        }
        if let Some(url) = lookup("STOREFRONT_PAYMENT_BACKEND_URL") {
            config.payment_backend_url = url;
        }
        if let Some(path) = lookup("STOREFRONT_SESSION_PATH") {
            config.session_path = PathBuf::from(path);
        }

        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.payment_backend_url = config.payment_backend_url.trim_end_matches('/').to_string();

        Ok(config)
    }

    /// Parse config from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
