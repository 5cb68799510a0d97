//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Shop"
//! currency_symbol = "$"
//! max_item_quantity = 999
//! max_cart_items = 100
//! catalog_path = "/data/products.json"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::{CartLimits, Money, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name (shown in the session banner)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Largest quantity of one product in the cart
    pub max_item_quantity: i64,

    /// Largest number of distinct products in the cart
    pub max_cart_items: usize,

    /// JSON catalog file; the fallback products are used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_symbol: "$".to_string(),
            max_item_quantity: MAX_ITEM_QUANTITY,
            max_cart_items: MAX_CART_ITEMS,
            catalog_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file and environment.
    ///
    /// `config_path` falls back to the platform config directory; a missing
    /// file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// `<config dir>/storefront.toml` for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Applies `STOREFRONT_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_STORE_NAME`
    /// - `STOREFRONT_CURRENCY_SYMBOL`
    /// - `STOREFRONT_MAX_ITEM_QUANTITY`
    /// - `STOREFRONT_MAX_CART_ITEMS`
    /// - `STOREFRONT_CATALOG_PATH`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = var("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(raw) = var("STOREFRONT_MAX_ITEM_QUANTITY") {
            match raw.parse() {
                Ok(max) => self.max_item_quantity = max,
                Err(_) => warn!(value = %raw, "Ignoring invalid STOREFRONT_MAX_ITEM_QUANTITY"),
            }
        }

        if let Some(raw) = var("STOREFRONT_MAX_CART_ITEMS") {
            match raw.parse() {
                Ok(max) => self.max_cart_items = max,
                Err(_) => warn!(value = %raw, "Ignoring invalid STOREFRONT_MAX_CART_ITEMS"),
            }
        }

        if let Some(path) = var("STOREFRONT_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(path));
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_item_quantity < 1 {
            return Err(ConfigError::Invalid(format!(
                "max_item_quantity must be at least 1, got {}",
                self.max_item_quantity
            )));
        }

        if self.max_cart_items == 0 {
            return Err(ConfigError::Invalid(
                "max_cart_items must be at least 1".to_string(),
            ));
        }

        // Every line at full quantity must still sum without overflow
        let fits = i64::try_from(self.max_cart_items)
            .ok()
            .and_then(|items| self.max_item_quantity.checked_mul(items))
            .is_some();
        if !fits {
            return Err(ConfigError::Invalid(format!(
                "max_item_quantity ({}) x max_cart_items ({}) exceeds {}",
                self.max_item_quantity,
                self.max_cart_items,
                i64::MAX
            )));
        }

        if self.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Cart limits derived from this config.
    pub fn cart_limits(&self) -> CartLimits {
        CartLimits {
            max_item_quantity: self.max_item_quantity,
            max_cart_items: self.max_cart_items,
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(3998), "$39.98");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        Money::from_cents(cents).format_with(&self.currency_symbol)
    }
}
