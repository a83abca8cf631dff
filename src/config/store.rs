//! Application configuration loading from config.toml
//!
//! The file is optional: every section has defaults, so a bare deployment only needs
//! `DATABASE_URL`. Values stored in the `site_settings` table take precedence over the
//! `[store]` section at runtime (see [`crate::core::settings::load_store_defaults`]).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default config file location, overridable with `APP_CONFIG_PATH`.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store-wide defaults for attribution and messaging
    pub store: StoreConfig,
    /// Checkout behaviour switches
    pub checkout: CheckoutConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

/// Store identity used when an order is not attributed to a reseller
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name greeted in the order message
    pub name: String,
    /// WhatsApp number receiving direct orders
    pub support_phone: String,
    /// Country calling code substituted for a leading `0` in phone numbers
    pub country_code: String,
    /// Offset from UTC used when printing order timestamps
    pub utc_offset_hours: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "Admin".to_string(),
            support_phone: "6281234567890".to_string(),
            country_code: "62".to_string(),
            utc_offset_hours: 7,
        }
    }
}

/// What checkout does with a variant id that does not match the product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownVariantPolicy {
    /// Reject the checkout with a not-found error
    #[default]
    Reject,
    /// Ignore the variant and sell the base product
    FallBackToBase,
}

/// Checkout behaviour switches
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Handling of unmatched variant ids
    pub unknown_variant: UnknownVariantPolicy,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// Checks values serde cannot validate on its own.
    pub fn validate(&self) -> Result<()> {
        if self.store.name.trim().is_empty() {
            return Err(Error::Config {
                message: "store.name cannot be empty".to_string(),
            });
        }
        if !self.store.support_phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(Error::Config {
                message: "store.support_phone must contain digits".to_string(),
            });
        }
        if !(-12..=14).contains(&self.store.utc_offset_hours) {
            return Err(Error::Config {
                message: format!(
                    "store.utc_offset_hours out of range: {}",
                    self.store.utc_offset_hours
                ),
            });
        }
        Ok(())
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value fails [`AppConfig::validate`]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    let config: AppConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads the application configuration for the binary.
///
/// Reads `APP_CONFIG_PATH` (default `config.toml`). A missing file yields the
/// defaults; an unreadable or invalid file is an error. `BIND_ADDRESS` overrides
/// `server.bind_address`.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("APP_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        let config = load_config(&path)?;
        info!("Loaded configuration from {}", path);
        config
    } else {
        warn!("Config file {} not found, using defaults", path);
        AppConfig::default()
    };

    if let Ok(bind_address) = std::env::var("BIND_ADDRESS") {
        config.server.bind_address = bind_address;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
            [store]
            name = "Toko Baju"
            support_phone = "081234567890"
            country_code = "62"
            utc_offset_hours = 8

            [checkout]
            unknown_variant = "fall_back_to_base"

            [server]
            bind_address = "127.0.0.1:8080"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.name, "Toko Baju");
        assert_eq!(config.store.support_phone, "081234567890");
        assert_eq!(config.store.utc_offset_hours, 8);
        assert_eq!(
            config.checkout.unknown_variant,
            UnknownVariantPolicy::FallBackToBase
        );
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("[store]\nname = \"Toko\"\n").unwrap();
        assert_eq!(config.store.name, "Toko");
        assert_eq!(config.store.country_code, "62");
        assert_eq!(config.checkout.unknown_variant, UnknownVariantPolicy::Reject);
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_rejects_blank_store_name() {
        let mut config = AppConfig::default();
        config.store.name = "  ".to_string();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/storefront/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
