//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `RIDDIM_STORAGE_PATH` - JSON file backing the local storage slots
//!   (default: `.riddim/local-storage.json`)
//! - `RIDDIM_CART_KEY` - Storage key the cart is persisted under (default: `cart`)
//! - `RIDDIM_CORRUPT_CART` - `reset` or `fail` when the stored cart is
//!   unreadable (default: `reset`)
//! - `RIDDIM_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::cart::{CorruptCartPolicy, DEFAULT_CART_KEY};

const DEFAULT_STORAGE_PATH: &str = ".riddim/local-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON file backing the storage slots
    pub storage_path: PathBuf,
    /// Storage key for the cart
    pub cart_key: String,
    /// Handling of an unreadable stored cart
    pub corrupt_cart: CorruptCartPolicy,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            cart_key: DEFAULT_CART_KEY.to_owned(),
            corrupt_cart: CorruptCartPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_path = lookup("RIDDIM_STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.storage_path, PathBuf::from);

        let cart_key = match lookup("RIDDIM_CART_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "RIDDIM_CART_KEY".to_string(),
                    "must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.cart_key,
        };

        let corrupt_cart = parse_optional(&lookup, "RIDDIM_CORRUPT_CART")?
            .unwrap_or(defaults.corrupt_cart);
        let log_format =
            parse_optional(&lookup, "RIDDIM_LOG_FORMAT")?.unwrap_or(defaults.log_format);

        Ok(Self {
            storage_path,
            cart_key,
            corrupt_cart,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable with `FromStr`.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr<Err = String>,
{
    lookup(key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.cart_key, "cart");
        assert_eq!(
            config.storage_path,
            PathBuf::from(".riddim/local-storage.json")
        );
        assert_eq!(config.corrupt_cart, CorruptCartPolicy::Reset);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RIDDIM_STORAGE_PATH", "/tmp/riddim.json"),
            ("RIDDIM_CART_KEY", "guest-cart"),
            ("RIDDIM_CORRUPT_CART", "fail"),
            ("RIDDIM_LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/riddim.json"));
        assert_eq!(config.cart_key, "guest-cart");
        assert_eq!(config.corrupt_cart, CorruptCartPolicy::Fail);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_policy() {
        let err = load(&[("RIDDIM_CORRUPT_CART", "ignore")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "RIDDIM_CORRUPT_CART"));
    }

    #[test]
    fn test_empty_cart_key_rejected() {
        let err = load(&[("RIDDIM_CART_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "RIDDIM_CART_KEY"));
    }

    #[test]
    fn test_blank_storage_path_falls_back_to_default() {
        let config = load(&[("RIDDIM_STORAGE_PATH", "")]).unwrap();
        assert_eq!(config.storage_path, StorefrontConfig::default().storage_path);
    }
}
