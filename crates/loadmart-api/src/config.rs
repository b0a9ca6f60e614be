//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `LOADMART_PRODUCT_COUNT` - Catalog size (default: 100)
//! - `LOADMART_LOW_STOCK_PRODUCTS` - How many products get low stock, `min-max` (default: 5-30)
//! - `LOADMART_LOW_STOCK_RANGE` - Stock of low-stock products, `min-max` (default: 5-10)
//! - `LOADMART_NORMAL_STOCK_RANGE` - Stock of every other product, `min-max` (default: 11-50)
//! - `LOADMART_PAYMENT_FAILURE_RATE` - Probability a payment is declined (default: 0.05)
//! - `LOADMART_SIMULATE_LATENCY` - Sleep a random time per endpoint (default: true)
//! - `LOADMART_RNG_SEED` - Seed for reproducible runs (default: OS entropy)
//! - `LOADMART_RESTORE_PURCHASE_COUNT_ON_ROLLBACK` - Undo purchase counters when a payment fails (default: false)

use std::net::{IpAddr, SocketAddr};
use std::ops::RangeInclusive;
use std::str::FromStr;

use loadmart_catalog::domain::config::CatalogConfig;
use loadmart_catalog::domain::reservation::RollbackPolicy;
use loadmart_checkout::payment::DEFAULT_FAILURE_PROBABILITY;
use loadmart_checkout::shop::ShopConfig;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but cannot be parsed.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Catalog generation and rollback settings.
    pub shop: ShopConfig,
    /// Probability that a simulated payment is declined.
    pub payment_failure_rate: f64,
    /// Whether endpoints sleep to imitate a slow backend.
    pub simulate_latency: bool,
    /// Seed for the shared RNG; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = CatalogConfig::default();
        let catalog = CatalogConfig {
            product_count: parse_or(&lookup, "LOADMART_PRODUCT_COUNT", defaults.product_count)?,
            low_stock_products: range_or(
                &lookup,
                "LOADMART_LOW_STOCK_PRODUCTS",
                defaults.low_stock_products,
            )?,
            low_stock_range: range_or(&lookup, "LOADMART_LOW_STOCK_RANGE", defaults.low_stock_range)?,
            normal_stock_range: range_or(
                &lookup,
                "LOADMART_NORMAL_STOCK_RANGE",
                defaults.normal_stock_range,
            )?,
            price_cents_range: defaults.price_cents_range,
        };
        catalog
            .validate()
            .map_err(|e| ConfigError::InvalidEnvVar("LOADMART_*".to_string(), e.to_string()))?;

        let restore = parse_or(&lookup, "LOADMART_RESTORE_PURCHASE_COUNT_ON_ROLLBACK", false)?;
        let payment_failure_rate = parse_or(
            &lookup,
            "LOADMART_PAYMENT_FAILURE_RATE",
            DEFAULT_FAILURE_PROBABILITY,
        )?;
        if !(0.0..=1.0).contains(&payment_failure_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "LOADMART_PAYMENT_FAILURE_RATE".to_string(),
                format!("must be between 0 and 1, got {payment_failure_rate}"),
            ));
        }

        Ok(Self {
            host: parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", 5000)?,
            shop: ShopConfig {
                catalog,
                rollback_policy: if restore {
                    RollbackPolicy::RestorePurchaseCount
                } else {
                    RollbackPolicy::KeepPurchaseCount
                },
            },
            payment_failure_rate,
            simulate_latency: parse_or(&lookup, "LOADMART_SIMULATE_LATENCY", true)?,
            rng_seed: lookup("LOADMART_RNG_SEED")
                .map(|value| parse(&value, "LOADMART_RNG_SEED"))
                .transpose()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T>(value: &str, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| parse(&value, key))
}

/// Parses `min-max` into an inclusive range.
fn parse_range(value: &str, key: &str) -> Result<RangeInclusive<u32>, ConfigError> {
    let (min, max) = value.split_once('-').ok_or_else(|| {
        ConfigError::InvalidEnvVar(key.to_string(), format!("expected min-max, got {value:?}"))
    })?;
    let (min, max): (u32, u32) = (parse(min, key)?, parse(max, key)?);
    if min > max {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("min {min} exceeds max {max}"),
        ));
    }
    Ok(min..=max)
}

fn range_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: RangeInclusive<u32>,
) -> Result<RangeInclusive<u32>, ConfigError> {
    lookup(key).map_or(Ok(default), |value| parse_range(&value, key))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.shop.catalog, CatalogConfig::default());
        assert_eq!(config.shop.rollback_policy, RollbackPolicy::KeepPurchaseCount);
        assert!((config.payment_failure_rate - 0.05).abs() < f64::EPSILON);
        assert!(config.simulate_latency);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOADMART_PRODUCT_COUNT", "40"),
            ("LOADMART_LOW_STOCK_PRODUCTS", "2-4"),
            ("LOADMART_NORMAL_STOCK_RANGE", "20 - 30"),
            ("LOADMART_PAYMENT_FAILURE_RATE", "0"),
            ("LOADMART_SIMULATE_LATENCY", "false"),
            ("LOADMART_RNG_SEED", "42"),
            ("LOADMART_RESTORE_PURCHASE_COUNT_ON_ROLLBACK", "true"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.shop.catalog.product_count, 40);
        assert_eq!(config.shop.catalog.low_stock_products, 2..=4);
        assert_eq!(config.shop.catalog.normal_stock_range, 20..=30);
        assert_eq!(
            config.shop.rollback_policy,
            RollbackPolicy::RestorePurchaseCount
        );
        assert!(!config.simulate_latency);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "PORT"));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = load(&[("LOADMART_LOW_STOCK_RANGE", "10-5")]).unwrap_err();

        assert!(
            matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "LOADMART_LOW_STOCK_RANGE")
        );
    }

    #[test]
    fn test_malformed_range_is_rejected() {
        assert!(load(&[("LOADMART_NORMAL_STOCK_RANGE", "11")]).is_err());
    }

    #[test]
    fn test_failure_rate_outside_unit_interval_is_rejected() {
        assert!(load(&[("LOADMART_PAYMENT_FAILURE_RATE", "1.5")]).is_err());
    }
}
