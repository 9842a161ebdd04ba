//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults match the reference storefront behavior.
//!
//! - `NIGHT_OWL_CURRENCY` - ISO 4217 currency code (default: USD)
//! - `NIGHT_OWL_CATALOG_FETCH_DELAY_MS` - Simulated catalog latency (default: 800)
//! - `NIGHT_OWL_CHECKOUT_DELAY_MS` - Simulated payment processing time (default: 2000)
//! - `NIGHT_OWL_AUTH_DELAY_MS` - Simulated credential check time (default: 1000)
//! - `NIGHT_OWL_FREE_SHIPPING_THRESHOLD` - Subtotal at which shipping is free (default: 50)
//! - `NIGHT_OWL_SHIPPING_PRICE` - Flat shipping price below the threshold (default: 5.99)
//! - `NIGHT_OWL_TAX_RATE` - Tax rate applied to the subtotal (default: 0.08)

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use night_owl_core::CurrencyCode;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Currency used across the catalog and cart.
    pub currency: CurrencyCode,
    /// Simulated latency for catalog lookups.
    pub catalog_fetch_delay: Duration,
    /// Simulated processing time for checkout submission.
    pub checkout_processing_delay: Duration,
    /// Simulated latency for the credential check.
    pub auth_delay: Duration,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping price charged below the threshold.
    pub shipping_price: Decimal,
    /// Tax rate applied to the cart subtotal.
    pub tax_rate: Decimal,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            catalog_fetch_delay: Duration::from_millis(800),
            checkout_processing_delay: Duration::from_millis(2000),
            auth_delay: Duration::from_millis(1000),
            free_shipping_threshold: Decimal::new(50, 0),
            shipping_price: Decimal::new(599, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable is optional; unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Ok(Self {
            currency: parse_env("NIGHT_OWL_CURRENCY", defaults.currency)?,
            catalog_fetch_delay: parse_env_duration_ms(
                "NIGHT_OWL_CATALOG_FETCH_DELAY_MS",
                defaults.catalog_fetch_delay,
            )?,
            checkout_processing_delay: parse_env_duration_ms(
                "NIGHT_OWL_CHECKOUT_DELAY_MS",
                defaults.checkout_processing_delay,
            )?,
            auth_delay: parse_env_duration_ms("NIGHT_OWL_AUTH_DELAY_MS", defaults.auth_delay)?,
            free_shipping_threshold: parse_env(
                "NIGHT_OWL_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            shipping_price: parse_env("NIGHT_OWL_SHIPPING_PRICE", defaults.shipping_price)?,
            tax_rate: parse_env("NIGHT_OWL_TAX_RATE", defaults.tax_rate)?,
        })
    }
}

/// Read an optional environment variable, parsing it into `T`.
fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Read an optional millisecond duration from the environment.
fn parse_env_duration_ms(name: &str, default: Duration) -> Result<Duration, ConfigError> {
    let default_millis = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    let millis = parse_env::<u64>(name, default_millis)?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.catalog_fetch_delay, Duration::from_millis(800));
        assert_eq!(config.checkout_processing_delay, Duration::from_millis(2000));
        assert_eq!(config.free_shipping_threshold, Decimal::new(50, 0));
        assert_eq!(config.shipping_price, Decimal::new(599, 2));
        assert_eq!(config.tax_rate, Decimal::new(8, 2));
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let parsed = parse_env("NIGHT_OWL_UNSET_TEST_VAR", Decimal::new(42, 0)).unwrap();
        assert_eq!(parsed, Decimal::new(42, 0));
    }

    // `set_var` is unsafe with concurrent tests; every test below touches
    // a variable no other test reads.
    #[test]
    fn test_from_env_reads_override() {
        unsafe { std::env::set_var("NIGHT_OWL_TAX_RATE", "0.05") };
        let config = StorefrontConfig::from_env().unwrap();
        unsafe { std::env::remove_var("NIGHT_OWL_TAX_RATE") };

        assert_eq!(config.tax_rate, Decimal::new(5, 2));
        // Unset variables keep their defaults.
        assert_eq!(config.shipping_price, Decimal::new(599, 2));
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        unsafe { std::env::set_var("NIGHT_OWL_BAD_RATE_TEST_VAR", "cheap") };
        let err = parse_env("NIGHT_OWL_BAD_RATE_TEST_VAR", Decimal::ZERO).unwrap_err();
        unsafe { std::env::remove_var("NIGHT_OWL_BAD_RATE_TEST_VAR") };

        assert!(
            matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "NIGHT_OWL_BAD_RATE_TEST_VAR")
        );
    }

    #[test]
    fn test_parse_env_duration_rejects_garbage() {
        unsafe { std::env::set_var("NIGHT_OWL_BAD_DELAY_TEST_VAR", "soon") };
        let err = parse_env_duration_ms("NIGHT_OWL_BAD_DELAY_TEST_VAR", Duration::from_millis(800))
            .unwrap_err();
        unsafe { std::env::remove_var("NIGHT_OWL_BAD_DELAY_TEST_VAR") };

        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_env_duration_reads_millis() {
        unsafe { std::env::set_var("NIGHT_OWL_GOOD_DELAY_TEST_VAR", "250") };
        let parsed =
            parse_env_duration_ms("NIGHT_OWL_GOOD_DELAY_TEST_VAR", Duration::from_millis(800))
                .unwrap();
        unsafe { std::env::remove_var("NIGHT_OWL_GOOD_DELAY_TEST_VAR") };

        assert_eq!(parsed, Duration::from_millis(250));
    }
}
