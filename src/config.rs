//! Environment-driven configuration, loaded once at process start.

use std::env;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub database_url: String,
    pub port: u16,
    pub log_filter: String,
    pub default_usd_per_token: Decimal,
    /// Safety valve on mirrored-order fan-out; `None` is unbounded.
    pub mirror_order_limit: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database_url: "postgres://localhost/celebrity_exchange".to_string(),
            port: 8080,
            log_filter: "celebrity_exchange=debug,tower_http=debug".to_string(),
            default_usd_per_token: dec!(1.00),
            mirror_order_limit: None,
        }
    }
}

impl AppConfig {
    /// Reads every field from the environment, falling back to its default
    /// and logging a warning when a value is present but cannot be parsed.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(environment) = env::var("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database_url = database_url;
        }
        if let Ok(port) = env::var("PORT") {
            match port.parse() {
                Ok(parsed) => config.port = parsed,
                Err(_) => warn!(value = %port, "invalid PORT, using default {}", config.port),
            }
        }
        if let Ok(log_filter) = env::var("LOG_FILTER") {
            config.log_filter = log_filter;
        }
        if let Ok(usd_per_token) = env::var("DEFAULT_USD_PER_TOKEN") {
            match usd_per_token.parse() {
                Ok(parsed) => config.default_usd_per_token = parsed,
                Err(_) => warn!(value = %usd_per_token, "invalid DEFAULT_USD_PER_TOKEN, using default {}", config.default_usd_per_token),
            }
        }
        if let Ok(mirror_order_limit) = env::var("MIRROR_ORDER_LIMIT") {
            match mirror_order_limit.parse() {
                Ok(parsed) => config.mirror_order_limit = Some(parsed),
                Err(_) => warn!(value = %mirror_order_limit, "invalid MIRROR_ORDER_LIMIT, ignoring"),
            }
        }

        config.validate();
        config
    }

    fn validate(&mut self) {
        if self.default_usd_per_token <= Decimal::ZERO {
            warn!(value = %self.default_usd_per_token, "invalid default_usd_per_token, using 1.00");
            self.default_usd_per_token = dec!(1.00);
        }
        if self.port == 0 {
            warn!("invalid port 0, using default 8080");
            self.port = 8080;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_usd_per_token, dec!(1.00));
    }
}
