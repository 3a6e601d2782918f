use crate::api::models::TransportMode;
use crate::infrastructure::storage::StoreConfig;
use dotenv::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub transport_mode: TransportMode,
    pub request_timeout: Duration,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset or unparseable
    /// values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = StoreConfig::default();
        Self {
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            transport_mode: lookup("TRANSPORT_MODE")
                .and_then(|v| TransportMode::parse(&v))
                .unwrap_or_default(),
            request_timeout: Duration::from_secs(
                lookup("REQUEST_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            store: StoreConfig {
                table_name: lookup("STORAGE_USERTABLE_NAME")
                    .filter(|v| !v.is_empty())
                    .unwrap_or(defaults.table_name),
                region: lookup("AWS_REGION")
                    .filter(|v| !v.is_empty())
                    .unwrap_or(defaults.region),
            },
        }
    }
}
