use crate::api::models::TransportMode;
use crate::config::Config;
use std::collections::HashMap;
use std::time::Duration;

fn config_from(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.port, 3000);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.transport_mode, TransportMode::Wrapped);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.store.table_name, "UserTable");
    assert_eq!(config.store.region, "eu-west-1");
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("PORT", "8080"),
        ("STORAGE_USERTABLE_NAME", "UserTable-test"),
        ("AWS_REGION", "us-east-1"),
        ("LOG_LEVEL", "debug"),
        ("TRANSPORT_MODE", "bare"),
        ("REQUEST_TIMEOUT_SECS", "5"),
    ]);
    assert_eq!(config.port, 8080);
    assert_eq!(config.store.table_name, "UserTable-test");
    assert_eq!(config.store.region, "us-east-1");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.transport_mode, TransportMode::Bare);
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
fn test_bad_values_fall_back() {
    let config = config_from(&[
        ("PORT", "not-a-port"),
        ("TRANSPORT_MODE", "carrier-pigeon"),
        ("STORAGE_USERTABLE_NAME", ""),
    ]);
    assert_eq!(config.port, 3000);
    assert_eq!(config.transport_mode, TransportMode::Wrapped);
    assert_eq!(config.store.table_name, "UserTable");
}
