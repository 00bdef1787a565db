use std::collections::HashMap;

use radulator_server::config::{ConfigError, LogFormat, ServerConfig, DEFAULT_BIND};

fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_unset() {
    let config = config(&[]).unwrap();
    assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert!(config.cors_origin.is_none());
}

#[test]
fn reads_all_variables() {
    let config = config(&[
        ("RADULATOR_BIND", "127.0.0.1:3000"),
        ("RADULATOR_LOG_FORMAT", "JSON"),
        ("RADULATOR_CORS_ORIGIN", "https://radulator.example"),
    ])
    .unwrap();
    assert_eq!(config.bind.port(), 3000);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(
        config.cors_origin.as_ref().and_then(|o| o.to_str().ok()),
        Some("https://radulator.example")
    );
}

#[test]
fn blank_and_wildcard_count_as_unset() {
    let config = config(&[
        ("RADULATOR_BIND", "  "),
        ("RADULATOR_CORS_ORIGIN", "*"),
    ])
    .unwrap();
    assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    assert!(config.cors_origin.is_none());
}

#[test]
fn rejects_bad_values() {
    assert!(matches!(
        config(&[("RADULATOR_BIND", "not-an-address")]),
        Err(ConfigError::Bind { .. })
    ));
    assert!(matches!(
        config(&[("RADULATOR_LOG_FORMAT", "xml")]),
        Err(ConfigError::LogFormat(_))
    ));
    assert!(matches!(
        config(&[("RADULATOR_CORS_ORIGIN", "bad\norigin")]),
        Err(ConfigError::CorsOrigin(_))
    ));
}
