use std::collections::HashMap;

use chess_protocol::WireFormat;
use chess_server::config::{Config, ConfigError};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.max_clients, 1024);
    assert_eq!(config.wire_format, WireFormat::Json);
    assert_eq!(config.socket_addr_string(), "0.0.0.0:3000");
}

#[test]
fn toml_file_keeps_defaults_for_missing_keys() {
    let config = Config::from_toml_str(
        r#"
        port = 4000
        wire_format = "text"
        "#,
    )
    .unwrap();

    assert_eq!(config.port, 4000);
    assert_eq!(config.wire_format, WireFormat::Text);
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.max_clients, 1024);
}

#[test]
fn toml_rejects_unknown_keys() {
    let err = Config::from_toml_str("listen_port = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn environment_overrides_file_values() {
    let base = Config::from_toml_str("port = 4000\nmax_clients = 8").unwrap();
    let config = base
        .with_overrides(lookup_from(&[
            ("CHESS_PORT", "5000"),
            ("CHESS_BIND_ADDR", "127.0.0.1"),
            ("CHESS_WIRE_FORMAT", " TEXT "),
        ]))
        .unwrap();

    assert_eq!(config.port, 5000);
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.max_clients, 8);
    assert_eq!(config.wire_format, WireFormat::Text);
}

#[test]
fn bad_override_names_the_key() {
    let err = Config::default()
        .with_overrides(lookup_from(&[("CHESS_PORT", "not-a-port")]))
        .unwrap_err();

    match err {
        ConfigError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "CHESS_PORT");
            assert_eq!(value, "not-a-port");
        }
        other => panic!("unexpected error {:?}", other),
    }

    let err = Config::default()
        .with_overrides(lookup_from(&[("CHESS_WIRE_FORMAT", "xml")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "CHESS_WIRE_FORMAT", .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/chess.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
