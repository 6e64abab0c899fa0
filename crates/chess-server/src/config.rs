//! Configuration for the chess TCP server.
//!
//! Layers, later ones win:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config <path>` or `CHESS_CONFIG`)
//! 3. environment variables:
//!    - `CHESS_BIND_ADDR`   (default: "0.0.0.0")
//!    - `CHESS_PORT`        (default: "3000")
//!    - `CHESS_MAX_CLIENTS` (default: "1024")
//!    - `CHESS_WIRE_FORMAT` (default: "json")
//! 4. command line flags (applied by the binary)

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chess_protocol::WireFormat;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a TOML config file.
pub const CONFIG_PATH_ENV: &str = "CHESS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected peers, spectators included.
    pub max_clients: usize,

    /// Line encoding used on every connection.
    pub wire_format: WireFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            max_clients: 1024,
            wire_format: WireFormat::Json,
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_toml_str(&text)
    }

    /// File (if any), then environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        base.with_overrides(|key| env::var(key).ok())
    }

    /// Apply `CHESS_*` overrides from `lookup` (normally the process
    /// environment).
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            bind_addr: lookup("CHESS_BIND_ADDR").unwrap_or(self.bind_addr),
            port: read_or(&lookup, "CHESS_PORT", self.port)?,
            max_clients: read_or(&lookup, "CHESS_MAX_CLIENTS", self.max_clients)?,
            wire_format: read_or(&lookup, "CHESS_WIRE_FORMAT", self.wire_format)?,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_or<T, F>(lookup: &F, key: &'static str, current: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(current),
    }
}
