//! Service configuration read from environment variables.
//!
//! - `SERVER_ADDRESS`: listen address, `host:port` or `:port` (default `0.0.0.0:8080`)
//! - `FLOOR_PLAN_PATH`: floor plan loaded at startup (optional)
//! - `FLOOR_PLAN_DIR`: base directory for `/floorplan/load?file=` (default `.`)
//! - `SEARCH_TIMEOUT_MS`: per-request search deadline in milliseconds (optional)
//! - `CORS_ALLOW_ORIGIN`: allowed CORS origin (default `*`)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// Configuration for a floor-plan routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub address: SocketAddr,
    pub floor_plan_path: Option<PathBuf>,
    pub floor_plan_dir: PathBuf,
    pub search_timeout: Option<Duration>,
    pub cors_allow_origin: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            floor_plan_path: None,
            floor_plan_dir: PathBuf::from("."),
            search_timeout: None,
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_address = lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let address = parse_address(&raw_address)?;

        let search_timeout = match lookup("SEARCH_TIMEOUT_MS") {
            Some(value) => {
                let millis: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?;
                if millis == 0 {
                    return Err(ConfigError::InvalidTimeout(value));
                }
                Some(Duration::from_millis(millis))
            }
            None => None,
        };

        Ok(Self {
            address,
            floor_plan_path: lookup("FLOOR_PLAN_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            floor_plan_dir: lookup("FLOOR_PLAN_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            search_timeout,
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".to_string()),
        })
    }
}

fn parse_address(raw: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with(':') {
        format!("0.0.0.0{}", trimmed)
    } else {
        trimmed.to_string()
    };
    candidate
        .parse()
        .map_err(|_| ConfigError::InvalidAddress(raw.to_string()))
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `SERVER_ADDRESS` is not a socket address.
    InvalidAddress(String),
    /// `SEARCH_TIMEOUT_MS` is not a positive integer.
    InvalidTimeout(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidAddress(value) => {
                write!(f, "invalid SERVER_ADDRESS '{}'", value)
            }
            ConfigError::InvalidTimeout(value) => {
                write!(f, "invalid SEARCH_TIMEOUT_MS '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
