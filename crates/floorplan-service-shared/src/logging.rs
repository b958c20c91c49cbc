//! Structured logging for the floor-plan services.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `json` (default) or `text` / `pretty`
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `SERVICE_NAME`: Name recorded in the startup event
//!
//! ```no_run
//! use floorplan_service_shared::logging::{LoggingConfig, init_logging};
//!
//! let config = LoggingConfig::from_env().with_service("floorplan-route");
//! init_logging(&config);
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (default, production).
    #[default]
    Json,
    /// Human-readable text logging (development).
    Text,
}

impl LogFormat {
    /// Parse a format name; anything unrecognised falls back to `Json`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is absent or invalid.
    pub level: String,
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            service: lookup("SERVICE_NAME"),
        }
    }

    /// Set the service name unless `SERVICE_NAME` already provided one.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// # JSON Format (default)
///
/// ```json
/// {"timestamp":"2026-01-12T10:00:00Z","level":"INFO","fields":{"message":"floor plan loaded successfully","nodes":10},"target":"floorplan_service_shared::state"}
/// ```
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            service = config.service.as_deref().unwrap_or("floorplan"),
            format = ?config.format,
            "logging initialized"
        );
    }
}
