//! Telemetry configuration from environment variables.

use serde::Deserialize;
use std::env;

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name reported once by [`init_global`](crate::init_global)
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or an `EnvFilter` directive)
    pub log_level: String,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Whether to use ANSI colours in plain-text output
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ledger-evm".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            ansi: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_EVM_SERVICE_NAME`: Service name (default: ledger-evm)
    /// - `LEDGER_EVM_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `LEDGER_EVM_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `LEDGER_EVM_ANSI`: Colourise plain-text logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            service_name: lookup("LEDGER_EVM_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("LEDGER_EVM_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("LEDGER_EVM_JSON_LOGS")
                .map_or(defaults.json_logs, |v| is_truthy(&v)),

            ansi: lookup("LEDGER_EVM_ANSI").map_or(defaults.ansi, |v| is_truthy(&v)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
