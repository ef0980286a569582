//! # ledger-evm Telemetry
//!
//! Builds the `tracing` subscriber that the invocation router logs through.
//! The router never touches global state: the host builds a
//! [`tracing::Dispatch`] here and injects it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_evm_telemetry::{build_dispatch, TelemetryConfig};
//!
//! let dispatch = build_dispatch(&TelemetryConfig::from_env())?;
//! let service = EvmLedgerService::with_x509(engine, RouterConfig::from_env())
//!     .with_dispatch(dispatch);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LEDGER_EVM_SERVICE_NAME` | `ledger-evm` | Service name |
//! | `LEDGER_EVM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `LEDGER_EVM_JSON_LOGS` | `false` | JSON formatted output |
//! | `LEDGER_EVM_ANSI` | `false` | Coloured plain-text output |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_dispatch, build_dispatch_with_writer, init_global, noop_dispatch};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log level is not a valid filter directive.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("Global subscriber already installed: {0}")]
    AlreadyInstalled(String),
}
