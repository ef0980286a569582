//! # Router Configuration
//!
//! Gas budgets, the account update policy and code layout. All fields have
//! defaults and can be overridden from the environment.

use crate::domain::entities::{AccountPolicy, CodeEncoding};
use serde::Deserialize;
use std::env;
use thiserror::Error;
use tracing::warn;

/// Default gas budget for deploy and call.
pub const DEFAULT_GAS: u64 = 100_000;

/// Default first-argument tag that selects code retrieval.
pub const DEFAULT_GET_CODE_SENTINEL: &str = "getCode";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A gas budget of zero would fail every execution.
    #[error("{0} must be greater than zero")]
    ZeroGas(&'static str),

    /// The code retrieval sentinel cannot be empty.
    #[error("get_code_sentinel must not be empty")]
    EmptySentinel,
}

/// Invocation router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Gas budget for constructor execution.
    pub deploy_gas: u64,
    /// Gas budget for contract calls.
    pub call_gas: u64,
    /// Policy for engine-initiated account updates and removals.
    pub account_policy: AccountPolicy,
    /// How code is laid out in the ledger.
    pub code_encoding: CodeEncoding,
    /// First argument that selects code retrieval.
    pub get_code_sentinel: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            deploy_gas: DEFAULT_GAS,
            call_gas: DEFAULT_GAS,
            account_policy: AccountPolicy::default(),
            code_encoding: CodeEncoding::default(),
            get_code_sentinel: DEFAULT_GET_CODE_SENTINEL.to_string(),
        }
    }
}

impl RouterConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_EVM_DEPLOY_GAS`: Deploy gas budget (default: 100000)
    /// - `LEDGER_EVM_CALL_GAS`: Call gas budget (default: 100000)
    /// - `LEDGER_EVM_ACCOUNT_POLICY`: `disabled`, `require-existing` or `unconditional` (default: disabled)
    /// - `LEDGER_EVM_CODE_ENCODING`: `raw` or `tar-gz` (default: raw)
    /// - `LEDGER_EVM_GET_CODE_SENTINEL`: Code retrieval tag (default: getCode)
    ///
    /// Unparseable values are logged and replaced by the default.
    #[must_use]
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
            deploy_gas: parse_or("LEDGER_EVM_DEPLOY_GAS", &lookup, defaults.deploy_gas, |v| {
                v.trim().parse().ok()
            }),
            call_gas: parse_or("LEDGER_EVM_CALL_GAS", &lookup, defaults.call_gas, |v| {
                v.trim().parse().ok()
            }),
            account_policy: parse_or(
                "LEDGER_EVM_ACCOUNT_POLICY",
                &lookup,
                defaults.account_policy,
                AccountPolicy::parse,
            ),
            code_encoding: parse_or(
                "LEDGER_EVM_CODE_ENCODING",
                &lookup,
                defaults.code_encoding,
                CodeEncoding::parse,
            ),
            get_code_sentinel: lookup("LEDGER_EVM_GET_CODE_SENTINEL")
                .unwrap_or(defaults.get_code_sentinel),
        }
    }

    /// Rejects configurations that could never serve an invocation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deploy_gas == 0 {
            return Err(ConfigError::ZeroGas("deploy_gas"));
        }
        if self.call_gas == 0 {
            return Err(ConfigError::ZeroGas("call_gas"));
        }
        if self.get_code_sentinel.is_empty() {
            return Err(ConfigError::EmptySentinel);
        }
        Ok(())
    }
}

fn parse_or<T, F, P>(name: &str, lookup: &F, default: T, parse: P) -> T
where
    T: std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match lookup(name) {
        None => default,
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            warn!(variable = name, value = %raw, fallback = ?default, "Ignoring invalid configuration value");
            default
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================
