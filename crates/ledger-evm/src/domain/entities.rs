//! # Domain Entities
//!
//! Accounts, routed invocations and responses.

use crate::domain::value_objects::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ACCOUNT
// =============================================================================

/// An address paired with the runtime bytecode stored under it.
///
/// There is no separate existence flag: an account exists when its code is
/// non-empty.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Account {
    /// Account address.
    pub address: Address,
    /// Runtime bytecode (empty when nothing is deployed).
    pub code: Vec<u8>,
}

impl Account {
    /// Creates an account with the given code.
    #[must_use]
    pub fn new(address: Address, code: Vec<u8>) -> Self {
        Self { address, code }
    }

    /// A freshly constructed account with no code.
    #[must_use]
    pub fn empty(address: Address) -> Self {
        Self {
            address,
            code: Vec::new(),
        }
    }

    /// True when code has been deployed at this address.
    #[must_use]
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("code_len", &self.code.len())
            .finish()
    }
}

// =============================================================================
// POLICIES
// =============================================================================

/// How `update_account` and `remove_account` treat already-deployed accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountPolicy {
    /// Both operations are rejected.
    #[default]
    Disabled,
    /// Only accounts with code may be updated or removed.
    RequireExisting,
    /// Update is an upsert, remove deletes whatever is stored.
    Unconditional,
}

impl AccountPolicy {
    /// Parses the kebab-case name used in configuration.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "disabled" => Some(Self::Disabled),
            "require-existing" => Some(Self::RequireExisting),
            "unconditional" => Some(Self::Unconditional),
            _ => None,
        }
    }
}

/// How account code is laid out in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeEncoding {
    /// Code bytes are stored as-is.
    #[default]
    Raw,
    /// Code is wrapped in a gzip-compressed tar archive named after the address.
    TarGz,
}

impl CodeEncoding {
    /// Parses the kebab-case name used in configuration.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "raw" => Some(Self::Raw),
            "tar-gz" => Some(Self::TarGz),
            _ => None,
        }
    }
}

// =============================================================================
// INVOCATION
// =============================================================================

/// A routed invocation, after argument parsing and hex decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Run constructor bytecode and install the returned runtime code.
    Deploy {
        /// Constructor bytecode, also passed as input.
        payload: Vec<u8>,
    },
    /// Run the code stored at `callee`.
    Call {
        /// Target contract.
        callee: Address,
        /// Call input.
        input: Vec<u8>,
    },
    /// Return the code stored at `target` without touching the engine.
    GetCode {
        /// Account to read.
        target: Address,
    },
}

impl Invocation {
    /// Short label used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deploy { .. } => "deploy",
            Self::Call { .. } => "call",
            Self::GetCode { .. } => "get_code",
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Outcome of one invocation as seen by the host ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// [`Response::OK`] or [`Response::ERROR`].
    pub status: i32,
    /// Human-readable error message; empty on success.
    pub message: String,
    /// Success payload; empty on error.
    pub payload: Vec<u8>,
}

impl Response {
    /// Status code for success.
    pub const OK: i32 = 200;

    /// Status code for any failure.
    pub const ERROR: i32 = 500;

    /// Successful response carrying `payload`.
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
        }
    }

    /// Failed response carrying `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Returns true on success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

// =============================================================================
// TESTS
// =============================================================================
