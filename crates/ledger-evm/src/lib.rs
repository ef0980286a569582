//! # ledger-evm - EVM Contracts on a Permissioned Ledger
//!
//! Lets a permissioned key-value ledger host EVM smart contracts. The crate
//! maps account code and contract storage onto ledger keys, derives caller
//! addresses from X.509 identities, allocates per-caller deployment
//! sequences and routes each two-argument invocation to deploy, call or code
//! retrieval. Bytecode execution itself is delegated to an
//! [`ExecutionEngine`](ports::outbound::ExecutionEngine) supplied by the host.
//!
//! ## Invocation Arguments
//!
//! | arg0 | arg1 | Meaning |
//! |------|------|---------|
//! | zero address hex | constructor bytecode hex | deploy |
//! | contract address hex | call input hex | call |
//! | `getCode` | address hex | read stored code |
//!
//! ## Ledger Key Layout
//!
//! | Entry | Key |
//! |-------|-----|
//! | Account code | `address` (20 bytes) |
//! | Storage cell | `address ++ key` (20 + 32 bytes) |
//! | Deploy sequence | `caller ++ pad32("ledger-evm/sequence")` |
//!
//! ## Layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `domain` | Address/word types, accounts, hashing and key derivation |
//! | `ports` | `StateManager`, `InvocationApi`, `LedgerStore`, `ExecutionEngine`, `IdentityResolver` |
//! | `adapters` | Ledger-backed state, code envelope, X.509 resolver, in-memory ledger |
//! | `sequence` | Per-caller deployment counter |
//! | `service` | Invocation router |
//! | `config` | `RouterConfig` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ledger_evm::prelude::*;
//!
//! let service = EvmLedgerService::with_x509(engine, RouterConfig::from_env())
//!     .with_dispatch(dispatch);
//!
//! let response = service.invoke(&mut ledger, &creator, &[zero_hex, bytecode_hex]);
//! if response.is_ok() {
//!     println!("deployed at {}", String::from_utf8_lossy(&response.payload));
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod sequence;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{Account, AccountPolicy, CodeEncoding, Invocation, Response};
    pub use crate::domain::services::{
        account_key, address_from_public_key, derive_contract_address, sequence_key, storage_key,
    };
    pub use crate::domain::value_objects::{Address, Word, U256};

    // Ports
    pub use crate::ports::inbound::{InvocationApi, StateManager};
    pub use crate::ports::outbound::{EngineCall, ExecutionEngine, IdentityResolver, LedgerStore};

    // Errors
    pub use crate::errors::{
        AddressError, EngineError, IdentityError, InvocationError, StateError,
    };

    // Adapters
    pub use crate::adapters::{
        CodeCodec, InMemoryLedger, LedgerStateManager, LedgerTransaction, RawCode,
        SerializedIdentity, TarGzEnvelope, X509IdentityResolver,
    };

    // Service
    pub use crate::config::{ConfigError, RouterConfig};
    pub use crate::sequence::{next_sequence, peek_sequence};
    pub use crate::service::EvmLedgerService;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
