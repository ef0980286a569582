//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces this crate depends on. The host supplies:
//! - the transactional key-value ledger
//! - the bytecode execution engine
//! - the caller identity resolver (an X.509 implementation ships in `adapters`)

use crate::domain::entities::Account;
use crate::domain::value_objects::Address;
use crate::errors::{EngineError, IdentityError, StateError};
use crate::ports::inbound::StateManager;

// =============================================================================
// LEDGER STORE
// =============================================================================

/// The host ledger's key-value view, already scoped to one transaction.
///
/// Writes become durable only when the host commits the enclosing
/// transaction; a failed invocation is expected to be rolled back by the host.
pub trait LedgerStore {
    /// Reads a value. `None` when the key is absent.
    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Writes a value, replacing any previous one.
    fn put_state(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError>;

    /// Deletes a key. Deleting an absent key is not an error.
    fn del_state(&mut self, key: &[u8]) -> Result<(), StateError>;
}

impl<L: LedgerStore + ?Sized> LedgerStore for &mut L {
    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get_state(key)
    }

    fn put_state(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        (**self).put_state(key, value)
    }

    fn del_state(&mut self, key: &[u8]) -> Result<(), StateError> {
        (**self).del_state(key)
    }
}

// =============================================================================
// EXECUTION ENGINE
// =============================================================================

/// One engine invocation.
#[derive(Clone, Copy, Debug)]
pub struct EngineCall<'a> {
    /// Account issuing the call.
    pub caller: &'a Account,
    /// Account whose context the code runs in.
    pub callee: &'a Account,
    /// Program to execute.
    pub code: &'a [u8],
    /// Input bytes.
    pub input: &'a [u8],
    /// Value transferred. Always zero from this crate.
    pub value: u64,
}

/// A deterministic bytecode interpreter.
///
/// The engine reads and writes contract storage only through `state`, and
/// decrements `gas` as it runs. When the budget is exhausted it must fail
/// rather than keep running.
pub trait ExecutionEngine {
    /// Runs `call.code` and returns its output bytes.
    fn call(
        &self,
        state: &mut dyn StateManager,
        call: EngineCall<'_>,
        gas: &mut u64,
    ) -> Result<Vec<u8>, EngineError>;
}

// =============================================================================
// IDENTITY RESOLVER
// =============================================================================

/// Maps raw caller identity bytes to a stable account address.
pub trait IdentityResolver {
    /// Resolves the invocation creator to an address.
    fn resolve(&self, creator: &[u8]) -> Result<Address, IdentityError>;
}

// =============================================================================
// TESTS
// =============================================================================
