//! # Driving Ports (API - Inbound)
//!
//! Interfaces this crate exposes:
//! - `StateManager`: the account/storage contract the execution engine drives
//! - `InvocationApi`: the two-argument entry point the host ledger drives

use crate::domain::entities::{Account, Response};
use crate::domain::value_objects::{Address, Word};
use crate::errors::StateError;
use crate::ports::outbound::LedgerStore;

// =============================================================================
// STATE MANAGER (driven by the execution engine)
// =============================================================================

/// Account and storage access presented to the execution engine.
///
/// Every call runs against the ledger's current transactional view.
pub trait StateManager {
    /// Returns the account at `address`.
    ///
    /// A missing account is an account with empty code, not an error.
    fn get_account(&self, address: Address) -> Result<Account, StateError>;

    /// Returns a storage cell, or the zero word when never written.
    fn get_storage(&self, address: Address, key: Word) -> Result<Word, StateError>;

    /// Writes a storage cell unconditionally.
    fn set_storage(&mut self, address: Address, key: Word, value: Word) -> Result<(), StateError>;

    /// Replaces the code of an account, subject to the configured policy.
    fn update_account(&mut self, account: &Account) -> Result<(), StateError>;

    /// Removes the code of an account, subject to the configured policy.
    fn remove_account(&mut self, address: Address) -> Result<(), StateError>;
}

// =============================================================================
// INVOCATION API (driven by the host ledger)
// =============================================================================

/// Entry point for one ledger transaction's invocation.
pub trait InvocationApi {
    /// One-time initialisation hook. Always succeeds.
    fn init(&self) -> Response;

    /// Routes `args` (exactly two byte strings) on behalf of `creator`.
    ///
    /// Never panics and never returns a transport error: every failure is an
    /// error [`Response`]. Writes issued before a failure stay in `ledger`; the
    /// host must discard them.
    fn invoke(&self, ledger: &mut dyn LedgerStore, creator: &[u8], args: &[Vec<u8>]) -> Response;
}
