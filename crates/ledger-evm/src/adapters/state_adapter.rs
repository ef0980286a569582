//! # State Adapter
//!
//! Presents the host ledger's flat key-value space as the engine's
//! account/storage backend.
//!
//! ## Key Layout
//!
//! | Entry | Ledger key | Value |
//! |-------|------------|-------|
//! | Account code | `address` (20 bytes) | code, optionally enveloped |
//! | Storage cell | `address ++ key` (20 + 32 bytes) | 32-byte word |

use crate::adapters::envelope::CodeCodec;
use crate::domain::entities::{Account, AccountPolicy, CodeEncoding};
use crate::domain::services::{account_key, storage_key};
use crate::domain::value_objects::{Address, Word};
use crate::errors::StateError;
use crate::ports::inbound::StateManager;
use crate::ports::outbound::LedgerStore;
use tracing::{debug, trace};

/// `StateManager` over one transaction's ledger view.
pub struct LedgerStateManager<'a, L: LedgerStore + ?Sized, C: CodeCodec = CodeEncoding> {
    ledger: &'a mut L,
    codec: C,
    policy: AccountPolicy,
}

impl<'a, L: LedgerStore + ?Sized> LedgerStateManager<'a, L> {
    /// Raw code, `Disabled` account policy.
    pub fn new(ledger: &'a mut L) -> Self {
        Self {
            ledger,
            codec: CodeEncoding::Raw,
            policy: AccountPolicy::default(),
        }
    }
}

impl<'a, L: LedgerStore + ?Sized, C: CodeCodec> LedgerStateManager<'a, L, C> {
    /// Sets the update/remove policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AccountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the code codec.
    pub fn with_codec<C2: CodeCodec>(self, codec: C2) -> LedgerStateManager<'a, L, C2> {
        LedgerStateManager {
            ledger: self.ledger,
            codec,
            policy: self.policy,
        }
    }

    /// The configured update/remove policy.
    pub fn policy(&self) -> AccountPolicy {
        self.policy
    }

    /// Decoded code at `address`; empty when nothing is stored.
    pub fn get_code(&self, address: Address) -> Result<Vec<u8>, StateError> {
        match self.ledger.get_state(&account_key(&address))? {
            Some(stored) if !stored.is_empty() => self.codec.decode(&address, stored),
            _ => Ok(Vec::new()),
        }
    }

    /// Writes deployed runtime code at `address`.
    ///
    /// This is the deploy path and ignores the update/remove policy. An
    /// existing entry is overwritten.
    pub fn install_code(&mut self, address: Address, code: &[u8]) -> Result<(), StateError> {
        let stored = self.codec.encode(&address, code)?;
        debug!(address = %address, code_len = code.len(), "Installing contract code");
        self.ledger.put_state(&account_key(&address), stored)
    }

    fn has_code(&self, address: Address) -> Result<bool, StateError> {
        Ok(self
            .ledger
            .get_state(&account_key(&address))?
            .is_some_and(|stored| !stored.is_empty()))
    }

    fn check_policy(&self, address: Address, operation: &'static str) -> Result<(), StateError> {
        match self.policy {
            AccountPolicy::Disabled => Err(StateError::OperationDisabled(operation)),
            AccountPolicy::RequireExisting if !self.has_code(address)? => {
                Err(StateError::AccountNotFound(address))
            }
            AccountPolicy::RequireExisting | AccountPolicy::Unconditional => Ok(()),
        }
    }
}

impl<L: LedgerStore + ?Sized, C: CodeCodec> StateManager for LedgerStateManager<'_, L, C> {
    fn get_account(&self, address: Address) -> Result<Account, StateError> {
        let code = self.get_code(address)?;
        Ok(Account::new(address, code))
    }

    fn get_storage(&self, address: Address, key: Word) -> Result<Word, StateError> {
        let value = self.ledger.get_state(&storage_key(&address, &key))?;
        Ok(value.map_or(Word::ZERO, |bytes| Word::from_slice_padded(&bytes)))
    }

    fn set_storage(&mut self, address: Address, key: Word, value: Word) -> Result<(), StateError> {
        trace!(address = %address, ?key, ?value, "Storage write");
        self.ledger
            .put_state(&storage_key(&address, &key), value.as_bytes().to_vec())
    }

    fn update_account(&mut self, account: &Account) -> Result<(), StateError> {
        self.check_policy(account.address, "UpdateAccount")?;
        let stored = self.codec.encode(&account.address, &account.code)?;
        debug!(address = %account.address, policy = ?self.policy, "Updating account code");
        self.ledger.put_state(&account_key(&account.address), stored)
    }

    fn remove_account(&mut self, address: Address) -> Result<(), StateError> {
        self.check_policy(address, "RemoveAccount")?;
        debug!(address = %address, policy = ?self.policy, "Removing account code");
        self.ledger.del_state(&account_key(&address))
    }
}

// =============================================================================
// TESTS
// =============================================================================
