//! # In-Memory Ledger
//!
//! `LedgerStore` implementation for tests and local tooling.
//! Production hosts pass their own transaction-scoped view instead.

use crate::domain::entities::Response;
use crate::errors::StateError;
use crate::ports::outbound::LedgerStore;
use std::collections::BTreeMap;

/// Committed key-value state.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates stored keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }

    /// Opens a write-buffering transaction over this ledger.
    pub fn begin(&mut self) -> LedgerTransaction<'_> {
        LedgerTransaction {
            base: self,
            pending: BTreeMap::new(),
        }
    }

    /// Runs `f` in a transaction, committing only if it returns success.
    ///
    /// Mirrors the host ledger: writes issued by a failed invocation are
    /// discarded.
    pub fn execute<F>(&mut self, f: F) -> Response
    where
        F: FnOnce(&mut dyn LedgerStore) -> Response,
    {
        let mut tx = self.begin();
        let response = f(&mut tx);
        if response.is_ok() {
            tx.commit();
        }
        response
    }
}

impl LedgerStore for InMemoryLedger {
    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put_state(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn del_state(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Uncommitted writes layered over an [`InMemoryLedger`].
///
/// Reads see the transaction's own writes. Dropping without `commit`
/// discards them.
#[derive(Debug)]
pub struct LedgerTransaction<'a> {
    base: &'a mut InMemoryLedger,
    /// `None` marks a pending delete.
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl LedgerTransaction<'_> {
    /// Number of buffered writes and deletes.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Applies buffered writes to the base ledger.
    pub fn commit(self) {
        for (key, value) in self.pending {
            match value {
                Some(value) => {
                    self.base.entries.insert(key, value);
                }
                None => {
                    self.base.entries.remove(&key);
                }
            }
        }
    }
}

impl LedgerStore for LedgerTransaction<'_> {
    fn get_state(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.pending.get(key) {
            Some(pending) => Ok(pending.clone()),
            None => self.base.get_state(key),
        }
    }

    fn put_state(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        self.pending.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.pending.insert(key.to_vec(), None);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
