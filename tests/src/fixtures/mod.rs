//! # Shared Test Fixtures
//!
//! Certificates, a `SimpleStorage` engine and a ledger harness that commits
//! an invocation's writes only when it succeeds, the way the host ledger
//! does.

pub mod engine;

pub use certs::*;
pub use engine::*;

use ledger_evm::prelude::*;

/// Router plus committed ledger state.
pub struct Harness {
    /// Committed ledger contents.
    pub ledger: InMemoryLedger,
    /// Router under test.
    pub service: EvmLedgerService<SimpleStorageEngine>,
}

impl Harness {
    /// Harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Harness with `config`.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            ledger: InMemoryLedger::new(),
            service: EvmLedgerService::with_x509(SimpleStorageEngine::new(), config),
        }
    }

    /// Runs one invocation in its own ledger transaction.
    pub fn invoke(&mut self, creator: &[u8], arg0: &str, arg1: &str) -> Response {
        let args = [arg0.as_bytes().to_vec(), arg1.as_bytes().to_vec()];
        let service = &self.service;
        self.ledger
            .execute(|store| service.invoke(store, creator, &args))
    }

    /// Deploys `bytecode_hex` as `creator`.
    pub fn deploy(&mut self, creator: &[u8], bytecode_hex: &str) -> Response {
        self.invoke(creator, &Address::ZERO.to_hex(), bytecode_hex)
    }

    /// Deploys `SimpleStorage` and returns its address hex.
    pub fn deploy_simple_storage(&mut self, creator: &[u8]) -> String {
        let response = self.deploy(creator, DEPLOY_BYTECODE);
        assert!(response.is_ok(), "deploy failed: {}", response.message);
        String::from_utf8(response.payload).unwrap_or_default()
    }

    /// Retrieves code at `address_hex`.
    pub fn get_code(&mut self, address_hex: &str) -> Response {
        let sentinel = self.service.config().get_code_sentinel.clone();
        self.invoke(&[], &sentinel, address_hex)
    }

    /// Number of engine executions so far.
    pub fn executions(&self) -> usize {
        self.service.engine().executions()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
