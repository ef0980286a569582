//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the ports.
//!
//! - `state_adapter`: `StateManager` over a `LedgerStore`
//! - `envelope`: optional code packaging for stored accounts
//! - `identity`: X.509 `IdentityResolver`
//! - `memory_ledger`: in-memory `LedgerStore` with commit/rollback

pub mod envelope;
pub mod identity;
pub mod memory_ledger;
pub mod state_adapter;

pub use envelope::*;
pub use identity::*;
pub use memory_ledger::*;
pub use state_adapter::*;
