//! # ledger-evm Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures/        # Certificates, SimpleStorage engine, ledger harness
//! │   ├── certs.rs
//! │   └── engine.rs
//! │
//! └── integration/     # Router flows against the in-memory ledger
//!     ├── flows.rs
//!     ├── identity.rs
//!     ├── policy.rs
//!     └── logging.rs
//!
//! benches/
//! └── router_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-evm-tests
//!
//! # By category
//! cargo test -p ledger-evm-tests integration::flows
//! cargo test -p ledger-evm-tests integration::policy
//!
//! # Benchmarks
//! cargo bench -p ledger-evm-tests
//! ```

pub mod fixtures;
