//! # Domain Layer (Inner Hexagon)
//!
//! Pure logic for addresses, accounts and ledger key layout.
//! NO I/O and NO ledger access happen here.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
