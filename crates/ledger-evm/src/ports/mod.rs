//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the routing core and the outside world.
//!
//! - **Driving Ports (Inbound)**: `StateManager`, `InvocationApi`
//! - **Driven Ports (Outbound)**: `LedgerStore`, `ExecutionEngine`, `IdentityResolver`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
