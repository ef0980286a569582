//! # Sequence Allocator
//!
//! Per-caller deployment counter, persisted as a storage cell under the
//! caller's own address at [`sequence_key`]. An absent cell reads as zero.
//!
//! Read and write happen without locking: the host ledger's transaction
//! isolation is what keeps two deployments by the same caller from
//! allocating the same value.

use crate::domain::services::sequence_key;
use crate::domain::value_objects::{Address, U256};
use crate::errors::StateError;
use crate::ports::inbound::StateManager;
use tracing::debug;

/// Current counter value for `caller`, without advancing it.
pub fn peek_sequence<S: StateManager + ?Sized>(state: &S, caller: Address) -> Result<u64, StateError> {
    let word = state.get_storage(caller, sequence_key())?;
    let value = word.to_u256();
    if value > U256::from(u64::MAX) {
        return Err(StateError::SequenceOverflow(caller));
    }
    Ok(value.as_u64())
}

/// Allocates the next deployment sequence for `caller`.
///
/// Returns the stored value (0 on first use) and advances the stored counter
/// by one.
pub fn next_sequence<S: StateManager + ?Sized>(
    state: &mut S,
    caller: Address,
) -> Result<u64, StateError> {
    let allocated = peek_sequence(state, caller)?;
    let next = allocated
        .checked_add(1)
        .ok_or(StateError::SequenceOverflow(caller))?;
    state.set_storage(caller, sequence_key(), next.into())?;
    debug!(caller = %caller, sequence = allocated, "Allocated deployment sequence");
    Ok(allocated)
}

// =============================================================================
// TESTS
// =============================================================================
