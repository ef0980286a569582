//! # Domain Services
//!
//! Pure functions for address derivation and ledger key layout.
//! These functions are deterministic and have no side effects.

use crate::domain::value_objects::{Address, Word};
use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

// =============================================================================
// CONTRACT ADDRESS DERIVATION
// =============================================================================

/// Derives the address of the contract a caller deploys with `sequence`.
///
/// Address = ripemd160(caller ++ `be_u64(sequence)`)
///
/// No uniqueness check is made against existing state: replaying a
/// (caller, sequence) pair yields the same address.
#[must_use]
pub fn derive_contract_address(caller: Address, sequence: u64) -> Address {
    let mut data = Vec::with_capacity(Address::LEN + 8);
    data.extend_from_slice(caller.as_bytes());
    data.extend_from_slice(&sequence.to_be_bytes());

    let digest = Ripemd160::digest(&data);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest);
    Address::new(addr)
}

// =============================================================================
// IDENTITY ADDRESS DERIVATION
// =============================================================================

/// Derives an account address from a DER-encoded public key.
///
/// Address = `sha3_256(public_key)`\[12:\]
#[must_use]
pub fn address_from_public_key(public_key_der: &[u8]) -> Address {
    let digest = Sha3_256::digest(public_key_der);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..32]);
    Address::new(addr)
}

// =============================================================================
// LEDGER KEY LAYOUT
// =============================================================================

/// Ledger key holding the code of `address`: the raw address bytes.
#[must_use]
pub fn account_key(address: &Address) -> Vec<u8> {
    address.as_bytes().to_vec()
}

/// Ledger key holding one storage cell: address bytes ++ cell key bytes.
///
/// Both sides are fixed width so no separator is needed.
#[must_use]
pub fn storage_key(address: &Address, key: &Word) -> Vec<u8> {
    let mut composite = Vec::with_capacity(Address::LEN + Word::LEN);
    composite.extend_from_slice(address.as_bytes());
    composite.extend_from_slice(key.as_bytes());
    composite
}

/// ASCII tag naming the per-caller deployment counter cell.
pub const SEQUENCE_TAG: &[u8] = b"ledger-evm/sequence";

/// Storage key of the deployment counter inside the caller's own namespace.
///
/// The tag is left-aligned and zero padded. Engine-assigned keys are slot
/// numbers or keccak digests, so a collision is not expected, but nothing
/// here proves the two key spaces disjoint.
#[must_use]
pub fn sequence_key() -> Word {
    Word::from_slice_padded(SEQUENCE_TAG)
}

// =============================================================================
// TESTS
// =============================================================================
