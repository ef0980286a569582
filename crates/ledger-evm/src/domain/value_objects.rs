//! # Value Objects
//!
//! Immutable domain primitives shared by the state adapter and the router.
//! These types represent concepts that are defined by their value, not identity.

use crate::errors::AddressError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// Re-export U256 from primitive-types for 256-bit words
pub use primitive_types::U256;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account address.
///
/// The canonical textual form is 40 uppercase hex characters. The all-zero
/// address is reserved: as a call target it means "deploy a new contract".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Address width in bytes.
    pub const LEN: usize = 20;

    /// Length of the canonical hex representation.
    pub const HEX_LEN: usize = 2 * Self::LEN;

    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice, which must be exactly 20 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; 20] = slice
            .try_into()
            .map_err(|_| AddressError::InvalidLength {
                expected: Self::LEN,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Decodes an address from hex. Either letter case is accepted.
    pub fn from_hex(text: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(text)?;
        Self::from_slice(&bytes)
    }

    /// Canonical uppercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// WORD (32 bytes)
// =============================================================================

/// A 32-byte word: storage cell keys and values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Word(pub [u8; 32]);

impl Word {
    /// Word width in bytes.
    pub const LEN: usize = 32;

    /// The zero word.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a word from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Copies `slice` into the front of a zeroed word.
    ///
    /// Shorter input is zero padded on the right, longer input is truncated.
    #[must_use]
    pub fn from_slice_padded(slice: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        let len = slice.len().min(Self::LEN);
        bytes[..len].copy_from_slice(&slice[..len]);
        Self(bytes)
    }

    /// Creates a word from a U256 (big-endian).
    #[must_use]
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }

    /// Converts to U256 (big-endian).
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero word.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(0x{})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Word {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self::from_u256(U256::from(value))
    }
}

// =============================================================================
// TESTS
// =============================================================================
