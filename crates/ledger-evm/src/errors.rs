//! # Error Types
//!
//! Errors for each layer, and the invocation-level taxonomy they lift into.

use crate::domain::value_objects::Address;
use thiserror::Error;

// =============================================================================
// ADDRESS ERRORS
// =============================================================================

/// Errors decoding an address.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AddressError {
    /// Decoded bytes do not match the address width.
    #[error("address has {actual} bytes but should have {expected} bytes")]
    InvalidLength {
        /// Required width in bytes.
        expected: usize,
        /// Width that was decoded.
        actual: usize,
    },

    /// Input is not valid hex.
    #[error("invalid address hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

// =============================================================================
// IDENTITY ERRORS
// =============================================================================

/// Errors turning caller identity bytes into an address.
#[derive(Debug, Error, Clone)]
pub enum IdentityError {
    /// The serialized identity envelope could not be decoded.
    #[error("failed to unmarshal serialized identity: {0}")]
    Envelope(#[from] prost::DecodeError),

    /// The certificate is missing, not PEM, or not valid X.509.
    #[error("failed to parse certificate: {0}")]
    Certificate(String),

    /// The certificate carries a non elliptic-curve public key.
    #[error("public key type is not yet supported: {algorithm}")]
    UnsupportedKeyType {
        /// Dotted OID of the key algorithm.
        algorithm: String,
    },

    /// The public key could not be re-encoded.
    #[error("error marshalling public key: {0}")]
    KeyEncoding(String),
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Errors from the ledger-backed state adapter.
#[derive(Debug, Error, Clone)]
pub enum StateError {
    /// The underlying ledger failed a read or write.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// Stored code is wrapped for a different account.
    #[error("stored code name does not match: entry {found}, account {expected}")]
    StorageDecode {
        /// Account the code was read for.
        expected: Address,
        /// Entry name found in the envelope.
        found: String,
    },

    /// Stored code envelope is unreadable.
    #[error("failed to decode code envelope: {0}")]
    Envelope(String),

    /// Update or remove targeted an address with no code.
    #[error("account does not exist: {0}")]
    AccountNotFound(Address),

    /// Update or remove is not permitted by the configured policy.
    #[error("NOT AN ALLOWED OPERATION: {0}")]
    OperationDisabled(&'static str),

    /// The deployment counter cannot advance any further.
    #[error("deployment sequence exhausted for {0}")]
    SequenceOverflow(Address),
}

// =============================================================================
// ENGINE ERRORS
// =============================================================================

/// Failures reported by the execution engine.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// Execution reverted.
    #[error("execution reverted: {0}")]
    Reverted(String),

    /// The gas budget was exhausted.
    #[error("out of gas")]
    OutOfGas,

    /// A state access made by the engine failed.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Any other engine failure.
    #[error("{0}")]
    Failed(String),
}

// =============================================================================
// INVOCATION ERRORS
// =============================================================================

/// Everything that can fail one invocation.
///
/// The `Display` text is what the caller receives in the error response.
#[derive(Debug, Error, Clone)]
pub enum InvocationError {
    /// Wrong number of positional arguments.
    #[error("expects 2 args, got {0}")]
    ArgumentCount(usize),

    /// An argument is not valid hex.
    #[error("failed to decode {what}: {source}")]
    HexDecode {
        /// Argument being decoded.
        what: &'static str,
        /// Underlying hex error.
        #[source]
        source: hex::FromHexError,
    },

    /// An address argument has the wrong width.
    #[error("failed to get {what}: {source}")]
    AddressFormat {
        /// Argument being decoded.
        what: &'static str,
        /// Underlying address error.
        #[source]
        source: AddressError,
    },

    /// The caller identity could not be resolved.
    #[error("failed to get caller address: {0}")]
    IdentityParse(IdentityError),

    /// The caller certificate uses a key type other than elliptic curve.
    #[error("failed to get caller address: public key type is not yet supported: {0}")]
    UnsupportedKeyType(String),

    /// Stored code belongs to a different account.
    #[error("failed to retrieve contract code: {0}")]
    StorageDecode(StateError),

    /// Update/remove on a missing account.
    #[error("{0}")]
    AccountNotFound(StateError),

    /// Update/remove rejected by policy.
    #[error("{0}")]
    OperationDisabled(StateError),

    /// Engine failed or reverted.
    #[error("failed to execute contract: {0}")]
    EngineExecution(EngineError),

    /// Deployment returned no runtime bytecode.
    #[error("nil bytecode: deployment at {0} returned no runtime code")]
    CodeNotFound(Address),

    /// Underlying ledger failure.
    #[error("{0}")]
    Ledger(StateError),
}

impl InvocationError {
    /// Hex decode failure for the named argument.
    #[must_use]
    pub fn hex(what: &'static str, source: hex::FromHexError) -> Self {
        Self::HexDecode { what, source }
    }

    /// Address decode failure for the named argument.
    ///
    /// Bad hex inside an address argument is still reported as a hex error.
    #[must_use]
    pub fn address(what: &'static str, source: AddressError) -> Self {
        match source {
            AddressError::Hex(source) => Self::HexDecode { what, source },
            source @ AddressError::InvalidLength { .. } => Self::AddressFormat { what, source },
        }
    }
}

impl From<IdentityError> for InvocationError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UnsupportedKeyType { algorithm } => Self::UnsupportedKeyType(algorithm),
            other => Self::IdentityParse(other),
        }
    }
}

impl From<StateError> for InvocationError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::StorageDecode { .. } | StateError::Envelope(_) => Self::StorageDecode(err),
            StateError::AccountNotFound(_) => Self::AccountNotFound(err),
            StateError::OperationDisabled(_) => Self::OperationDisabled(err),
            StateError::Ledger(_) | StateError::SequenceOverflow(_) => Self::Ledger(err),
        }
    }
}

impl From<EngineError> for InvocationError {
    fn from(err: EngineError) -> Self {
        match err {
            // State failures raised under the engine keep their own category.
            EngineError::State(state) => state.into(),
            other => Self::EngineExecution(other),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
