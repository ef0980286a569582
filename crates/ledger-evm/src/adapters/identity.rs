//! # X.509 Identity Resolver
//!
//! Turns the invocation creator into an account address:
//!
//! 1. Decode the protobuf `SerializedIdentity` envelope (MSP id + PEM certificate)
//! 2. Parse the certificate and take its SubjectPublicKeyInfo
//! 3. Require an elliptic-curve key
//! 4. Address = `sha3_256(der(spki))`\[12:\]

use crate::domain::services::address_from_public_key;
use crate::domain::value_objects::Address;
use crate::errors::IdentityError;
use crate::ports::outbound::IdentityResolver;
use prost::Message;
use tracing::debug;
use x509_cert::der::{DecodePem, Encode};
use x509_cert::spki::ObjectIdentifier;
use x509_cert::Certificate;

/// `id-ecPublicKey` (RFC 5480).
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

const PEM_BEGIN: &str = "-----BEGIN";
const PEM_END: &str = "-----END";
const PEM_DASHES: &str = "-----";

/// Creator envelope: the membership provider id and its PEM certificate.
#[derive(Clone, PartialEq, Message)]
pub struct SerializedIdentity {
    /// Membership service provider id.
    #[prost(string, tag = "1")]
    pub mspid: String,
    /// PEM-encoded X.509 certificate.
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

impl SerializedIdentity {
    /// Builds an envelope.
    pub fn new(mspid: impl Into<String>, id_bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mspid: mspid.into(),
            id_bytes: id_bytes.into(),
        }
    }

    /// Protobuf wire encoding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

/// Resolves creators carrying X.509 certificates with EC public keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct X509IdentityResolver;

impl X509IdentityResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Derives the address of a PEM certificate directly.
    pub fn resolve_certificate(&self, pem: &[u8]) -> Result<Address, IdentityError> {
        let block = pem_block(pem)?;
        let cert = Certificate::from_pem(block)
            .map_err(|e| IdentityError::Certificate(e.to_string()))?;

        let spki = &cert.tbs_certificate.subject_public_key_info;
        if spki.algorithm.oid != ID_EC_PUBLIC_KEY {
            return Err(IdentityError::UnsupportedKeyType {
                algorithm: spki.algorithm.oid.to_string(),
            });
        }

        let der = spki
            .to_der()
            .map_err(|e| IdentityError::KeyEncoding(e.to_string()))?;
        Ok(address_from_public_key(&der))
    }
}

impl IdentityResolver for X509IdentityResolver {
    fn resolve(&self, creator: &[u8]) -> Result<Address, IdentityError> {
        let identity = SerializedIdentity::decode(creator)?;
        let address = self.resolve_certificate(&identity.id_bytes)?;
        debug!(mspid = %identity.mspid, caller = %address, "Resolved caller identity");
        Ok(address)
    }
}

/// Slices out the first PEM block. Text before its `BEGIN` line and after
/// its `END` line is ignored, so chains resolve to their leaf certificate.
fn pem_block(data: &[u8]) -> Result<&[u8], IdentityError> {
    let no_pem = || IdentityError::Certificate("no pem data found".to_string());
    let text = std::str::from_utf8(data).map_err(|_| no_pem())?;
    let start = text.find(PEM_BEGIN).ok_or_else(no_pem)?;
    let block = &text[start..];

    let label_start = block.find(PEM_END).ok_or_else(no_pem)? + PEM_END.len();
    let label_len = block[label_start..].find(PEM_DASHES).ok_or_else(no_pem)?;
    Ok(block[..label_start + label_len + PEM_DASHES.len()].as_bytes())
}

// =============================================================================
// TESTS
// =============================================================================
