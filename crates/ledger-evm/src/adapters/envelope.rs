//! # Code Envelope
//!
//! Optional packaging of account code before it is written to the ledger.
//! `TarGzEnvelope` wraps code in a gzip-compressed tar archive whose single
//! entry is named after the owning address; decoding checks that name so code
//! copied under the wrong key is rejected.

use crate::domain::entities::CodeEncoding;
use crate::domain::value_objects::Address;
use crate::errors::StateError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Read;

/// Converts account code to and from its stored form.
pub trait CodeCodec {
    /// Wraps `code` for storage under `address`.
    fn encode(&self, address: &Address, code: &[u8]) -> Result<Vec<u8>, StateError>;

    /// Unwraps a stored blob read from under `address`.
    fn decode(&self, address: &Address, stored: Vec<u8>) -> Result<Vec<u8>, StateError>;
}

/// Stores code bytes unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawCode;

impl CodeCodec for RawCode {
    fn encode(&self, _address: &Address, code: &[u8]) -> Result<Vec<u8>, StateError> {
        Ok(code.to_vec())
    }

    fn decode(&self, _address: &Address, stored: Vec<u8>) -> Result<Vec<u8>, StateError> {
        Ok(stored)
    }
}

/// Gzip-compressed tar archive with one entry named by the address hex.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarGzEnvelope;

impl TarGzEnvelope {
    fn io_error(err: std::io::Error) -> StateError {
        StateError::Envelope(err.to_string())
    }
}

impl CodeCodec for TarGzEnvelope {
    fn encode(&self, address: &Address, code: &[u8]) -> Result<Vec<u8>, StateError> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

        let mut header = tar::Header::new_gnu();
        header.set_size(code.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, address.to_hex(), code)
            .map_err(Self::io_error)?;

        let encoder = builder.into_inner().map_err(Self::io_error)?;
        encoder.finish().map_err(Self::io_error)
    }

    fn decode(&self, address: &Address, stored: Vec<u8>) -> Result<Vec<u8>, StateError> {
        let mut archive = tar::Archive::new(GzDecoder::new(stored.as_slice()));
        let mut code = None;

        for entry in archive.entries().map_err(Self::io_error)? {
            let mut entry = entry.map_err(Self::io_error)?;
            let name = entry
                .path()
                .map_err(Self::io_error)?
                .to_string_lossy()
                .into_owned();

            if Address::from_hex(&name).ok() != Some(*address) {
                return Err(StateError::StorageDecode {
                    expected: *address,
                    found: name,
                });
            }

            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).map_err(Self::io_error)?;
            code = Some(buf);
        }

        code.ok_or_else(|| StateError::Envelope("archive has no entries".to_string()))
    }
}

impl CodeCodec for CodeEncoding {
    fn encode(&self, address: &Address, code: &[u8]) -> Result<Vec<u8>, StateError> {
        match self {
            Self::Raw => RawCode.encode(address, code),
            Self::TarGz => TarGzEnvelope.encode(address, code),
        }
    }

    fn decode(&self, address: &Address, stored: Vec<u8>) -> Result<Vec<u8>, StateError> {
        match self {
            Self::Raw => RawCode.decode(address, stored),
            Self::TarGz => TarGzEnvelope.decode(address, stored),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
