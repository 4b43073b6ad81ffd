//! Algorithm tags for signing and encryption keys.
//!
//! Each signing variant fixes its key and signature byte widths; the
//! dispatch to the actual sign/verify routines lives in
//! [`crate::keys`]. Adding an algorithm means adding a variant here and
//! its row in the length tables, nothing else changes shape.

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};

/// Signature algorithm identifier carried (directly or implied) by a
/// certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum SigningKeyType {
    /// Legacy network default: DSA over the fixed 1024-bit parameters,
    /// SHA-1 digest.
    DsaSha1 = 0,
    /// ECDSA over NIST P-256, SHA-256 digest, fixed-width signatures.
    EcdsaSha256P256 = 1,
    /// ECDSA over NIST P-384, SHA-384 digest, fixed-width signatures.
    EcdsaSha384P384 = 2,
    /// Ed25519; the private key is the 32-byte seed.
    EdDsaSha512Ed25519 = 7,
}

impl SigningKeyType {
    /// Decode a wire type code. Codes 3-6 (P-521 and the RSA family) are
    /// reserved by the network but not supported here; they fail like any
    /// other unknown code so an unverifiable identity is never accepted.
    pub fn from_u16(value: u16) -> Result<Self> {
        match value {
            0 => Ok(SigningKeyType::DsaSha1),
            1 => Ok(SigningKeyType::EcdsaSha256P256),
            2 => Ok(SigningKeyType::EcdsaSha384P384),
            7 => Ok(SigningKeyType::EdDsaSha512Ed25519),
            other => Err(CryptoError::UnsupportedSigningKeyType(other)),
        }
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Public key width in bytes.
    pub fn public_key_len(self) -> usize {
        match self {
            SigningKeyType::DsaSha1 => 128,
            SigningKeyType::EcdsaSha256P256 => 64,
            SigningKeyType::EcdsaSha384P384 => 96,
            SigningKeyType::EdDsaSha512Ed25519 => 32,
        }
    }

    /// Private key width in bytes.
    pub fn private_key_len(self) -> usize {
        match self {
            SigningKeyType::DsaSha1 => 20,
            SigningKeyType::EcdsaSha256P256 => 32,
            SigningKeyType::EcdsaSha384P384 => 48,
            SigningKeyType::EdDsaSha512Ed25519 => 32,
        }
    }

    /// Signature width in bytes.
    pub fn signature_len(self) -> usize {
        match self {
            SigningKeyType::DsaSha1 => 40,
            SigningKeyType::EcdsaSha256P256 => 64,
            SigningKeyType::EcdsaSha384P384 => 96,
            SigningKeyType::EdDsaSha512Ed25519 => 64,
        }
    }
}

/// Encryption key algorithm identifier. The core never performs the
/// asymmetric encryption itself (that belongs to the tunnel layer); it
/// validates and carries the key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum CryptoKeyType {
    /// ElGamal over the 2048-bit network modulus.
    ElGamal2048 = 0,
}

impl CryptoKeyType {
    pub fn from_u16(value: u16) -> Result<Self> {
        match value {
            0 => Ok(CryptoKeyType::ElGamal2048),
            other => Err(CryptoError::UnsupportedCryptoKeyType(other)),
        }
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }

    pub fn public_key_len(self) -> usize {
        match self {
            CryptoKeyType::ElGamal2048 => 256,
        }
    }

    pub fn private_key_len(self) -> usize {
        match self {
            CryptoKeyType::ElGamal2048 => 256,
        }
    }
}
