//! Router and destination identities.
//!
//! Both are the same keys-and-certificate block on the wire: a 256-byte
//! encryption public key, a 128-byte signing-key field, then the
//! certificate. The certificate is parsed last but governs the signing
//! key's width, so shorter keys sit right-justified in the fixed field
//! with zero padding on the left.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use veilroute_crypto::{Certificate, PublicKey, Reader, SigningPublicKey};

use crate::error::Result;
use crate::types::IdentHash;

/// Fixed width of the signing-key slot in the serialized block.
pub const SIGNING_KEY_FIELD_SIZE: usize = 128;

/// Shared wire block behind [`RouterIdentity`] and [`Destination`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysAndCert {
    public_key: PublicKey,
    signing_public_key: SigningPublicKey,
    certificate: Certificate,
}

impl KeysAndCert {
    /// Build with the canonical certificate for the signing key's
    /// algorithm.
    pub fn new(public_key: PublicKey, signing_public_key: SigningPublicKey) -> Self {
        let certificate = Certificate::new(signing_public_key.key_type());
        KeysAndCert {
            public_key,
            signing_public_key,
            certificate,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signing_public_key(&self) -> &SigningPublicKey {
        &self.signing_public_key
    }

    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let key = self.signing_public_key.as_bytes();
        let mut out = Vec::with_capacity(
            self.public_key.len() + SIGNING_KEY_FIELD_SIZE + 7,
        );
        out.extend_from_slice(self.public_key.as_bytes());
        out.resize(out.len() + SIGNING_KEY_FIELD_SIZE - key.len(), 0);
        out.extend_from_slice(key);
        out.extend_from_slice(&self.certificate.to_bytes());
        out
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        // The encryption key slot is fixed; the certificate behind it
        // names the algorithm and is validated against the slot width.
        let enc = r.read_bytes(256)?;
        let field = r.read_bytes(SIGNING_KEY_FIELD_SIZE)?;
        let certificate = Certificate::read(r)?;

        let key_type = certificate.signing_key_type();
        let key_bytes = &field[SIGNING_KEY_FIELD_SIZE - key_type.public_key_len()..];

        let public_key = PublicKey::new(certificate.crypto_key_type(), enc)?;
        let signing_public_key = SigningPublicKey::new(key_type, key_bytes)?;
        Ok(KeysAndCert {
            public_key,
            signing_public_key,
            certificate,
        })
    }

    /// SHA-256 of the serialized block; the identity's network-database
    /// address.
    pub fn hash(&self) -> IdentHash {
        let digest = Sha256::digest(self.to_bytes());
        IdentHash::from_bytes(digest.into())
    }
}

/// A router's public keys plus certificate; its hash is the router's
/// address in the network database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterIdentity(KeysAndCert);

impl RouterIdentity {
    pub fn new(public_key: PublicKey, signing_public_key: SigningPublicKey) -> Self {
        RouterIdentity(KeysAndCert::new(public_key, signing_public_key))
    }

    pub fn public_key(&self) -> &PublicKey {
        self.0.public_key()
    }

    pub fn signing_public_key(&self) -> &SigningPublicKey {
        self.0.signing_public_key()
    }

    pub fn certificate(&self) -> &Certificate {
        self.0.certificate()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(RouterIdentity(KeysAndCert::read(r)?))
    }

    pub fn hash(&self) -> IdentHash {
        self.0.hash()
    }
}

/// An application endpoint's public keys plus certificate; the client
/// analogue of [`RouterIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination(KeysAndCert);

impl Destination {
    pub fn new(public_key: PublicKey, signing_public_key: SigningPublicKey) -> Self {
        Destination(KeysAndCert::new(public_key, signing_public_key))
    }

    pub fn public_key(&self) -> &PublicKey {
        self.0.public_key()
    }

    pub fn signing_public_key(&self) -> &SigningPublicKey {
        self.0.signing_public_key()
    }

    pub fn certificate(&self) -> &Certificate {
        self.0.certificate()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Destination(KeysAndCert::read(r)?))
    }

    pub fn hash(&self) -> IdentHash {
        self.0.hash()
    }
}
