//! Asymmetric key and signature containers.
//!
//! All of these are byte buffers tagged with their algorithm; construction
//! validates the buffer length against the algorithm's table and fails
//! with a length mismatch otherwise. Equality and ordering are byte-wise.
//! Sign and verify dispatch on the signing key type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, Result};
use crate::keytypes::{CryptoKeyType, SigningKeyType};
use crate::{dsa, ecdsa, eddsa};

fn check_len(role: &'static str, expected: usize, data: &[u8]) -> Result<()> {
    if data.len() != expected {
        return Err(CryptoError::KeyLengthMismatch {
            role,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

fn hex_prefix(data: &[u8]) -> String {
    hex::encode(&data[..data.len().min(4)])
}

/// Public encryption key. Carried and validated here, consumed by the
/// tunnel layer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    key_type: CryptoKeyType,
    data: Vec<u8>,
}

impl PublicKey {
    pub fn new(key_type: CryptoKeyType, data: &[u8]) -> Result<Self> {
        check_len("public key", key_type.public_key_len(), data)?;
        Ok(PublicKey {
            key_type,
            data: data.to_vec(),
        })
    }

    pub fn key_type(&self) -> CryptoKeyType {
        self.key_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({:?}, {}...)", self.key_type, hex_prefix(&self.data))
    }
}

/// Private encryption key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrivateKey {
    key_type: CryptoKeyType,
    data: Vec<u8>,
}

impl PrivateKey {
    pub fn new(key_type: CryptoKeyType, data: &[u8]) -> Result<Self> {
        check_len("private key", key_type.private_key_len(), data)?;
        Ok(PrivateKey {
            key_type,
            data: data.to_vec(),
        })
    }

    pub fn key_type(&self) -> CryptoKeyType {
        self.key_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material stays out of logs.
        write!(f, "PrivateKey({:?}, {} bytes)", self.key_type, self.data.len())
    }
}

/// Public signing key. Verification is total: any malformed input makes
/// it return `false`, never panic or error.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SigningPublicKey {
    key_type: SigningKeyType,
    data: Vec<u8>,
}

impl SigningPublicKey {
    pub fn new(key_type: SigningKeyType, data: &[u8]) -> Result<Self> {
        check_len("signing public key", key_type.public_key_len(), data)?;
        Ok(SigningPublicKey {
            key_type,
            data: data.to_vec(),
        })
    }

    /// Derive the public half of a signing key pair.
    pub fn from_private(private: &SigningPrivateKey) -> Result<Self> {
        let data = match private.key_type() {
            SigningKeyType::DsaSha1 => dsa::derive_public(private.as_bytes())?,
            SigningKeyType::EcdsaSha256P256 => ecdsa::derive_public_p256(private.as_bytes())?,
            SigningKeyType::EcdsaSha384P384 => ecdsa::derive_public_p384(private.as_bytes())?,
            SigningKeyType::EdDsaSha512Ed25519 => eddsa::derive_public(private.as_bytes())?,
        };
        SigningPublicKey::new(private.key_type(), &data)
    }

    pub fn key_type(&self) -> SigningKeyType {
        self.key_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check `signature` over `message`. A signature tagged with a
    /// different algorithm than this key can never verify.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if signature.key_type() != self.key_type {
            return false;
        }
        match self.key_type {
            SigningKeyType::DsaSha1 => dsa::verify(&self.data, message, signature.as_bytes()),
            SigningKeyType::EcdsaSha256P256 => {
                ecdsa::verify_p256(&self.data, message, signature.as_bytes())
            }
            SigningKeyType::EcdsaSha384P384 => {
                ecdsa::verify_p384(&self.data, message, signature.as_bytes())
            }
            SigningKeyType::EdDsaSha512Ed25519 => {
                eddsa::verify(&self.data, message, signature.as_bytes())
            }
        }
    }
}

impl fmt::Debug for SigningPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SigningPublicKey({:?}, {}...)",
            self.key_type,
            hex_prefix(&self.data)
        )
    }
}

/// Private signing key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SigningPrivateKey {
    key_type: SigningKeyType,
    data: Vec<u8>,
}

impl SigningPrivateKey {
    pub fn new(key_type: SigningKeyType, data: &[u8]) -> Result<Self> {
        check_len("signing private key", key_type.private_key_len(), data)?;
        Ok(SigningPrivateKey {
            key_type,
            data: data.to_vec(),
        })
    }

    /// Generate a fresh random key for the given algorithm.
    pub fn generate(key_type: SigningKeyType) -> Result<Self> {
        let data = match key_type {
            SigningKeyType::DsaSha1 => dsa::generate_private(),
            SigningKeyType::EcdsaSha256P256 => ecdsa::generate_private_p256(),
            SigningKeyType::EcdsaSha384P384 => ecdsa::generate_private_p384(),
            SigningKeyType::EdDsaSha512Ed25519 => eddsa::generate_seed(),
        };
        SigningPrivateKey::new(key_type, &data)
    }

    pub fn key_type(&self) -> SigningKeyType {
        self.key_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Sign `message`. Fails only on defective key material.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let data = match self.key_type {
            SigningKeyType::DsaSha1 => dsa::sign(&self.data, message)?,
            SigningKeyType::EcdsaSha256P256 => ecdsa::sign_p256(&self.data, message)?,
            SigningKeyType::EcdsaSha384P384 => ecdsa::sign_p384(&self.data, message)?,
            SigningKeyType::EdDsaSha512Ed25519 => eddsa::sign(&self.data, message)?,
        };
        Signature::new(self.key_type, &data)
    }
}

impl fmt::Debug for SigningPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SigningPrivateKey({:?}, {} bytes)",
            self.key_type,
            self.data.len()
        )
    }
}

/// Detached signature tagged with its algorithm.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Signature {
    key_type: SigningKeyType,
    data: Vec<u8>,
}

impl Signature {
    pub fn new(key_type: SigningKeyType, data: &[u8]) -> Result<Self> {
        check_len("signature", key_type.signature_len(), data)?;
        Ok(Signature {
            key_type,
            data: data.to_vec(),
        })
    }

    pub fn key_type(&self) -> SigningKeyType {
        self.key_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:?}, {}...)", self.key_type, hex_prefix(&self.data))
    }
}

pub const SESSION_KEY_SIZE: usize = 32;

/// Symmetric session key negotiated by a transport handshake.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKey([u8; SESSION_KEY_SIZE]);

impl SessionKey {
    pub fn from_bytes(bytes: [u8; SESSION_KEY_SIZE]) -> Self {
        SessionKey(bytes)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        check_len("session key", SESSION_KEY_SIZE, data)?;
        let mut out = [0u8; SESSION_KEY_SIZE];
        out.copy_from_slice(data);
        Ok(SessionKey(out))
    }

    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey({} bytes)", SESSION_KEY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [SigningKeyType; 4] = [
        SigningKeyType::DsaSha1,
        SigningKeyType::EcdsaSha256P256,
        SigningKeyType::EcdsaSha384P384,
        SigningKeyType::EdDsaSha512Ed25519,
    ];

    #[test]
    fn test_wrong_length_rejected_for_every_algorithm() {
        for key_type in ALL_TYPES {
            let short = vec![0u8; key_type.public_key_len() - 1];
            assert!(matches!(
                SigningPublicKey::new(key_type, &short),
                Err(CryptoError::KeyLengthMismatch { .. })
            ));

            let long = vec![0u8; key_type.private_key_len() + 1];
            assert!(matches!(
                SigningPrivateKey::new(key_type, &long),
                Err(CryptoError::KeyLengthMismatch { .. })
            ));

            let bad_sig = vec![0u8; key_type.signature_len() + 3];
            assert!(matches!(
                Signature::new(key_type, &bad_sig),
                Err(CryptoError::KeyLengthMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_encryption_key_length_validation() {
        assert!(PublicKey::new(CryptoKeyType::ElGamal2048, &[0u8; 256]).is_ok());
        assert!(PublicKey::new(CryptoKeyType::ElGamal2048, &[0u8; 255]).is_err());
        assert!(PrivateKey::new(CryptoKeyType::ElGamal2048, &[0u8; 256]).is_ok());
        assert!(PrivateKey::new(CryptoKeyType::ElGamal2048, &[0u8; 64]).is_err());
    }

    #[test]
    fn test_sign_verify_every_algorithm() {
        crate::init().unwrap();

        let message = b"database record bytes";
        for key_type in ALL_TYPES {
            let private = SigningPrivateKey::generate(key_type).unwrap();
            let public = SigningPublicKey::from_private(&private).unwrap();

            let signature = private.sign(message).unwrap();
            assert_eq!(signature.len(), key_type.signature_len());
            assert!(public.verify(message, &signature), "{:?}", key_type);
            assert!(!public.verify(b"different bytes", &signature), "{:?}", key_type);
        }
    }

    #[test]
    fn test_single_bit_flip_fails_every_algorithm() {
        crate::init().unwrap();

        let message = b"bit flip probe";
        for key_type in ALL_TYPES {
            let private = SigningPrivateKey::generate(key_type).unwrap();
            let public = SigningPublicKey::from_private(&private).unwrap();
            let signature = private.sign(message).unwrap();

            let mut tampered = signature.as_bytes().to_vec();
            let mid = tampered.len() / 2;
            tampered[mid] ^= 0x10;
            let tampered = Signature::new(key_type, &tampered).unwrap();
            assert!(!public.verify(message, &tampered), "{:?}", key_type);
        }
    }

    #[test]
    fn test_cross_algorithm_signature_rejected() {
        crate::init().unwrap();

        let ed_private = SigningPrivateKey::generate(SigningKeyType::EdDsaSha512Ed25519).unwrap();
        let ed_public = SigningPublicKey::from_private(&ed_private).unwrap();
        let ed_signature = ed_private.sign(b"m").unwrap();

        // Same 64-byte width, different algorithm tag.
        let p256_signature =
            Signature::new(SigningKeyType::EcdsaSha256P256, ed_signature.as_bytes()).unwrap();
        assert!(!ed_public.verify(b"m", &p256_signature));
    }

    #[test]
    fn test_byte_wise_ordering() {
        let a = SigningPublicKey::new(SigningKeyType::EdDsaSha512Ed25519, &[1u8; 32]).unwrap();
        let b = SigningPublicKey::new(SigningKeyType::EdDsaSha512Ed25519, &[2u8; 32]).unwrap();
        assert!(a < b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_session_key() {
        let key = SessionKey::from_slice(&[9u8; 32]).unwrap();
        assert_eq!(key.as_bytes(), &[9u8; 32]);
        assert!(SessionKey::from_slice(&[9u8; 31]).is_err());
        // Debug must not leak the key bytes.
        assert!(!format!("{:?}", key).contains("09"));
    }
}
