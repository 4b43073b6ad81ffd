//! Certificates tie a key pair to its signature algorithm.
//!
//! Wire form: 1-byte kind + 2-byte big-endian payload length + payload.
//! A Null certificate (empty payload) implies the legacy default
//! algorithms; a Key certificate carries explicit 2-byte signing and
//! crypto type codes. The parsed kind is preserved so re-serializing a
//! record reproduces the exact bytes that were signed.

use serde::{Deserialize, Serialize};

use crate::buf::Reader;
use crate::error::{CryptoError, Result};
use crate::keytypes::{CryptoKeyType, SigningKeyType};

pub const CERT_KIND_NULL: u8 = 0;
pub const CERT_KIND_KEY: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateKind {
    Null,
    Key,
}

/// Immutable algorithm tag for a key pair. Determines the byte widths of
/// every key and signature attached to the identity that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    kind: CertificateKind,
    signing_key_type: SigningKeyType,
    crypto_key_type: CryptoKeyType,
}

impl Certificate {
    /// Canonical certificate for a signing algorithm: the legacy default
    /// is tagged with a Null certificate, everything else with a Key
    /// certificate.
    pub fn new(signing_key_type: SigningKeyType) -> Self {
        let kind = if signing_key_type == SigningKeyType::DsaSha1 {
            CertificateKind::Null
        } else {
            CertificateKind::Key
        };
        Certificate {
            kind,
            signing_key_type,
            crypto_key_type: CryptoKeyType::ElGamal2048,
        }
    }

    /// The legacy network default: DSA-SHA1 signing, ElGamal encryption.
    pub fn legacy_default() -> Self {
        Certificate::new(SigningKeyType::DsaSha1)
    }

    pub fn kind(&self) -> CertificateKind {
        self.kind
    }

    pub fn signing_key_type(&self) -> SigningKeyType {
        self.signing_key_type
    }

    pub fn crypto_key_type(&self) -> CryptoKeyType {
        self.crypto_key_type
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self.kind {
            CertificateKind::Null => vec![CERT_KIND_NULL, 0, 0],
            CertificateKind::Key => {
                let mut out = Vec::with_capacity(7);
                out.push(CERT_KIND_KEY);
                out.extend_from_slice(&4u16.to_be_bytes());
                out.extend_from_slice(&self.signing_key_type.to_u16().to_be_bytes());
                out.extend_from_slice(&self.crypto_key_type.to_u16().to_be_bytes());
                out
            }
        }
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let kind = r.read_u8()?;
        let len = r.read_u16()? as usize;
        let payload = r.read_bytes(len)?;

        match kind {
            CERT_KIND_NULL => {
                if len != 0 {
                    return Err(CryptoError::MalformedCertificate(format!(
                        "null certificate with {} payload bytes",
                        len
                    )));
                }
                Ok(Certificate::legacy_default())
            }
            CERT_KIND_KEY => {
                // Oversized signing keys would spill excess bytes here;
                // every supported algorithm fits the padded key field, so
                // the payload is exactly the two type codes.
                if len != 4 {
                    return Err(CryptoError::MalformedCertificate(format!(
                        "key certificate with {} payload bytes, expected 4",
                        len
                    )));
                }
                let signing = u16::from_be_bytes([payload[0], payload[1]]);
                let crypto = u16::from_be_bytes([payload[2], payload[3]]);
                Ok(Certificate {
                    kind: CertificateKind::Key,
                    signing_key_type: SigningKeyType::from_u16(signing)?,
                    crypto_key_type: CryptoKeyType::from_u16(crypto)?,
                })
            }
            other => Err(CryptoError::UnsupportedCertificate(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_default_is_null() {
        let cert = Certificate::legacy_default();
        assert_eq!(cert.kind(), CertificateKind::Null);
        assert_eq!(cert.signing_key_type(), SigningKeyType::DsaSha1);
        assert_eq!(cert.to_bytes(), vec![0, 0, 0]);
    }

    #[test]
    fn test_key_cert_round_trip() {
        for key_type in [
            SigningKeyType::EcdsaSha256P256,
            SigningKeyType::EcdsaSha384P384,
            SigningKeyType::EdDsaSha512Ed25519,
        ] {
            let cert = Certificate::new(key_type);
            assert_eq!(cert.kind(), CertificateKind::Key);

            let bytes = cert.to_bytes();
            assert_eq!(bytes.len(), 7);

            let mut r = Reader::new(&bytes);
            let parsed = Certificate::read(&mut r).unwrap();
            assert_eq!(parsed, cert);
            assert!(r.is_empty());
        }
    }

    #[test]
    fn test_null_cert_round_trip() {
        let bytes = Certificate::legacy_default().to_bytes();
        let mut r = Reader::new(&bytes);
        let parsed = Certificate::read(&mut r).unwrap();
        assert_eq!(parsed.signing_key_type(), SigningKeyType::DsaSha1);
        assert_eq!(parsed.crypto_key_type(), CryptoKeyType::ElGamal2048);
    }

    #[test]
    fn test_explicit_key_cert_for_legacy_kind_preserved() {
        // A remote may tag a DSA key with an explicit Key certificate.
        // Parsing must keep that kind so re-serialization is byte-exact.
        let bytes = [CERT_KIND_KEY, 0, 4, 0, 0, 0, 0];
        let mut r = Reader::new(&bytes);
        let parsed = Certificate::read(&mut r).unwrap();
        assert_eq!(parsed.kind(), CertificateKind::Key);
        assert_eq!(parsed.signing_key_type(), SigningKeyType::DsaSha1);
        assert_eq!(parsed.to_bytes(), bytes.to_vec());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let bytes = [3u8, 0, 0];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            Certificate::read(&mut r),
            Err(CryptoError::UnsupportedCertificate(3))
        );
    }

    #[test]
    fn test_unknown_signing_code_rejected() {
        // Code 3 is reserved (P-521) but not supported.
        let bytes = [CERT_KIND_KEY, 0, 4, 0, 3, 0, 0];
        let mut r = Reader::new(&bytes);
        assert_eq!(
            Certificate::read(&mut r),
            Err(CryptoError::UnsupportedSigningKeyType(3))
        );
    }

    #[test]
    fn test_truncated_cert_rejected() {
        let bytes = [CERT_KIND_KEY, 0, 4, 0];
        let mut r = Reader::new(&bytes);
        assert!(matches!(
            Certificate::read(&mut r),
            Err(CryptoError::Buffer(_))
        ));
    }
}
