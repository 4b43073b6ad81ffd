//! ECDSA over the NIST curves.
//!
//! Wire forms follow the network convention: public keys are the
//! uncompressed point coordinates without the SEC1 0x04 prefix, and
//! signatures are fixed-width r || s (never DER), so byte widths stay
//! constant per curve on both sign and verify.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::ecdsa::signature::{Signer, Verifier};
use rand::rngs::OsRng;

use crate::error::{CryptoError, Result};

pub(crate) fn generate_private_p256() -> Vec<u8> {
    p256::ecdsa::SigningKey::random(&mut OsRng).to_bytes().to_vec()
}

pub(crate) fn derive_public_p256(private_key: &[u8]) -> Result<Vec<u8>> {
    let key = p256::ecdsa::SigningKey::from_slice(private_key)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let point = p256::ecdsa::VerifyingKey::from(&key).to_encoded_point(false);
    Ok(point.as_bytes()[1..].to_vec())
}

pub(crate) fn sign_p256(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let key = p256::ecdsa::SigningKey::from_slice(private_key)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let signature: p256::ecdsa::Signature = key.sign(message);
    Ok(signature.to_bytes().to_vec())
}

pub(crate) fn verify_p256(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let mut sec1 = Vec::with_capacity(1 + public_key.len());
    sec1.push(0x04);
    sec1.extend_from_slice(public_key);

    let key = match p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let signature = match p256::ecdsa::Signature::from_slice(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    key.verify(message, &signature).is_ok()
}

pub(crate) fn generate_private_p384() -> Vec<u8> {
    p384::ecdsa::SigningKey::random(&mut OsRng).to_bytes().to_vec()
}

pub(crate) fn derive_public_p384(private_key: &[u8]) -> Result<Vec<u8>> {
    let key = p384::ecdsa::SigningKey::from_slice(private_key)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let point = p384::ecdsa::VerifyingKey::from(&key).to_encoded_point(false);
    Ok(point.as_bytes()[1..].to_vec())
}

pub(crate) fn sign_p384(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let key = p384::ecdsa::SigningKey::from_slice(private_key)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let signature: p384::ecdsa::Signature = key.sign(message);
    Ok(signature.to_bytes().to_vec())
}

pub(crate) fn verify_p384(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let mut sec1 = Vec::with_capacity(1 + public_key.len());
    sec1.push(0x04);
    sec1.extend_from_slice(public_key);

    let key = match p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let signature = match p384::ecdsa::Signature::from_slice(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    key.verify(message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p256_round_trip() {
        let private = generate_private_p256();
        let public = derive_public_p256(&private).unwrap();
        assert_eq!(private.len(), 32);
        assert_eq!(public.len(), 64);

        let sig = sign_p256(&private, b"message").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(verify_p256(&public, b"message", &sig));
        assert!(!verify_p256(&public, b"other", &sig));
    }

    #[test]
    fn test_p384_round_trip() {
        let private = generate_private_p384();
        let public = derive_public_p384(&private).unwrap();
        assert_eq!(private.len(), 48);
        assert_eq!(public.len(), 96);

        let sig = sign_p384(&private, b"message").unwrap();
        assert_eq!(sig.len(), 96);
        assert!(verify_p384(&public, b"message", &sig));
    }

    #[test]
    fn test_garbage_point_returns_false() {
        // Not a curve point; verify must fail closed, not panic.
        let public = vec![0xABu8; 64];
        assert!(!verify_p256(&public, b"m", &[0u8; 64]));
    }

    #[test]
    fn test_bad_private_scalar_errors() {
        // All-FF is >= the curve order.
        let private = vec![0xFFu8; 32];
        assert!(sign_p256(&private, b"m").is_err());
        assert!(derive_public_p256(&private).is_err());
    }
}
