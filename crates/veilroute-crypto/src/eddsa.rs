//! Ed25519 via libsodium.
//!
//! The network's 32-byte private key is the seed; the expanded secret key
//! is derived at sign time and never stored.

use rand::RngCore;
use sodiumoxide::crypto::sign::ed25519;

use crate::error::{CryptoError, Result};

pub(crate) fn generate_seed() -> Vec<u8> {
    let mut seed = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut seed);
    seed.to_vec()
}

pub(crate) fn derive_public(private_seed: &[u8]) -> Result<Vec<u8>> {
    let seed = ed25519::Seed::from_slice(private_seed)
        .ok_or_else(|| CryptoError::SigningFailed("bad ed25519 seed".to_string()))?;
    let (public, _) = ed25519::keypair_from_seed(&seed);
    Ok(public.as_ref().to_vec())
}

pub(crate) fn sign(private_seed: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let seed = ed25519::Seed::from_slice(private_seed)
        .ok_or_else(|| CryptoError::SigningFailed("bad ed25519 seed".to_string()))?;
    let (_, secret) = ed25519::keypair_from_seed(&seed);
    Ok(ed25519::sign_detached(message, &secret).to_bytes().to_vec())
}

pub(crate) fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let public = match ed25519::PublicKey::from_slice(public_key) {
        Some(public) => public,
        None => return false,
    };
    let signature = match ed25519::Signature::from_bytes(signature) {
        Ok(signature) => signature,
        Err(_) => return false,
    };
    ed25519::verify_detached(&signature, message, &public)
}
