//! Per-connection transport session state.
//!
//! Created once when a connection's handshake completes; owns the two
//! directional ciphers for the rest of the connection's life. The
//! context belongs to exactly one connection and is dropped with it.

use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;

use veilroute_crypto::SessionKey;
use veilroute_netdb::RouterIdentity;

use crate::cipher::{SessionDecryptor, SessionEncryptor, AES_BLOCK_SIZE};
use crate::error::Result;

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(1);

pub struct TransportSessionContext {
    remote_identity: RouterIdentity,
    session_key: SessionKey,

    /// Outbound cipher. Calls must be serialized by the connection's
    /// single writer; independent of `decryptor`.
    pub encryptor: SessionEncryptor,

    /// Inbound cipher. Calls must be serialized by the connection's
    /// single reader.
    pub decryptor: SessionDecryptor,

    transport_instance: u32,
}

impl TransportSessionContext {
    /// Build the session state from handshake results: the verified
    /// remote identity, the negotiated key, and the per-direction IVs.
    pub fn new(
        remote_identity: RouterIdentity,
        session_key: SessionKey,
        encrypt_iv: [u8; AES_BLOCK_SIZE],
        decrypt_iv: [u8; AES_BLOCK_SIZE],
    ) -> Self {
        let transport_instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let encryptor = SessionEncryptor::new(&session_key, &encrypt_iv);
        let decryptor = SessionDecryptor::new(&session_key, &decrypt_iv);

        debug!(
            "transport session {} established with {}",
            transport_instance,
            remote_identity.hash()
        );

        TransportSessionContext {
            remote_identity,
            session_key,
            encryptor,
            decryptor,
            transport_instance,
        }
    }

    pub fn remote_identity(&self) -> &RouterIdentity {
        &self.remote_identity
    }

    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// Process-unique counter naming this connection instance.
    pub fn transport_instance(&self) -> u32 {
        self.transport_instance
    }

    /// Encrypt one outbound frame. A block-size failure is fatal to the
    /// connection; surface it for teardown.
    pub fn encrypt(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        self.encryptor.encrypt(frame)
    }

    /// Decrypt one inbound frame.
    pub fn decrypt(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        self.decryptor.decrypt(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veilroute_crypto::{
        CryptoKeyType, PublicKey, SigningKeyType, SigningPrivateKey, SigningPublicKey,
    };

    fn remote_identity() -> RouterIdentity {
        veilroute_crypto::init().unwrap();
        let private = SigningPrivateKey::generate(SigningKeyType::EdDsaSha512Ed25519).unwrap();
        let signing = SigningPublicKey::from_private(&private).unwrap();
        let public = PublicKey::new(CryptoKeyType::ElGamal2048, &[0x11u8; 256]).unwrap();
        RouterIdentity::new(public, signing)
    }

    fn context_pair() -> (TransportSessionContext, TransportSessionContext) {
        let key = SessionKey::from_bytes([0xC3u8; 32]);
        let iv_a = [1u8; AES_BLOCK_SIZE];
        let iv_b = [2u8; AES_BLOCK_SIZE];

        // Peer A encrypts with the IV peer B decrypts with, and the
        // other way around.
        let a = TransportSessionContext::new(remote_identity(), key.clone(), iv_a, iv_b);
        let b = TransportSessionContext::new(remote_identity(), key, iv_b, iv_a);
        (a, b)
    }

    #[test]
    fn test_frames_flow_both_directions() {
        let (mut a, mut b) = context_pair();

        let outbound = [0x5Au8; 48];
        let ciphertext = a.encrypt(&outbound).unwrap();
        assert_eq!(b.decrypt(&ciphertext).unwrap(), outbound);

        let inbound = [0xA5u8; 32];
        let ciphertext = b.encrypt(&inbound).unwrap();
        assert_eq!(a.decrypt(&ciphertext).unwrap(), inbound);
    }

    #[test]
    fn test_directions_are_independent() {
        let (mut a, mut b) = context_pair();

        // Interleaved traffic in both directions must not disturb
        // either chain.
        for i in 0..4u8 {
            let frame = [i; 16];
            let ct = a.encrypt(&frame).unwrap();
            assert_eq!(b.decrypt(&ct).unwrap(), frame);

            let back = [0xF0 | i; 16];
            let ct = b.encrypt(&back).unwrap();
            assert_eq!(a.decrypt(&ct).unwrap(), back);
        }
    }

    #[test]
    fn test_instance_counter_is_unique() {
        let (a, b) = context_pair();
        assert_ne!(a.transport_instance(), b.transport_instance());
    }

    #[test]
    fn test_block_size_failure_surfaces() {
        let (mut a, _) = context_pair();
        assert!(a.encrypt(&[0u8; 17]).is_err());
    }

    #[test]
    fn test_context_exposes_handshake_results() {
        let identity = remote_identity();
        let key = SessionKey::from_bytes([9u8; 32]);
        let ctx = TransportSessionContext::new(
            identity.clone(),
            key.clone(),
            [0u8; AES_BLOCK_SIZE],
            [0u8; AES_BLOCK_SIZE],
        );
        assert_eq!(ctx.remote_identity(), &identity);
        assert_eq!(ctx.session_key(), &key);
    }
}
