//! Veilroute cryptographic identity model.
//!
//! Certificates tag key pairs with their signature algorithm; keys and
//! signatures are length-validated byte containers; sign and verify
//! dispatch on the algorithm variant. This crate also provides the wire
//! cursor ([`buf::Reader`]) the rest of the workspace parses with.

pub mod buf;
pub mod cert;
pub mod error;
pub mod keys;
pub mod keytypes;

mod dsa;
mod ecdsa;
mod eddsa;

pub use buf::Reader;
pub use cert::{Certificate, CertificateKind};
pub use error::{BufError, CryptoError, Result};
pub use keys::{
    PrivateKey, PublicKey, SessionKey, Signature, SigningPrivateKey, SigningPublicKey,
    SESSION_KEY_SIZE,
};
pub use keytypes::{CryptoKeyType, SigningKeyType};

/// Initialize the underlying libsodium library. Must be called once
/// before any Ed25519 operation; safe to call repeatedly.
pub fn init() -> Result<()> {
    sodiumoxide::init().map_err(|_| CryptoError::InitFailed)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_is_idempotent() {
        crate::init().unwrap();
        crate::init().unwrap();
    }
}
