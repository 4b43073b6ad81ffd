//! Error types for identity and signing operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// A wire decoder asked for more bytes than the buffer holds.
///
/// Raised only by [`crate::buf::Reader`]; every decoder in the workspace
/// funnels its bounds checks through the cursor so truncated input always
/// surfaces as this error instead of a panic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("buffer too short: needed {needed} bytes, {remaining} remaining")]
pub struct BufError {
    pub needed: usize,
    pub remaining: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CryptoError {
    #[error(transparent)]
    Buffer(#[from] BufError),

    #[error("unsupported signing key type: {0}")]
    UnsupportedSigningKeyType(u16),

    #[error("unsupported crypto key type: {0}")]
    UnsupportedCryptoKeyType(u16),

    #[error("unsupported certificate kind: {0}")]
    UnsupportedCertificate(u8),

    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    #[error("{role} length mismatch: expected {expected} bytes, got {actual}")]
    KeyLengthMismatch {
        role: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("libsodium initialization failed")]
    InitFailed,
}
