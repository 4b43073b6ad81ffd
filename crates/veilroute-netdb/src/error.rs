//! Error types for network-database records

use thiserror::Error;

use veilroute_crypto::{BufError, CryptoError};

pub type Result<T> = std::result::Result<T, NetDbError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetDbError {
    #[error(transparent)]
    Buffer(#[from] BufError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("string too long for wire form: {len} bytes (max 255)")]
    StringTooLong { len: usize },

    #[error("mapping block too large: {0} bytes (max 65535)")]
    MappingTooLarge(usize),

    #[error("duplicate mapping key: {0:?}")]
    DuplicateKey(String),

    #[error("invalid UTF-8 in wire string")]
    InvalidUtf8,

    #[error("too many {kind}: {count} (max 255)")]
    TooManyEntries { kind: &'static str, count: usize },

    #[error("record is not signed")]
    NotSigned,
}
