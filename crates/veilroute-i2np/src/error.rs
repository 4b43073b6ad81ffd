//! Error types for message framing

use thiserror::Error;

use veilroute_crypto::{BufError, CryptoError};
use veilroute_netdb::NetDbError;

pub type Result<T> = std::result::Result<T, I2npError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum I2npError {
    #[error(transparent)]
    Buffer(#[from] BufError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    NetDb(#[from] NetDbError),

    #[error("invalid message type: {0}")]
    InvalidMessageType(u8),

    #[error("invalid record type: {0}")]
    InvalidRecordType(u8),

    #[error("payload checksum mismatch: header says {expected:#04x}, payload hashes to {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },
}
