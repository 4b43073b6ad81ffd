//! Error types for the transport session layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Fatal to the connection: the transport must tear the session
    /// down, never retry the frame.
    #[error("frame length {len} is not a multiple of the {block}-byte cipher block")]
    InvalidBlockSize { len: usize, block: usize },
}
