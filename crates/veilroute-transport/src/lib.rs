//! Veilroute transport session state.
//!
//! The per-connection symmetric cipher context a stream transport uses
//! after its handshake: negotiated session key, remote identity, and the
//! two directional AES-256-CBC ciphers whose chaining state spans the
//! connection's lifetime. Handshake and connection management live in
//! the transport proper; this crate only holds and applies the state.

pub mod cipher;
pub mod error;
pub mod session;

pub use cipher::{SessionDecryptor, SessionEncryptor, AES_BLOCK_SIZE};
pub use error::{Result, TransportError};
pub use session::TransportSessionContext;
