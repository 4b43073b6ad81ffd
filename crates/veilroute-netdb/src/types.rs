//! Timestamps and identity hashes

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Size of an identity hash in bytes (SHA-256)
pub const IDENT_HASH_SIZE: usize = 32;

/// SHA-256 digest of a serialized identity; a record's address in the
/// network database.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentHash([u8; IDENT_HASH_SIZE]);

impl IdentHash {
    pub fn from_bytes(bytes: [u8; IDENT_HASH_SIZE]) -> Self {
        IdentHash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; IDENT_HASH_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Random hash, for tests and placeholder gateway entries.
    pub fn random() -> Self {
        IdentHash(rand::random())
    }
}

impl fmt::Debug for IdentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentHash({})", self.to_hex())
    }
}

impl fmt::Display for IdentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Milliseconds since the Unix epoch; `0` means "never" in expiration
/// fields. Wire form is 8 bytes big-endian, or 4 big-endian seconds in
/// the short message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const NEVER: Timestamp = Timestamp(0);

    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        Timestamp(ms)
    }

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn from_secs(secs: u64) -> Self {
        Timestamp(secs * 1000)
    }

    pub fn as_secs(&self) -> u64 {
        self.0 / 1000
    }

    pub fn is_never(&self) -> bool {
        self.0 == 0
    }

    pub fn plus_millis(self, ms: u64) -> Self {
        Timestamp(self.0.saturating_add(ms))
    }

    /// Expiry is a caller policy; records with past timestamps stay
    /// structurally valid.
    pub fn is_past(&self) -> bool {
        !self.is_never() && *self < Timestamp::now()
    }
}
