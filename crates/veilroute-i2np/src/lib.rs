//! Veilroute message framing.
//!
//! The message envelope, its two header encodings, and the typed
//! payloads, including [`DatabaseStoreMessage`] which carries
//! network-database records between routers.

pub mod database_store;
pub mod error;
pub mod header;
pub mod message;

pub use database_store::{
    DatabaseStoreMessage, ReplyInfo, StoreRecord, RECORD_TYPE_LEASE_SET, RECORD_TYPE_ROUTER_INFO,
};
pub use error::{I2npError, Result};
pub use header::{
    read_header16, read_header5, write_header16, write_header5, HEADER16_SIZE, HEADER5_SIZE,
    MAX_PAYLOAD_SIZE,
};
pub use message::{
    DataMessage, DeliveryStatusMessage, Message, MessageType, Payload, DEFAULT_EXPIRATION_MS,
};
