//! Message envelope and typed payloads.
//!
//! A message is a type tag, a message id, an expiration, and a payload.
//! The two header encodings in [`crate::header`] frame the same logical
//! envelope; payload bytes dispatch by type to a typed decoder where one
//! exists and stay raw otherwise (tunnel message internals are handled by
//! the tunnel layer, not here).

use serde::{Deserialize, Serialize};

use veilroute_crypto::Reader;
use veilroute_netdb::Timestamp;

use crate::database_store::DatabaseStoreMessage;
use crate::error::{I2npError, Result};

/// Default expiration horizon for freshly built messages.
pub const DEFAULT_EXPIRATION_MS: u64 = 2 * 60 * 1000;

/// Message type codes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    DatabaseStore = 1,
    DatabaseLookup = 2,
    DatabaseSearchReply = 3,
    DeliveryStatus = 10,
    Garlic = 11,
    TunnelData = 18,
    TunnelGateway = 19,
    Data = 20,
    TunnelBuild = 21,
    TunnelBuildReply = 22,
    VariableTunnelBuild = 23,
    VariableTunnelBuildReply = 24,
}

impl MessageType {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(MessageType::DatabaseStore),
            2 => Ok(MessageType::DatabaseLookup),
            3 => Ok(MessageType::DatabaseSearchReply),
            10 => Ok(MessageType::DeliveryStatus),
            11 => Ok(MessageType::Garlic),
            18 => Ok(MessageType::TunnelData),
            19 => Ok(MessageType::TunnelGateway),
            20 => Ok(MessageType::Data),
            21 => Ok(MessageType::TunnelBuild),
            22 => Ok(MessageType::TunnelBuildReply),
            23 => Ok(MessageType::VariableTunnelBuild),
            24 => Ok(MessageType::VariableTunnelBuildReply),
            other => Err(I2npError::InvalidMessageType(other)),
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Acknowledgment of a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStatusMessage {
    pub message_id: u32,
    pub timestamp: Timestamp,
}

impl DeliveryStatusMessage {
    pub fn new(message_id: u32) -> Self {
        DeliveryStatusMessage {
            message_id,
            timestamp: Timestamp::now(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12);
        out.extend_from_slice(&self.message_id.to_be_bytes());
        out.extend_from_slice(&self.timestamp.as_millis().to_be_bytes());
        out
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let message_id = r.read_u32()?;
        let timestamp = Timestamp::from_millis(r.read_u64()?);
        Ok(DeliveryStatusMessage {
            message_id,
            timestamp,
        })
    }
}

/// Opaque application data, length-prefixed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMessage {
    pub data: Vec<u8>,
}

impl DataMessage {
    pub fn new(data: Vec<u8>) -> Self {
        DataMessage { data }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.data.len());
        out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let len = r.read_u32()? as usize;
        Ok(DataMessage {
            data: r.read_bytes(len)?.to_vec(),
        })
    }
}

/// Typed message payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    DatabaseStore(DatabaseStoreMessage),
    DeliveryStatus(DeliveryStatusMessage),
    Data(DataMessage),
    /// Recognized type without a typed decoder here; bytes pass through
    /// untouched.
    Raw {
        message_type: MessageType,
        data: Vec<u8>,
    },
}

impl Payload {
    pub fn message_type(&self) -> MessageType {
        match self {
            Payload::DatabaseStore(_) => MessageType::DatabaseStore,
            Payload::DeliveryStatus(_) => MessageType::DeliveryStatus,
            Payload::Data(_) => MessageType::Data,
            Payload::Raw { message_type, .. } => *message_type,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Payload::DatabaseStore(message) => message.to_bytes(),
            Payload::DeliveryStatus(message) => Ok(message.to_bytes()),
            Payload::Data(message) => Ok(message.to_bytes()),
            Payload::Raw { data, .. } => Ok(data.clone()),
        }
    }

    /// Dispatch payload bytes by message type.
    pub fn read(message_type: MessageType, bytes: &[u8]) -> Result<Self> {
        let mut r = Reader::new(bytes);
        match message_type {
            MessageType::DatabaseStore => {
                Ok(Payload::DatabaseStore(DatabaseStoreMessage::read(&mut r)?))
            }
            MessageType::DeliveryStatus => {
                Ok(Payload::DeliveryStatus(DeliveryStatusMessage::read(&mut r)?))
            }
            MessageType::Data => Ok(Payload::Data(DataMessage::read(&mut r)?)),
            other => Ok(Payload::Raw {
                message_type: other,
                data: bytes.to_vec(),
            }),
        }
    }
}

/// The framed unit of network-protocol communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    message_id: u32,
    expiration: Timestamp,
    payload: Payload,
}

impl Message {
    /// Wrap a payload with a fresh random id and the default expiration.
    pub fn new(payload: Payload) -> Self {
        Message {
            message_id: random_message_id(),
            expiration: Timestamp::now().plus_millis(DEFAULT_EXPIRATION_MS),
            payload,
        }
    }

    pub fn from_parts(message_id: u32, expiration: Timestamp, payload: Payload) -> Self {
        Message {
            message_id,
            expiration,
            payload,
        }
    }

    pub fn with_message_id(mut self, message_id: u32) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn with_expiration(mut self, expiration: Timestamp) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn message_id(&self) -> u32 {
        self.message_id
    }

    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    pub fn message_type(&self) -> MessageType {
        self.payload.message_type()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

pub(crate) fn random_message_id() -> u32 {
    // Zero is reserved by convention for "no id".
    loop {
        let id = rand::random::<u32>();
        if id != 0 {
            return id;
        }
    }
}
