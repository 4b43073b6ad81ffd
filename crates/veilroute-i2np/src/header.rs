//! The two header encodings for the message envelope.
//!
//! Long form ("Header16", 16 bytes): 1-byte type + 4-byte message id +
//! 8-byte expiration in milliseconds + 2-byte payload length + 1-byte
//! checksum (first byte of the payload's SHA-256), used by the stream
//! transport.
//!
//! Short form ("Header5", 5 bytes): 1-byte type + 4-byte expiration in
//! seconds, used where the datagram transport already frames and
//! checksums; the payload is the rest of the datagram and the reader
//! assigns a fresh message id.
//!
//! Both recover the same typed message; a checksum mismatch drops the
//! message (corrupt), it does not tear down the connection.

use sha2::{Digest, Sha256};

use veilroute_crypto::Reader;
use veilroute_netdb::Timestamp;

use crate::error::{I2npError, Result};
use crate::message::{random_message_id, Message, MessageType, Payload};

pub const HEADER16_SIZE: usize = 16;
pub const HEADER5_SIZE: usize = 5;

/// Largest payload the long header's 2-byte length field can frame.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

fn payload_checksum(payload: &[u8]) -> u8 {
    Sha256::digest(payload)[0]
}

/// Frame a message with the long header.
pub fn write_header16(message: &Message) -> Result<Vec<u8>> {
    let payload = message.payload().to_bytes()?;
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(I2npError::MessageTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let mut out = Vec::with_capacity(HEADER16_SIZE + payload.len());
    out.push(message.message_type().to_u8());
    out.extend_from_slice(&message.message_id().to_be_bytes());
    out.extend_from_slice(&message.expiration().as_millis().to_be_bytes());
    out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    out.push(payload_checksum(&payload));
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Parse a long-header message. Validates, in order: header size,
/// declared payload length against the remaining buffer, checksum.
pub fn read_header16(r: &mut Reader<'_>) -> Result<Message> {
    let message_type = MessageType::from_u8(r.read_u8()?)?;
    let message_id = r.read_u32()?;
    let expiration = Timestamp::from_millis(r.read_u64()?);
    let length = r.read_u16()? as usize;
    let checksum = r.read_u8()?;

    let payload = r.read_bytes(length)?;
    let actual = payload_checksum(payload);
    if actual != checksum {
        return Err(I2npError::ChecksumMismatch {
            expected: checksum,
            actual,
        });
    }

    Ok(Message::from_parts(
        message_id,
        expiration,
        Payload::read(message_type, payload)?,
    ))
}

/// Frame a message with the short header. The message id is not carried.
pub fn write_header5(message: &Message) -> Result<Vec<u8>> {
    let payload = message.payload().to_bytes()?;
    let mut out = Vec::with_capacity(HEADER5_SIZE + payload.len());
    out.push(message.message_type().to_u8());
    out.extend_from_slice(&(message.expiration().as_secs() as u32).to_be_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Parse a short-header message from one datagram. The payload runs to
/// the end of the buffer; the returned message gets a fresh id.
pub fn read_header5(r: &mut Reader<'_>) -> Result<Message> {
    let message_type = MessageType::from_u8(r.read_u8()?)?;
    let expiration = Timestamp::from_secs(u64::from(r.read_u32()?));
    let payload = r.take_rest();

    Ok(Message::from_parts(
        random_message_id(),
        expiration,
        Payload::read(message_type, payload)?,
    ))
}
