//! DatabaseStore payload: a router descriptor or lease set in flight to
//! the network database.
//!
//! Wire form: 32-byte key hash + 1-byte record type + 4-byte reply
//! token; a nonzero token is followed by a 4-byte reply tunnel id and a
//! 32-byte reply gateway hash; the record serialization runs to the end
//! of the payload.

use serde::{Deserialize, Serialize};

use veilroute_crypto::Reader;
use veilroute_netdb::{IdentHash, LeaseSet, RouterInfo};

use crate::error::{I2npError, Result};

pub const RECORD_TYPE_ROUTER_INFO: u8 = 0;
pub const RECORD_TYPE_LEASE_SET: u8 = 1;

/// Where to send the delivery confirmation when the sender asked for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyInfo {
    pub token: u32,
    pub tunnel_id: u32,
    pub gateway: IdentHash,
}

/// The stored record, tagged by the wire discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreRecord {
    RouterInfo(RouterInfo),
    LeaseSet(LeaseSet),
}

impl StoreRecord {
    fn type_code(&self) -> u8 {
        match self {
            StoreRecord::RouterInfo(_) => RECORD_TYPE_ROUTER_INFO,
            StoreRecord::LeaseSet(_) => RECORD_TYPE_LEASE_SET,
        }
    }

    /// The network-database key the record is stored under.
    fn key(&self) -> IdentHash {
        match self {
            StoreRecord::RouterInfo(info) => info.identity().hash(),
            StoreRecord::LeaseSet(set) => set.destination().hash(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStoreMessage {
    key: IdentHash,
    reply: Option<ReplyInfo>,
    record: StoreRecord,
}

impl DatabaseStoreMessage {
    pub fn new_router_info(info: RouterInfo) -> Self {
        let record = StoreRecord::RouterInfo(info);
        DatabaseStoreMessage {
            key: record.key(),
            reply: None,
            record,
        }
    }

    pub fn new_lease_set(set: LeaseSet) -> Self {
        let record = StoreRecord::LeaseSet(set);
        DatabaseStoreMessage {
            key: record.key(),
            reply: None,
            record,
        }
    }

    /// Request a delivery confirmation. A zero token means "no reply"
    /// on the wire and is treated as absent.
    pub fn with_reply(mut self, reply: ReplyInfo) -> Self {
        self.reply = Some(reply);
        self
    }

    pub fn key(&self) -> &IdentHash {
        &self.key
    }

    pub fn reply(&self) -> Option<&ReplyInfo> {
        self.reply.as_ref()
    }

    pub fn record(&self) -> &StoreRecord {
        &self.record
    }

    pub fn router_info(&self) -> Option<&RouterInfo> {
        match &self.record {
            StoreRecord::RouterInfo(info) => Some(info),
            StoreRecord::LeaseSet(_) => None,
        }
    }

    pub fn lease_set(&self) -> Option<&LeaseSet> {
        match &self.record {
            StoreRecord::LeaseSet(set) => Some(set),
            StoreRecord::RouterInfo(_) => None,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(self.key.as_bytes());
        out.push(self.record.type_code());
        match &self.reply {
            Some(reply) if reply.token != 0 => {
                out.extend_from_slice(&reply.token.to_be_bytes());
                out.extend_from_slice(&reply.tunnel_id.to_be_bytes());
                out.extend_from_slice(reply.gateway.as_bytes());
            }
            _ => out.extend_from_slice(&0u32.to_be_bytes()),
        }
        match &self.record {
            StoreRecord::RouterInfo(info) => out.extend_from_slice(&info.to_bytes()?),
            StoreRecord::LeaseSet(set) => out.extend_from_slice(&set.to_bytes()?),
        }
        Ok(out)
    }

    /// Parse without verifying the embedded record's signature; the
    /// network-database layer verifies before storing.
    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let key = IdentHash::from_bytes(r.read_array()?);
        let record_type = r.read_u8()?;
        let token = r.read_u32()?;
        let reply = if token != 0 {
            Some(ReplyInfo {
                token,
                tunnel_id: r.read_u32()?,
                gateway: IdentHash::from_bytes(r.read_array()?),
            })
        } else {
            None
        };

        let record = match record_type {
            RECORD_TYPE_ROUTER_INFO => StoreRecord::RouterInfo(RouterInfo::read(r)?),
            RECORD_TYPE_LEASE_SET => StoreRecord::LeaseSet(LeaseSet::read(r)?),
            other => return Err(I2npError::InvalidRecordType(other)),
        };

        Ok(DatabaseStoreMessage { key, reply, record })
    }
}
