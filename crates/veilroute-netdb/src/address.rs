//! Transport endpoints advertised in a router descriptor.
//!
//! Wire form: 1-byte cost, 8-byte expiration (0 = never), length-prefixed
//! transport name, then an options mapping carrying transport-specific
//! attributes such as host and port.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use veilroute_crypto::Reader;

use crate::error::{NetDbError, Result};
use crate::mapping::Mapping;
use crate::types::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterAddress {
    cost: u8,
    expiration: Timestamp,
    transport: String,
    options: Mapping,
}

impl RouterAddress {
    pub fn new(transport: &str, cost: u8) -> Self {
        RouterAddress {
            cost,
            expiration: Timestamp::NEVER,
            transport: transport.to_string(),
            options: Mapping::new(),
        }
    }

    /// Convenience constructor for IPv4 transports: stores the host and
    /// port as options the way published descriptors carry them.
    pub fn new_ipv4(transport: &str, host: Ipv4Addr, port: u16, cost: u8) -> Self {
        let mut address = RouterAddress::new(transport, cost);
        address.set_option("host", &host.to_string());
        address.set_option("port", &port.to_string());
        address
    }

    pub fn cost(&self) -> u8 {
        self.cost
    }

    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }

    pub fn options(&self) -> &Mapping {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key)
    }

    pub fn set_option(&mut self, key: &str, value: &str) {
        self.options.set(key, value);
    }

    pub fn set_expiration(&mut self, expiration: Timestamp) {
        self.expiration = expiration;
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let name = self.transport.as_bytes();
        if name.len() > 255 {
            return Err(NetDbError::StringTooLong { len: name.len() });
        }

        let mut out = Vec::with_capacity(10 + name.len());
        out.push(self.cost);
        out.extend_from_slice(&self.expiration.as_millis().to_be_bytes());
        out.push(name.len() as u8);
        out.extend_from_slice(name);
        out.extend_from_slice(&self.options.to_bytes()?);
        Ok(out)
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let cost = r.read_u8()?;
        let expiration = Timestamp::from_millis(r.read_u64()?);
        let name_len = r.read_u8()? as usize;
        let transport = std::str::from_utf8(r.read_bytes(name_len)?)
            .map_err(|_| NetDbError::InvalidUtf8)?
            .to_string();
        let options = Mapping::read(r)?;
        Ok(RouterAddress {
            cost,
            expiration,
            transport,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let address = RouterAddress::new_ipv4("SSU", Ipv4Addr::new(10, 0, 0, 1), 7654, 10);
        let bytes = address.to_bytes().unwrap();

        let mut r = Reader::new(&bytes);
        let parsed = RouterAddress::read(&mut r).unwrap();
        assert!(r.is_empty());
        assert_eq!(parsed, address);
        assert_eq!(parsed.transport(), "SSU");
        assert_eq!(parsed.option("host"), Some("10.0.0.1"));
        assert_eq!(parsed.option("port"), Some("7654"));
    }

    #[test]
    fn test_never_expires_is_zero() {
        let address = RouterAddress::new("NTCP", 5);
        let bytes = address.to_bytes().unwrap();
        assert_eq!(&bytes[1..9], &[0u8; 8]);
    }

    #[test]
    fn test_truncated_transport_name_rejected() {
        let address = RouterAddress::new("NTCP", 5);
        let bytes = address.to_bytes().unwrap();
        let mut r = Reader::new(&bytes[..11]);
        assert!(RouterAddress::read(&mut r).is_err());
    }
}
