//! Veilroute network-database records.
//!
//! Router descriptors ([`RouterInfo`]) and destination lease sets
//! ([`LeaseSet`]): built from an identity, serialized to a canonical byte
//! form, signed over those bytes, and self-verifying on receipt. Anything
//! parsed from the network must pass `verify_signature()` before being
//! trusted; a record that fails is discarded, never partially used.

pub mod address;
pub mod error;
pub mod identity;
pub mod lease_set;
pub mod mapping;
pub mod router_info;
pub mod types;

pub use address::RouterAddress;
pub use error::{NetDbError, Result};
pub use identity::{Destination, KeysAndCert, RouterIdentity, SIGNING_KEY_FIELD_SIZE};
pub use lease_set::{Lease, LeaseSet, LEASE_SIZE};
pub use mapping::Mapping;
pub use router_info::RouterInfo;
pub use types::{IdentHash, Timestamp, IDENT_HASH_SIZE};
