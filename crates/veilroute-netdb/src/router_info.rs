//! Signed router descriptors.
//!
//! The signature covers the serialization of every other field in order:
//! identity, published date, address list, options. A freshly built
//! descriptor is pending until signed; mutating a signed descriptor is
//! not supported in place, a changed router publishes a new record.

use serde::{Deserialize, Serialize};

use veilroute_crypto::{Reader, Signature, SigningPrivateKey};

use crate::address::RouterAddress;
use crate::error::{NetDbError, Result};
use crate::identity::RouterIdentity;
use crate::mapping::Mapping;
use crate::types::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterInfo {
    identity: RouterIdentity,
    published: Timestamp,
    addresses: Vec<RouterAddress>,
    options: Mapping,
    signature: Option<Signature>,
}

impl RouterInfo {
    /// Build and sign in one step.
    pub fn new(
        identity: RouterIdentity,
        published: Timestamp,
        addresses: Vec<RouterAddress>,
        options: Mapping,
        signing_key: &SigningPrivateKey,
    ) -> Result<Self> {
        let mut info = RouterInfo::new_unsigned(identity, published, addresses, options);
        info.sign(signing_key)?;
        Ok(info)
    }

    /// Build a pending (unsigned) descriptor.
    pub fn new_unsigned(
        identity: RouterIdentity,
        published: Timestamp,
        addresses: Vec<RouterAddress>,
        options: Mapping,
    ) -> Self {
        RouterInfo {
            identity,
            published,
            addresses,
            options,
            signature: None,
        }
    }

    pub fn identity(&self) -> &RouterIdentity {
        &self.identity
    }

    pub fn published(&self) -> Timestamp {
        self.published
    }

    pub fn addresses(&self) -> &[RouterAddress] {
        &self.addresses
    }

    pub fn options(&self) -> &Mapping {
        &self.options
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The byte serialization the signature covers.
    pub fn signed_bytes(&self) -> Result<Vec<u8>> {
        if self.addresses.len() > 255 {
            return Err(NetDbError::TooManyEntries {
                kind: "addresses",
                count: self.addresses.len(),
            });
        }

        let mut out = self.identity.to_bytes();
        out.extend_from_slice(&self.published.as_millis().to_be_bytes());
        out.push(self.addresses.len() as u8);
        for address in &self.addresses {
            out.extend_from_slice(&address.to_bytes()?);
        }
        out.extend_from_slice(&self.options.to_bytes()?);
        Ok(out)
    }

    pub fn sign(&mut self, signing_key: &SigningPrivateKey) -> Result<()> {
        let bytes = self.signed_bytes()?;
        self.signature = Some(signing_key.sign(&bytes)?);
        Ok(())
    }

    /// Full wire form: signed portion plus the signature.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let signature = self.signature.as_ref().ok_or(NetDbError::NotSigned)?;
        let mut out = self.signed_bytes()?;
        out.extend_from_slice(signature.as_bytes());
        Ok(out)
    }

    /// Parse without verifying. Callers that received the bytes from the
    /// network must call [`RouterInfo::verify_signature`] before trusting
    /// anything in the record.
    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let identity = RouterIdentity::read(r)?;
        let published = Timestamp::from_millis(r.read_u64()?);

        let count = r.read_u8()? as usize;
        let mut addresses = Vec::with_capacity(count);
        for _ in 0..count {
            addresses.push(RouterAddress::read(r)?);
        }

        let options = Mapping::read(r)?;

        let key_type = identity.certificate().signing_key_type();
        let signature = Signature::new(key_type, r.read_bytes(key_type.signature_len())?)?;

        Ok(RouterInfo {
            identity,
            published,
            addresses,
            options,
            signature: Some(signature),
        })
    }

    /// Re-serialize the signed portion and check the signature against
    /// the record's own identity. Returns `false` for pending records,
    /// unserializable contents, or any signature mismatch.
    pub fn verify_signature(&self) -> bool {
        let signature = match &self.signature {
            Some(signature) => signature,
            None => return false,
        };
        let bytes = match self.signed_bytes() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        self.identity.signing_public_key().verify(&bytes, signature)
    }
}
