//! Destination lease sets.
//!
//! A lease names one inbound tunnel endpoint: gateway hash, tunnel id,
//! expiration. The set binds a destination to its leases and per-set
//! keys, signed by the destination's signing key over the serialization
//! of everything before the signature. Lease order is caller-defined and
//! preserved.

use serde::{Deserialize, Serialize};

use veilroute_crypto::{PublicKey, Reader, Signature, SigningPrivateKey, SigningPublicKey};

use crate::error::{NetDbError, Result};
use crate::identity::Destination;
use crate::types::{IdentHash, Timestamp};

/// Wire size of one lease: 32-byte gateway + 4-byte tunnel id + 8-byte
/// expiration.
pub const LEASE_SIZE: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    tunnel_gateway: IdentHash,
    tunnel_id: u32,
    end_date: Timestamp,
}

impl Lease {
    pub fn new(tunnel_gateway: IdentHash, tunnel_id: u32, end_date: Timestamp) -> Self {
        Lease {
            tunnel_gateway,
            tunnel_id,
            end_date,
        }
    }

    pub fn tunnel_gateway(&self) -> &IdentHash {
        &self.tunnel_gateway
    }

    pub fn tunnel_id(&self) -> u32 {
        self.tunnel_id
    }

    pub fn end_date(&self) -> Timestamp {
        self.end_date
    }

    pub fn to_bytes(&self) -> [u8; LEASE_SIZE] {
        let mut out = [0u8; LEASE_SIZE];
        out[..32].copy_from_slice(self.tunnel_gateway.as_bytes());
        out[32..36].copy_from_slice(&self.tunnel_id.to_be_bytes());
        out[36..].copy_from_slice(&self.end_date.as_millis().to_be_bytes());
        out
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let tunnel_gateway = IdentHash::from_bytes(r.read_array()?);
        let tunnel_id = r.read_u32()?;
        let end_date = Timestamp::from_millis(r.read_u64()?);
        Ok(Lease {
            tunnel_gateway,
            tunnel_id,
            end_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseSet {
    destination: Destination,
    public_key: PublicKey,
    signing_public_key: SigningPublicKey,
    leases: Vec<Lease>,
    signature: Option<Signature>,
}

impl LeaseSet {
    /// Build and sign with the destination's signing private key.
    pub fn new(
        destination: Destination,
        public_key: PublicKey,
        signing_public_key: SigningPublicKey,
        leases: Vec<Lease>,
        signing_key: &SigningPrivateKey,
    ) -> Result<Self> {
        let mut set = LeaseSet::new_unsigned(destination, public_key, signing_public_key, leases);
        set.sign(signing_key)?;
        Ok(set)
    }

    pub fn new_unsigned(
        destination: Destination,
        public_key: PublicKey,
        signing_public_key: SigningPublicKey,
        leases: Vec<Lease>,
    ) -> Self {
        LeaseSet {
            destination,
            public_key,
            signing_public_key,
            leases,
            signature: None,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signing_public_key(&self) -> &SigningPublicKey {
        &self.signing_public_key
    }

    pub fn leases(&self) -> &[Lease] {
        &self.leases
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The byte serialization the signature covers.
    pub fn signed_bytes(&self) -> Result<Vec<u8>> {
        if self.leases.len() > 255 {
            return Err(NetDbError::TooManyEntries {
                kind: "leases",
                count: self.leases.len(),
            });
        }

        let mut out = self.destination.to_bytes();
        out.extend_from_slice(self.public_key.as_bytes());
        out.extend_from_slice(self.signing_public_key.as_bytes());
        out.push(self.leases.len() as u8);
        for lease in &self.leases {
            out.extend_from_slice(&lease.to_bytes());
        }
        Ok(out)
    }

    pub fn sign(&mut self, signing_key: &SigningPrivateKey) -> Result<()> {
        let bytes = self.signed_bytes()?;
        self.signature = Some(signing_key.sign(&bytes)?);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let signature = self.signature.as_ref().ok_or(NetDbError::NotSigned)?;
        let mut out = self.signed_bytes()?;
        out.extend_from_slice(signature.as_bytes());
        Ok(out)
    }

    /// Parse without verifying. The embedded per-set signing key and the
    /// signature use the destination certificate's algorithm, which is
    /// what fixes their widths on the wire.
    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let destination = Destination::read(r)?;

        let crypto_type = destination.certificate().crypto_key_type();
        let public_key =
            PublicKey::new(crypto_type, r.read_bytes(crypto_type.public_key_len())?)?;

        let key_type = destination.certificate().signing_key_type();
        let signing_public_key =
            SigningPublicKey::new(key_type, r.read_bytes(key_type.public_key_len())?)?;

        let count = r.read_u8()? as usize;
        let mut leases = Vec::with_capacity(count);
        for _ in 0..count {
            leases.push(Lease::read(r)?);
        }

        let signature = Signature::new(key_type, r.read_bytes(key_type.signature_len())?)?;

        Ok(LeaseSet {
            destination,
            public_key,
            signing_public_key,
            leases,
            signature: Some(signature),
        })
    }

    /// Re-serialize the signed portion and check the signature with the
    /// destination's signing key. `false` on any mismatch, never an
    /// error.
    pub fn verify_signature(&self) -> bool {
        let signature = match &self.signature {
            Some(signature) => signature,
            None => return false,
        };
        let bytes = match self.signed_bytes() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        self.destination
            .signing_public_key()
            .verify(&bytes, signature)
    }
}
