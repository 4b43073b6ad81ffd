//! Directional AES-256-CBC framing ciphers.
//!
//! Each direction of a connection owns one cipher; the CBC chaining
//! state carries across calls, so frames for a direction must be
//! transformed in order by a single caller. The two directions are
//! independent of each other.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;

use veilroute_crypto::SessionKey;

use crate::error::{Result, TransportError};

/// AES block size; every frame must be a whole number of blocks.
pub const AES_BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

fn check_block_aligned(len: usize) -> Result<()> {
    if len % AES_BLOCK_SIZE != 0 {
        return Err(TransportError::InvalidBlockSize {
            len,
            block: AES_BLOCK_SIZE,
        });
    }
    Ok(())
}

/// Outbound half of a session's cipher state.
pub struct SessionEncryptor {
    cipher: Aes256CbcEnc,
}

impl SessionEncryptor {
    pub fn new(key: &SessionKey, iv: &[u8; AES_BLOCK_SIZE]) -> Self {
        SessionEncryptor {
            cipher: Aes256CbcEnc::new(
                GenericArray::from_slice(key.as_bytes()),
                GenericArray::from_slice(iv),
            ),
        }
    }

    /// Encrypt one frame in CBC sequence. Sequential calls chain: the
    /// last ciphertext block of this frame becomes the IV of the next.
    pub fn encrypt(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        check_block_aligned(frame.len())?;
        let mut out = frame.to_vec();
        for block in out.chunks_exact_mut(AES_BLOCK_SIZE) {
            self.cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        Ok(out)
    }
}

/// Inbound half of a session's cipher state.
pub struct SessionDecryptor {
    cipher: Aes256CbcDec,
}

impl SessionDecryptor {
    pub fn new(key: &SessionKey, iv: &[u8; AES_BLOCK_SIZE]) -> Self {
        SessionDecryptor {
            cipher: Aes256CbcDec::new(
                GenericArray::from_slice(key.as_bytes()),
                GenericArray::from_slice(iv),
            ),
        }
    }

    /// Decrypt one frame in CBC sequence.
    pub fn decrypt(&mut self, frame: &[u8]) -> Result<Vec<u8>> {
        check_block_aligned(frame.len())?;
        let mut out = frame.to_vec();
        for block in out.chunks_exact_mut(AES_BLOCK_SIZE) {
            self.cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        Ok(out)
    }
}
