//! DSA-SHA1 over the network's fixed 1024-bit parameters.
//!
//! The p/q/g constants are network-wide and shared by every router, so
//! keys are just the exponents: a 20-byte private x and a 128-byte public
//! y = g^x mod p. Signatures are r and s, each 20 bytes big-endian.

use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::rngs::OsRng;
use sha1::{Digest, Sha1};

use crate::error::{CryptoError, Result};

const DSA_P_HEX: &str = concat!(
    "9c05b2aa960d9b97b8931963c9cc9e8c3026e9b8ed92fad0a69cc886d5bf8015",
    "fcadae31a0ad18fab3f01b00a358de237655c4964afaa2b337e96ad316b9fb1c",
    "c564b5aec5b69a9ff6c3e4548707fef8503d91dd8602e867e6d35d2235c1869c",
    "e2479c3b9d5401de04e0727fb33d6511285d4cf29538d9e3b6051f5b22cc1c93"
);

const DSA_Q_HEX: &str = "a5dfc28fef4ca1e286744cd8eed9d29d684046b7";

const DSA_G_HEX: &str = concat!(
    "0c1f4d27d40093b429e962d7223824e0bbc47e7c832a39236fc683af84889581",
    "075ff9082ed32353d4374d7301cda1d23c431f4698599dda02451824ff369752",
    "593647cc3ddc197de985e43d136cdcfc6bd5409cd2f450821142a5e6f8eb1c3a",
    "b5d0484b8129fcf17bce4f7f33321c3cb3dbb14a905e7b2b3e93be4708cbcc82"
);

pub const DSA_PUBLIC_KEY_SIZE: usize = 128;
pub const DSA_PRIVATE_KEY_SIZE: usize = 20;
pub const DSA_SIGNATURE_SIZE: usize = 40;

fn params() -> (BigUint, BigUint, BigUint) {
    // Fixed, well-formed hex constants; parsing cannot fail.
    let p = BigUint::parse_bytes(DSA_P_HEX.as_bytes(), 16).expect("network constant p");
    let q = BigUint::parse_bytes(DSA_Q_HEX.as_bytes(), 16).expect("network constant q");
    let g = BigUint::parse_bytes(DSA_G_HEX.as_bytes(), 16).expect("network constant g");
    (p, q, g)
}

/// Modular inverse via Fermat: q is prime, so a^-1 = a^(q-2) mod q.
fn mod_inverse(a: &BigUint, q: &BigUint) -> BigUint {
    a.modpow(&(q - 2u32), q)
}

/// Left-pad a big-endian integer into a fixed-width field.
fn write_padded(out: &mut [u8], n: &BigUint) {
    let bytes = n.to_bytes_be();
    let start = out.len() - bytes.len();
    out[start..].copy_from_slice(&bytes);
}

pub(crate) fn generate_private() -> Vec<u8> {
    let (_, q, _) = params();
    let mut rng = OsRng;
    loop {
        let x = rng.gen_biguint_below(&q);
        if !x.is_zero() {
            let mut out = vec![0u8; DSA_PRIVATE_KEY_SIZE];
            write_padded(&mut out, &x);
            return out;
        }
    }
}

pub(crate) fn derive_public(private_key: &[u8]) -> Result<Vec<u8>> {
    let (p, q, g) = params();
    let x = BigUint::from_bytes_be(private_key) % &q;
    if x.is_zero() {
        return Err(CryptoError::SigningFailed(
            "dsa private exponent is zero".to_string(),
        ));
    }
    let y = g.modpow(&x, &p);
    let mut out = vec![0u8; DSA_PUBLIC_KEY_SIZE];
    write_padded(&mut out, &y);
    Ok(out)
}

pub(crate) fn sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let (p, q, g) = params();
    let x = BigUint::from_bytes_be(private_key) % &q;
    if x.is_zero() {
        return Err(CryptoError::SigningFailed(
            "dsa private exponent is zero".to_string(),
        ));
    }
    let h = BigUint::from_bytes_be(Sha1::digest(message).as_slice());
    let mut rng = OsRng;

    // Degenerate r or s forces a new nonce; overwhelmingly rare.
    loop {
        let k = rng.gen_biguint_below(&q);
        if k.is_zero() {
            continue;
        }
        let r = g.modpow(&k, &p) % &q;
        if r.is_zero() {
            continue;
        }
        let s = (mod_inverse(&k, &q) * (&h + &x * &r)) % &q;
        if s.is_zero() {
            continue;
        }

        let mut sig = vec![0u8; DSA_SIGNATURE_SIZE];
        write_padded(&mut sig[..DSA_PRIVATE_KEY_SIZE], &r);
        write_padded(&mut sig[DSA_PRIVATE_KEY_SIZE..], &s);
        return Ok(sig);
    }
}

pub(crate) fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    if signature.len() != DSA_SIGNATURE_SIZE {
        return false;
    }
    let (p, q, g) = params();
    let y = BigUint::from_bytes_be(public_key);
    let r = BigUint::from_bytes_be(&signature[..DSA_PRIVATE_KEY_SIZE]);
    let s = BigUint::from_bytes_be(&signature[DSA_PRIVATE_KEY_SIZE..]);
    if r.is_zero() || s.is_zero() || r >= q || s >= q {
        return false;
    }

    let h = BigUint::from_bytes_be(Sha1::digest(message).as_slice());
    let w = mod_inverse(&s, &q);
    let u1 = (&h * &w) % &q;
    let u2 = (&r * &w) % &q;
    let v = ((g.modpow(&u1, &p) * y.modpow(&u2, &p)) % &p) % &q;
    v == r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_round_trip() {
        let private = generate_private();
        let public = derive_public(&private).unwrap();
        assert_eq!(private.len(), DSA_PRIVATE_KEY_SIZE);
        assert_eq!(public.len(), DSA_PUBLIC_KEY_SIZE);

        let message = b"attack at dawn";
        let sig = sign(&private, message).unwrap();
        assert_eq!(sig.len(), DSA_SIGNATURE_SIZE);
        assert!(verify(&public, message, &sig));
    }

    #[test]
    fn test_tampered_message_fails() {
        let private = generate_private();
        let public = derive_public(&private).unwrap();
        let sig = sign(&private, b"original").unwrap();
        assert!(!verify(&public, b"tampered", &sig));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let private = generate_private();
        let public = derive_public(&private).unwrap();
        let message = b"payload";
        let mut sig = sign(&private, message).unwrap();
        sig[7] ^= 0x01;
        assert!(!verify(&public, message, &sig));
    }

    #[test]
    fn test_out_of_range_components_fail() {
        let private = generate_private();
        let public = derive_public(&private).unwrap();

        // r = 0 and s = q are both outside the valid open interval.
        let zeros = vec![0u8; DSA_SIGNATURE_SIZE];
        assert!(!verify(&public, b"m", &zeros));

        let mut sig = vec![0xFFu8; DSA_SIGNATURE_SIZE];
        sig[0] = 0xFF;
        assert!(!verify(&public, b"m", &sig));
    }

    #[test]
    fn test_wrong_length_signature_fails() {
        let private = generate_private();
        let public = derive_public(&private).unwrap();
        assert!(!verify(&public, b"m", &[0u8; 39]));
    }

    #[test]
    fn test_different_keys_reject() {
        let a = generate_private();
        let b = generate_private();
        let public_b = derive_public(&b).unwrap();
        let sig = sign(&a, b"m").unwrap();
        assert!(!verify(&public_b, b"m", &sig));
    }
}
