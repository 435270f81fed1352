//! ECDSA key management
//!
//! Provides key pair generation and recoverable ECDSA signing using the
//! secp256k1 elliptic curve. Signatures carry a recovery id so the
//! signer's public key (and therefore address) can be recovered from the
//! signature alone.

use rand::rngs::OsRng;
use ripemd::Ripemd160;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::hash::sha256;

/// Errors that can occur during key operations
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Secp256k1 error: {0}")]
    Secp256k1Error(#[from] secp256k1::Error),
}

/// A recoverable ECDSA signature: 64 compact bytes plus a recovery id.
///
/// Wire format is 65 bytes hex-encoded, recovery id last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    bytes: [u8; 64],
    recovery_id: u8,
}

impl Signature {
    /// Parse a signature from its 65-byte hex wire form
    pub fn from_hex(hex_sig: &str) -> Result<Self, KeyError> {
        let raw = hex::decode(hex_sig).map_err(|_| KeyError::InvalidSignature)?;
        if raw.len() != 65 {
            return Err(KeyError::InvalidSignature);
        }
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&raw[..64]);
        let recovery_id = raw[64];
        if recovery_id > 3 {
            return Err(KeyError::InvalidSignature);
        }
        Ok(Self { bytes, recovery_id })
    }

    /// Encode as 65-byte hex (compact signature followed by recovery id)
    pub fn to_hex(&self) -> String {
        let mut raw = self.bytes.to_vec();
        raw.push(self.recovery_id);
        hex::encode(raw)
    }

    fn to_recoverable(&self) -> Result<RecoverableSignature, KeyError> {
        let rec_id = RecoveryId::from_i32(self.recovery_id as i32)
            .map_err(|_| KeyError::InvalidSignature)?;
        RecoverableSignature::from_compact(&self.bytes, rec_id)
            .map_err(|_| KeyError::InvalidSignature)
    }
}

/// A key pair consisting of a private key and its corresponding public key
#[derive(Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut OsRng);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create a key pair from an existing secret key
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create a key pair from a hex-encoded private key
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPrivateKey)?;
        let secret_key =
            SecretKey::from_slice(&bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Get the private key as a hex string
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Get the public key as a hex string (compressed format)
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key.serialize())
    }

    /// Get the address derived from this key pair's public key
    pub fn address(&self) -> String {
        public_key_to_address(&self.public_key)
    }

    /// Sign a 32-byte message hash, producing a recoverable signature
    pub fn sign_recoverable(&self, message_hash: &[u8; 32]) -> Result<Signature, KeyError> {
        let secp = Secp256k1::new();
        let message = Message::from_digest_slice(message_hash)?;
        let rec_sig = secp.sign_ecdsa_recoverable(&message, &self.secret_key);
        let (rec_id, bytes) = rec_sig.serialize_compact();
        Ok(Signature {
            bytes,
            recovery_id: rec_id.to_i32() as u8,
        })
    }
}

/// Recover the public key that produced a signature over a message hash
pub fn recover_public_key(
    message_hash: &[u8; 32],
    signature: &Signature,
) -> Result<PublicKey, KeyError> {
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(message_hash)?;
    let rec_sig = signature.to_recoverable()?;
    secp.recover_ecdsa(&message, &rec_sig)
        .map_err(|_| KeyError::InvalidSignature)
}

/// Convert a public key to an address
///
/// Bitcoin-style address generation: Base58Check(version || RIPEMD160(SHA256(pubkey)))
pub fn public_key_to_address(public_key: &PublicKey) -> String {
    // SHA256 of the compressed public key
    let sha256_hash = sha256(&public_key.serialize());

    // RIPEMD160 of the SHA256 hash
    let mut ripemd = Ripemd160::new();
    ripemd.update(&sha256_hash);
    let ripemd_hash = ripemd.finalize();

    // Version byte 0x00 for signer addresses (leading '1')
    let mut address_bytes = vec![0x00];
    address_bytes.extend_from_slice(&ripemd_hash);
    base58check(address_bytes)
}

/// Base58Check-encode payload bytes (appends 4-byte double-SHA256 checksum)
pub fn base58check(mut payload: Vec<u8>) -> String {
    let checksum = {
        let first_hash = Sha256::digest(&payload);
        let second_hash = Sha256::digest(first_hash);
        second_hash[..4].to_vec()
    };
    payload.extend_from_slice(&checksum);
    bs58::encode(payload).into_string()
}

/// Parse a public key from hex string
pub fn public_key_from_hex(hex_key: &str) -> Result<PublicKey, KeyError> {
    let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPublicKey)?;
    PublicKey::from_slice(&bytes).map_err(|_| KeyError::InvalidPublicKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256_array;

    #[test]
    fn test_key_pair_generation() {
        let kp = KeyPair::generate();
        assert!(!kp.private_key_hex().is_empty());
        assert!(!kp.public_key_hex().is_empty());
        assert!(!kp.address().is_empty());
    }

    #[test]
    fn test_sign_and_recover() {
        let kp = KeyPair::generate();
        let hash = sha256_array(b"authorize this");

        let signature = kp.sign_recoverable(&hash).unwrap();
        let recovered = recover_public_key(&hash, &signature).unwrap();
        assert_eq!(recovered, kp.public_key);
        assert_eq!(public_key_to_address(&recovered), kp.address());
    }

    #[test]
    fn test_recover_wrong_hash_yields_other_key() {
        let kp = KeyPair::generate();
        let hash = sha256_array(b"signed message");
        let other = sha256_array(b"different message");

        let signature = kp.sign_recoverable(&hash).unwrap();
        // Recovery over a different hash succeeds but yields some other key
        if let Ok(recovered) = recover_public_key(&other, &signature) {
            assert_ne!(recovered, kp.public_key);
        }
    }

    #[test]
    fn test_signature_hex_round_trip() {
        let kp = KeyPair::generate();
        let hash = sha256_array(b"wire format");

        let signature = kp.sign_recoverable(&hash).unwrap();
        let parsed = Signature::from_hex(&signature.to_hex()).unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_malformed_signatures_rejected() {
        // Bad hex
        assert!(Signature::from_hex("not hex").is_err());
        // Wrong length
        assert!(Signature::from_hex(&hex::encode([0u8; 64])).is_err());
        // Recovery id out of range
        let mut raw = [0u8; 65];
        raw[64] = 7;
        assert!(Signature::from_hex(&hex::encode(raw)).is_err());
    }

    #[test]
    fn test_key_pair_from_hex() {
        let kp1 = KeyPair::generate();
        let private_hex = kp1.private_key_hex();

        let kp2 = KeyPair::from_private_key_hex(&private_hex).unwrap();
        assert_eq!(kp1.public_key_hex(), kp2.public_key_hex());
        assert_eq!(kp1.address(), kp2.address());
    }

    #[test]
    fn test_public_key_hex_round_trip() {
        let kp = KeyPair::generate();
        let parsed = public_key_from_hex(&kp.public_key_hex()).unwrap();
        assert_eq!(parsed, kp.public_key);
        assert!(public_key_from_hex("02deadbeef").is_err());
    }

    #[test]
    fn test_address_format() {
        let kp = KeyPair::generate();
        // Version 0x00 addresses start with '1'
        assert!(kp.address().starts_with('1'));
    }
}
