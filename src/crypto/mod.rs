//! Cryptographic utilities
//!
//! This module provides:
//! - SHA-256 hashing
//! - secp256k1 key management with recoverable ECDSA signatures
//! - Base58Check address derivation

pub mod hash;
pub mod keys;

pub use hash::{sha256, sha256_array, sha256_hex};
pub use keys::{
    base58check, public_key_from_hex, public_key_to_address, recover_public_key, KeyError,
    KeyPair, Signature,
};
