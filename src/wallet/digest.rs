//! Transaction digest construction
//!
//! Builds the canonical 32-byte hash a proposed operation is signed over.
//! The digest commits to the chain id and the wallet's own address so a
//! signature collected for one deployment can never be replayed against
//! another chain or another wallet.

use crate::crypto::hash::sha256_array;
use crate::crypto::keys::{public_key_to_address, recover_public_key, KeyError, KeyPair, Signature};

/// Prefix applied to a digest before signing, mirroring the off-wallet
/// signed-message convention. Recovery applies the same prefix, so both
/// sides agree bit-for-bit on the signed preimage.
const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19MultiSig Signed Message:\n32";

/// Build the canonical transaction digest.
///
/// Every field is length- or width-delimited before hashing so no two
/// distinct operations can encode to the same byte stream.
pub fn transaction_digest(
    chain_id: u64,
    wallet_address: &str,
    nonce: u64,
    to: &str,
    value: u64,
    payload: &[u8],
) -> [u8; 32] {
    let mut data = Vec::with_capacity(64 + wallet_address.len() + to.len() + payload.len());

    data.extend_from_slice(&chain_id.to_be_bytes());
    encode_bytes(&mut data, wallet_address.as_bytes());
    data.extend_from_slice(&nonce.to_be_bytes());
    encode_bytes(&mut data, to.as_bytes());
    data.extend_from_slice(&value.to_be_bytes());
    encode_bytes(&mut data, payload);

    sha256_array(&data)
}

fn encode_bytes(out: &mut Vec<u8>, field: &[u8]) {
    // u64 width matches the fixed-width fields and cannot truncate any
    // length a Vec can represent
    out.extend_from_slice(&(field.len() as u64).to_be_bytes());
    out.extend_from_slice(field);
}

/// Hash a transaction digest with the signed-message prefix.
///
/// This is the exact 32-byte preimage passed to ECDSA on both the signing
/// and the recovery side.
pub fn signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = Vec::with_capacity(SIGNED_MESSAGE_PREFIX.len() + 32);
    data.extend_from_slice(SIGNED_MESSAGE_PREFIX);
    data.extend_from_slice(digest);
    sha256_array(&data)
}

/// Sign a transaction digest with a key pair, applying the message prefix
pub fn sign_digest(key_pair: &KeyPair, digest: &[u8; 32]) -> Result<Signature, KeyError> {
    key_pair.sign_recoverable(&signed_message_hash(digest))
}

/// Recover the address that signed a transaction digest
pub fn recover_signer(digest: &[u8; 32], signature: &Signature) -> Result<String, KeyError> {
    let public_key = recover_public_key(&signed_message_hash(digest), signature)?;
    Ok(public_key_to_address(&public_key))
}
