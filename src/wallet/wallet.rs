//! Multi-signature wallet core
//!
//! A stateful authority holding an owner set, a signature threshold, and
//! a monotonic nonce. Arbitrary operations (native value plus an opaque
//! payload) execute only when accompanied by enough valid signatures over
//! the canonical transaction digest for the *current* nonce, which makes
//! every collected signature single-use.

use crate::crypto::hash::sha256;
use crate::crypto::keys::{base58check, Signature};
use crate::exec::call::{CallExecutor, CallOutcome, CallRequest};
use crate::wallet::admin::{AdminCall, ThresholdPolicy};
use crate::wallet::digest::{recover_signer, transaction_digest};
use chrono::{DateTime, Utc};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised by wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid signature format")]
    InvalidSignatureFormat,
    #[error("Unknown signer: {0}")]
    UnknownSigner(String),
    #[error("Duplicate signer: {0}")]
    DuplicateSigner(String),
    #[error("Signatures out of order")]
    SignaturesOutOfOrder,
    #[error("Insufficient signatures: have {have}, need {need}")]
    InsufficientSignatures { have: usize, need: u8 },
    #[error("Callee reverted: {0}")]
    CalleeReverted(String),
    #[error("Duplicate owner: {0}")]
    DuplicateOwner(String),
    #[error("Unknown owner: {0}")]
    UnknownOwner(String),
    #[error("Cannot remove the last owner")]
    CannotRemoveLastOwner,
    #[error("Threshold {threshold} exceeds owner count {owners}")]
    ThresholdExceedsOwnerCount { threshold: u8, owners: usize },
    #[error("Invalid threshold: threshold must be at least 1")]
    InvalidThreshold,
    #[error("Owner set cannot be empty")]
    NoOwners,
    #[error("Invalid admin payload: {0}")]
    InvalidAdminPayload(String),
}

/// An M-of-N multi-signature wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigWallet {
    /// Deterministic wallet address (version 0x05, leading '3')
    address: String,
    /// Domain identifier baked into every digest
    chain_id: u64,
    /// Authorized signer addresses
    owners: BTreeSet<String>,
    /// Signatures required per operation (M in M-of-N)
    signatures_required: u8,
    /// Incremented exactly once per successfully executed operation
    nonce: u64,
    /// Threshold validation policy for self-administration
    policy: ThresholdPolicy,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl MultisigWallet {
    /// Create a new wallet.
    ///
    /// # Errors
    /// Returns an error if the owner list is empty or contains duplicates,
    /// or if the threshold is zero or exceeds the owner count.
    pub fn new(
        chain_id: u64,
        owners: Vec<String>,
        signatures_required: u8,
        policy: ThresholdPolicy,
    ) -> Result<Self, WalletError> {
        if owners.is_empty() {
            return Err(WalletError::NoOwners);
        }

        let mut owner_set = BTreeSet::new();
        for owner in owners {
            if !owner_set.insert(owner.clone()) {
                return Err(WalletError::DuplicateOwner(owner));
            }
        }

        if signatures_required == 0 {
            return Err(WalletError::InvalidThreshold);
        }
        if signatures_required as usize > owner_set.len() {
            return Err(WalletError::ThresholdExceedsOwnerCount {
                threshold: signatures_required,
                owners: owner_set.len(),
            });
        }

        let address = Self::generate_address(chain_id, signatures_required, &owner_set);
        log::info!(
            "Multisig wallet {} created: {}-of-{} on chain {}",
            address,
            signatures_required,
            owner_set.len(),
            chain_id
        );

        Ok(Self {
            address,
            chain_id,
            owners: owner_set,
            signatures_required,
            nonce: 0,
            policy,
            created_at: Utc::now(),
        })
    }

    /// Derive the deterministic wallet address from the initial configuration
    ///
    /// Address = Base58Check(0x05 || RIPEMD160(SHA256(chain_id || threshold || sorted owners)))
    fn generate_address(chain_id: u64, threshold: u8, owners: &BTreeSet<String>) -> String {
        let mut script_data = Vec::new();
        script_data.extend_from_slice(&chain_id.to_be_bytes());
        script_data.push(threshold);
        for owner in owners {
            script_data.extend_from_slice(owner.as_bytes());
        }

        let sha256_hash = sha256(&script_data);

        let mut ripemd = Ripemd160::new();
        ripemd.update(&sha256_hash);
        let ripemd_hash = ripemd.finalize();

        // P2SH-style version byte, addresses start with '3'
        let mut address_bytes = vec![0x05];
        address_bytes.extend_from_slice(&ripemd_hash);
        base58check(address_bytes)
    }

    // =========================================================================
    // Read-only queries
    // =========================================================================

    /// Get the wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Get the chain id this wallet signs for
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Check whether an address is an authorized owner
    pub fn is_owner(&self, address: &str) -> bool {
        self.owners.contains(address)
    }

    /// Get the current nonce
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Get the signature threshold
    pub fn threshold(&self) -> u8 {
        self.signatures_required
    }

    /// Get the owner addresses in canonical order
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(String::as_str)
    }

    /// Get the owner count (N in M-of-N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Get human-readable description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.signatures_required, self.owners.len())
    }

    /// Compute the transaction digest for an operation at a given nonce
    pub fn transaction_digest(
        &self,
        nonce: u64,
        to: &str,
        value: u64,
        payload: &[u8],
    ) -> [u8; 32] {
        transaction_digest(self.chain_id, &self.address, nonce, to, value, payload)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute an operation authorized by a bundle of owner signatures.
    ///
    /// Signatures must recover to distinct owner addresses in strictly
    /// increasing canonical order, and at least `threshold()` of them are
    /// required. On success the nonce advances by exactly one and the call
    /// is dispatched: to the injected executor, or internally when the
    /// destination is the wallet itself (self-administration). Any failure
    /// leaves the wallet state untouched.
    pub fn execute_transaction(
        &mut self,
        to: &str,
        value: u64,
        payload: &[u8],
        signatures: &[Signature],
        executor: &mut dyn CallExecutor,
    ) -> Result<CallOutcome, WalletError> {
        let digest = self.transaction_digest(self.nonce, to, value, payload);

        let mut signers: Vec<String> = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let signer = recover_signer(&digest, signature)
                .map_err(|_| WalletError::InvalidSignatureFormat)?;

            if !self.owners.contains(&signer) {
                return Err(WalletError::UnknownSigner(signer));
            }

            if let Some(previous) = signers.last() {
                if signer == *previous {
                    return Err(WalletError::DuplicateSigner(signer));
                }
                // Strict ordering makes duplicate detection an
                // adjacent-pair comparison
                if signer < *previous {
                    return Err(WalletError::SignaturesOutOfOrder);
                }
            }

            signers.push(signer);
        }

        if signers.len() < self.signatures_required as usize {
            return Err(WalletError::InsufficientSignatures {
                have: signers.len(),
                need: self.signatures_required,
            });
        }

        // Nonce advances before the call; rolled back if the callee fails
        // so a failed operation consumes nothing.
        self.nonce += 1;

        let result = if to == self.address {
            self.apply_admin(payload)
        } else {
            executor
                .execute(&CallRequest {
                    from: self.address.clone(),
                    to: to.to_string(),
                    value,
                    data: payload.to_vec(),
                })
                .map_err(|e| WalletError::CalleeReverted(e.to_string()))
        };

        match result {
            Ok(outcome) => {
                log::info!(
                    "Wallet {} executed nonce {} -> {} (value {})",
                    self.address,
                    self.nonce - 1,
                    to,
                    value
                );
                Ok(outcome)
            }
            Err(e) => {
                self.nonce -= 1;
                Err(e)
            }
        }
    }

    /// Apply a self-administration payload. All checks run before any
    /// mutation so a rejected call changes nothing.
    fn apply_admin(&mut self, payload: &[u8]) -> Result<CallOutcome, WalletError> {
        let call = AdminCall::decode(payload)
            .map_err(|e| WalletError::InvalidAdminPayload(e.to_string()))?;

        match call {
            AdminCall::AddOwner {
                owner,
                new_threshold,
            } => {
                if self.owners.contains(&owner) {
                    return Err(WalletError::DuplicateOwner(owner));
                }
                self.check_threshold(new_threshold, self.owners.len() + 1)?;

                self.owners.insert(owner.clone());
                self.signatures_required = new_threshold;
                log::info!("Wallet {}: owner {} added, now {}", self.address, owner, self.description());
            }
            AdminCall::RemoveOwner {
                owner,
                new_threshold,
            } => {
                if !self.owners.contains(&owner) {
                    return Err(WalletError::UnknownOwner(owner));
                }
                if self.owners.len() == 1 && new_threshold > 0 {
                    return Err(WalletError::CannotRemoveLastOwner);
                }
                self.check_threshold(new_threshold, self.owners.len() - 1)?;

                self.owners.remove(&owner);
                self.signatures_required = new_threshold;
                log::info!("Wallet {}: owner {} removed, now {}", self.address, owner, self.description());
            }
            AdminCall::UpdateThreshold { new_threshold } => {
                self.check_threshold(new_threshold, self.owners.len())?;

                self.signatures_required = new_threshold;
                log::info!("Wallet {}: threshold set to {}", self.address, new_threshold);
            }
        }

        Ok(CallOutcome::default())
    }

    /// Validate a new threshold against the post-mutation owner count,
    /// unless the wallet runs the `Unchecked` policy.
    fn check_threshold(&self, threshold: u8, owner_count: usize) -> Result<(), WalletError> {
        if self.policy == ThresholdPolicy::Unchecked {
            return Ok(());
        }
        if threshold == 0 {
            return Err(WalletError::InvalidThreshold);
        }
        if threshold as usize > owner_count {
            return Err(WalletError::ThresholdExceedsOwnerCount {
                threshold,
                owners: owner_count,
            });
        }
        Ok(())
    }
}
