//! Multisig Wallet: a replay-safe M-of-N authorization engine in Rust
//!
//! This crate provides a multi-signature wallet core featuring:
//! - Canonical transaction digests with chain and wallet identity baked
//!   in (cross-chain / cross-wallet replay protection)
//! - Recoverable ECDSA signatures (secp256k1) with signer recovery
//! - Threshold authorization with strict canonical signature ordering
//! - A monotonic nonce consumed exactly once per executed operation
//! - Self-administration (owner and threshold changes) routed through the
//!   same signature gate as every other operation
//! - A pluggable call-executor boundary with a native-value ledger
//! - JSON persistence with backup rotation
//!
//! # Example
//!
//! ```rust
//! use multisig_wallet::crypto::KeyPair;
//! use multisig_wallet::exec::Ledger;
//! use multisig_wallet::wallet::{sign_digest, MultisigWallet, ThresholdPolicy};
//!
//! let owner = KeyPair::generate();
//! let mut wallet = MultisigWallet::new(
//!     1,
//!     vec![owner.address()],
//!     1,
//!     ThresholdPolicy::Enforced,
//! ).unwrap();
//!
//! let mut ledger = Ledger::new();
//! ledger.deposit(wallet.address(), 1_000).unwrap();
//!
//! // Sign the digest for the current nonce, then execute
//! let dest = KeyPair::generate().address();
//! let digest = wallet.transaction_digest(wallet.nonce(), &dest, 100, b"");
//! let sig = sign_digest(&owner, &digest).unwrap();
//! wallet.execute_transaction(&dest, 100, b"", &[sig], &mut ledger).unwrap();
//!
//! assert_eq!(wallet.nonce(), 1);
//! assert_eq!(ledger.balance_of(&dest), 100);
//! ```

pub mod cli;
pub mod crypto;
pub mod exec;
pub mod storage;
pub mod wallet;

// Re-export commonly used types
pub use crypto::{KeyPair, Signature};
pub use exec::{CallError, CallExecutor, CallOutcome, CallRequest, Ledger};
pub use storage::{Storage, StorageConfig, WalletBook};
pub use wallet::{
    recover_signer, sign_digest, transaction_digest, AdminCall, MultisigWallet, ThresholdPolicy,
    WalletFactory, WalletError,
};
