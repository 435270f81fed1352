//! Multi-signature authorization engine
//!
//! An M-of-N wallet that authorizes arbitrary operations (native value
//! plus an opaque payload) once presented with enough valid signatures
//! over the canonical transaction digest. The digest commits to the
//! current nonce, so every bundle is single-use; self-administration
//! (owner and threshold changes) rides through the same gate.
//!
//! # Example
//!
//! ```ignore
//! use multisig_wallet::wallet::{MultisigWallet, ThresholdPolicy};
//! use multisig_wallet::exec::Ledger;
//!
//! let mut wallet = MultisigWallet::new(1, vec![owner.address()], 1, ThresholdPolicy::Enforced)?;
//! let mut ledger = Ledger::new();
//!
//! let digest = wallet.transaction_digest(wallet.nonce(), &dest, 100, b"");
//! let sig = sign_digest(&owner, &digest)?;
//! wallet.execute_transaction(&dest, 100, b"", &[sig], &mut ledger)?;
//! ```

pub mod admin;
pub mod digest;
pub mod factory;
pub mod wallet;

pub use admin::{AdminCall, ThresholdPolicy};
pub use digest::{recover_signer, sign_digest, signed_message_hash, transaction_digest};
pub use factory::WalletFactory;
pub use wallet::{MultisigWallet, WalletError};
