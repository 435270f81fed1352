//! The authorized-call boundary
//!
//! `execute_transaction` forwards approved operations to an injected
//! [`CallExecutor`]. The wallet core never touches balances or external
//! state directly; everything outward goes through this seam, which lets
//! the same core run against an in-memory ledger, a durable store, or a
//! test double.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a call executor can report back to the wallet
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Callee rejected the call: {0}")]
    Rejected(String),
    #[error("Insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: u64, need: u64 },
    #[error("Invalid transfer: cannot transfer to self")]
    SelfTransfer,
    #[error("Balance overflow for {0}")]
    BalanceOverflow(String),
}

/// An outward call approved by the wallet: sender, destination, native
/// value, and an opaque payload the destination may interpret
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallRequest {
    pub from: String,
    pub to: String,
    pub value: u64,
    pub data: Vec<u8>,
}

/// Result of a successful outward call
#[derive(Clone, Debug, Default)]
pub struct CallOutcome {
    /// Data returned by the destination, if any
    pub return_data: Vec<u8>,
}

/// Capability for performing an approved call against external state.
///
/// Implementations must be all-or-nothing: on `Err` no balance or state
/// change may persist, since the wallet rolls its nonce back and reports
/// the whole operation as failed.
pub trait CallExecutor {
    fn execute(&mut self, request: &CallRequest) -> Result<CallOutcome, CallError>;
}
