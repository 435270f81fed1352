//! Call execution boundary and native-value ledger

pub mod call;
pub mod ledger;

pub use call::{CallError, CallExecutor, CallOutcome, CallRequest};
pub use ledger::Ledger;
