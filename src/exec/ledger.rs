//! Native-value ledger
//!
//! A simple balance book for the native currency. The ledger implements
//! [`CallExecutor`], so a wallet wired to it can move value to arbitrary
//! destinations; call payloads are opaque at this layer and pass through
//! untouched.

use crate::exec::call::{CallError, CallExecutor, CallOutcome, CallRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balance book: address -> native units
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    balances: HashMap<String, u64>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the balance of an address (0 if never seen)
    pub fn balance_of(&self, address: &str) -> u64 {
        *self.balances.get(address).unwrap_or(&0)
    }

    /// Credit an address
    pub fn deposit(&mut self, address: &str, amount: u64) -> Result<(), CallError> {
        let balance = self.balances.entry(address.to_string()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| CallError::BalanceOverflow(address.to_string()))?;
        Ok(())
    }

    /// Move value between two addresses
    pub fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), CallError> {
        if amount == 0 {
            return Ok(());
        }

        // The two balance reads below alias for from == to, so a
        // self-transfer would credit without debiting
        if from == to {
            return Err(CallError::SelfTransfer);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(CallError::InsufficientFunds {
                have: from_balance,
                need: amount,
            });
        }

        let to_balance = self.balance_of(to);
        let new_to = to_balance
            .checked_add(amount)
            .ok_or_else(|| CallError::BalanceOverflow(to.to_string()))?;

        self.balances.insert(from.to_string(), from_balance - amount);
        self.balances.insert(to.to_string(), new_to);
        Ok(())
    }
}

impl CallExecutor for Ledger {
    fn execute(&mut self, request: &CallRequest) -> Result<CallOutcome, CallError> {
        self.transfer(&request.from, &request.to, request.value)?;

        log::debug!(
            "Call executed: {} -> {} value {} ({} payload bytes)",
            request.from,
            request.to,
            request.value,
            request.data.len()
        );

        Ok(CallOutcome::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_accumulates() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 50).unwrap();
        ledger.deposit("1Alice", 25).unwrap();
        assert_eq!(ledger.balance_of("1Alice"), 75);
        assert_eq!(ledger.balance_of("1Bob"), 0);
    }

    #[test]
    fn test_transfer_moves_exact_amount() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 100).unwrap();

        ledger.transfer("1Alice", "1Bob", 30).unwrap();
        assert_eq!(ledger.balance_of("1Alice"), 70);
        assert_eq!(ledger.balance_of("1Bob"), 30);
    }

    #[test]
    fn test_overdraft_rejected() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 10).unwrap();

        let result = ledger.transfer("1Alice", "1Bob", 11);
        assert!(matches!(
            result,
            Err(CallError::InsufficientFunds { have: 10, need: 11 })
        ));
        // Nothing moved
        assert_eq!(ledger.balance_of("1Alice"), 10);
        assert_eq!(ledger.balance_of("1Bob"), 0);
    }

    #[test]
    fn test_self_transfer_rejected_and_conserves_balance() {
        let mut ledger = Ledger::new();
        ledger.deposit("1Alice", 100).unwrap();

        let result = ledger.transfer("1Alice", "1Alice", 40);
        assert!(matches!(result, Err(CallError::SelfTransfer)));
        assert_eq!(ledger.balance_of("1Alice"), 100);

        // Zero-amount self-transfer stays a no-op
        ledger.transfer("1Alice", "1Alice", 0).unwrap();
        assert_eq!(ledger.balance_of("1Alice"), 100);
    }

    #[test]
    fn test_zero_value_call_succeeds_without_funds() {
        let mut ledger = Ledger::new();
        let request = CallRequest {
            from: "1Empty".to_string(),
            to: "1Bob".to_string(),
            value: 0,
            data: vec![0x00],
        };
        assert!(ledger.execute(&request).is_ok());
    }
}
