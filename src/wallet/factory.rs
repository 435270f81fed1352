//! Wallet factory
//!
//! Creates multisig wallets and indexes them by creation order and by
//! address. Wallet addresses are deterministic in their configuration, so
//! creating the same configuration twice returns the existing wallet.

use crate::wallet::admin::ThresholdPolicy;
use crate::wallet::wallet::{MultisigWallet, WalletError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Factory and registry for multisig wallets
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WalletFactory {
    /// Wallets by address
    wallets: HashMap<String, MultisigWallet>,
    /// Addresses in creation order, for index lookup
    order: Vec<String>,
}

impl WalletFactory {
    /// Create a new empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wallet and register it.
    ///
    /// If a wallet with the same configuration (hence the same address)
    /// already exists, the existing wallet is returned unchanged.
    pub fn create(
        &mut self,
        chain_id: u64,
        owners: Vec<String>,
        signatures_required: u8,
        policy: ThresholdPolicy,
    ) -> Result<&MultisigWallet, WalletError> {
        let wallet = MultisigWallet::new(chain_id, owners, signatures_required, policy)?;
        let address = wallet.address().to_string();

        if !self.wallets.contains_key(&address) {
            self.order.push(address.clone());
            self.wallets.insert(address.clone(), wallet);
            log::debug!("Factory registered wallet #{}: {}", self.order.len() - 1, address);
        }

        Ok(&self.wallets[&address])
    }

    /// Get a wallet by creation index
    pub fn get(&self, index: usize) -> Option<&MultisigWallet> {
        self.order.get(index).and_then(|addr| self.wallets.get(addr))
    }

    /// Get a wallet by address
    pub fn get_by_address(&self, address: &str) -> Option<&MultisigWallet> {
        self.wallets.get(address)
    }

    /// Get mutable access to a wallet for execution
    pub fn get_mut(&mut self, address: &str) -> Option<&mut MultisigWallet> {
        self.wallets.get_mut(address)
    }

    /// Number of registered wallets
    pub fn wallet_count(&self) -> usize {
        self.order.len()
    }

    /// List wallets in creation order
    pub fn list(&self) -> impl Iterator<Item = &MultisigWallet> {
        self.order.iter().filter_map(|addr| self.wallets.get(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;

    #[test]
    fn test_create_and_index() {
        let mut factory = WalletFactory::new();
        let owner = KeyPair::generate().address();

        let address = factory
            .create(1, vec![owner.clone()], 1, ThresholdPolicy::Enforced)
            .unwrap()
            .address()
            .to_string();

        assert_eq!(factory.wallet_count(), 1);
        assert_eq!(factory.get(0).unwrap().address(), address);
        assert!(factory.get_by_address(&address).is_some());
        assert!(factory.get(1).is_none());
    }

    #[test]
    fn test_same_config_returns_existing() {
        let mut factory = WalletFactory::new();
        let owner = KeyPair::generate().address();

        let a1 = factory
            .create(1, vec![owner.clone()], 1, ThresholdPolicy::Enforced)
            .unwrap()
            .address()
            .to_string();
        let a2 = factory
            .create(1, vec![owner], 1, ThresholdPolicy::Enforced)
            .unwrap()
            .address()
            .to_string();

        assert_eq!(a1, a2);
        assert_eq!(factory.wallet_count(), 1);
    }

    #[test]
    fn test_invalid_config_propagates() {
        let mut factory = WalletFactory::new();
        let result = factory.create(1, vec![], 1, ThresholdPolicy::Enforced);
        assert!(matches!(result, Err(WalletError::NoOwners)));
        assert_eq!(factory.wallet_count(), 0);
    }

    #[test]
    fn test_list_in_creation_order() {
        let mut factory = WalletFactory::new();
        let o1 = KeyPair::generate().address();
        let o2 = KeyPair::generate().address();

        let a1 = factory
            .create(1, vec![o1], 1, ThresholdPolicy::Enforced)
            .unwrap()
            .address()
            .to_string();
        let a2 = factory
            .create(1, vec![o2], 1, ThresholdPolicy::Enforced)
            .unwrap()
            .address()
            .to_string();

        let listed: Vec<&str> = factory.list().map(|w| w.address()).collect();
        assert_eq!(listed, vec![a1.as_str(), a2.as_str()]);
    }
}
