//! JSON persistence for wallet state

pub mod persistence;

pub use persistence::{Storage, StorageConfig, StorageError, WalletBook};
