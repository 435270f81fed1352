//! Wallet persistence layer
//!
//! Provides save/load functionality for the wallet book (factory plus
//! ledger) as JSON, with temp-file writes and backup rotation.

use crate::exec::Ledger;
use crate::wallet::WalletFactory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Everything the CLI persists between invocations
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WalletBook {
    pub factory: WalletFactory,
    pub ledger: Ledger,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub wallet_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".msig_data"),
            wallet_file: "wallets.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Wallet storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the wallet file path
    fn wallet_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.wallet_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> std::path::PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.wallet_file, index))
    }

    /// Check whether a wallet book exists on disk
    pub fn exists(&self) -> bool {
        self.wallet_path().exists()
    }

    /// Save the wallet book to disk
    pub fn save(&self, book: &WalletBook) -> Result<(), StorageError> {
        let path = self.wallet_path();

        // Create backup if enabled and the cap allows any
        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("wallets.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, book)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the wallet book from disk
    pub fn load(&self) -> Result<WalletBook, StorageError> {
        let path = self.wallet_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Wallet file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);
        let book = serde_json::from_reader(reader)?;

        Ok(book)
    }

    /// Shift existing backups up by one index, dropping the oldest
    fn rotate_backups(&self) -> Result<(), StorageError> {
        for i in (0..self.config.max_backups.saturating_sub(1)).rev() {
            let from = self.backup_path(i);
            if from.exists() {
                fs::rename(&from, self.backup_path(i + 1))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::wallet::ThresholdPolicy;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> Storage {
        Storage::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let mut book = WalletBook::default();
        let owner = KeyPair::generate().address();
        let address = book
            .factory
            .create(1, vec![owner.clone()], 1, ThresholdPolicy::Enforced)
            .unwrap()
            .address()
            .to_string();
        book.ledger.deposit(&address, 1_000).unwrap();

        storage.save(&book).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        let wallet = loaded.factory.get_by_address(&address).unwrap();
        assert!(wallet.is_owner(&owner));
        assert_eq!(loaded.ledger.balance_of(&address), 1_000);
    }

    #[test]
    fn test_load_missing_fails() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(!storage.exists());
        assert!(matches!(storage.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_backups_rotate_on_save() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let book = WalletBook::default();
        storage.save(&book).unwrap();
        storage.save(&book).unwrap();
        storage.save(&book).unwrap();

        assert!(dir.path().join("wallets.json").exists());
        assert!(dir.path().join("wallets.json.backup.0").exists());
        assert!(dir.path().join("wallets.json.backup.1").exists());
    }

    #[test]
    fn test_zero_backup_cap_writes_no_backups() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
            max_backups: 0,
            ..Default::default()
        })
        .unwrap();

        let book = WalletBook::default();
        storage.save(&book).unwrap();
        storage.save(&book).unwrap();

        assert!(dir.path().join("wallets.json").exists());
        assert!(!dir.path().join("wallets.json.backup.0").exists());
    }
}
