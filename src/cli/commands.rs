//! CLI command handlers
//!
//! Implements the command handlers for the `msig` binary. State is loaded
//! from and saved back to the JSON wallet book around each mutating
//! command.

use crate::crypto::{KeyPair, Signature};
use crate::storage::{Storage, StorageConfig, WalletBook};
use crate::wallet::{sign_digest, AdminCall, ThresholdPolicy};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub book: WalletBook,
    pub storage: Storage,
}

impl AppState {
    /// Load existing state, or start with an empty wallet book
    pub fn new(data_dir: &Path) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })?;

        let book = if storage.exists() {
            storage.load()?
        } else {
            WalletBook::default()
        };

        Ok(Self { book, storage })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.book)?;
        Ok(())
    }
}

/// Initialize an empty wallet book
pub fn cmd_init(data_dir: &PathBuf) -> CliResult<()> {
    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    })?;

    if storage.exists() {
        println!("⚠️  Wallet book already exists at {:?}", data_dir);
        return Ok(());
    }

    storage.save(&WalletBook::default())?;
    println!("✅ Wallet book initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    Ok(())
}

/// Generate a fresh signer key pair
pub fn cmd_keygen() -> CliResult<()> {
    let kp = KeyPair::generate();
    println!("🔑 New key pair generated");
    println!("   Address:     {}", kp.address());
    println!("   Public key:  {}", kp.public_key_hex());
    println!("   Private key: {}", kp.private_key_hex());
    println!("   ⚠️  Store the private key securely, it is shown only once");
    Ok(())
}

/// Create a multisig wallet
pub fn cmd_create(
    data_dir: &PathBuf,
    chain_id: u64,
    owners: Vec<String>,
    threshold: u8,
    unchecked: bool,
) -> CliResult<()> {
    let mut state = AppState::new(data_dir)?;

    let policy = if unchecked {
        ThresholdPolicy::Unchecked
    } else {
        ThresholdPolicy::Enforced
    };

    let wallet = state.book.factory.create(chain_id, owners, threshold, policy)?;
    println!("✅ Multisig wallet created");
    println!("   📬 Address:   {}", wallet.address());
    println!("   👥 Scheme:    {}", wallet.description());
    println!("   ⛓️  Chain id:  {}", wallet.chain_id());

    state.save()?;
    Ok(())
}

/// List all wallets
pub fn cmd_list(data_dir: &PathBuf) -> CliResult<()> {
    let state = AppState::new(data_dir)?;

    if state.book.factory.wallet_count() == 0 {
        println!("No wallets yet. Create one with `msig create`.");
        return Ok(());
    }

    println!("📋 Wallets ({}):", state.book.factory.wallet_count());
    for (i, wallet) in state.book.factory.list().enumerate() {
        println!(
            "   #{} {} ({}, nonce {}, balance {})",
            i,
            wallet.address(),
            wallet.description(),
            wallet.nonce(),
            state.book.ledger.balance_of(wallet.address())
        );
    }
    Ok(())
}

/// Show one wallet in detail
pub fn cmd_show(data_dir: &PathBuf, address: &str) -> CliResult<()> {
    let state = AppState::new(data_dir)?;
    let wallet = state
        .book
        .factory
        .get_by_address(address)
        .ok_or_else(|| format!("Wallet not found: {}", address))?;

    println!("📬 Wallet {}", wallet.address());
    println!("   Scheme:    {}", wallet.description());
    println!("   Chain id:  {}", wallet.chain_id());
    println!("   Nonce:     {}", wallet.nonce());
    println!("   Balance:   {}", state.book.ledger.balance_of(wallet.address()));
    println!("   Owners:");
    for owner in wallet.owners() {
        println!("     - {}", owner);
    }
    Ok(())
}

/// Credit an address on the ledger
pub fn cmd_deposit(data_dir: &PathBuf, address: &str, amount: u64) -> CliResult<()> {
    let mut state = AppState::new(data_dir)?;
    state.book.ledger.deposit(address, amount)?;
    println!(
        "💰 Deposited {} to {} (balance {})",
        amount,
        address,
        state.book.ledger.balance_of(address)
    );
    state.save()?;
    Ok(())
}

/// Print the digest to be signed for an operation at the current nonce
pub fn cmd_digest(
    data_dir: &PathBuf,
    wallet_address: &str,
    to: &str,
    value: u64,
    data_hex: &str,
) -> CliResult<()> {
    let state = AppState::new(data_dir)?;
    let wallet = state
        .book
        .factory
        .get_by_address(wallet_address)
        .ok_or_else(|| format!("Wallet not found: {}", wallet_address))?;

    let payload = hex::decode(data_hex)?;
    let digest = wallet.transaction_digest(wallet.nonce(), to, value, &payload);

    println!("🧾 Transaction digest (nonce {}):", wallet.nonce());
    println!("   {}", hex::encode(digest));
    Ok(())
}

/// Sign a digest with a private key
pub fn cmd_sign(private_key_hex: &str, digest_hex: &str) -> CliResult<()> {
    let kp = KeyPair::from_private_key_hex(private_key_hex)?;
    let digest = parse_digest(digest_hex)?;
    let signature = sign_digest(&kp, &digest)?;

    println!("✍️  Signed as {}", kp.address());
    println!("   {}", signature.to_hex());
    Ok(())
}

/// Execute an operation with collected signatures
pub fn cmd_execute(
    data_dir: &PathBuf,
    wallet_address: &str,
    to: &str,
    value: u64,
    data_hex: &str,
    signature_hexes: &[String],
) -> CliResult<()> {
    let mut state = AppState::new(data_dir)?;

    let payload = hex::decode(data_hex)?;
    let signatures = signature_hexes
        .iter()
        .map(|s| Signature::from_hex(s))
        .collect::<Result<Vec<_>, _>>()?;

    let wallet = state
        .book
        .factory
        .get_mut(wallet_address)
        .ok_or_else(|| format!("Wallet not found: {}", wallet_address))?;

    wallet.execute_transaction(to, value, &payload, &signatures, &mut state.book.ledger)?;

    println!("✅ Transaction executed");
    println!("   Nonce is now {}", wallet.nonce());
    state.save()?;
    Ok(())
}

/// Print the payload for an add-owner self-administration call
pub fn cmd_encode_add_owner(owner: &str, new_threshold: u8) -> CliResult<()> {
    print_payload(&AdminCall::AddOwner {
        owner: owner.to_string(),
        new_threshold,
    });
    Ok(())
}

/// Print the payload for a remove-owner self-administration call
pub fn cmd_encode_remove_owner(owner: &str, new_threshold: u8) -> CliResult<()> {
    print_payload(&AdminCall::RemoveOwner {
        owner: owner.to_string(),
        new_threshold,
    });
    Ok(())
}

/// Print the payload for an update-threshold self-administration call
pub fn cmd_encode_update_threshold(new_threshold: u8) -> CliResult<()> {
    print_payload(&AdminCall::UpdateThreshold { new_threshold });
    Ok(())
}

fn print_payload(call: &AdminCall) {
    println!("📦 Admin payload (pass as --data, destination = wallet address):");
    println!("   {}", hex::encode(call.encode()));
}

fn parse_digest(digest_hex: &str) -> CliResult<[u8; 32]> {
    let bytes = hex::decode(digest_hex)?;
    let digest: [u8; 32] = bytes
        .try_into()
        .map_err(|_| "Digest must be exactly 32 bytes")?;
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_state_round_trip() {
        let dir = TempDir::new().unwrap();
        let owner = KeyPair::generate().address();

        let mut state = AppState::new(dir.path()).unwrap();
        state
            .book
            .factory
            .create(1, vec![owner.clone()], 1, ThresholdPolicy::Enforced)
            .unwrap();
        state.save().unwrap();

        let reloaded = AppState::new(dir.path()).unwrap();
        assert_eq!(reloaded.book.factory.wallet_count(), 1);
        assert!(reloaded.book.factory.get(0).unwrap().is_owner(&owner));
    }

    #[test]
    fn test_parse_digest_length() {
        assert!(parse_digest(&hex::encode([0u8; 32])).is_ok());
        assert!(parse_digest(&hex::encode([0u8; 16])).is_err());
        assert!(parse_digest("zz").is_err());
    }
}
