//! Multisig Wallet CLI Application
//!
//! A command-line interface for creating multisig wallets, collecting
//! signatures, and executing authorized operations.

use clap::{Parser, Subcommand};
use multisig_wallet::cli::commands;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "msig")]
#[command(version = "0.1.0")]
#[command(about = "A replay-safe M-of-N multi-signature wallet", long_about = None)]
struct Cli {
    /// Data directory for wallet storage
    #[arg(short, long, default_value = ".msig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize an empty wallet book
    Init,

    /// Generate a new signer key pair
    Keygen,

    /// Create a multisig wallet
    Create {
        /// Chain id baked into every transaction digest
        #[arg(short, long, default_value = "1")]
        chain_id: u64,

        /// Owner addresses
        #[arg(short, long, required = true, num_args = 1..)]
        owners: Vec<String>,

        /// Signatures required per operation (M in M-of-N)
        #[arg(short, long)]
        threshold: u8,

        /// Skip threshold-vs-owner-count validation on later admin calls
        #[arg(long)]
        unchecked: bool,
    },

    /// List all wallets
    List,

    /// Show one wallet in detail
    Show {
        /// Wallet address
        address: String,
    },

    /// Credit an address on the ledger
    Deposit {
        /// Address to credit
        address: String,
        /// Amount in native units
        amount: u64,
    },

    /// Print the digest to sign for an operation at the current nonce
    Digest {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,
        /// Destination address
        #[arg(long)]
        to: String,
        /// Native value to send
        #[arg(short, long, default_value = "0")]
        value: u64,
        /// Hex-encoded payload
        #[arg(long, default_value = "")]
        data: String,
    },

    /// Sign a digest with a private key
    Sign {
        /// Hex-encoded private key
        #[arg(short, long)]
        key: String,
        /// Hex-encoded 32-byte digest
        #[arg(long)]
        digest: String,
    },

    /// Execute an operation with collected signatures
    Execute {
        /// Wallet address
        #[arg(short, long)]
        wallet: String,
        /// Destination address
        #[arg(long)]
        to: String,
        /// Native value to send
        #[arg(short, long, default_value = "0")]
        value: u64,
        /// Hex-encoded payload
        #[arg(long, default_value = "")]
        data: String,
        /// Hex-encoded signatures, in canonical signer order
        #[arg(short, long, required = true, num_args = 1..)]
        signatures: Vec<String>,
    },

    /// Encode a self-administration payload
    Encode {
        #[command(subcommand)]
        call: EncodeCommands,
    },
}

#[derive(Subcommand)]
enum EncodeCommands {
    /// Add an owner and set a new threshold
    AddOwner {
        owner: String,
        #[arg(short, long)]
        threshold: u8,
    },
    /// Remove an owner and set a new threshold
    RemoveOwner {
        owner: String,
        #[arg(short, long)]
        threshold: u8,
    },
    /// Change the signature threshold
    UpdateThreshold {
        #[arg(short, long)]
        threshold: u8,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::cmd_init(&cli.data_dir),
        Commands::Keygen => commands::cmd_keygen(),
        Commands::Create {
            chain_id,
            owners,
            threshold,
            unchecked,
        } => commands::cmd_create(&cli.data_dir, chain_id, owners, threshold, unchecked),
        Commands::List => commands::cmd_list(&cli.data_dir),
        Commands::Show { address } => commands::cmd_show(&cli.data_dir, &address),
        Commands::Deposit { address, amount } => {
            commands::cmd_deposit(&cli.data_dir, &address, amount)
        }
        Commands::Digest {
            wallet,
            to,
            value,
            data,
        } => commands::cmd_digest(&cli.data_dir, &wallet, &to, value, &data),
        Commands::Sign { key, digest } => commands::cmd_sign(&key, &digest),
        Commands::Execute {
            wallet,
            to,
            value,
            data,
            signatures,
        } => commands::cmd_execute(&cli.data_dir, &wallet, &to, value, &data, &signatures),
        Commands::Encode { call } => match call {
            EncodeCommands::AddOwner { owner, threshold } => {
                commands::cmd_encode_add_owner(&owner, threshold)
            }
            EncodeCommands::RemoveOwner { owner, threshold } => {
                commands::cmd_encode_remove_owner(&owner, threshold)
            }
            EncodeCommands::UpdateThreshold { threshold } => {
                commands::cmd_encode_update_threshold(threshold)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}
