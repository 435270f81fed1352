//! Command-line interface for the multisig wallet

pub mod commands;

pub use commands::{AppState, CliResult};
