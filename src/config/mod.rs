//! Configuration: command line arguments and account documents.
//!
//! - [`cli`] - clap argument definitions
//! - [`accounts`] - YAML account documents and their validation

pub mod accounts;
pub mod cli;

pub use accounts::{
    load_accounts, parse_account_array, parse_account_map, AccountEntry, Origin, RawAccountSpec,
};
pub use cli::{Cli, LogLevel};
