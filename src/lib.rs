//! powchain: a minimal proof-of-work ledger.
//!
//! The block engine lives in [`blockchain`]: hashing, the nonce search (sequential or
//! split across worker threads), chain validation and append-if-valid. [`api`] exposes
//! the chain over HTTP and [`config`] reads the process settings.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;

pub use blockchain::{Block, Blockchain, MiningConfig};
pub use config::{Config, ConfigError};
pub use error::{ChainError, Result};
