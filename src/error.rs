//! Error types for block construction and chain extension.

use thiserror::Error;

/// Result alias for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors surfaced by the chain builder.
///
/// Hashing, mining and validation are total and never produce one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A block was requested with an empty payload.
    #[error("cannot create a block with no data")]
    EmptyData,

    /// The mined candidate did not validate against the chain. The chain is unchanged.
    #[error("invalid block (previous hash is inconsistent with the chain); blockchain was not updated")]
    InconsistentChain,
}
