use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_DATA, GENESIS_PREVIOUS_HASH};
use crate::error::{ChainError, Result};

/// A single block in the blockchain holding an opaque text payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub timestamp: String, // RFC3339, hashed as text
    pub data: String,
    pub previous_hash: String,
    pub hash: String, // empty until mined
    pub nonce: u64,   // Proof-of-Work nonce
}

/// SHA-256 of `timestamp ++ data ++ previous_hash ++ nonce` rendered as lowercase hex.
///
/// The fields are concatenated without separators and the nonce is written in decimal.
pub fn calculate_hash(timestamp: &str, data: &str, previous_hash: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(data.as_bytes());
    hasher.update(previous_hash.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Render a timestamp the way it is stored in (and hashed from) a block.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Block {
    /// Create the unmined genesis block.
    pub fn genesis(timestamp: &DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(timestamp),
            data: GENESIS_DATA.to_string(),
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            hash: String::new(),
            nonce: 0,
        }
    }

    /// Create a new block linked to `previous` (not mined yet).
    pub fn new(timestamp: &DateTime<Utc>, data: &str, previous: &Block) -> Result<Self> {
        if data.is_empty() {
            return Err(ChainError::EmptyData);
        }

        Ok(Self {
            timestamp: format_timestamp(timestamp),
            data: data.to_string(),
            previous_hash: previous.hash.clone(),
            hash: String::new(),
            nonce: 0,
        })
    }

    /// Compute the hash of this block from its fields (excluding `hash` itself).
    pub fn compute_hash(&self) -> String {
        calculate_hash(&self.timestamp, &self.data, &self.previous_hash, self.nonce)
    }

    /// Whether the cached hash starts with `difficulty` hex zeros.
    ///
    /// Only the search applies this; chain validation does not.
    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        self.hash.len() >= difficulty && self.hash.bytes().take(difficulty).all(|c| c == b'0')
    }
}
