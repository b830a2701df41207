use crate::blockchain::{Block, Blockchain};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared application state holding the in-memory blockchain.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
}

impl AppState {
    pub fn new(blockchain: Blockchain) -> Self {
        Self {
            blockchain: Mutex::new(blockchain),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize, Deserialize)]
pub struct ChainResponse {
    pub length: usize,
    pub difficulty: u32,
    pub workers: usize,
    pub chain: Vec<Block>,
}

#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize, Deserialize)]
pub struct NewBlockRequest {
    pub data: String,
}

#[derive(Serialize, Deserialize)]
pub struct NewBlockResponse {
    pub index: usize,
    pub hash: String,
    pub nonce: u64,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize, Deserialize)]
pub struct MiningConfigBody {
    pub difficulty: u32,
    pub workers: usize,
}
