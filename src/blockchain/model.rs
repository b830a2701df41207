use chrono::{DateTime, Utc};
use log::{info, warn};

use super::pow::{MiningConfig, mine};
use super::{Block, GENESIS_DATA};
use crate::error::{ChainError, Result};

/// Simple in-memory blockchain with Proof-of-Work.
///
/// The chain is only ever extended through [`Blockchain::append`], which takes
/// `&mut self`; callers own it exclusively while mining.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    config: MiningConfig,
}

impl Blockchain {
    /// Initialize a new blockchain with a mined genesis block.
    pub fn new(timestamp: &DateTime<Utc>, config: MiningConfig) -> Result<Self> {
        let mut bc = Self {
            chain: Vec::with_capacity(10),
            config,
        };
        bc.append(Block::genesis(timestamp))?;
        Ok(bc)
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Build an unmined block carrying `data` on top of the current tip.
    pub fn new_block(&self, timestamp: &DateTime<Utc>, data: &str) -> Result<Block> {
        Block::new(timestamp, data, self.last_block())
    }

    /// Mine `block` and append it if the extended chain validates.
    ///
    /// The block is mined before validation, so a rejected append still pays for the
    /// search. On rejection the chain is left exactly as it was.
    pub fn append(&mut self, block: Block) -> Result<&Block> {
        let mined = mine(&block, &self.config);

        let mut candidate = Vec::with_capacity(self.chain.len() + 1);
        candidate.extend_from_slice(&self.chain);
        candidate.push(mined);

        if !is_valid_chain(&candidate) {
            warn!(
                "rejected block {:?}: previous hash {} does not extend tip",
                candidate[candidate.len() - 1].data,
                candidate[candidate.len() - 1].previous_hash
            );
            return Err(ChainError::InconsistentChain);
        }

        self.chain = candidate;
        let tip = self.last_block();
        info!(
            "sealed block #{} (hash={}, nonce={})",
            self.chain.len() - 1,
            tip.hash,
            tip.nonce
        );
        Ok(tip)
    }

    /// Validate the entire chain: genesis payload, hashes and linkage.
    pub fn is_valid(&self) -> bool {
        is_valid_chain(&self.chain)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn mining_config(&self) -> MiningConfig {
        self.config
    }

    pub fn set_mining_config(&mut self, config: MiningConfig) {
        // NOTE: Changing difficulty or workers affects future blocks only.
        self.config = config;
    }
}

/// Check genesis identity and the recompute/link invariants of `chain`.
///
/// The difficulty prefix of stored hashes is not re-checked here.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    let Some(genesis) = chain.first() else {
        return false;
    };

    if genesis.data != GENESIS_DATA {
        return false;
    }

    chain.windows(2).all(|pair| {
        let (previous, current) = (&pair[0], &pair[1]);
        current.hash == current.compute_hash() && current.previous_hash == previous.hash
    })
}
