//! Proof-of-Work search.
//!
//! Mining is guessing `Block::nonce` until `Block::hash` starts with `difficulty`
//! hex zeros. The search is unbounded: it has no iteration cap or deadline and only
//! returns once a qualifying nonce is found. Every increment of `difficulty` multiplies
//! the expected work by 16, so keep it small.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Block, DEFAULT_DIFFICULTY};

/// Tunables read by the search at the start of every `mine` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Number of leading `'0'` hex characters required of a mined hash.
    pub difficulty: u32,
    /// Number of concurrent search workers (1 = no concurrency).
    pub workers: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            workers: 1,
        }
    }
}

impl MiningConfig {
    pub fn new(difficulty: u32, workers: usize) -> Self {
        Self {
            difficulty,
            workers,
        }
    }
}

/// Mine a copy of `block`, returning it with `nonce` and `hash` set.
///
/// With `workers <= 1` the nonce space is walked sequentially from the block's current
/// nonce. Otherwise `workers` threads split it into residue classes; the first to find a
/// solution wins and the rest stop. Which nonce comes back is then scheduling dependent,
/// but it always satisfies the same prefix.
pub fn mine(block: &Block, config: &MiningConfig) -> Block {
    debug!(
        "MINER - start (difficulty={}, workers={}, nonce={})",
        config.difficulty, config.workers, block.nonce
    );

    let mined = if config.workers <= 1 {
        mine_sequential(block.clone(), config.difficulty)
    } else {
        mine_concurrent(block, config.difficulty, config.workers)
    };

    debug!("MINER - found nonce={} hash={}", mined.nonce, mined.hash);
    mined
}

fn mine_sequential(mut block: Block, difficulty: u32) -> Block {
    loop {
        block.hash = block.compute_hash();
        if block.meets_difficulty(difficulty) {
            return block;
        }
        block.nonce = block.nonce.wrapping_add(1);
    }
}

fn mine_concurrent(block: &Block, difficulty: u32, workers: usize) -> Block {
    let stop = AtomicBool::new(false);
    let (result_tx, result_rx) = mpsc::sync_channel::<Block>(workers);

    thread::scope(|scope| {
        for worker in 0..workers {
            let mut candidate = block.clone();
            candidate.nonce = candidate.nonce.wrapping_add(worker as u64);
            let result_tx = result_tx.clone();
            let stop = &stop;

            scope.spawn(move || {
                search_worker(worker, candidate, difficulty, workers as u64, stop, result_tx)
            });
        }
    });
    drop(result_tx);

    // Every worker has been joined; the flag is only ever raised by the winner.
    result_rx
        .try_recv()
        .expect("a worker publishes before raising stop")
}

/// Worker `k` explores `start, start + step, start + 2 * step, ...` until it finds a
/// solution or another worker raises `stop`.
fn search_worker(
    worker: usize,
    mut block: Block,
    difficulty: u32,
    step: u64,
    stop: &AtomicBool,
    result_tx: mpsc::SyncSender<Block>,
) {
    debug!("MINER - worker {} starting at nonce {}", worker, block.nonce);

    while !stop.load(Ordering::Acquire) {
        block.hash = block.compute_hash();

        if block.meets_difficulty(difficulty) {
            // Only the first winner publishes.
            if stop
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                debug!("MINER - worker {} won with nonce {}", worker, block.nonce);
                let _ = result_tx.send(block);
            }
            return;
        }

        block.nonce = block.nonce.wrapping_add(step);
    }

    debug!("MINER - worker {} stopped at nonce {}", worker, block.nonce);
}
