pub mod block;
pub mod model;
pub mod pow;

pub use block::{Block, calculate_hash, format_timestamp};
pub use model::{Blockchain, is_valid_chain};
pub use pow::{MiningConfig, mine};

/// Payload every valid chain must carry in its first block.
pub const GENESIS_DATA: &str =
    "The Times 03/Jan/2009 Chancellor on brink of second bailout for banks";

/// `previous_hash` of the genesis block: 64 hex zeros.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 1;

/// Difficulty ceiling accepted from configuration (keep low to avoid long waits).
pub const DIFF_MAX: u32 = 6;

/// Upper bound on concurrent search workers accepted from configuration.
pub const WORKERS_MAX: usize = 64;
