/// Seed of the single lottery PDA. The account stores the ledger and
/// custodies every deposited lamport.
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Maximum number of distinct players in one round. Bounds the account size
/// and the number of wallets a resolution has to pass as remaining accounts.
pub const MAX_PARTICIPANTS: usize = 64;

/// 0.001 SOL. Entries must be strictly above the configured minimum.
pub const DEFAULT_MIN_STAKE: u64 = 1_000_000;
