use anchor_lang::prelude::*;
use solana_program::keccak;

use crate::access::require_operator;
use crate::error::LotteryError;
use crate::state::Lottery;

/// Produces the winning index for a draw.
///
/// Implementations hash their entropy together with the ordered participant
/// list, so the outcome is bound to the exact ledger being resolved and can
/// be recomputed later from the same inputs.
pub trait RandomnessSource {
    /// 32-byte digest the index is derived from. Stored for auditing.
    fn seed(&self, players: &[Pubkey]) -> [u8; 32];

    /// Index in `[0, participant_count)`. Callers check for an empty round
    /// first; a zero count is a bug, not a recoverable error.
    fn select_index(&self, participant_count: usize, players: &[Pubkey]) -> usize {
        assert!(participant_count > 0, "select_index called without participants");
        index_from_seed(&self.seed(players), participant_count)
    }
}

pub fn index_from_seed(seed: &[u8; 32], participant_count: usize) -> usize {
    let mut head = [0u8; 8];
    head.copy_from_slice(&seed[..8]);
    (u64::from_le_bytes(head) % participant_count as u64) as usize
}

fn mix(entropy: &[&[u8]], players: &[Pubkey]) -> [u8; 32] {
    let mut parts: Vec<&[u8]> = Vec::with_capacity(entropy.len() + players.len());
    parts.extend_from_slice(entropy);
    parts.extend(players.iter().map(|p| p.as_ref()));
    keccak::hashv(&parts).to_bytes()
}

/// Best-effort entropy from the cluster: the most recent slot hash plus the
/// clock at resolution time. Participants cannot know the slot hash when
/// they enter, but a leader producing the block could grind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockEntropy {
    pub slot: u64,
    pub unix_timestamp: i64,
    pub slot_hash: [u8; 32],
}

impl ClockEntropy {
    pub fn new(clock: &Clock, slot_hash: [u8; 32]) -> Self {
        Self {
            slot: clock.slot,
            unix_timestamp: clock.unix_timestamp,
            slot_hash,
        }
    }
}

impl RandomnessSource for ClockEntropy {
    fn seed(&self, players: &[Pubkey]) -> [u8; 32] {
        mix(
            &[
                &self.slot_hash,
                &self.slot.to_le_bytes(),
                &self.unix_timestamp.to_le_bytes(),
            ],
            players,
        )
    }
}

/// Revealed value of a Switchboard on-demand randomness account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleEntropy {
    pub value: [u8; 32],
}

impl RandomnessSource for OracleEntropy {
    fn seed(&self, players: &[Pubkey]) -> [u8; 32] {
        mix(&[&self.value], players)
    }
}

/// Records the Switchboard randomness `account` for the next oracle draw.
///
/// The randomness must have been requested in the slot before this one, so
/// its value cannot have been revealed yet. From here on entries are closed.
pub fn commit(
    lottery: &mut Lottery,
    caller: &Pubkey,
    account: Pubkey,
    seed_slot: u64,
    current_slot: u64,
) -> Result<()> {
    require_operator(lottery, caller)?;
    require!(
        seed_slot == current_slot.saturating_sub(1),
        LotteryError::RandomnessAlreadyRevealed
    );
    lottery.commit_randomness(account)
}

/// Reads the newest entry of the `SlotHashes` sysvar.
///
/// Layout: `u64` entry count, then `(u64 slot, [u8; 32] hash)` pairs,
/// newest first.
pub fn latest_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    const ENTRY: usize = 8 + 32;
    require!(data.len() >= 8 + ENTRY, LotteryError::RandomnessNotResolved);

    let mut count = [0u8; 8];
    count.copy_from_slice(&data[..8]);
    require!(u64::from_le_bytes(count) > 0, LotteryError::RandomnessNotResolved);

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..16 + 32]);
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> Vec<Pubkey> {
        (0..n).map(|_| Pubkey::new_unique()).collect()
    }

    fn entropy(slot: u64) -> ClockEntropy {
        ClockEntropy {
            slot,
            unix_timestamp: 1_700_000_000,
            slot_hash: [9; 32],
        }
    }

    #[test]
    fn index_stays_in_bounds() {
        let players = players(7);
        for slot in 0..200 {
            let index = entropy(slot).select_index(players.len(), &players);
            assert!(index < players.len());
        }
    }

    #[test]
    fn draw_is_reproducible() {
        let players = players(5);
        let source = entropy(42);
        assert_eq!(source.seed(&players), entropy(42).seed(&players));
        assert_eq!(
            source.select_index(players.len(), &players),
            index_from_seed(&source.seed(&players), players.len())
        );
    }

    #[test]
    fn seed_depends_on_participants_and_clock() {
        let mut players = players(3);
        let source = entropy(42);
        let before = source.seed(&players);

        assert_ne!(before, entropy(43).seed(&players));

        players.swap(0, 1);
        assert_ne!(before, source.seed(&players));
    }

    #[test]
    fn draws_spread_over_every_index() {
        let players = players(4);
        let mut hits = [0u32; 4];
        for slot in 0..400 {
            hits[entropy(slot).select_index(players.len(), &players)] += 1;
        }
        assert!(hits.iter().all(|&h| h > 0));
    }

    #[test]
    fn oracle_source_mixes_players() {
        let players = players(2);
        let oracle = OracleEntropy { value: [1; 32] };
        assert_ne!(oracle.seed(&players), oracle.seed(&players[..1]));
        assert!(oracle.select_index(2, &players) < 2);
    }

    #[test]
    #[should_panic]
    fn zero_participants_is_a_bug() {
        entropy(1).select_index(0, &[]);
    }

    #[test]
    fn commit_requires_the_previous_slot() {
        let operator = Pubkey::new_unique();
        let randomness = Pubkey::new_unique();
        let mut lottery = Lottery::new(operator, 0, 0);
        lottery.enter(Pubkey::new_unique(), 1).unwrap();

        for seed_slot in [98, 100, 101] {
            let err = commit(&mut lottery, &operator, randomness, seed_slot, 100).unwrap_err();
            assert_eq!(err, LotteryError::RandomnessAlreadyRevealed.into());
        }
        assert!(!lottery.entries_closed());

        commit(&mut lottery, &operator, randomness, 99, 100).unwrap();
        assert_eq!(lottery.randomness_account, randomness);
    }

    #[test]
    fn only_the_operator_commits() {
        let mut lottery = Lottery::new(Pubkey::new_unique(), 0, 0);
        lottery.enter(Pubkey::new_unique(), 1).unwrap();

        let err = commit(&mut lottery, &Pubkey::new_unique(), Pubkey::new_unique(), 99, 100)
            .unwrap_err();
        assert_eq!(err, LotteryError::Unauthorized.into());
        assert!(!lottery.entries_closed());
    }

    #[test]
    fn latest_slot_hash_reads_first_entry() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u64.to_le_bytes());
        data.extend_from_slice(&100u64.to_le_bytes());
        data.extend_from_slice(&[3; 32]);
        data.extend_from_slice(&99u64.to_le_bytes());
        data.extend_from_slice(&[4; 32]);

        assert_eq!(latest_slot_hash(&data).unwrap(), [3; 32]);
    }

    #[test]
    fn empty_slot_hashes_are_rejected() {
        let mut data = vec![0u8; 8 + 40];
        assert_eq!(
            latest_slot_hash(&data).unwrap_err(),
            LotteryError::RandomnessNotResolved.into()
        );
        data.truncate(8);
        assert!(latest_slot_hash(&data).is_err());
    }
}
