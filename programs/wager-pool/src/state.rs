use anchor_lang::prelude::*;

use crate::constants::MAX_PARTICIPANTS;
use crate::error::LotteryError;

/// One player's standing in the current round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Participant {
    pub player: Pubkey,
    /// Cumulative lamports deposited by `player` this round. Never zero.
    pub wager: u64,
}

/// Audit record of the most recent winner payout.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct DrawRecord {
    pub round: u64,
    pub winner: Pubkey,
    pub index: u64,
    pub prize: u64,
    pub seed: [u8; 32],
}

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The only key allowed to pick a winner or cancel the round.
    /// Set once at initialization.
    pub operator: Pubkey,

    /// Entries must deposit strictly more than this many lamports.
    pub min_stake: u64,

    /// Lamports currently owed to participants or to a future winner.
    /// Always equals the sum of `participants[i].wager`.
    pub pool: u64,

    /// Number of completed resolutions.
    pub round: u64,

    /// Switchboard randomness account committed for the oracle draw,
    /// `Pubkey::default()` when none is pending.
    pub randomness_account: Pubkey,

    pub last_draw: Option<DrawRecord>,

    /// Distinct players in first-entry order.
    #[max_len(MAX_PARTICIPANTS)]
    pub participants: Vec<Participant>,
}

/// Records drained out of the ledger by [`Lottery::reset_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    pub participants: Vec<Participant>,
    pub pool: u64,
}

impl Lottery {
    pub fn new(operator: Pubkey, min_stake: u64, bump: u8) -> Self {
        Self {
            bump,
            operator,
            min_stake,
            pool: 0,
            round: 0,
            randomness_account: Pubkey::default(),
            last_draw: None,
            participants: Vec::new(),
        }
    }

    /// Every wager must be able to fund an empty wallet on its own, otherwise
    /// the runtime refuses the refund credit and the round can never be
    /// cancelled.
    pub fn check_min_stake(min_stake: u64, rent: &Rent) -> Result<()> {
        require!(
            min_stake >= rent.minimum_balance(0),
            LotteryError::MinStakeBelowRentExemption
        );
        Ok(())
    }

    /// Credits `amount` to `player`, appending them on their first entry.
    /// The lamports are expected to have reached the lottery account already.
    pub fn enter(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(!self.entries_closed(), LotteryError::EntriesClosed);
        require!(amount > self.min_stake, LotteryError::InsufficientStake);

        // pool >= any single wager, so this also rules out a wager overflow
        let pool = self
            .pool
            .checked_add(amount)
            .ok_or(LotteryError::ArithmeticOverflow)?;

        match self.participants.iter_mut().find(|p| p.player == player) {
            Some(entry) => {
                entry.wager = entry
                    .wager
                    .checked_add(amount)
                    .ok_or(LotteryError::ArithmeticOverflow)?;
            }
            None => {
                require!(
                    self.participants.len() < MAX_PARTICIPANTS,
                    LotteryError::LotteryFull
                );
                self.participants.push(Participant { player, wager: amount });
            }
        }

        self.pool = pool;
        Ok(())
    }

    pub fn wager_of(&self, player: &Pubkey) -> u64 {
        self.participants
            .iter()
            .find(|p| p.player == *player)
            .map_or(0, |p| p.wager)
    }

    pub fn players(&self) -> Vec<Pubkey> {
        self.participants.iter().map(|p| p.player).collect()
    }

    pub fn is_open(&self) -> bool {
        !self.participants.is_empty()
    }

    /// Entries stop once oracle randomness is committed, so nobody can pick
    /// a key that wins against an already revealed value.
    pub fn entries_closed(&self) -> bool {
        self.randomness_account != Pubkey::default()
    }

    /// Locks the current participant list to `account` for the oracle draw.
    pub fn commit_randomness(&mut self, account: Pubkey) -> Result<()> {
        require!(self.is_open(), LotteryError::NoParticipants);
        require!(!self.entries_closed(), LotteryError::RandomnessAlreadyCommitted);
        require_keys_neq!(
            account,
            Pubkey::default(),
            LotteryError::IncorrectRandomnessAccount
        );
        self.randomness_account = account;
        Ok(())
    }

    pub fn check_committed_randomness(&self, account: &Pubkey) -> Result<()> {
        require!(self.entries_closed(), LotteryError::IncorrectRandomnessAccount);
        require_keys_eq!(
            *account,
            self.randomness_account,
            LotteryError::IncorrectRandomnessAccount
        );
        Ok(())
    }

    /// Ends the round: reopens entries and counts the resolution.
    pub fn close_round(&mut self) {
        self.randomness_account = Pubkey::default();
        self.round = self.round.saturating_add(1);
    }

    /// Clears every participant and zeroes the pool, handing back what was
    /// removed. Calling it on an idle ledger returns an empty round.
    pub fn reset_all(&mut self) -> Round {
        let pool = std::mem::take(&mut self.pool);
        Round {
            participants: std::mem::take(&mut self.participants),
            pool,
        }
    }

    /// Undoes a [`Lottery::reset_all`] whose payout failed.
    pub fn restore(&mut self, round: Round) {
        self.participants = round.participants;
        self.pool = round.pool;
    }

    /// Removes the head of the participant list and debits its wager from
    /// the pool.
    pub fn take_next_refund(&mut self) -> Option<Participant> {
        if self.participants.is_empty() {
            return None;
        }
        let entry = self.participants.remove(0);
        self.pool = self.pool.saturating_sub(entry.wager);
        Some(entry)
    }

    /// Puts back a participant whose refund transfer failed.
    pub fn restore_refund(&mut self, entry: Participant) {
        self.pool = self.pool.saturating_add(entry.wager);
        self.participants.insert(0, entry);
    }

    /// True when the pool matches the recorded wagers and no zero-wager
    /// entry exists.
    pub fn is_balanced(&self) -> bool {
        let mut total: u64 = 0;
        for entry in &self.participants {
            if entry.wager == 0 {
                return false;
            }
            total = match total.checked_add(entry.wager) {
                Some(total) => total,
                None => return false,
            };
        }
        total == self.pool
    }
}
