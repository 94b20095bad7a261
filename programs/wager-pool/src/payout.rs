use anchor_lang::prelude::*;

use crate::access::require_operator;
use crate::error::LotteryError;
use crate::randomness::RandomnessSource;
use crate::state::{DrawRecord, Lottery, Participant};

/// Destination-side effect of a resolution: moves lamports out of custody.
pub trait Treasury {
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Pays out of the lottery PDA by moving lamports directly, which the
/// program may do because it owns the account. Recipients come from the
/// instruction's remaining accounts.
pub struct LamportVault<'a, 'info> {
    vault: &'a AccountInfo<'info>,
    recipients: &'a [AccountInfo<'info>],
    /// Rent-exempt minimum the vault must keep.
    reserve: u64,
}

impl<'a, 'info> LamportVault<'a, 'info> {
    pub fn new(
        vault: &'a AccountInfo<'info>,
        recipients: &'a [AccountInfo<'info>],
        reserve: u64,
    ) -> Self {
        Self {
            vault,
            recipients,
            reserve,
        }
    }

    /// Keeps enough lamports in the vault for it to stay rent exempt.
    pub fn rent_exempt(
        vault: &'a AccountInfo<'info>,
        recipients: &'a [AccountInfo<'info>],
    ) -> Result<Self> {
        let reserve = Rent::get()?.minimum_balance(vault.data_len());
        Ok(Self::new(vault, recipients, reserve))
    }
}

impl Treasury for LamportVault<'_, '_> {
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let recipient = self
            .recipients
            .iter()
            .find(|account| account.key == to)
            .ok_or(LotteryError::TransferFailed)?;
        if !recipient.is_writable {
            msg!("Recipient {} is not writable", to);
            return Err(LotteryError::TransferFailed.into());
        }

        let available = self.vault.lamports().saturating_sub(self.reserve);
        if amount > available {
            msg!("Vault holds {} spendable lamports, need {}", available, amount);
            return Err(LotteryError::TransferFailed.into());
        }

        let credited = recipient
            .lamports()
            .checked_add(amount)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        **self.vault.try_borrow_mut_lamports()? -= amount;
        **recipient.try_borrow_mut_lamports()? = credited;
        Ok(())
    }
}

pub fn participant_keys(accounts: &[AccountInfo]) -> Vec<Pubkey> {
    accounts.iter().map(|account| *account.key).collect()
}

/// Wallets handed to a resolution must be exactly the participants, in
/// ledger order.
pub fn verify_participant_keys(lottery: &Lottery, keys: &[Pubkey]) -> Result<()> {
    require!(
        keys.len() == lottery.participants.len(),
        LotteryError::ParticipantAccountsMismatch
    );
    for (entry, key) in lottery.participants.iter().zip(keys) {
        require_keys_eq!(
            entry.player,
            *key,
            LotteryError::ParticipantAccountsMismatch
        );
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub winner: Pubkey,
    pub index: usize,
    pub prize: u64,
}

/// Pays the whole pool to `participants[index]`.
///
/// The ledger is drained before the transfer is attempted. If the transfer
/// fails the drained round is put back and the error returned, so a failed
/// payout leaves the records as they were.
pub fn pay_winner<T: Treasury>(
    lottery: &mut Lottery,
    index: usize,
    treasury: &mut T,
) -> Result<Payout> {
    require!(lottery.is_open(), LotteryError::NoParticipants);
    require!(lottery.is_balanced(), LotteryError::LedgerImbalance);
    let winner = lottery
        .participants
        .get(index)
        .map(|entry| entry.player)
        .ok_or(LotteryError::NoParticipants)?;

    let round = lottery.reset_all();
    let prize = round.pool;
    if let Err(err) = treasury.transfer(&winner, prize) {
        msg!("Payout of {} lamports to {} failed", prize, winner);
        lottery.restore(round);
        return Err(err);
    }

    msg!("Winner: {} (index {}) receives {} lamports", winner, index, prize);
    Ok(Payout {
        winner,
        index,
        prize,
    })
}

/// Returns every wager to its owner in entry order.
///
/// Each participant is removed from the ledger before their transfer. When
/// a transfer fails that participant is put back at the head of the list
/// and the error returned; anyone refunded earlier stays removed, so the
/// ledger always equals what is still owed.
pub fn refund_all<T: Treasury>(
    lottery: &mut Lottery,
    treasury: &mut T,
) -> Result<Vec<Participant>> {
    require!(lottery.is_balanced(), LotteryError::LedgerImbalance);

    let mut refunded = Vec::with_capacity(lottery.participants.len());
    while let Some(entry) = lottery.take_next_refund() {
        if let Err(err) = treasury.transfer(&entry.player, entry.wager) {
            msg!("Refund of {} lamports to {} failed", entry.wager, entry.player);
            lottery.restore_refund(entry);
            return Err(err);
        }
        refunded.push(entry);
    }
    lottery.reset_all();

    msg!("Refunded {} players", refunded.len());
    Ok(refunded)
}

/// Operator draw: checks the caller, the round and the recipient wallets,
/// then builds the randomness source and pays the pool out.
///
/// `source` runs only after every check has passed, so a rejected caller
/// never touches the entropy accounts.
pub fn resolve_draw<R, F, T>(
    lottery: &mut Lottery,
    caller: &Pubkey,
    recipients: &[Pubkey],
    source: F,
    treasury: &mut T,
) -> Result<DrawRecord>
where
    R: RandomnessSource,
    F: FnOnce(&Lottery) -> Result<R>,
    T: Treasury,
{
    require_operator(lottery, caller)?;
    require!(lottery.is_open(), LotteryError::NoParticipants);
    verify_participant_keys(lottery, recipients)?;

    let source = source(lottery)?;
    let players = lottery.players();
    let seed = source.seed(&players);
    let index = source.select_index(players.len(), &players);

    msg!("Participants: {}", players.len());
    msg!("Winning index: {}", index);

    let payout = pay_winner(lottery, index, treasury)?;
    let record = DrawRecord {
        round: lottery.round,
        winner: payout.winner,
        index: payout.index as u64,
        prize: payout.prize,
        seed,
    };
    lottery.last_draw = Some(record);
    lottery.close_round();

    Ok(record)
}

/// Operator cancel: refunds every wager and reopens entries.
pub fn resolve_cancel<T: Treasury>(
    lottery: &mut Lottery,
    caller: &Pubkey,
    recipients: &[Pubkey],
    treasury: &mut T,
) -> Result<Vec<Participant>> {
    require_operator(lottery, caller)?;
    verify_participant_keys(lottery, recipients)?;

    let refunded = refund_all(lottery, treasury)?;
    // Randomness is only ever committed against a non-empty round.
    if !refunded.is_empty() {
        lottery.close_round();
    }
    Ok(refunded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTreasury {
        transfers: Vec<(Pubkey, u64)>,
        reject: Option<Pubkey>,
    }

    impl Treasury for RecordingTreasury {
        fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
            if self.reject == Some(*to) {
                return Err(LotteryError::TransferFailed.into());
            }
            self.transfers.push((*to, amount));
            Ok(())
        }
    }

    fn lottery_with(entries: &[(Pubkey, u64)]) -> Lottery {
        let mut lottery = Lottery::new(Pubkey::new_unique(), 0, 0);
        for (player, amount) in entries {
            lottery.enter(*player, *amount).unwrap();
        }
        lottery
    }

    #[test]
    fn winner_takes_the_whole_pool() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut lottery = lottery_with(&[(a, 3), (b, 4), (a, 5)]);
        let mut treasury = RecordingTreasury::default();

        let payout = pay_winner(&mut lottery, 1, &mut treasury).unwrap();

        assert_eq!(payout, Payout { winner: b, index: 1, prize: 12 });
        assert_eq!(treasury.transfers, vec![(b, 12)]);
        assert!(lottery.participants.is_empty());
        assert_eq!(lottery.pool, 0);
    }

    #[test]
    fn empty_round_has_no_winner() {
        let mut lottery = lottery_with(&[]);
        let mut treasury = RecordingTreasury::default();

        let err = pay_winner(&mut lottery, 0, &mut treasury).unwrap_err();
        assert_eq!(err, LotteryError::NoParticipants.into());
        assert!(treasury.transfers.is_empty());
    }

    #[test]
    fn failed_payout_restores_the_round() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut lottery = lottery_with(&[(a, 3), (b, 4)]);
        let before = lottery.clone();
        let mut treasury = RecordingTreasury {
            reject: Some(a),
            ..Default::default()
        };

        let err = pay_winner(&mut lottery, 0, &mut treasury).unwrap_err();
        assert_eq!(err, LotteryError::TransferFailed.into());
        assert_eq!(lottery, before);
    }

    #[test]
    fn imbalanced_ledger_refuses_to_pay() {
        let mut lottery = lottery_with(&[(Pubkey::new_unique(), 3)]);
        lottery.pool = 10;
        let mut treasury = RecordingTreasury::default();

        let err = pay_winner(&mut lottery, 0, &mut treasury).unwrap_err();
        assert_eq!(err, LotteryError::LedgerImbalance.into());
        let err = refund_all(&mut lottery, &mut treasury).unwrap_err();
        assert_eq!(err, LotteryError::LedgerImbalance.into());
        assert!(treasury.transfers.is_empty());
    }

    #[test]
    fn refunds_follow_entry_order() {
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut lottery = lottery_with(&[(a, 1), (b, 2), (c, 3), (a, 4)]);
        let mut treasury = RecordingTreasury::default();

        let refunded = refund_all(&mut lottery, &mut treasury).unwrap();

        assert_eq!(treasury.transfers, vec![(a, 5), (b, 2), (c, 3)]);
        assert_eq!(refunded.len(), 3);
        assert!(lottery.participants.is_empty());
        assert_eq!(lottery.pool, 0);
    }

    #[test]
    fn failed_refund_keeps_what_is_still_owed() {
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut lottery = lottery_with(&[(a, 1), (b, 2), (c, 3)]);
        let mut treasury = RecordingTreasury {
            reject: Some(b),
            ..Default::default()
        };

        let err = refund_all(&mut lottery, &mut treasury).unwrap_err();

        assert_eq!(err, LotteryError::TransferFailed.into());
        assert_eq!(treasury.transfers, vec![(a, 1)]);
        assert_eq!(lottery.players(), vec![b, c]);
        assert_eq!(lottery.pool, 5);
        assert!(lottery.is_balanced());
    }

    #[test]
    fn refunding_an_idle_ledger_is_a_no_op() {
        let mut lottery = lottery_with(&[]);
        let mut treasury = RecordingTreasury::default();

        assert!(refund_all(&mut lottery, &mut treasury).unwrap().is_empty());
        assert!(treasury.transfers.is_empty());
    }

    #[test]
    fn only_a_refunding_cancel_counts_as_a_round() {
        let operator = Pubkey::new_unique();
        let mut lottery = Lottery::new(operator, 0, 0);
        let mut treasury = RecordingTreasury::default();

        resolve_cancel(&mut lottery, &operator, &[], &mut treasury).unwrap();
        assert_eq!(lottery.round, 0);

        let a = Pubkey::new_unique();
        lottery.enter(a, 4).unwrap();
        resolve_cancel(&mut lottery, &operator, &[a], &mut treasury).unwrap();
        assert_eq!(lottery.round, 1);
        assert_eq!(treasury.transfers, vec![(a, 4)]);
    }
}
