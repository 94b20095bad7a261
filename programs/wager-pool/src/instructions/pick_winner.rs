use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;

use crate::constants::LOTTERY_SEED;
use crate::events::WinnerPaid;
use crate::payout::{participant_keys, resolve_draw, LamportVault};
use crate::randomness::{latest_slot_hash, ClockEntropy};
use crate::state::{DrawRecord, Lottery};

/// Accounts required to draw a winner from cluster entropy.
///
/// Remaining accounts: every participant wallet, writable, in entry order.
#[derive(Accounts)]
pub struct PickWinner<'info> {
    /// Must be the lottery operator.
    #[account(mut)]
    pub operator: Signer<'info>,

    /// The main lottery state account.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: Address constrained to the SlotHashes sysvar; parsed in the handler.
    #[account(address = sysvar::slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

pub fn process_pick_winner<'info>(
    ctx: Context<'_, '_, 'info, 'info, PickWinner<'info>>,
) -> Result<()> {
    let clock = Clock::get()?;
    let operator = ctx.accounts.operator.key();
    let slot_hashes = &ctx.accounts.slot_hashes;
    let lottery = &mut ctx.accounts.lottery;

    let vault_info = lottery.to_account_info();
    let mut vault = LamportVault::rent_exempt(&vault_info, ctx.remaining_accounts)?;
    let record = resolve_draw(
        lottery,
        &operator,
        &participant_keys(ctx.remaining_accounts),
        |_: &Lottery| -> Result<ClockEntropy> {
            let slot_hash = latest_slot_hash(&slot_hashes.try_borrow_data()?)?;
            Ok(ClockEntropy::new(&clock, slot_hash))
        },
        &mut vault,
    )?;

    emit_winner(&record, false);
    Ok(())
}

pub(crate) fn emit_winner(record: &DrawRecord, oracle: bool) {
    emit!(WinnerPaid {
        round: record.round,
        winner: record.winner,
        index: record.index,
        prize: record.prize,
        seed: record.seed,
        oracle,
    });
}
