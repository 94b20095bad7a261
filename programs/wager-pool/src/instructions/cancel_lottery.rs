use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::events::{LotteryCancelled, PlayerRefunded};
use crate::payout::{participant_keys, resolve_cancel, LamportVault};
use crate::state::Lottery;

/// Accounts required to cancel the round and refund every wager.
///
/// Remaining accounts: every participant wallet, writable, in entry order.
#[derive(Accounts)]
pub struct CancelLottery<'info> {
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
}

pub fn process_cancel_lottery<'info>(
    ctx: Context<'_, '_, 'info, 'info, CancelLottery<'info>>,
) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let lottery = &mut ctx.accounts.lottery;
    let round = lottery.round;

    let vault_info = lottery.to_account_info();
    let mut vault = LamportVault::rent_exempt(&vault_info, ctx.remaining_accounts)?;
    let refunded = resolve_cancel(
        lottery,
        &operator,
        &participant_keys(ctx.remaining_accounts),
        &mut vault,
    )?;

    let mut refunded_total: u64 = 0;
    for entry in &refunded {
        refunded_total = refunded_total.saturating_add(entry.wager);
        emit!(PlayerRefunded {
            round,
            player: entry.player,
            amount: entry.wager,
        });
    }

    emit!(LotteryCancelled {
        round,
        refunded_players: refunded.len() as u32,
        refunded_total,
    });

    Ok(())
}
