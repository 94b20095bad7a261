use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::state::Lottery;

/// Read-only access to the ledger. Results travel back as return data,
/// so clients can simulate these with `.view()`.
#[derive(Accounts)]
pub struct ViewLottery<'info> {
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}

pub fn process_get_players(ctx: Context<ViewLottery>) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.lottery.players())
}

pub fn process_wager_of(ctx: Context<ViewLottery>, player: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.lottery.wager_of(&player))
}
