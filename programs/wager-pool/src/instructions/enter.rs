use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::LOTTERY_SEED;
use crate::events::PlayerEntered;
use crate::state::Lottery;

/// Accounts required to join the current round.
#[derive(Accounts)]
pub struct Enter<'info> {
    /// The account depositing the wager.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The ledger PDA receiving the lamports.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Account<'info, Lottery>,

    /// System program for the deposit transfer.
    pub system_program: Program<'info, System>,
}

/// Deposits `amount` lamports into the pool and credits them to the player.
///
/// A repeat entry tops up the player's existing wager; the player keeps
/// their original position in the list.
pub fn process_enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.lottery.to_account_info(),
            },
        ),
        amount,
    )?;

    let lottery = &mut ctx.accounts.lottery;
    lottery.enter(player, amount)?;

    emit!(PlayerEntered {
        player,
        amount,
        wager: lottery.wager_of(&player),
        pool: lottery.pool,
    });

    Ok(())
}
