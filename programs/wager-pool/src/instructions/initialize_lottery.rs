use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::events::LotteryInitialized;
use crate::state::Lottery;

/// Accounts required to create the lottery ledger.
/// The payer becomes the operator for the lifetime of the account.
#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The ledger PDA. It also custodies every deposited lamport.
    #[account(
        init,
        payer = payer,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Creates an idle ledger.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeLottery accounts
/// * `min_stake` - Entries must deposit strictly more lamports than this;
///   at least the rent-exempt minimum of an empty wallet
pub fn process_initialize_lottery(ctx: Context<InitializeLottery>, min_stake: u64) -> Result<()> {
    Lottery::check_min_stake(min_stake, &Rent::get()?)?;

    let operator = ctx.accounts.payer.key();
    ctx.accounts
        .lottery
        .set_inner(Lottery::new(operator, min_stake, ctx.bumps.lottery));

    msg!("Lottery initialized, operator {}, min stake {}", operator, min_stake);
    emit!(LotteryInitialized {
        operator,
        min_stake,
    });

    Ok(())
}
