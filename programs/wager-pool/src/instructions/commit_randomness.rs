use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::LOTTERY_SEED;
use crate::error::LotteryError;
use crate::randomness;
use crate::state::Lottery;

/// Accounts required to commit a Switchboard randomness account for the
/// oracle draw.
///
/// Ensures:
/// 1. Only the operator can commit the randomness.
/// 2. The randomness was requested in the previous slot and is not yet revealed.
/// 3. The round has entries and no randomness committed yet.
#[derive(Accounts)]
pub struct CommitRandomness<'info> {
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

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_commit_randomness(ctx: Context<CommitRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let operator = ctx.accounts.operator.key();
    let account = ctx.accounts.randomness_account_data.key();

    let seed_slot = RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
        .map_err(|_| LotteryError::IncorrectRandomnessAccount)?
        .seed_slot;

    randomness::commit(&mut ctx.accounts.lottery, &operator, account, seed_slot, clock.slot)?;
    msg!("Committed randomness account {}, entries closed", account);

    Ok(())
}
