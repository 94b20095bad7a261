use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use super::pick_winner::emit_winner;
use crate::constants::LOTTERY_SEED;
use crate::error::LotteryError;
use crate::payout::{participant_keys, resolve_draw, LamportVault};
use crate::randomness::OracleEntropy;
use crate::state::Lottery;

/// Accounts required to draw a winner from the committed Switchboard
/// randomness.
///
/// Remaining accounts: every participant wallet, writable, in entry order.
#[derive(Accounts)]
pub struct PickWinnerWithOracle<'info> {
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

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_pick_winner_with_oracle<'info>(
    ctx: Context<'_, '_, 'info, 'info, PickWinnerWithOracle<'info>>,
) -> Result<()> {
    let clock = Clock::get()?;
    let operator = ctx.accounts.operator.key();
    let randomness_account_data = &ctx.accounts.randomness_account_data;
    let lottery = &mut ctx.accounts.lottery;

    let vault_info = lottery.to_account_info();
    let mut vault = LamportVault::rent_exempt(&vault_info, ctx.remaining_accounts)?;
    let record = resolve_draw(
        lottery,
        &operator,
        &participant_keys(ctx.remaining_accounts),
        |lottery: &Lottery| -> Result<OracleEntropy> {
            lottery.check_committed_randomness(&randomness_account_data.key())?;
            let randomness_data = RandomnessAccountData::parse(randomness_account_data.data.borrow())
                .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;
            let value = randomness_data
                .get_value(&clock)
                .map_err(|_| LotteryError::RandomnessNotResolved)?;
            Ok(OracleEntropy { value })
        },
        &mut vault,
    )?;

    emit_winner(&record, true);
    Ok(())
}
