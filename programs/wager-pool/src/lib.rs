#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

pub mod access;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod payout;
pub mod randomness;
pub mod state;

declare_id!("DqyLpbbv3SZLg9mLvtkLCEz3i2u53AShY4RZVXi3ChyK");

#[program]
pub mod wager_pool {
    use super::*;

    /// Creates the ledger. The signer becomes the operator.
    pub fn initialize_lottery(ctx: Context<InitializeLottery>, min_stake: u64) -> Result<()> {
        process_initialize_lottery(ctx, min_stake)
    }

    /// Deposits lamports into the current round.
    pub fn enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
        process_enter(ctx, amount)
    }

    /// Operator pays the pool to a participant drawn from cluster entropy.
    ///
    /// Pass every participant wallet via remaining_accounts, in entry order.
    pub fn pick_winner<'info>(
        ctx: Context<'_, '_, 'info, 'info, PickWinner<'info>>,
    ) -> Result<()> {
        process_pick_winner(ctx)
    }

    /// Operator commits a Switchboard randomness account for the next draw.
    pub fn commit_randomness(ctx: Context<CommitRandomness>) -> Result<()> {
        process_commit_randomness(ctx)
    }

    /// Operator pays the pool using the committed Switchboard randomness.
    ///
    /// Pass every participant wallet via remaining_accounts, in entry order.
    pub fn pick_winner_with_oracle<'info>(
        ctx: Context<'_, '_, 'info, 'info, PickWinnerWithOracle<'info>>,
    ) -> Result<()> {
        process_pick_winner_with_oracle(ctx)
    }

    /// Operator refunds every wager and clears the round.
    ///
    /// Pass every participant wallet via remaining_accounts, in entry order.
    pub fn cancel_lottery<'info>(
        ctx: Context<'_, '_, 'info, 'info, CancelLottery<'info>>,
    ) -> Result<()> {
        process_cancel_lottery(ctx)
    }

    pub fn get_players(ctx: Context<ViewLottery>) -> Result<Vec<Pubkey>> {
        process_get_players(ctx)
    }

    pub fn wager_of(ctx: Context<ViewLottery>, player: Pubkey) -> Result<u64> {
        process_wager_of(ctx, player)
    }
}
