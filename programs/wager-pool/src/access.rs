use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::state::Lottery;

/// Fails with `Unauthorized` unless `caller` is the operator recorded at
/// initialization.
pub fn require_operator(lottery: &Lottery, caller: &Pubkey) -> Result<()> {
    if *caller != lottery.operator {
        msg!("Caller {} is not the operator", caller);
        return Err(LotteryError::Unauthorized.into());
    }
    Ok(())
}
