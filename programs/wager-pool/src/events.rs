use anchor_lang::prelude::*;

#[event]
pub struct LotteryInitialized {
    pub operator: Pubkey,
    pub min_stake: u64,
}

#[event]
pub struct PlayerEntered {
    pub player: Pubkey,
    pub amount: u64,
    pub wager: u64,
    pub pool: u64,
}

/// Carries the draw seed so anyone can recompute the selected index.
#[event]
pub struct WinnerPaid {
    pub round: u64,
    pub winner: Pubkey,
    pub index: u64,
    pub prize: u64,
    pub seed: [u8; 32],
    pub oracle: bool,
}

#[event]
pub struct PlayerRefunded {
    pub round: u64,
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct LotteryCancelled {
    pub round: u64,
    pub refunded_players: u32,
    pub refunded_total: u64,
}
