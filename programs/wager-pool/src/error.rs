use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Caller is not the lottery operator")]
    Unauthorized,
    #[msg("Deposit does not exceed the minimum stake")]
    InsufficientStake,
    #[msg("The lottery has no participants")]
    NoParticipants,
    #[msg("Lamport transfer could not be completed")]
    TransferFailed,
    #[msg("The lottery has reached its participant limit")]
    LotteryFull,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Pool total does not match the recorded wagers")]
    LedgerImbalance,
    #[msg("Remaining accounts must be the participant wallets in entry order")]
    ParticipantAccountsMismatch,
    #[msg("Incorrect randomness account")]
    IncorrectRandomnessAccount,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
    #[msg("Randomness already committed for this round")]
    RandomnessAlreadyCommitted,
    #[msg("Entries are closed while a draw is pending")]
    EntriesClosed,
    #[msg("Minimum stake is below the rent-exempt minimum of an empty account")]
    MinStakeBelowRentExemption,
}
