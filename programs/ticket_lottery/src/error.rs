use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("not owner")]
    Unauthorized,
    #[msg("Invalid argument")]
    InvalidArgument,
    #[msg("end lottery wait")]
    RoundExpired,
    #[msg("not ended")]
    NotExpired,
    #[msg("only 50% buy tickets")]
    ExceedsSaleLimit,
    #[msg("max tickets")]
    ExceedsWalletLimit,
    #[msg("not enough balance")]
    InsufficientFunds,
    #[msg("Round already settled")]
    AlreadySettled,
    #[msg("Entitlement already paid")]
    AlreadyPaid,
    #[msg("Round not settled yet")]
    NotSettled,
    #[msg("Nothing to claim for this wallet")]
    NothingToClaim,
    #[msg("Current round must be settled before opening a new one")]
    RoundNotSettled,
    #[msg("Randomness has not been requested for this round")]
    RandomnessNotRequested,
    #[msg("Incorrect randomness account")]
    IncorrectRandomnessAccount,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
    #[msg("Math overflow")]
    MathOverflow,
}
