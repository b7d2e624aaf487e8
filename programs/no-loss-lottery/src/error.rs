use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Configuration
    #[msg("Entry fee must be greater than zero")]
    InvalidEntryFee,
    #[msg("Max participants must be between 1 and MAX_PARTICIPANTS")]
    InvalidMaxParticipants,
    #[msg("Only the lottery authority can perform this action")]
    NotAuthorized,

    // Round lifecycle
    #[msg("Lottery is not open for entries")]
    LotteryNotOpen,
    #[msg("Lottery is in the wrong state for this action")]
    InvalidState,
    #[msg("Lottery has no participants")]
    NoParticipants,
    #[msg("Lottery is not settled yet")]
    LotteryNotSettled,
    #[msg("Winner has been already selected")]
    WinnerAlreadySelected,

    // Participant registry
    #[msg("Entry amount must equal the entry fee")]
    WrongEntryAmount,
    #[msg("Participant already added")]
    ParticipantAlreadyAdded,
    #[msg("Participant not found")]
    ParticipantNotFound,
    #[msg("Participant has already withdrawn")]
    AlreadyWithdrawn,
    #[msg("List full: participant can't be added")]
    ListFull,
    #[msg("Not every participant has withdrawn")]
    ParticipantsPending,

    // Lending
    #[msg("Funds are already invested in the lending reserve")]
    FundsAlreadyInvested,
    #[msg("Funds are still invested in the lending reserve")]
    FundsStillInvested,
    #[msg("Lending reserve returned no collateral")]
    NoCollateralReceived,
    #[msg("Lending reserve returned less than the non-winner principal")]
    InsufficientRedeemedLiquidity,
    #[msg("Account does not match the configured lending reserve")]
    InvalidLendingAccount,

    // Randomness
    #[msg("Not a valid Switchboard randomness account")]
    InvalidRandomnessAccount,
    #[msg("Randomness account belongs to a different queue")]
    InvalidRandomnessQueue,
    #[msg("Randomness has already been revealed")]
    RandomnessAlreadyRevealed,
    #[msg("A randomness request is already outstanding")]
    RandomnessAlreadyRequested,
    #[msg("No randomness request is outstanding")]
    RandomnessNotRequested,
    #[msg("Randomness not yet resolved")]
    RandomnessNotResolved,
    #[msg("Randomness request has already been fulfilled")]
    RandomnessAlreadyFulfilled,
    #[msg("Randomness result has already been consumed")]
    RandomnessAlreadyConsumed,

    #[msg("Math overflow occurred")]
    MathOverflow,
}
