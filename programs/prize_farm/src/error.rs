use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Signer is not the configured authority")]
    Unauthorized,
    #[msg("A pool for this mint is already registered")]
    DuplicatePool,
    #[msg("Withdrawal exceeds the staked amount")]
    InsufficientStake,
    #[msg("Source balance is too low for the transfer")]
    TransferFailed,
    #[msg("Prize pool funding must be greater than zero")]
    InvalidFunding,
    #[msg("Mint does not match the configured funding mint")]
    FundingMintMismatch,
    #[msg("Prize pool is not open for entry yet")]
    PoolNotOpen,
    #[msg("Entrant has already entered this prize pool")]
    AlreadyEntered,
    #[msg("Fee basis points out of range")]
    InvalidFeeBps,
    #[msg("Fee recipient does not match farm config")]
    InvalidFeeRecipient,
    #[msg("Mint is not the farm reward mint")]
    InvalidRewardMint,
    #[msg("Stake account belongs to a different pool or owner")]
    StakePoolMismatch,
    #[msg("Every registered pool must be passed for a mass update")]
    IncompletePoolSet,
    #[msg("Remaining account is not a writable farm pool")]
    InvalidPoolAccount,
    #[msg("Open delay is out of range")]
    InvalidOpenDelay,
    #[msg("Farm already holds the maximum number of pools")]
    PoolLimitReached,
    #[msg("Stake mint charges a transfer fee")]
    UnsupportedStakeMint,
    #[msg("Math overflow")]
    MathOverflow,
}
