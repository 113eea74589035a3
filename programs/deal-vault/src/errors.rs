use anchor_lang::prelude::*;

#[error_code]
pub enum DealVaultError {
    // Lifecycle errors
    #[msg("Closed.")]
    Closed,

    #[msg("Operation is not allowed in the current deal status")]
    WrongState,

    #[msg("Stake Exist.")]
    StakeExists,

    #[msg("The lead investor should stake at first.")]
    LeadInvestorRequired,

    #[msg("Amount is outside the configured stake or sale limits")]
    AmountOutOfBounds,

    // Role errors
    #[msg("no permission")]
    NoPermission,

    // Balance errors
    #[msg("withdraw amount is not enough.")]
    InsufficientBalance,

    #[msg("Stake has no amount above the sale cap")]
    NothingToRefund,

    #[msg("Token transfer rejected: insufficient balance or allowance")]
    AssetTransferFailed,

    // Parameter errors
    #[msg("Invalid parameter")]
    InvalidParameter,

    #[msg("Bonus curve requires presale_amount > 0 and start_bonus >= end_bonus")]
    InvalidBonusCurve,

    #[msg("Staking token is not on the allow-list")]
    TokenNotAllowed,

    #[msg("Allowed token list is full")]
    TokenListFull,

    #[msg("Stake book for this deal is full")]
    StakeBookFull,

    #[msg("Stake index does not exist")]
    InvalidStakeIndex,

    #[msg("Deal id must be the next sequential id")]
    InvalidDealId,

    // Custody errors
    #[msg("Token balance account for a stake investor was not supplied")]
    MissingBalanceAccount,

    #[msg("Supplied balances do not cover every encumbered unit of the pool")]
    SweepIncomplete,

    // Arithmetic errors
    #[msg("Arithmetic overflow occurred")]
    Overflow,

    #[msg("Arithmetic underflow occurred")]
    Underflow,
}
