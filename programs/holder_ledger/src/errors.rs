use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Ledger is paused")]
    Paused,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Invalid admin address")]
    InvalidAdmin,
    #[msg("Invalid authority address")]
    InvalidAuthority,
    #[msg("Invalid day length (must be > 0)")]
    InvalidDayLength,
    #[msg("Ledger account does not belong to this config")]
    InvalidLedger,
    #[msg("Reserved pool slot out of range")]
    InvalidReservedPoolSlot,
    #[msg("Reserved pool is currently tracked by the registry")]
    ReservedPoolTracked,
    #[msg("Holder is already tracked")]
    HolderAlreadyTracked,
    #[msg("Holder is not tracked")]
    HolderNotTracked,
    #[msg("Holder index out of range")]
    InvalidHolderIndex,
    #[msg("Holder registry is full")]
    HolderCapacityReached,
    #[msg("Cannot track a holder with zero balance")]
    ZeroBalanceInsert,
    #[msg("Removed balance does not match the tracked balance")]
    BalanceMismatch,
    #[msg("Position account for a touched holder was not supplied")]
    MissingPositionAccount,
    #[msg("Position account belongs to another ledger")]
    InvalidPositionAccount,
    #[msg("No tracked weight to select from")]
    EmptySelection,
    #[msg("Suffix sums disagree with the tracked total")]
    LedgerInconsistent,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Only the previous day can be drawn")]
    DrawDayNotReady,
    #[msg("Draw is not awaiting randomness")]
    DrawNotPending,
    #[msg("Self-transfers are reported through apply_balance_change")]
    SelfTransfer,
}
