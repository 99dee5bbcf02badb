use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    state::{HolderLedger, HolderPosition, LedgerConfig},
};

#[derive(Accounts)]
pub struct ConfigView<'info> {
    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, LedgerConfig>,
}

#[derive(Accounts)]
pub struct LedgerView<'info> {
    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = ledger @ ErrorCode::InvalidLedger,
    )]
    pub config: Account<'info, LedgerConfig>,

    pub ledger: AccountLoader<'info, HolderLedger>,
}

#[derive(Accounts)]
pub struct PositionView<'info> {
    #[account(seeds = [SEED_CFG], bump = config.bump)]
    pub config: Account<'info, LedgerConfig>,

    /// CHECK: only the key is read.
    pub holder: UncheckedAccount<'info>,

    /// Absent when the holder never had a balance change recorded.
    #[account(seeds = [SEED_POSITION, config.ledger.as_ref(), holder.key().as_ref()], bump)]
    pub holder_position: Option<Account<'info, HolderPosition>>,
}

pub fn suffix_sum(ctx: Context<LedgerView>, index: u32, day: u64) -> Result<u64> {
    ctx.accounts.ledger.load()?.suffix_sum(index, day)
}

pub fn holder_count(ctx: Context<LedgerView>, day: u64) -> Result<u32> {
    Ok(ctx.accounts.ledger.load()?.holder_count(day))
}

pub fn holder_at_index(ctx: Context<LedgerView>, index: u32, day: u64) -> Result<Pubkey> {
    ctx.accounts.ledger.load()?.holder_at_index(index, day)
}

pub fn is_tracked(ctx: Context<PositionView>) -> Result<bool> {
    Ok(ctx
        .accounts
        .holder_position
        .as_ref()
        .is_some_and(|p| p.position.latest != 0))
}

pub fn current_day(ctx: Context<ConfigView>) -> Result<u64> {
    ctx.accounts.config.current_day(Clock::get()?.unix_timestamp)
}
