use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    ledger::{BalanceChange, PositionAccounts},
    state::{HolderLedger, HolderPosition, LedgerConfig},
};
use super::common::emit_ledger_change;

#[derive(Accounts)]
pub struct ApplyBalanceChange<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Balance-change authority (the token program's signer).
    pub authority: Signer<'info>,

    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = authority @ ErrorCode::Unauthorized,
        has_one = ledger @ ErrorCode::InvalidLedger,
    )]
    pub config: Account<'info, LedgerConfig>,

    #[account(mut)]
    pub ledger: AccountLoader<'info, HolderLedger>,

    /// CHECK: only key, owner and executable flag are read.
    pub holder: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = HolderPosition::SPACE,
        seeds = [SEED_POSITION, ledger.key().as_ref(), holder.key().as_ref()],
        bump
    )]
    pub holder_position: Account<'info, HolderPosition>,

    /// Position of the registry's last holder; required when this change removes
    /// a holder that is not last.
    #[account(
        mut,
        constraint = moved_position.ledger == ledger.key() @ ErrorCode::InvalidPositionAccount,
    )]
    pub moved_position: Option<Account<'info, HolderPosition>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ApplyBalanceChange>, balance_before: u64, balance_after: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ErrorCode::Paused);

    let day = cfg.current_day(Clock::get()?.unix_timestamp)?;
    let change = BalanceChange {
        holder: ctx.accounts.holder.key(),
        kind: cfg.classify(&ctx.accounts.holder),
        balance_before,
        balance_after,
    };

    let ledger_key = ctx.accounts.ledger.key();
    ctx.accounts
        .holder_position
        .bind(ledger_key, change.holder, ctx.bumps.holder_position);

    let mut positions = PositionAccounts::new();
    positions.push(&mut ctx.accounts.holder_position);
    if let Some(moved) = ctx.accounts.moved_position.as_mut() {
        positions.push(moved);
    }

    let mut ledger = ctx.accounts.ledger.load_mut()?;
    let outcome = ledger.apply_balance_change(&mut positions, &change, day)?;
    emit_ledger_change(&change, &outcome, &ledger, day);

    Ok(())
}
