use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    ledger::{BalanceChange, PositionAccounts},
    state::{HolderLedger, HolderPosition, LedgerConfig},
};
use super::common::emit_ledger_change;

#[derive(Accounts)]
pub struct RecordTransfer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

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
    pub from: UncheckedAccount<'info>,

    /// CHECK: same as `from`.
    #[account(constraint = to.key() != from.key() @ ErrorCode::SelfTransfer)]
    pub to: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = HolderPosition::SPACE,
        seeds = [SEED_POSITION, ledger.key().as_ref(), from.key().as_ref()],
        bump
    )]
    pub from_position: Account<'info, HolderPosition>,

    #[account(
        init_if_needed,
        payer = payer,
        space = HolderPosition::SPACE,
        seeds = [SEED_POSITION, ledger.key().as_ref(), to.key().as_ref()],
        bump
    )]
    pub to_position: Account<'info, HolderPosition>,

    /// Last holder's position, when the sender leaves from the middle of the registry.
    #[account(
        mut,
        constraint = moved_position.ledger == ledger.key() @ ErrorCode::InvalidPositionAccount,
    )]
    pub moved_position: Option<Account<'info, HolderPosition>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<RecordTransfer>,
    from_before: u64,
    from_after: u64,
    to_before: u64,
    to_after: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ErrorCode::Paused);

    let day = cfg.current_day(Clock::get()?.unix_timestamp)?;
    let from = BalanceChange {
        holder: ctx.accounts.from.key(),
        kind: cfg.classify(&ctx.accounts.from),
        balance_before: from_before,
        balance_after: from_after,
    };
    let to = BalanceChange {
        holder: ctx.accounts.to.key(),
        kind: cfg.classify(&ctx.accounts.to),
        balance_before: to_before,
        balance_after: to_after,
    };

    let ledger_key = ctx.accounts.ledger.key();
    ctx.accounts
        .from_position
        .bind(ledger_key, from.holder, ctx.bumps.from_position);
    ctx.accounts
        .to_position
        .bind(ledger_key, to.holder, ctx.bumps.to_position);

    let mut positions = PositionAccounts::new();
    positions.push(&mut ctx.accounts.from_position);
    positions.push(&mut ctx.accounts.to_position);
    if let Some(moved) = ctx.accounts.moved_position.as_mut() {
        positions.push(moved);
    }

    let mut ledger = ctx.accounts.ledger.load_mut()?;
    let (sender, receiver) = ledger.apply_transfer(&mut positions, &from, &to, day)?;
    emit_ledger_change(&from, &sender, &ledger, day);
    emit_ledger_change(&to, &receiver, &ledger, day);

    Ok(())
}
