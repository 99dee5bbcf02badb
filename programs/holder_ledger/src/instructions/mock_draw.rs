use anchor_lang::prelude::*;
use crate::{
    constants::*,
    draw::{ensure_drawable, resolve_draw},
    errors::ErrorCode,
    state::{DailyDraw, DrawStatus, HolderLedger, LedgerConfig},
};
use super::common::emit_draw_outcome;

#[derive(Accounts)]
#[instruction(day: u64)]
pub struct MockDraw<'info> {
    /// Admin-only: settle a draw without the VRF oracle.
    #[account(mut, constraint = admin.key() == config.admin @ ErrorCode::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = ledger @ ErrorCode::InvalidLedger,
    )]
    pub config: Account<'info, LedgerConfig>,

    pub ledger: AccountLoader<'info, HolderLedger>,

    /// Either a fresh draw or one still waiting on the oracle.
    #[account(
        init_if_needed,
        payer = admin,
        space = DailyDraw::SPACE,
        seeds = [SEED_DRAW, &day.to_le_bytes()],
        bump
    )]
    pub daily_draw: Account<'info, DailyDraw>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<MockDraw>, day: u64, randomness: [u8; 32]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let current_day = ctx.accounts.config.current_day(now)?;
    ensure_drawable(day, current_day)?;

    let draw = &mut ctx.accounts.daily_draw;
    if draw.status == 0 {
        draw.day = day;
        draw.status = DrawStatus::Requested as u8;
        draw.bump = ctx.bumps.daily_draw;
        draw.requester = ctx.accounts.admin.key();
        draw.requested_at = now;
    }

    let ledger = ctx.accounts.ledger.load()?;
    let outcome = resolve_draw(draw, &ledger, current_day, randomness, now)?;
    emit_draw_outcome(draw, &outcome);

    Ok(())
}
