use anchor_lang::prelude::*;
use crate::{
    constants::*,
    draw::resolve_draw,
    errors::ErrorCode,
    state::{DailyDraw, HolderLedger, LedgerConfig},
};
use super::common::emit_draw_outcome;

/// MagicBlock VRF program identity PDA; only the VRF program can sign as this address.
const VRF_PROGRAM_IDENTITY_BYTES: [u8; 32] =
    ephemeral_vrf_sdk::consts::VRF_PROGRAM_IDENTITY.to_bytes();
pub static VRF_PROGRAM_IDENTITY: Pubkey = Pubkey::new_from_array(VRF_PROGRAM_IDENTITY_BYTES);

#[derive(Accounts)]
pub struct DrawCallback<'info> {
    #[account(address = VRF_PROGRAM_IDENTITY)]
    pub vrf_program_identity: Signer<'info>,

    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = ledger @ ErrorCode::InvalidLedger,
    )]
    pub config: Account<'info, LedgerConfig>,

    pub ledger: AccountLoader<'info, HolderLedger>,

    /// Day is not among the callback args; PDA verified in the handler.
    #[account(mut)]
    pub daily_draw: Account<'info, DailyDraw>,
}

pub fn handler(ctx: Context<DrawCallback>, randomness: [u8; 32]) -> Result<()> {
    let expected_key = {
        let draw = &ctx.accounts.daily_draw;
        Pubkey::create_program_address(
            &[SEED_DRAW, &draw.day.to_le_bytes(), &[draw.bump]],
            &crate::ID,
        )
        .map_err(|_| ErrorCode::Unauthorized)?
    };
    require_keys_eq!(ctx.accounts.daily_draw.key(), expected_key, ErrorCode::Unauthorized);

    let now = Clock::get()?.unix_timestamp;
    let current_day = ctx.accounts.config.current_day(now)?;
    let ledger = ctx.accounts.ledger.load()?;

    let draw = &mut ctx.accounts.daily_draw;
    let outcome = resolve_draw(draw, &ledger, current_day, randomness, now)?;
    emit_draw_outcome(draw, &outcome);

    Ok(())
}
