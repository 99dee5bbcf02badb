use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::Discriminator;
use ephemeral_vrf_sdk::instructions::{create_request_randomness_ix, RequestRandomnessParams};
use ephemeral_vrf_sdk::types::SerializableAccountMeta;

use crate::{
    constants::*,
    draw::ensure_drawable,
    errors::ErrorCode,
    events::DrawRequested,
    state::{DailyDraw, DrawStatus, HolderLedger, LedgerConfig},
    utils::draw_caller_seed,
};

/// Anchor and the VRF SDK carry their own `Pubkey` types over the same 32 bytes.
fn to_sdk_pubkey(p: &Pubkey) -> ephemeral_vrf_sdk::Pubkey {
    ephemeral_vrf_sdk::Pubkey::new_from_array(p.to_bytes())
}

fn sdk_meta(pubkey: &Pubkey, is_writable: bool) -> SerializableAccountMeta {
    SerializableAccountMeta {
        pubkey: to_sdk_pubkey(pubkey),
        is_signer: false,
        is_writable,
    }
}

const VRF_PROGRAM_ID_BYTES: [u8; 32] = ephemeral_vrf_sdk::consts::VRF_PROGRAM_ID.to_bytes();
const DEFAULT_QUEUE_BYTES: [u8; 32] = ephemeral_vrf_sdk::consts::DEFAULT_QUEUE.to_bytes();

pub static VRF_PROGRAM_ID: Pubkey = Pubkey::new_from_array(VRF_PROGRAM_ID_BYTES);
pub static DEFAULT_QUEUE: Pubkey = Pubkey::new_from_array(DEFAULT_QUEUE_BYTES);

#[derive(Accounts)]
#[instruction(day: u64)]
pub struct RequestDraw<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [SEED_CFG],
        bump = config.bump,
        has_one = ledger @ ErrorCode::InvalidLedger,
    )]
    pub config: Account<'info, LedgerConfig>,

    pub ledger: AccountLoader<'info, HolderLedger>,

    /// One draw per day: a second request fails on `init`.
    #[account(
        init,
        payer = payer,
        space = DailyDraw::SPACE,
        seeds = [SEED_DRAW, &day.to_le_bytes()],
        bump
    )]
    pub daily_draw: Account<'info, DailyDraw>,

    /// CHECK: Our program's identity PDA, used to sign the VRF CPI.
    #[account(seeds = [SEED_IDENTITY], bump)]
    pub program_identity: AccountInfo<'info>,

    /// CHECK: Oracle queue account
    #[account(mut, address = DEFAULT_QUEUE)]
    pub oracle_queue: AccountInfo<'info>,

    /// CHECK: MagicBlock VRF program
    #[account(address = VRF_PROGRAM_ID)]
    pub vrf_program: AccountInfo<'info>,

    /// CHECK: SlotHashes sysvar
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub slot_hashes: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RequestDraw>, day: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ensure_drawable(day, ctx.accounts.config.current_day(now)?)?;

    let config_key = ctx.accounts.config.key();
    let ledger_key = ctx.accounts.ledger.key();
    let draw_key = ctx.accounts.daily_draw.key();

    let sdk_ix = create_request_randomness_ix(RequestRandomnessParams {
        payer: to_sdk_pubkey(&ctx.accounts.payer.key()),
        oracle_queue: to_sdk_pubkey(&ctx.accounts.oracle_queue.key()),
        callback_program_id: to_sdk_pubkey(&crate::ID),
        callback_discriminator: crate::instruction::DrawCallback::DISCRIMINATOR.to_vec(),
        caller_seed: draw_caller_seed(&ledger_key, day),
        accounts_metas: Some(vec![
            sdk_meta(&config_key, false),
            sdk_meta(&ledger_key, false),
            sdk_meta(&draw_key, true),
        ]),
        ..Default::default()
    });

    let ix = Instruction {
        program_id: Pubkey::new_from_array(sdk_ix.program_id.to_bytes()),
        accounts: sdk_ix
            .accounts
            .iter()
            .map(|a| {
                let pubkey = Pubkey::new_from_array(a.pubkey.to_bytes());
                if a.is_writable {
                    AccountMeta::new(pubkey, a.is_signer)
                } else {
                    AccountMeta::new_readonly(pubkey, a.is_signer)
                }
            })
            .collect(),
        data: sdk_ix.data,
    };

    anchor_lang::solana_program::program::invoke_signed(
        &ix,
        &[
            ctx.accounts.payer.to_account_info(),
            ctx.accounts.program_identity.to_account_info(),
            ctx.accounts.oracle_queue.to_account_info(),
            ctx.accounts.slot_hashes.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
        &[&[SEED_IDENTITY, &[ctx.bumps.program_identity]]],
    )?;

    let draw = &mut ctx.accounts.daily_draw;
    draw.day = day;
    draw.status = DrawStatus::Requested as u8;
    draw.bump = ctx.bumps.daily_draw;
    draw.requester = ctx.accounts.payer.key();
    draw.requested_at = now;

    emit!(DrawRequested {
        day,
        draw: draw_key,
        requester: draw.requester,
    });

    Ok(())
}
