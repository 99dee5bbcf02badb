use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    events::ConfigInitialized,
    state::{HolderLedger, LedgerConfig},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitConfigArgs {
    /// Signer allowed to push balance changes.
    pub authority: Pubkey,
    /// Start of day 0 (unix seconds).
    pub epoch_ts: i64,
    /// Length of one ledger day. None = DEFAULT_DAY_LENGTH_SEC.
    pub day_length_sec: Option<u32>,
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = LedgerConfig::SPACE,
        seeds = [SEED_CFG],
        bump
    )]
    pub config: Account<'info, LedgerConfig>,

    /// Pre-allocated by the client (HolderLedger::SPACE bytes, owned by this program);
    /// too large to create through CPI.
    #[account(zero)]
    pub ledger: AccountLoader<'info, HolderLedger>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitConfig>, args: InitConfigArgs) -> Result<()> {
    let day_length_sec = args.day_length_sec.unwrap_or(DEFAULT_DAY_LENGTH_SEC);
    require!(day_length_sec > 0, ErrorCode::InvalidDayLength);
    require!(args.authority != Pubkey::default(), ErrorCode::InvalidAuthority);

    let config_key = ctx.accounts.config.key();
    let ledger_key = ctx.accounts.ledger.key();

    let cfg = &mut ctx.accounts.config;
    cfg.admin = ctx.accounts.admin.key();
    cfg.authority = args.authority;
    cfg.ledger = ledger_key;
    cfg.epoch_ts = args.epoch_ts;
    cfg.day_length_sec = day_length_sec;
    cfg.reserved_pools = [Pubkey::default(); MAX_RESERVED_POOLS];
    cfg.paused = false;
    cfg.bump = ctx.bumps.config;
    cfg.reserved = [0u8; 32];

    let mut ledger = ctx.accounts.ledger.load_init()?;
    ledger.config = config_key.to_bytes();
    // holder_count, total_tracked, tree and slots arrive zeroed

    emit!(ConfigInitialized {
        admin: cfg.admin,
        authority: cfg.authority,
        ledger: ledger_key,
        epoch_ts: cfg.epoch_ts,
        day_length_sec,
    });

    Ok(())
}
