use anchor_lang::prelude::*;
use crate::{
    constants::*,
    errors::ErrorCode,
    events::ReservedPoolSet,
    state::{HolderPosition, LedgerConfig},
};

#[derive(Accounts)]
#[instruction(slot: u8, pool: Pubkey)]
pub struct SetReservedPool<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CFG],
        bump = config.bump,
        constraint = config.admin == admin.key() @ ErrorCode::Unauthorized,
    )]
    pub config: Account<'info, LedgerConfig>,

    /// CHECK: position PDA of `pool`; may not exist yet. Read only if owned by this program.
    #[account(seeds = [SEED_POSITION, config.ledger.as_ref(), pool.as_ref()], bump)]
    pub pool_position: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<SetReservedPool>, slot: u8, pool: Pubkey) -> Result<()> {
    let index = reserved_pool_slot(slot).ok_or(ErrorCode::InvalidReservedPoolSlot)?;

    // A tracked pool would be frozen in the registry: reserved accounts are never updated.
    let pool_position = &ctx.accounts.pool_position;
    if *pool_position.owner == crate::ID {
        let data = pool_position.try_borrow_data()?;
        let position = HolderPosition::try_deserialize(&mut &data[..])?;
        require!(position.position.latest == 0, ErrorCode::ReservedPoolTracked);
    }

    let cfg = &mut ctx.accounts.config;
    let old_pool = cfg.reserved_pools[index];
    cfg.reserved_pools[index] = pool;

    emit!(ReservedPoolSet {
        slot,
        old_pool,
        new_pool: pool,
    });

    Ok(())
}
