use anchor_lang::prelude::*;

pub mod constants;
pub mod draw;
pub mod dual;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod state;
pub mod utils;
pub mod instructions;

use instructions::*;

#[cfg(feature = "devnet")]
declare_id!("GFvJ7uNXXxQYY5G2cU2X4P5ZQZgkmz1G8EFe9pLT63rZ");

#[cfg(not(feature = "devnet"))]
declare_id!("JBf79ACBHosUAzzzF8g8xXiwoRMKF8Y4jtaqUZoXZrxL");

#[program]
pub mod holder_ledger {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>, args: InitConfigArgs) -> Result<()> {
        init_config::handler(ctx, args)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
        update_config::handler(ctx, args)
    }

    /// Mark `pool` as a reserved pool in `slot` (0-based). The null sink is always reserved.
    pub fn set_reserved_pool(ctx: Context<SetReservedPool>, slot: u8, pool: Pubkey) -> Result<()> {
        set_reserved_pool::handler(ctx, slot, pool)
    }

    /// Authority-only: one account's balance went from `balance_before` to `balance_after`.
    pub fn apply_balance_change(
        ctx: Context<ApplyBalanceChange>,
        balance_before: u64,
        balance_after: u64,
    ) -> Result<()> {
        apply_balance_change::handler(ctx, balance_before, balance_after)
    }

    /// Authority-only: both sides of one transfer, applied sender first.
    pub fn record_transfer(
        ctx: Context<RecordTransfer>,
        from_before: u64,
        from_after: u64,
        to_before: u64,
        to_after: u64,
    ) -> Result<()> {
        record_transfer::handler(ctx, from_before, from_after, to_before, to_after)
    }

    /// Permissionless: ask the VRF oracle for randomness to draw yesterday's winner.
    pub fn request_draw(ctx: Context<RequestDraw>, day: u64) -> Result<()> {
        request_draw::handler(ctx, day)
    }

    pub fn draw_callback(ctx: Context<DrawCallback>, randomness: [u8; 32]) -> Result<()> {
        draw_callback::handler(ctx, randomness)
    }

    /// Admin-only test settlement (bypasses VRF oracle). Only available with `devnet` feature.
    #[cfg(feature = "devnet")]
    pub fn mock_draw(ctx: Context<MockDraw>, day: u64, randomness: [u8; 32]) -> Result<()> {
        mock_draw::handler(ctx, day, randomness)
    }

    pub fn suffix_sum(ctx: Context<LedgerView>, index: u32, day: u64) -> Result<u64> {
        views::suffix_sum(ctx, index, day)
    }

    pub fn holder_count(ctx: Context<LedgerView>, day: u64) -> Result<u32> {
        views::holder_count(ctx, day)
    }

    pub fn holder_at_index(ctx: Context<LedgerView>, index: u32, day: u64) -> Result<Pubkey> {
        views::holder_at_index(ctx, index, day)
    }

    pub fn is_tracked(ctx: Context<PositionView>) -> Result<bool> {
        views::is_tracked(ctx)
    }

    pub fn current_day(ctx: Context<ConfigView>) -> Result<u64> {
        views::current_day(ctx)
    }
}
