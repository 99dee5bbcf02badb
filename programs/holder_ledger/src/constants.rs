use anchor_lang::prelude::*;

/// Tracked holder slots in one ledger account (slot 0 is the "not tracked" sentinel).
pub const MAX_HOLDERS: usize = 2048;
pub const MAX_RESERVED_POOLS: usize = 4;

/// 25 hours, so the daily draw drifts across time zones instead of always landing at the same hour.
pub const DEFAULT_DAY_LENGTH_SEC: u32 = 90_000;

pub const SEED_CFG: &[u8] = b"cfg";
pub const SEED_POSITION: &[u8] = b"pos";
pub const SEED_DRAW: &[u8] = b"draw";
pub const SEED_IDENTITY: &[u8] = b"identity";

pub fn reserved_pool_slot(slot: u8) -> Option<usize> {
    let slot = slot as usize;
    (slot < MAX_RESERVED_POOLS).then_some(slot)
}

pub fn is_null_sink(key: &Pubkey) -> bool {
    *key == Pubkey::default()
}
