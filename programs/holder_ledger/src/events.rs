use anchor_lang::prelude::*;

#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub authority: Pubkey,
    pub ledger: Pubkey,
    pub epoch_ts: i64,
    pub day_length_sec: u32,
}

#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub paused: bool,
}

#[event]
pub struct ReservedPoolSet {
    pub slot: u8,
    pub old_pool: Pubkey,
    pub new_pool: Pubkey,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct HolderInserted {
    pub holder: Pubkey,
    pub index: u32,
    pub balance: u64,
    pub day: u64,
    pub holder_count: u32,
    pub total_tracked: u64,
}

#[event]
pub struct HolderRemoved {
    pub holder: Pubkey,
    pub index: u32,
    pub balance: u64,
    /// Holder swapped from the last slot into `index`, if any.
    pub moved_holder: Option<Pubkey>,
    pub day: u64,
    pub holder_count: u32,
    pub total_tracked: u64,
}

#[event]
pub struct HolderBalanceUpdated {
    pub holder: Pubkey,
    pub index: u32,
    pub balance_before: u64,
    pub balance_after: u64,
    pub day: u64,
    pub total_tracked: u64,
}

#[event]
pub struct DrawRequested {
    pub day: u64,
    pub draw: Pubkey,
    pub requester: Pubkey,
}

#[event]
pub struct DrawSettled {
    pub day: u64,
    pub status: u8,
    pub winner: Pubkey,
    pub winner_index: u32,
    pub winning_target: u64,
    pub total_weight: u64,
    pub holder_count: u32,
}
