use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};
use crate::constants::{is_null_sink, MAX_HOLDERS, MAX_RESERVED_POOLS};
use crate::dual::{DualAddress, DualAmount, DualIndex};
use crate::utils::day_index;

/// Wrapper for the suffix-sum tree: bytemuck doesn't impl Pod for arbitrary array sizes.
/// Node 0 is never used; nodes 1..=MAX_HOLDERS hold suffix partial sums.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct SuffixTree {
    pub data: [DualAmount; MAX_HOLDERS + 1],
}

unsafe impl Pod for SuffixTree {}
unsafe impl Zeroable for SuffixTree {}

/// Wrapper for the position -> holder table. Slot 0 is the sentinel.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct HolderSlots {
    pub data: [DualAddress; MAX_HOLDERS + 1],
}

unsafe impl Pod for HolderSlots {}
unsafe impl Zeroable for HolderSlots {}

#[cfg(feature = "idl-build")]
fn dual_array_type(
    name: &str,
    element: anchor_lang::idl::types::IdlType,
) -> anchor_lang::idl::types::IdlTypeDef {
    use anchor_lang::idl::types::*;
    IdlTypeDef {
        name: name.to_string(),
        docs: vec![],
        serialization: IdlSerialization::Bytemuck,
        repr: Some(IdlRepr::C(IdlReprModifier { packed: false, align: None })),
        generics: vec![],
        ty: IdlTypeDefTy::Struct {
            fields: Some(IdlDefinedFields::Named(vec![IdlField {
                name: "data".to_string(),
                docs: vec![],
                ty: IdlType::Array(
                    Box::new(IdlType::Defined {
                        name: "DualState".to_string(),
                        generics: vec![IdlGenericArg::Type { ty: element }],
                    }),
                    IdlArrayLen::Value(MAX_HOLDERS + 1),
                ),
            }])),
        },
    }
}

#[cfg(feature = "idl-build")]
impl anchor_lang::IdlBuild for SuffixTree {
    fn create_type() -> Option<anchor_lang::idl::types::IdlTypeDef> {
        Some(dual_array_type("SuffixTree", anchor_lang::idl::types::IdlType::U64))
    }
    fn insert_types(types: &mut std::collections::BTreeMap<String, anchor_lang::idl::types::IdlTypeDef>) {
        <DualAmount as anchor_lang::IdlBuild>::insert_types(types);
        if let Some(ty) = Self::create_type() {
            types.insert("SuffixTree".to_string(), ty);
        }
    }
    fn get_full_path() -> String {
        "SuffixTree".to_string()
    }
}

#[cfg(feature = "idl-build")]
impl anchor_lang::IdlBuild for HolderSlots {
    fn create_type() -> Option<anchor_lang::idl::types::IdlTypeDef> {
        use anchor_lang::idl::types::*;
        Some(dual_array_type(
            "HolderSlots",
            IdlType::Array(Box::new(IdlType::U8), IdlArrayLen::Value(32)),
        ))
    }
    fn insert_types(types: &mut std::collections::BTreeMap<String, anchor_lang::idl::types::IdlTypeDef>) {
        <DualAddress as anchor_lang::IdlBuild>::insert_types(types);
        if let Some(ty) = Self::create_type() {
            types.insert("HolderSlots".to_string(), ty);
        }
    }
    fn get_full_path() -> String {
        "HolderSlots".to_string()
    }
}

/// How the orchestrator treats an account whose balance changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolderKind {
    /// Eligible for fresh entry into the registry.
    Wallet,
    /// Program-owned or executable; only processed if already tracked.
    ContractLike,
    /// Never tracked.
    ReservedPool,
}

#[account]
#[derive(Default)]
pub struct LedgerConfig {
    pub admin: Pubkey,
    /// Signer allowed to push balance changes (the token program's PDA in production).
    pub authority: Pubkey,
    pub ledger: Pubkey,
    pub epoch_ts: i64,
    pub day_length_sec: u32,
    pub reserved_pools: [Pubkey; MAX_RESERVED_POOLS],
    pub paused: bool,
    pub bump: u8,
    pub reserved: [u8; 32],
}

impl LedgerConfig {
    pub const SPACE: usize = 8
        + 32 + 32 + 32
        + 8
        + 4
        + 32 * MAX_RESERVED_POOLS
        + 1
        + 1
        + 32;

    pub fn current_day(&self, now_ts: i64) -> Result<u64> {
        day_index(now_ts, self.epoch_ts, self.day_length_sec)
    }

    pub fn is_reserved_pool(&self, key: &Pubkey) -> bool {
        is_null_sink(key) || self.reserved_pools.contains(key)
    }

    pub fn classify(&self, holder: &AccountInfo) -> HolderKind {
        if self.is_reserved_pool(holder.key) {
            HolderKind::ReservedPool
        } else if holder.executable || *holder.owner != anchor_lang::system_program::ID {
            HolderKind::ContractLike
        } else {
            HolderKind::Wallet
        }
    }
}

/// Holder registry + suffix-sum tree, zero-copy (~196KB), allocated by the client and
/// claimed with `#[account(zero)]`. Always go through `AccountLoader<'info, HolderLedger>`.
#[account(zero_copy)]
#[repr(C)]
pub struct HolderLedger {
    pub config: [u8; 32],
    pub holder_count: DualIndex,
    pub total_tracked: DualAmount,
    pub tree: SuffixTree,
    pub slots: HolderSlots,
}

impl HolderLedger {
    pub const SPACE: usize = 8 + core::mem::size_of::<HolderLedger>();
}

/// `position_of` entry for one holder, PDA `[SEED_POSITION, ledger, holder]`.
/// Kept after removal; a zero position means "not tracked".
#[account]
#[derive(Default)]
pub struct HolderPosition {
    pub ledger: Pubkey,
    pub holder: Pubkey,
    pub position: DualIndex,
    pub bump: u8,
    pub reserved: [u8; 15],
}

impl HolderPosition {
    pub const SPACE: usize = 8
        + 32 + 32
        + 4 + 4 + 8
        + 1
        + 15;

    /// Fill in the identity of a freshly created position account. No-op once bound.
    pub fn bind(&mut self, ledger: Pubkey, holder: Pubkey, bump: u8) {
        if self.ledger == Pubkey::default() {
            self.ledger = ledger;
            self.holder = holder;
            self.bump = bump;
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    Requested = 1,
    Settled = 2,
    NoWinner = 3,
    /// Randomness arrived after the snapshot day fell out of the two-generation history.
    Expired = 4,
}

/// One daily draw, PDA `[SEED_DRAW, day]`.
#[account]
#[derive(Default)]
pub struct DailyDraw {
    pub day: u64,
    pub status: u8,
    pub bump: u8,
    pub _padding: [u8; 6],
    pub requester: Pubkey,
    pub requested_at: i64,
    pub resolved_at: i64,
    pub randomness: [u8; 32],
    pub total_weight: u64,
    pub holder_count: u32,
    pub winner_index: u32,
    pub winning_target: u64,
    pub winner: Pubkey,
    pub reserved: [u8; 32],
}

impl DailyDraw {
    pub const SPACE: usize = 8
        + 8
        + 1
        + 1
        + 6
        + 32
        + 8
        + 8
        + 32
        + 8
        + 4
        + 4
        + 8
        + 32
        + 32;
}
