use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use crate::{
    constants::MAX_HOLDERS,
    dual::DualIndex,
    errors::ErrorCode,
    state::{HolderKind, HolderLedger, HolderPosition},
    utils::{bit_leaf, bit_suffix_sum, bit_update, winning_target},
};

/// Key-indexed `position_of` storage. The registry never touches positions any other way.
pub trait PositionStore {
    /// Position cell of `holder`; an unknown holder reads as the zeroed cell.
    fn position(&self, holder: &Pubkey) -> Result<DualIndex>;
    fn set_position(&mut self, holder: &Pubkey, cell: DualIndex) -> Result<()>;
}

impl PositionStore for BTreeMap<Pubkey, DualIndex> {
    fn position(&self, holder: &Pubkey) -> Result<DualIndex> {
        Ok(self.get(holder).copied().unwrap_or_default())
    }

    fn set_position(&mut self, holder: &Pubkey, cell: DualIndex) -> Result<()> {
        self.insert(*holder, cell);
        Ok(())
    }
}

/// Position accounts loaded for one instruction. Every holder the registry touches
/// (including one swapped in by a removal) must be among them.
pub struct PositionAccounts<'a, 'info> {
    accounts: Vec<&'a mut Account<'info, HolderPosition>>,
}

impl<'a, 'info> PositionAccounts<'a, 'info> {
    pub fn new() -> Self {
        Self { accounts: Vec::with_capacity(3) }
    }

    pub fn push(&mut self, account: &'a mut Account<'info, HolderPosition>) {
        self.accounts.push(account);
    }
}

impl Default for PositionAccounts<'_, '_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionStore for PositionAccounts<'_, '_> {
    fn position(&self, holder: &Pubkey) -> Result<DualIndex> {
        self.accounts
            .iter()
            .find(|a| a.holder == *holder)
            .map(|a| a.position)
            .ok_or(ErrorCode::MissingPositionAccount.into())
    }

    fn set_position(&mut self, holder: &Pubkey, cell: DualIndex) -> Result<()> {
        // A receiver that is also the moved holder arrives twice; keep the copies identical.
        let mut found = false;
        for account in self.accounts.iter_mut().filter(|a| a.holder == *holder) {
            account.position = cell;
            found = true;
        }
        require!(found, ErrorCode::MissingPositionAccount);
        Ok(())
    }
}

/// Net balance change of one account, captured before any mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceChange {
    pub holder: Pubkey,
    pub kind: HolderKind,
    pub balance_before: u64,
    pub balance_after: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovedHolder {
    pub holder: Pubkey,
    pub from_index: u32,
    pub to_index: u32,
    pub balance: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerChange {
    Unchanged,
    Inserted { index: u32 },
    Removed { index: u32, moved: Option<MovedHolder> },
    Updated { index: u32, delta: i128 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub winner: Pubkey,
    pub index: u32,
    pub target: u64,
    pub total_weight: u64,
    pub holder_count: u32,
}

fn store_position(
    positions: &mut impl PositionStore,
    holder: &Pubkey,
    index: u32,
    day: u64,
) -> Result<()> {
    let mut cell = positions.position(holder)?;
    cell.write(index, day);
    positions.set_position(holder, cell)
}

impl HolderLedger {
    pub fn holder_count(&self, day: u64) -> u32 {
        self.holder_count.read(day)
    }

    pub fn total_tracked(&self, day: u64) -> u64 {
        self.total_tracked.read(day)
    }

    pub fn suffix_sum(&self, index: u32, day: u64) -> Result<u64> {
        bit_suffix_sum(
            &self.tree.data,
            index as usize,
            self.holder_count(day) as usize,
            day,
        )
    }

    /// Raw tracked balance at `index` as of `day`.
    pub fn balance_at(&self, index: u32, day: u64) -> Result<u64> {
        let count = self.holder_count(day);
        require!(index > 0 && index <= count, ErrorCode::InvalidHolderIndex);
        bit_leaf(&self.tree.data, index as usize, count as usize, day)
    }

    pub fn holder_at_index(&self, index: u32, day: u64) -> Result<Pubkey> {
        require!(
            index > 0 && index <= self.holder_count(day),
            ErrorCode::InvalidHolderIndex
        );
        Ok(self.slots.data[index as usize].read_key(day))
    }

    pub fn is_tracked(positions: &impl PositionStore, holder: &Pubkey) -> Result<bool> {
        Ok(positions.position(holder)?.latest != 0)
    }

    /// Append `holder` at the next free index.
    pub fn insert(
        &mut self,
        positions: &mut impl PositionStore,
        holder: &Pubkey,
        balance: u64,
        day: u64,
    ) -> Result<u32> {
        require!(positions.position(holder)?.read(day) == 0, ErrorCode::HolderAlreadyTracked);
        require!(balance > 0, ErrorCode::ZeroBalanceInsert);

        let index = self.holder_count(day).checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        require!((index as usize) <= MAX_HOLDERS, ErrorCode::HolderCapacityReached);

        self.holder_count.write(index, day);
        self.slots.data[index as usize].write_key(holder, day);
        store_position(positions, holder, index, day)?;
        bit_update(&mut self.tree.data, index as usize, balance as i128, day)?;

        let total = self.total_tracked(day).checked_add(balance).ok_or(ErrorCode::MathOverflow)?;
        self.total_tracked.write(total, day);
        Ok(index)
    }

    /// Drop `holder` from the registry, moving the last holder into its slot to keep indices dense.
    pub fn remove(
        &mut self,
        positions: &mut impl PositionStore,
        holder: &Pubkey,
        balance_before: u64,
        day: u64,
    ) -> Result<Option<MovedHolder>> {
        let index = positions.position(holder)?.read(day);
        require!(index > 0, ErrorCode::HolderNotTracked);
        let last = self.holder_count(day);
        require!(index <= last, ErrorCode::InvalidHolderIndex);
        require!(
            self.balance_at(index, day)? == balance_before,
            ErrorCode::BalanceMismatch
        );

        bit_update(&mut self.tree.data, index as usize, -(balance_before as i128), day)?;
        let total = self.total_tracked(day).saturating_sub(balance_before);
        self.total_tracked.write(total, day);

        let mut moved = None;
        if index < last {
            let moved_holder = self.slots.data[last as usize].read_key(day);
            let moved_balance = bit_leaf(&self.tree.data, last as usize, last as usize, day)?;

            bit_update(&mut self.tree.data, last as usize, -(moved_balance as i128), day)?;
            bit_update(&mut self.tree.data, index as usize, moved_balance as i128, day)?;
            self.slots.data[index as usize].write_key(&moved_holder, day);
            store_position(positions, &moved_holder, index, day)?;

            moved = Some(MovedHolder {
                holder: moved_holder,
                from_index: last,
                to_index: index,
                balance: moved_balance,
            });
        }

        store_position(positions, holder, 0, day)?;
        self.slots.data[last as usize].write([0u8; 32], day);
        self.holder_count.write(last - 1, day);
        Ok(moved)
    }

    pub fn update_balance(&mut self, index: u32, delta: i128, day: u64) -> Result<()> {
        require!(
            index > 0 && index <= self.holder_count(day),
            ErrorCode::InvalidHolderIndex
        );
        bit_update(&mut self.tree.data, index as usize, delta, day)?;

        // Clamped at zero: fee rounding can leave the accumulator a few units short.
        let total = (self.total_tracked(day) as i128)
            .checked_add(delta)
            .ok_or(ErrorCode::MathOverflow)?
            .max(0);
        let total = u64::try_from(total).map_err(|_| ErrorCode::MathOverflow)?;
        self.total_tracked.write(total, day);
        Ok(())
    }

    /// Route one account's net balance change into insert / remove / update.
    ///
    /// Reserved pools are never tracked. Contract-like accounts cannot enter the registry,
    /// but once an address is tracked every later change is processed whatever it looks
    /// like now, so a holder that became contract-like still leaves cleanly.
    pub fn apply_balance_change(
        &mut self,
        positions: &mut impl PositionStore,
        change: &BalanceChange,
        day: u64,
    ) -> Result<LedgerChange> {
        if change.kind == HolderKind::ReservedPool {
            return Ok(LedgerChange::Unchanged);
        }

        let index = positions.position(&change.holder)?.read(day);
        if index == 0 {
            if change.kind == HolderKind::ContractLike || change.balance_after == 0 {
                return Ok(LedgerChange::Unchanged);
            }
            let index = self.insert(positions, &change.holder, change.balance_after, day)?;
            return Ok(LedgerChange::Inserted { index });
        }

        if change.balance_after == 0 {
            let moved = self.remove(positions, &change.holder, change.balance_before, day)?;
            return Ok(LedgerChange::Removed { index, moved });
        }

        if change.balance_after != change.balance_before {
            require!(
                self.balance_at(index, day)? == change.balance_before,
                ErrorCode::BalanceMismatch
            );
            let delta = change.balance_after as i128 - change.balance_before as i128;
            self.update_balance(index, delta, day)?;
            return Ok(LedgerChange::Updated { index, delta });
        }

        Ok(LedgerChange::Unchanged)
    }

    /// Apply both sides of a transfer, sender first. A transfer to self is seen as one
    /// account going from the sender's "before" to the receiver's "after" balance.
    pub fn apply_transfer(
        &mut self,
        positions: &mut impl PositionStore,
        from: &BalanceChange,
        to: &BalanceChange,
        day: u64,
    ) -> Result<(LedgerChange, LedgerChange)> {
        if from.holder == to.holder {
            let net = BalanceChange {
                balance_after: to.balance_after,
                ..*from
            };
            let change = self.apply_balance_change(positions, &net, day)?;
            return Ok((change, LedgerChange::Unchanged));
        }

        let sender = self.apply_balance_change(positions, from, day)?;
        let receiver = self.apply_balance_change(positions, to, day)?;
        Ok((sender, receiver))
    }

    /// Pick a holder with probability proportional to its balance as of `day`.
    ///
    /// Finds the largest index whose suffix sum still reaches the target. Suffix sums
    /// strictly decrease along the registry (no zero-balance holder is ever kept), so the
    /// answer is unique.
    pub fn select_weighted(&self, day: u64, seed: u128) -> Result<Selection> {
        let total_weight = self.total_tracked(day);
        let holder_count = self.holder_count(day);
        require!(total_weight > 0 && holder_count > 0, ErrorCode::EmptySelection);

        let target = winning_target(seed, total_weight)?;
        require!(self.suffix_sum(1, day)? >= target, ErrorCode::LedgerInconsistent);

        let mut left = 1u32;
        let mut right = holder_count;
        while left < right {
            let mid = left + (right - left + 1) / 2;
            if self.suffix_sum(mid, day)? >= target {
                left = mid;
            } else {
                right = mid - 1;
            }
        }

        Ok(Selection {
            winner: self.holder_at_index(left, day)?,
            index: left,
            target,
            total_weight,
            holder_count,
        })
    }
}
