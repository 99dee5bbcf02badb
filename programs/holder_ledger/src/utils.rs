use anchor_lang::prelude::*;
use crate::dual::DualAmount;
use crate::errors::ErrorCode;

#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// Add `delta` to the leaf at 1-based `index` of the suffix-sum tree.
///
/// Node `j` covers leaves `[j, j + lowbit(j))`, so an update walks downward
/// (`i -= lowbit(i)`). Nodes are read as of `day` (the current day) and written back tagged
/// with it, which rolls the previous day's value into the cell's older generation.
pub fn bit_update(tree: &mut [DualAmount], index: usize, delta: i128, day: u64) -> Result<()> {
    require!(index > 0 && index < tree.len(), ErrorCode::InvalidHolderIndex);
    let mut i = index;
    while i > 0 {
        let next = (tree[i].read(day) as i128)
            .checked_add(delta)
            .ok_or(ErrorCode::MathOverflow)?;
        let next = u64::try_from(next).map_err(|_| ErrorCode::MathOverflow)?;
        tree[i].write(next, day);
        i -= lowbit(i);
    }
    Ok(())
}

/// Sum of leaves `index..=count` as of `day`. Returns 0 when `index > count`.
pub fn bit_suffix_sum(tree: &[DualAmount], index: usize, count: usize, day: u64) -> Result<u64> {
    require!(index > 0, ErrorCode::InvalidHolderIndex);
    let n = count.min(tree.len().saturating_sub(1));
    let mut sum = 0u64;
    let mut i = index;
    while i <= n {
        sum = sum.checked_add(tree[i].read(day)).ok_or(ErrorCode::MathOverflow)?;
        i += lowbit(i);
    }
    Ok(sum)
}

/// Raw value of a single leaf, recovered by differencing adjacent suffix sums.
pub fn bit_leaf(tree: &[DualAmount], index: usize, count: usize, day: u64) -> Result<u64> {
    let here = bit_suffix_sum(tree, index, count, day)?;
    let after = if index < count {
        bit_suffix_sum(tree, index + 1, count, day)?
    } else {
        0
    };
    here.checked_sub(after).ok_or(ErrorCode::LedgerInconsistent.into())
}

/// Day number of `now_ts`, counting `day_length_sec` periods from `epoch_ts`.
/// Anything at or before the epoch is day 0.
pub fn day_index(now_ts: i64, epoch_ts: i64, day_length_sec: u32) -> Result<u64> {
    require!(day_length_sec > 0, ErrorCode::InvalidDayLength);
    if now_ts <= epoch_ts {
        return Ok(0);
    }
    let elapsed = (now_ts as i128 - epoch_ts as i128) as u64;
    Ok(elapsed / day_length_sec as u64)
}

pub fn seed_from_randomness(randomness: &[u8; 32]) -> u128 {
    let mut bytes16 = [0u8; 16];
    bytes16.copy_from_slice(&randomness[..16]);
    u128::from_le_bytes(bytes16)
}

/// Map a random seed onto `[1, total]`.
pub fn winning_target(seed: u128, total: u64) -> Result<u64> {
    require!(total > 0, ErrorCode::EmptySelection);
    Ok((seed % total as u128) as u64 + 1)
}

/// VRF caller seed for the draw of `day`, unique per ledger.
pub fn draw_caller_seed(ledger: &Pubkey, day: u64) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ledger.as_ref());
    hasher.update(&day.to_le_bytes());
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(leaves: &[u64], day: u64) -> Vec<DualAmount> {
        let mut tree = vec![DualAmount::default(); 17];
        for (i, leaf) in leaves.iter().enumerate() {
            bit_update(&mut tree, i + 1, *leaf as i128, day).unwrap();
        }
        tree
    }

    #[test]
    fn suffix_sums_cover_every_tail() {
        let leaves = [100u64, 50, 30, 7, 1, 12];
        let tree = tree_with(&leaves, 0);

        for start in 1..=leaves.len() {
            let expected: u64 = leaves[start - 1..].iter().sum();
            assert_eq!(bit_suffix_sum(&tree, start, leaves.len(), 0).unwrap(), expected);
        }
        assert_eq!(bit_suffix_sum(&tree, leaves.len() + 1, leaves.len(), 0).unwrap(), 0);
    }

    #[test]
    fn leaves_are_recovered_by_differencing() {
        let leaves = [9u64, 4, 11, 3, 5];
        let tree = tree_with(&leaves, 2);

        for (i, leaf) in leaves.iter().enumerate() {
            assert_eq!(bit_leaf(&tree, i + 1, leaves.len(), 2).unwrap(), *leaf);
        }
    }

    #[test]
    fn negative_delta_below_zero_is_rejected() {
        let mut tree = tree_with(&[5], 0);
        assert!(bit_update(&mut tree, 1, -6, 0).is_err());
        assert_eq!(bit_suffix_sum(&tree, 1, 1, 0).unwrap(), 5);
    }

    #[test]
    fn index_zero_is_rejected() {
        let mut tree = tree_with(&[], 0);
        assert!(bit_update(&mut tree, 0, 1, 0).is_err());
        assert!(bit_suffix_sum(&tree, 0, 1, 0).is_err());
    }

    #[test]
    fn queries_for_previous_day_ignore_todays_updates() {
        let mut tree = tree_with(&[100, 50, 30], 0);
        bit_update(&mut tree, 2, -20, 1).unwrap();
        bit_update(&mut tree, 3, 5, 1).unwrap();

        assert_eq!(bit_suffix_sum(&tree, 1, 3, 0).unwrap(), 180);
        assert_eq!(bit_suffix_sum(&tree, 2, 3, 0).unwrap(), 80);
        assert_eq!(bit_suffix_sum(&tree, 1, 3, 1).unwrap(), 165);
        assert_eq!(bit_suffix_sum(&tree, 2, 3, 1).unwrap(), 65);
    }

    #[test]
    fn day_index_counts_whole_periods() {
        assert_eq!(day_index(1_000, 1_000, 90_000).unwrap(), 0);
        assert_eq!(day_index(500, 1_000, 90_000).unwrap(), 0);
        assert_eq!(day_index(1_000 + 89_999, 1_000, 90_000).unwrap(), 0);
        assert_eq!(day_index(1_000 + 90_000, 1_000, 90_000).unwrap(), 1);
        assert_eq!(day_index(1_000 + 5 * 90_000 + 1, 1_000, 90_000).unwrap(), 5);
        assert!(day_index(10, 0, 0).is_err());
    }

    #[test]
    fn winning_target_is_one_indexed() {
        assert_eq!(winning_target(0, 180).unwrap(), 1);
        assert_eq!(winning_target(149, 180).unwrap(), 150);
        assert_eq!(winning_target(179, 180).unwrap(), 180);
        assert_eq!(winning_target(180, 180).unwrap(), 1);
        assert!(winning_target(5, 0).is_err());
    }

    #[test]
    fn seed_reads_first_sixteen_bytes_little_endian() {
        let mut randomness = [0xffu8; 32];
        randomness[..16].copy_from_slice(&7u128.to_le_bytes());
        assert_eq!(seed_from_randomness(&randomness), 7);
    }

    #[test]
    fn caller_seed_differs_per_day() {
        let ledger = Pubkey::new_unique();
        assert_ne!(draw_caller_seed(&ledger, 1), draw_caller_seed(&ledger, 2));
        assert_eq!(draw_caller_seed(&ledger, 3), draw_caller_seed(&ledger, 3));
    }
}
