use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

/// Two-generation storage cell.
///
/// `latest` is the value as of `last_updated_day`; `older` is the value the cell
/// held at the end of the previous day it was written. A read for any day at or
/// after `last_updated_day` sees `latest`, an earlier day sees `older`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
#[repr(C)]
pub struct DualState<T> {
    pub older: T,
    pub latest: T,
    pub last_updated_day: u64,
}

/// Balances and suffix sums.
pub type DualAmount = DualState<u64>;
/// Registry positions and the holder count.
pub type DualIndex = DualState<u32>;
/// Holder keys, stored as raw bytes so the cell stays `Pod`.
pub type DualAddress = DualState<[u8; 32]>;

// Every instantiation below is padding-free: two equally sized values followed by a u64.
unsafe impl<T: Zeroable> Zeroable for DualState<T> {}
unsafe impl Pod for DualAmount {}
unsafe impl Pod for DualIndex {}
unsafe impl Pod for DualAddress {}

impl<T: Copy> DualState<T> {
    /// Store `value` for `day`. The first write of a new day rolls `latest` into `older`;
    /// further writes on the same day only overwrite `latest`.
    pub fn write(&mut self, value: T, day: u64) {
        if day > self.last_updated_day {
            self.older = self.latest;
            self.last_updated_day = day;
        }
        self.latest = value;
    }

    pub fn read(&self, day: u64) -> T {
        if day >= self.last_updated_day {
            self.latest
        } else {
            self.older
        }
    }
}

impl DualAddress {
    pub fn read_key(&self, day: u64) -> Pubkey {
        Pubkey::new_from_array(self.read(day))
    }

    pub fn write_key(&mut self, key: &Pubkey, day: u64) {
        self.write(key.to_bytes(), day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_rewrite_keeps_older_generation() {
        let mut cell = DualAmount::default();
        cell.write(10, 3);
        cell.write(20, 4);
        cell.write(30, 4);

        assert_eq!(cell.older, 10);
        assert_eq!(cell.latest, 30);
        assert_eq!(cell.last_updated_day, 4);
    }

    #[test]
    fn reads_before_last_write_day_see_previous_value() {
        let mut cell = DualAmount::default();
        cell.write(100, 0);
        cell.write(90, 1);

        assert_eq!(cell.read(0), 100);
        assert_eq!(cell.read(1), 90);
        assert_eq!(cell.read(7), 90);
    }

    #[test]
    fn quiet_days_are_answered_by_latest() {
        let mut cell = DualIndex::default();
        cell.write(5, 2);

        // Nothing written on days 3..=9: the day-9 snapshot is still the day-2 value.
        assert_eq!(cell.read(9), 5);

        cell.write(6, 10);
        assert_eq!(cell.read(9), 5);
        assert_eq!(cell.read(10), 6);
    }

    #[test]
    fn first_write_on_day_zero_leaves_zeroed_history() {
        let mut cell = DualAddress::default();
        let key = Pubkey::new_unique();
        cell.write_key(&key, 0);

        assert_eq!(cell.older, [0u8; 32]);
        assert_eq!(cell.read_key(0), key);
    }

    #[test]
    fn late_write_for_an_earlier_day_overwrites_latest_only() {
        let mut cell = DualAmount::default();
        cell.write(1, 5);
        cell.write(2, 6);
        cell.write(3, 4);

        assert_eq!(cell.older, 1);
        assert_eq!(cell.latest, 3);
        assert_eq!(cell.last_updated_day, 6);
    }
}
