use anchor_lang::prelude::*;
use crate::{
    errors::ErrorCode,
    ledger::Selection,
    state::{DailyDraw, DrawStatus, HolderLedger},
    utils::seed_from_randomness,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Settled(Selection),
    NoWinner,
    Expired,
}

/// Only yesterday can be drawn: its end-of-day state is exactly what the two-generation
/// cells can still answer once today's first write has happened.
pub fn ensure_drawable(day: u64, current_day: u64) -> Result<()> {
    require!(day.checked_add(1) == Some(current_day), ErrorCode::DrawDayNotReady);
    Ok(())
}

/// Resolve a pending draw with `randomness`, reading the ledger as of `draw.day`.
pub fn resolve_draw(
    draw: &mut DailyDraw,
    ledger: &HolderLedger,
    current_day: u64,
    randomness: [u8; 32],
    now_ts: i64,
) -> Result<DrawOutcome> {
    require!(draw.status == DrawStatus::Requested as u8, ErrorCode::DrawNotPending);

    draw.randomness = randomness;
    draw.resolved_at = now_ts;

    if draw.day.checked_add(1) != Some(current_day) {
        draw.status = DrawStatus::Expired as u8;
        return Ok(DrawOutcome::Expired);
    }

    draw.total_weight = ledger.total_tracked(draw.day);
    draw.holder_count = ledger.holder_count(draw.day);
    if draw.total_weight == 0 || draw.holder_count == 0 {
        draw.status = DrawStatus::NoWinner as u8;
        return Ok(DrawOutcome::NoWinner);
    }

    let selection = ledger.select_weighted(draw.day, seed_from_randomness(&randomness))?;
    draw.winner = selection.winner;
    draw.winner_index = selection.index;
    draw.winning_target = selection.target;
    draw.status = DrawStatus::Settled as u8;
    Ok(DrawOutcome::Settled(selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dual::DualIndex,
        ledger::BalanceChange,
        state::HolderKind,
    };
    use std::collections::BTreeMap;

    fn pending(day: u64) -> DailyDraw {
        DailyDraw {
            day,
            status: DrawStatus::Requested as u8,
            ..Default::default()
        }
    }

    fn ledger_with(balances: &[(Pubkey, u64)], day: u64) -> Box<HolderLedger> {
        let mut ledger = bytemuck::zeroed_box::<HolderLedger>();
        let mut positions = BTreeMap::<Pubkey, DualIndex>::new();
        for (holder, balance) in balances {
            let change = BalanceChange {
                holder: *holder,
                kind: HolderKind::Wallet,
                balance_before: 0,
                balance_after: *balance,
            };
            ledger.apply_balance_change(&mut positions, &change, day).unwrap();
        }
        ledger
    }

    fn randomness(seed: u128) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&seed.to_le_bytes());
        bytes
    }

    #[test]
    fn settles_against_previous_day() {
        let h1 = Pubkey::new_unique();
        let h2 = Pubkey::new_unique();
        let ledger = ledger_with(&[(h1, 100), (h2, 50)], 4);
        let mut draw = pending(4);

        let outcome = resolve_draw(&mut draw, &ledger, 5, randomness(120), 77).unwrap();

        let DrawOutcome::Settled(selection) = outcome else {
            panic!("expected a winner, got {outcome:?}");
        };
        assert_eq!(selection.winner, h1);
        assert_eq!(draw.status, DrawStatus::Settled as u8);
        assert_eq!(draw.winner, h1);
        assert_eq!(draw.winner_index, 1);
        assert_eq!(draw.winning_target, 121);
        assert_eq!(draw.total_weight, 150);
        assert_eq!(draw.holder_count, 2);
        assert_eq!(draw.resolved_at, 77);
    }

    #[test]
    fn empty_snapshot_has_no_winner() {
        let ledger = ledger_with(&[], 0);
        let mut draw = pending(2);

        let outcome = resolve_draw(&mut draw, &ledger, 3, randomness(9), 0).unwrap();

        assert_eq!(outcome, DrawOutcome::NoWinner);
        assert_eq!(draw.status, DrawStatus::NoWinner as u8);
        assert_eq!(draw.winner, Pubkey::default());
    }

    #[test]
    fn late_randomness_expires_the_draw() {
        let ledger = ledger_with(&[(Pubkey::new_unique(), 10)], 1);
        let mut draw = pending(1);

        let outcome = resolve_draw(&mut draw, &ledger, 3, randomness(0), 0).unwrap();

        assert_eq!(outcome, DrawOutcome::Expired);
        assert_eq!(draw.status, DrawStatus::Expired as u8);
    }

    #[test]
    fn resolved_draw_cannot_be_resolved_again() {
        let ledger = ledger_with(&[(Pubkey::new_unique(), 10)], 1);
        let mut draw = pending(1);
        resolve_draw(&mut draw, &ledger, 2, randomness(3), 0).unwrap();

        assert!(resolve_draw(&mut draw, &ledger, 2, randomness(4), 0).is_err());
        assert_eq!(draw.randomness, randomness(3));
    }

    #[test]
    fn only_yesterday_is_drawable() {
        assert!(ensure_drawable(4, 5).is_ok());
        assert!(ensure_drawable(5, 5).is_err());
        assert!(ensure_drawable(3, 5).is_err());
        assert!(ensure_drawable(u64::MAX, 0).is_err());
    }
}
