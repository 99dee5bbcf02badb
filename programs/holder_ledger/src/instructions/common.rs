use anchor_lang::prelude::*;
use crate::{
    draw::DrawOutcome,
    events::{DrawSettled, HolderBalanceUpdated, HolderInserted, HolderRemoved},
    ledger::{BalanceChange, LedgerChange},
    state::{DailyDraw, HolderLedger},
};

pub fn emit_ledger_change(
    change: &BalanceChange,
    outcome: &LedgerChange,
    ledger: &HolderLedger,
    day: u64,
) {
    match *outcome {
        LedgerChange::Unchanged => {}
        LedgerChange::Inserted { index } => emit!(HolderInserted {
            holder: change.holder,
            index,
            balance: change.balance_after,
            day,
            holder_count: ledger.holder_count(day),
            total_tracked: ledger.total_tracked(day),
        }),
        LedgerChange::Removed { index, moved } => emit!(HolderRemoved {
            holder: change.holder,
            index,
            balance: change.balance_before,
            moved_holder: moved.map(|m| m.holder),
            day,
            holder_count: ledger.holder_count(day),
            total_tracked: ledger.total_tracked(day),
        }),
        LedgerChange::Updated { index, .. } => emit!(HolderBalanceUpdated {
            holder: change.holder,
            index,
            balance_before: change.balance_before,
            balance_after: change.balance_after,
            day,
            total_tracked: ledger.total_tracked(day),
        }),
    }
}

pub fn emit_draw_outcome(draw: &DailyDraw, outcome: &DrawOutcome) {
    match outcome {
        DrawOutcome::Expired => msg!("draw for day {} expired before randomness arrived", draw.day),
        DrawOutcome::NoWinner => msg!("draw for day {} had no tracked weight", draw.day),
        DrawOutcome::Settled(_) => {}
    }

    emit!(DrawSettled {
        day: draw.day,
        status: draw.status,
        winner: draw.winner,
        winner_index: draw.winner_index,
        winning_target: draw.winning_target,
        total_weight: draw.total_weight,
        holder_count: draw.holder_count,
    });
}
