//! Opening and running balance calculations.
//!
//! Balances are always `debit - credit`, accumulated in chronological order.
//! The store-supplied `balance` column is never consulted.

use rust_decimal::Decimal;

use super::entry::LedgerEntry;

/// Sums `debit - credit` over entries preceding a period.
pub fn opening_balance<'a, I>(entries: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries.into_iter().map(LedgerEntry::net).sum()
}

/// Running balance accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningBalance {
    current: Decimal,
}

impl RunningBalance {
    /// Starts accumulating from an opening balance.
    #[must_use]
    pub const fn starting_at(opening: Decimal) -> Self {
        Self { current: opening }
    }

    /// Applies an entry and returns the balance after it.
    pub fn apply(&mut self, entry: &LedgerEntry) -> Decimal {
        self.current += entry.net();
        self.current
    }

    /// Returns the balance after the last applied entry.
    #[must_use]
    pub const fn current(&self) -> Decimal {
        self.current
    }
}

/// Computes the balance after each entry.
///
/// `entries` must already be in ascending (date, id) order.
#[must_use]
pub fn running_balances(opening: Decimal, entries: &[LedgerEntry]) -> Vec<Decimal> {
    let mut running = RunningBalance::starting_at(opening);
    entries.iter().map(|e| running.apply(e)).collect()
}
