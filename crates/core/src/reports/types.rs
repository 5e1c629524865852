//! Report data types.

use chrono::NaiveDate;
use portal_ledger_shared::types::DateFormat;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{Group, GroupBy, LedgerEntry, LedgerFilter, Partner};

/// Request-scoped inputs of the report builder.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Partner the ledger belongs to.
    pub partner: Partner,
    /// Display format for dates.
    pub date_format: DateFormat,
}

/// An entry with the balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// The ledger entry.
    pub entry: LedgerEntry,
    /// Opening balance plus all entries up to and including this one.
    pub running_balance: Decimal,
}

/// A group of report rows.
pub type ReportGroup = Group<ReportRow>;

/// A fully computed partner ledger.
#[derive(Debug, Clone)]
pub struct LedgerReport {
    /// Partner the ledger belongs to.
    pub partner: Partner,
    /// The applied filter.
    pub filter: LedgerFilter,
    /// Display format for dates.
    pub date_format: DateFormat,
    /// Balance brought forward; present only when the period has a start.
    pub opening_balance: Option<Decimal>,
    /// Groups in ascending key order.
    pub groups: Vec<ReportGroup>,
    /// Sum of debits in the period.
    pub total_debit: Decimal,
    /// Sum of credits in the period.
    pub total_credit: Decimal,
    /// Balance after the last entry.
    pub closing_balance: Decimal,
    /// Number of entries in the period.
    pub entry_count: usize,
}

impl LedgerReport {
    /// Returns true when group header rows should be rendered.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.filter.group_by != GroupBy::None
    }

    /// Iterates all rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Renders a date of this report in the user's format.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        self.date_format.format(date)
    }
}

