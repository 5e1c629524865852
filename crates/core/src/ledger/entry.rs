//! Ledger entry domain types.
//!
//! These are read-only projections of records owned by the ledger store.

use chrono::NaiveDate;
use portal_ledger_shared::types::{LedgerEntryId, MoveId, PartnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account classification, as far as the partner ledger cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Trade receivable.
    Receivable,
    /// Trade payable.
    Payable,
    /// Anything else (bank, income, expense, tax...).
    Other,
}

impl AccountType {
    /// Returns true for accounts that appear on a partner ledger.
    #[must_use]
    pub const fn is_partner_ledger(self) -> bool {
        matches!(self, Self::Receivable | Self::Payable)
    }
}

/// A customer or vendor the ledger is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Partner ID.
    pub id: PartnerId,
    /// Display name.
    pub name: String,
}

/// One debit/credit line on a partner's receivable or payable account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID, used to fetch the transaction detail.
    pub id: LedgerEntryId,
    /// Parent move.
    pub move_id: MoveId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Name of the parent move (e.g. `INV/2024/0001`).
    pub move_reference: String,
    /// Line label.
    pub label: Option<String>,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Balance as stored by the ledger store. Not used for rendering.
    pub balance: Decimal,
}

impl LedgerEntry {
    /// Returns `debit - credit`.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns the label, or an empty string.
    #[must_use]
    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }
}

/// A line item of a posted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    /// Account display name.
    pub account_name: String,
    /// Line label.
    pub label: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// A posted move with its full line breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    /// Move ID.
    pub move_id: MoveId,
    /// Move name.
    pub name: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Journal display name.
    pub journal: String,
    /// External reference (vendor bill number, payment memo...).
    pub reference: Option<String>,
    /// Line items in posting order.
    pub lines: Vec<TransactionLine>,
}

impl TransactionDetail {
    /// Sum of line debits.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of line credits.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }
}
