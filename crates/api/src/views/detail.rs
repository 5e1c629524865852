//! Entry detail view model.

use portal_ledger_core::export::format_amount;
use portal_ledger_core::ledger::TransactionDetail;
use portal_ledger_shared::types::DateFormat;
use serde::Serialize;

/// Shown when a move has no external reference.
const NO_REFERENCE: &str = "\u{2014}";

/// A line of the detail table.
#[derive(Debug, Serialize)]
pub struct DetailLineView {
    account: String,
    label: String,
    debit: String,
    credit: String,
}

/// Everything the detail fragment renders.
#[derive(Debug, Serialize)]
pub struct DetailView {
    name: String,
    date: String,
    journal: String,
    reference: String,
    lines: Vec<DetailLineView>,
    total_debit: String,
    total_credit: String,
}

impl DetailView {
    /// Builds the view from a transaction.
    #[must_use]
    pub fn new(detail: &TransactionDetail, date_format: &DateFormat) -> Self {
        Self {
            name: detail.name.clone(),
            date: date_format.format(detail.date),
            journal: detail.journal.clone(),
            reference: detail
                .reference
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| NO_REFERENCE.to_string()),
            lines: detail
                .lines
                .iter()
                .map(|l| DetailLineView {
                    account: l.account_name.clone(),
                    label: l.label.clone().unwrap_or_default(),
                    debit: format_amount(l.debit),
                    credit: format_amount(l.credit),
                })
                .collect(),
            total_debit: format_amount(detail.total_debit()),
            total_credit: format_amount(detail.total_credit()),
        }
    }
}
