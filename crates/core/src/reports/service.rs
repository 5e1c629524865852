//! Ledger report assembly.
//!
//! One report feeds every renderer, so the interactive page and the three
//! exports always agree on entries, order, and balances.

use portal_ledger_shared::types::LedgerEntryId;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::types::{LedgerReport, ReportContext, ReportRow};
use crate::ledger::{
    LedgerEntry, LedgerError, LedgerFilter, LedgerStore, RunningBalance, TransactionDetail,
    group_by_period,
};

/// Builds ledger reports and entry details from a [`LedgerStore`].
pub struct ReportService;

impl ReportService {
    /// Fetches and assembles the report for a filter.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the store fails.
    pub async fn build(
        store: &dyn LedgerStore,
        context: &ReportContext,
        filter: &LedgerFilter,
    ) -> Result<LedgerReport, LedgerError> {
        let entries = store.search_entries(filter).await?;
        info!(
            partner_id = %filter.partner_id,
            count = entries.len(),
            "Ledger entries fetched"
        );

        let opening_balance = match filter.before_period() {
            Some(scope) => Some(store.opening_balance(scope).await?),
            None => None,
        };
        debug!(opening_balance = ?opening_balance, "Opening balance computed");

        Ok(Self::assemble(context, filter.clone(), opening_balance, entries))
    }

    /// Assembles a report from already fetched entries.
    ///
    /// Entries are put in (date, id) order before balances are accumulated,
    /// whatever order the caller supplies.
    #[must_use]
    pub fn assemble(
        context: &ReportContext,
        filter: LedgerFilter,
        opening_balance: Option<Decimal>,
        mut entries: Vec<LedgerEntry>,
    ) -> LedgerReport {
        entries.sort_by_key(|e| (e.date, e.id));

        let mut running = RunningBalance::starting_at(opening_balance.unwrap_or(Decimal::ZERO));
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let entry_count = entries.len();

        let rows: Vec<ReportRow> = entries
            .into_iter()
            .map(|entry| {
                total_debit += entry.debit;
                total_credit += entry.credit;
                let running_balance = running.apply(&entry);
                ReportRow {
                    entry,
                    running_balance,
                }
            })
            .collect();

        let groups = group_by_period(rows, filter.group_by, &context.date_format, |row| {
            row.entry.date
        });

        LedgerReport {
            partner: context.partner.clone(),
            filter,
            date_format: context.date_format.clone(),
            opening_balance,
            groups,
            total_debit,
            total_credit,
            closing_balance: running.current(),
            entry_count,
        }
    }

    /// Loads the move behind an entry of the partner's ledger.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EntryNotFound` if the entry does not exist or is
    /// not on this partner's ledger.
    pub async fn transaction_detail(
        store: &dyn LedgerStore,
        context: &ReportContext,
        entry_id: LedgerEntryId,
    ) -> Result<TransactionDetail, LedgerError> {
        store
            .find_transaction(context.partner.id, entry_id)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))
    }
}
