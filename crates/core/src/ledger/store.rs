//! Ledger store abstraction.
//!
//! The report builder never talks to a database directly. The host's
//! accounting store is reached through this trait; `portal-ledger-db`
//! implements it on PostgreSQL and [`super::memory::InMemoryLedgerStore`]
//! implements it for tests and demos.

use async_trait::async_trait;
use portal_ledger_shared::types::{LedgerEntryId, PartnerId};
use rust_decimal::Decimal;

use super::entry::{LedgerEntry, Partner, TransactionDetail};
use super::error::LedgerError;
use super::filter::{LedgerFilter, OpeningScope};

/// Read-only access to partner ledger data.
///
/// Every method scopes its results to one partner and to receivable/payable
/// accounts.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Looks up a partner.
    async fn find_partner(&self, partner_id: PartnerId) -> Result<Option<Partner>, LedgerError>;

    /// Looks up the strftime date pattern of a language.
    async fn date_format(&self, lang: &str) -> Result<Option<String>, LedgerError>;

    /// Returns the entries matching a filter in ascending (date, id) order.
    async fn search_entries(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>, LedgerError>;

    /// Sums `debit - credit` over the entries of a scope.
    async fn opening_balance(&self, scope: OpeningScope<'_>) -> Result<Decimal, LedgerError>;

    /// Counts all ledger entries of a partner.
    async fn count_entries(&self, partner_id: PartnerId) -> Result<u64, LedgerError>;

    /// Loads the move owning an entry, if the entry is on the partner's ledger.
    async fn find_transaction(
        &self,
        partner_id: PartnerId,
        entry_id: LedgerEntryId,
    ) -> Result<Option<TransactionDetail>, LedgerError>;
}
