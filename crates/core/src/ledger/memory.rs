//! In-memory ledger store.
//!
//! Holds moves and their lines in a `Vec`, applying filters the same way the
//! SQL store does. Used by tests and local demos.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use portal_ledger_shared::types::{LedgerEntryId, MoveId, PartnerId};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::entry::{AccountType, LedgerEntry, Partner, TransactionDetail, TransactionLine};
use super::error::LedgerError;
use super::filter::{LedgerFilter, OpeningScope};
use super::store::LedgerStore;

/// A line to be posted with a [`MoveRecord`].
#[derive(Debug, Clone)]
pub struct LineRecord {
    /// Partner on the line, if any.
    pub partner_id: Option<PartnerId>,
    /// Account display name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Line label.
    pub label: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

impl LineRecord {
    /// A receivable line for a partner.
    #[must_use]
    pub fn receivable(partner_id: PartnerId, debit: Decimal, credit: Decimal) -> Self {
        Self {
            partner_id: Some(partner_id),
            account_name: "Account Receivable".to_string(),
            account_type: AccountType::Receivable,
            label: None,
            debit,
            credit,
        }
    }

    /// A payable line for a partner.
    #[must_use]
    pub fn payable(partner_id: PartnerId, debit: Decimal, credit: Decimal) -> Self {
        Self {
            partner_id: Some(partner_id),
            account_name: "Account Payable".to_string(),
            account_type: AccountType::Payable,
            label: None,
            debit,
            credit,
        }
    }

    /// A counterpart line on a non-ledger account.
    #[must_use]
    pub fn other(account_name: &str, debit: Decimal, credit: Decimal) -> Self {
        Self {
            partner_id: None,
            account_name: account_name.to_string(),
            account_type: AccountType::Other,
            label: None,
            debit,
            credit,
        }
    }

    /// Sets the line label.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// A move to be loaded into the store.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    /// Move name.
    pub name: String,
    /// Accounting date.
    pub date: NaiveDate,
    /// Journal display name.
    pub journal: String,
    /// External reference.
    pub reference: Option<String>,
    /// Lines in posting order.
    pub lines: Vec<LineRecord>,
}

impl MoveRecord {
    /// Creates a move without lines.
    #[must_use]
    pub fn new(name: &str, date: NaiveDate, journal: &str) -> Self {
        Self {
            name: name.to_string(),
            date,
            journal: journal.to_string(),
            reference: None,
            lines: Vec::new(),
        }
    }

    /// Sets the external reference.
    #[must_use]
    pub fn reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }

    /// Appends a line.
    #[must_use]
    pub fn line(mut self, line: LineRecord) -> Self {
        self.lines.push(line);
        self
    }
}

#[derive(Debug, Clone)]
struct StoredLine {
    id: LedgerEntryId,
    record: LineRecord,
}

#[derive(Debug, Clone)]
struct StoredMove {
    id: MoveId,
    record: MoveRecord,
    lines: Vec<StoredLine>,
}

impl StoredMove {
    fn entry(&self, line: &StoredLine) -> LedgerEntry {
        LedgerEntry {
            id: line.id,
            move_id: self.id,
            date: self.record.date,
            move_reference: self.record.name.clone(),
            label: line.record.label.clone(),
            debit: line.record.debit,
            credit: line.record.credit,
            // Mirrors the host, where a line's stored balance is its own net.
            balance: line.record.debit - line.record.credit,
        }
    }

    fn detail(&self) -> TransactionDetail {
        TransactionDetail {
            move_id: self.id,
            name: self.record.name.clone(),
            date: self.record.date,
            journal: self.record.journal.clone(),
            reference: self.record.reference.clone(),
            lines: self
                .lines
                .iter()
                .map(|l| TransactionLine {
                    account_name: l.record.account_name.clone(),
                    label: l.record.label.clone(),
                    debit: l.record.debit,
                    credit: l.record.credit,
                })
                .collect(),
        }
    }
}

/// Ledger store backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    partners: HashMap<PartnerId, Partner>,
    languages: HashMap<String, String>,
    moves: Vec<StoredMove>,
    next_id: u128,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a partner.
    #[must_use]
    pub fn with_partner(mut self, partner: Partner) -> Self {
        self.partners.insert(partner.id, partner);
        self
    }

    /// Registers a language date format.
    #[must_use]
    pub fn with_language(mut self, code: &str, date_format: &str) -> Self {
        self.languages
            .insert(code.to_string(), date_format.to_string());
        self
    }

    /// Posts a move.
    #[must_use]
    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.post(record);
        self
    }

    /// Posts a move and returns the IDs assigned to its lines.
    pub fn post(&mut self, record: MoveRecord) -> Vec<LedgerEntryId> {
        let move_id = MoveId::from_uuid(self.allocate_id());
        let lines: Vec<StoredLine> = record
            .lines
            .iter()
            .map(|line| StoredLine {
                id: LedgerEntryId::from_uuid(self.allocate_id()),
                record: line.clone(),
            })
            .collect();
        let ids = lines.iter().map(|l| l.id).collect();
        self.moves.push(StoredMove {
            id: move_id,
            record,
            lines,
        });
        ids
    }

    // Sequential ids keep same-day entries in posting order.
    fn allocate_id(&mut self) -> Uuid {
        self.next_id += 1;
        Uuid::from_u128(self.next_id)
    }

    fn ledger_lines(&self) -> impl Iterator<Item = (PartnerId, AccountType, LedgerEntry)> + '_ {
        self.moves.iter().flat_map(|mv| {
            mv.lines.iter().filter_map(move |line| {
                line.record
                    .partner_id
                    .map(|partner| (partner, line.record.account_type, mv.entry(line)))
            })
        })
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn find_partner(&self, partner_id: PartnerId) -> Result<Option<Partner>, LedgerError> {
        Ok(self.partners.get(&partner_id).cloned())
    }

    async fn date_format(&self, lang: &str) -> Result<Option<String>, LedgerError> {
        Ok(self.languages.get(lang).cloned())
    }

    async fn search_entries(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut entries: Vec<LedgerEntry> = self
            .ledger_lines()
            .filter(|(partner, account_type, entry)| filter.matches(*partner, *account_type, entry))
            .map(|(_, _, entry)| entry)
            .collect();
        entries.sort_by_key(|e| (e.date, e.id));
        Ok(entries)
    }

    async fn opening_balance(&self, scope: OpeningScope<'_>) -> Result<Decimal, LedgerError> {
        Ok(self
            .ledger_lines()
            .filter(|(partner, account_type, entry)| scope.matches(*partner, *account_type, entry))
            .map(|(_, _, entry)| entry.net())
            .sum())
    }

    async fn count_entries(&self, partner_id: PartnerId) -> Result<u64, LedgerError> {
        let filter = LedgerFilter::for_partner(partner_id);
        let count = self
            .ledger_lines()
            .filter(|(partner, account_type, entry)| filter.matches(*partner, *account_type, entry))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_transaction(
        &self,
        partner_id: PartnerId,
        entry_id: LedgerEntryId,
    ) -> Result<Option<TransactionDetail>, LedgerError> {
        Ok(self
            .moves
            .iter()
            .find(|mv| {
                mv.lines.iter().any(|line| {
                    line.id == entry_id
                        && line.record.partner_id == Some(partner_id)
                        && line.record.account_type.is_partner_ledger()
                })
            })
            .map(StoredMove::detail))
    }
}
