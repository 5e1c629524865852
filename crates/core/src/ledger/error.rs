//! Ledger error types.

use portal_ledger_shared::AppError;
use portal_ledger_shared::types::{LedgerEntryId, PartnerId};
use thiserror::Error;

/// Errors that can occur while building a ledger report.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The session's partner does not exist in the store.
    #[error("Partner not found: {0}")]
    PartnerNotFound(PartnerId),

    /// The entry does not exist or is not visible to the partner.
    #[error("Ledger entry not found: {0}")]
    EntryNotFound(LedgerEntryId),

    /// The ledger store failed.
    #[error("Ledger store error: {0}")]
    Store(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::PartnerNotFound(_) => Self::Forbidden(err.to_string()),
            LedgerError::EntryNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::Store(msg) => Self::Database(msg),
        }
    }
}
