//! Portal home counters.
//!
//! The host dashboard asks for a set of named counters and shows whichever
//! ones come back. This crate contributes `ledger_count`.

use std::collections::BTreeMap;

use portal_ledger_shared::types::PartnerId;
use tracing::debug;

use crate::ledger::{LedgerError, LedgerStore};

/// Number of entries on the partner's ledger.
pub const LEDGER_COUNT: &str = "ledger_count";

/// Splits a comma separated counter list, dropping blanks.
#[must_use]
pub fn parse_counter_names(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Computes the requested counters this crate knows about.
///
/// Unknown names are ignored.
///
/// # Errors
///
/// Returns `LedgerError::Store` if a count query fails.
pub async fn prepare_counters(
    store: &dyn LedgerStore,
    partner_id: PartnerId,
    requested: &[&str],
) -> Result<BTreeMap<String, u64>, LedgerError> {
    let mut values = BTreeMap::new();

    for name in requested {
        match *name {
            LEDGER_COUNT if !values.contains_key(LEDGER_COUNT) => {
                let count = store.count_entries(partner_id).await?;
                values.insert(LEDGER_COUNT.to_string(), count);
            }
            LEDGER_COUNT => {}
            other => debug!(counter = other, "Ignoring unknown portal counter"),
        }
    }

    Ok(values)
}
