//! Partner ledger domain logic.
//!
//! This module implements the read side of a partner's ledger:
//! - Ledger entries and transaction details
//! - Filter resolution
//! - Period grouping
//! - Opening and running balances
//! - The ledger store abstraction and an in-memory store

pub mod balance;
pub mod entry;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod memory;
pub mod store;

pub use balance::{RunningBalance, opening_balance, running_balances};
pub use entry::{AccountType, LedgerEntry, Partner, TransactionDetail, TransactionLine};
pub use error::LedgerError;
pub use filter::{FilterParams, GroupBy, LedgerFilter, OpeningScope};
pub use grouping::{CATCH_ALL_KEY, Group, group_by_period, group_key};
pub use memory::{InMemoryLedgerStore, LineRecord, MoveRecord};
pub use store::LedgerStore;
