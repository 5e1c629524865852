//! Core ledger logic for the partner portal.
//!
//! This crate contains pure ledger logic with no web or database dependencies.
//! The database is reached only through the [`ledger::LedgerStore`] trait.
//!
//! # Modules
//!
//! - `ledger` - Entries, filter resolution, grouping and balances
//! - `reports` - Report assembly and transaction detail lookup
//! - `export` - CSV, spreadsheet and PDF encoders
//! - `portal` - Portal home counters

pub mod export;
pub mod ledger;
pub mod portal;
pub mod reports;
