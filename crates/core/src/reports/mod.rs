//! Partner ledger reports.
//!
//! This module turns store entries into the report every renderer consumes:
//! - Running balances from an opening balance
//! - Period grouping
//! - Period totals and closing balance
//! - Transaction detail lookup

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
