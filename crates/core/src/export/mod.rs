//! Ledger exports.
//!
//! CSV, spreadsheet and PDF encoders all read the same flattened row list
//! produced by [`sheet_rows`], so the three files list exactly the rows the
//! interactive table shows.

pub mod csv;
pub mod error;
pub mod pdf;
pub mod xlsx;


use rust_decimal::Decimal;
use tracing::info;

use crate::reports::{LedgerReport, ReportRow};

pub use error::ExportError;

/// Column headers shared by every export.
pub const HEADERS: [&str; 6] = ["Date", "Move", "Description", "Debit", "Credit", "Balance"];

/// Label of the opening balance row.
pub const OPENING_BALANCE_LABEL: &str = "Opening Balance";

/// Worksheet name and document title stem.
pub const SHEET_TITLE: &str = "Customer Ledger";

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma separated values.
    Csv,
    /// Office Open XML spreadsheet.
    Xlsx,
    /// Portable document.
    Pdf,
}

impl ExportFormat {
    /// Parses the route segment of an export URL.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Returns the file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// Returns the `Content-Type` of the encoded file.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    /// Returns the attachment file name.
    #[must_use]
    pub fn filename(self) -> String {
        format!("customer_ledger.{}", self.extension())
    }

    /// Returns the `Content-Disposition` header value.
    #[must_use]
    pub fn content_disposition(self) -> String {
        format!("attachment; filename=\"{}\"", self.filename())
    }
}

/// One body row of an export, after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetRow<'a> {
    /// Balance brought forward.
    Opening(Decimal),
    /// Group header carrying the group label.
    Group(&'a str),
    /// A ledger entry with its running balance.
    Entry(&'a ReportRow),
}

/// Flattens a report into export body rows in display order.
#[must_use]
pub fn sheet_rows(report: &LedgerReport) -> Vec<SheetRow<'_>> {
    let mut rows = Vec::with_capacity(report.entry_count + report.groups.len() + 1);

    if let Some(opening) = report.opening_balance {
        rows.push(SheetRow::Opening(opening));
    }
    for group in &report.groups {
        if report.is_grouped() {
            rows.push(SheetRow::Group(&group.label));
        }
        rows.extend(group.items.iter().map(SheetRow::Entry));
    }

    rows
}

/// Formats an amount with two decimals.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Returns the text of a group header row.
#[must_use]
pub fn group_heading(label: &str) -> String {
    format!("Group: {label}")
}

/// Returns the cell texts of an entry row.
#[must_use]
pub fn entry_cells(report: &LedgerReport, row: &ReportRow) -> [String; 6] {
    [
        report.format_date(row.entry.date),
        row.entry.move_reference.clone(),
        row.entry.label_or_empty().to_string(),
        format_amount(row.entry.debit),
        format_amount(row.entry.credit),
        format_amount(row.running_balance),
    ]
}

/// Encodes a report in the requested format.
///
/// # Errors
///
/// Returns `ExportError` if the encoder fails.
pub fn export(report: &LedgerReport, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => csv::write_csv(report)?,
        ExportFormat::Xlsx => xlsx::write_xlsx(report)?,
        ExportFormat::Pdf => pdf::write_pdf(report)?,
    };

    info!(
        partner_id = %report.partner.id,
        format = format.extension(),
        entries = report.entry_count,
        bytes = bytes.len(),
        "Ledger exported"
    );

    Ok(bytes)
}
