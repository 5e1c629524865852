//! Export error types.

use portal_ledger_shared::AppError;
use thiserror::Error;

/// Errors that can occur while encoding a ledger export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet encoding failed.
    #[error("Spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF encoding failed.
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// Flushing the output buffer failed.
    #[error("Export buffer error: {0}")]
    Buffer(String),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::Render(err.to_string())
    }
}
