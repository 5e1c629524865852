//! CSV export.

use super::{
    ExportError, HEADERS, OPENING_BALANCE_LABEL, SheetRow, entry_cells, format_amount,
    group_heading, sheet_rows,
};
use crate::reports::LedgerReport;

/// Encodes a report as CSV.
///
/// Group rows carry a single field, so the writer runs in flexible mode.
///
/// # Errors
///
/// Returns `ExportError::Csv` if a record cannot be written.
pub fn write_csv(report: &LedgerReport) -> Result<Vec<u8>, ExportError> {
    let mut writer = ::csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for row in sheet_rows(report) {
        match row {
            SheetRow::Opening(amount) => {
                let balance = format_amount(amount);
                writer.write_record([OPENING_BALANCE_LABEL, "", "", "", "", &balance])?;
            }
            SheetRow::Group(label) => writer.write_record([group_heading(label)])?,
            SheetRow::Entry(entry) => writer.write_record(entry_cells(report, entry))?,
        }
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}
