//! Spreadsheet export.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::{
    ExportError, HEADERS, OPENING_BALANCE_LABEL, SHEET_TITLE, SheetRow, group_heading, sheet_rows,
};
use crate::reports::{LedgerReport, ReportRow};

/// Column widths in character units.
const COLUMN_WIDTHS: [f64; 6] = [12.0, 18.0, 40.0, 12.0, 12.0, 14.0];

const AMOUNT_FORMAT: &str = "0.00";

/// Encodes a report as an XLSX workbook with a single worksheet.
///
/// # Errors
///
/// Returns `ExportError::Xlsx` if the workbook cannot be written.
pub fn write_xlsx(report: &LedgerReport) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_TITLE)?;

    let bold = Format::new().set_bold();
    let amount = Format::new().set_num_format(AMOUNT_FORMAT);

    for (col, (header, width)) in (0u16..).zip(HEADERS.iter().zip(COLUMN_WIDTHS)) {
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, width)?;
    }

    for (row, sheet_row) in (1u32..).zip(sheet_rows(report)) {
        match sheet_row {
            SheetRow::Opening(opening) => {
                sheet.write_string(row, 0, OPENING_BALANCE_LABEL)?;
                write_amount(sheet, row, 5, opening, &amount)?;
            }
            SheetRow::Group(label) => {
                sheet.write_string_with_format(row, 0, group_heading(label), &bold)?;
            }
            SheetRow::Entry(entry) => write_entry(sheet, row, report, entry, &amount)?,
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_entry(
    sheet: &mut Worksheet,
    row: u32,
    report: &LedgerReport,
    entry: &ReportRow,
    amount: &Format,
) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, report.format_date(entry.entry.date))?;
    sheet.write_string(row, 1, &entry.entry.move_reference)?;
    sheet.write_string(row, 2, entry.entry.label_or_empty())?;
    write_amount(sheet, row, 3, entry.entry.debit, amount)?;
    write_amount(sheet, row, 4, entry.entry.credit, amount)?;
    write_amount(sheet, row, 5, entry.running_balance, amount)?;
    Ok(())
}

// Cells store IEEE doubles; the displayed value is rounded by the format.
fn write_amount(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Decimal,
    format: &Format,
) -> Result<(), XlsxError> {
    let number = value.round_dp(2).to_f64().unwrap_or_default();
    sheet.write_number_with_format(row, col, number, format)?;
    Ok(())
}
