//! Ledger page view model.

use portal_ledger_core::export::{ExportFormat, format_amount};
use portal_ledger_core::ledger::GroupBy;
use portal_ledger_core::reports::{LedgerReport, ReportRow};
use serde::Serialize;
use tracing::warn;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Current filter values echoed back into the form. Dropped dates echo empty.
#[derive(Debug, Serialize)]
pub struct FilterFormView {
    date_from: String,
    date_to: String,
    search_term: String,
}

/// An option of the group-by select.
#[derive(Debug, Serialize)]
pub struct GroupOptionView {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

/// An export menu link.
#[derive(Debug, Serialize)]
pub struct ExportLinkView {
    label: &'static str,
    href: String,
}

/// A table row.
#[derive(Debug, Serialize)]
pub struct RowView {
    id: String,
    date: String,
    move_reference: String,
    label: String,
    debit: String,
    credit: String,
    balance: String,
}

/// A group of table rows.
#[derive(Debug, Serialize)]
pub struct GroupView {
    label: String,
    rows: Vec<RowView>,
}

/// Everything the ledger template renders.
#[derive(Debug, Serialize)]
pub struct LedgerPageView {
    partner_name: String,
    csrf_token: String,
    filter: FilterFormView,
    group_options: Vec<GroupOptionView>,
    export_links: Vec<ExportLinkView>,
    grouped: bool,
    opening_balance: Option<String>,
    groups: Vec<GroupView>,
    entry_count: usize,
    total_debit: String,
    total_credit: String,
    closing_balance: String,
}

impl LedgerPageView {
    /// Builds the view from a report.
    #[must_use]
    pub fn new(report: &LedgerReport, csrf_token: &str) -> Self {
        let filter = &report.filter;

        Self {
            partner_name: report.partner.name.clone(),
            csrf_token: csrf_token.to_string(),
            filter: FilterFormView {
                date_from: filter
                    .date_from
                    .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                    .unwrap_or_default(),
                date_to: filter
                    .date_to
                    .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                    .unwrap_or_default(),
                search_term: filter.search_term.clone().unwrap_or_default(),
            },
            group_options: GroupBy::ALL
                .iter()
                .map(|g| GroupOptionView {
                    value: g.as_str(),
                    label: g.label(),
                    selected: *g == filter.group_by,
                })
                .collect(),
            export_links: export_links(report),
            grouped: report.is_grouped(),
            opening_balance: report.opening_balance.map(format_amount),
            groups: report
                .groups
                .iter()
                .map(|group| GroupView {
                    label: group.label.clone(),
                    rows: group.items.iter().map(|row| row_view(report, row)).collect(),
                })
                .collect(),
            entry_count: report.entry_count,
            total_debit: format_amount(report.total_debit),
            total_credit: format_amount(report.total_credit),
            closing_balance: format_amount(report.closing_balance),
        }
    }
}

fn row_view(report: &LedgerReport, row: &ReportRow) -> RowView {
    RowView {
        id: row.entry.id.to_string(),
        date: report.format_date(row.entry.date),
        move_reference: row.entry.move_reference.clone(),
        label: row.entry.label_or_empty().to_string(),
        debit: format_amount(row.entry.debit),
        credit: format_amount(row.entry.credit),
        balance: format_amount(row.running_balance),
    }
}

/// Export links carrying the applied filter as a URL-encoded query.
fn export_links(report: &LedgerReport) -> Vec<ExportLinkView> {
    let query = serde_urlencoded::to_string(report.filter.to_params()).unwrap_or_else(|e| {
        warn!(error = %e, "Could not encode export query");
        String::new()
    });

    [
        ("CSV", ExportFormat::Csv),
        ("Excel", ExportFormat::Xlsx),
        ("PDF", ExportFormat::Pdf),
    ]
    .into_iter()
    .map(|(label, format)| ExportLinkView {
        label,
        href: format!("/my/ledger/export/{}?{query}", format.extension()),
    })
    .collect()
}
