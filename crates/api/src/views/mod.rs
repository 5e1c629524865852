//! HTML views.
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Templates named `*.html` auto-escape every interpolated value, and view
//! models carry display-ready strings only.

pub mod detail;
pub mod ledger;

use minijinja::Environment;
use portal_ledger_core::ledger::TransactionDetail;
use portal_ledger_core::reports::LedgerReport;
use portal_ledger_shared::AppError;
use portal_ledger_shared::types::DateFormat;
use serde::Serialize;

pub use detail::DetailView;
pub use ledger::LedgerPageView;

const LEDGER_TEMPLATE: &str = "ledger.html";
const DETAIL_TEMPLATE: &str = "entry_detail.html";

/// Template environment.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns a template error if a built-in template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(LEDGER_TEMPLATE, include_str!("../../templates/ledger.html"))?;
        env.add_template(DETAIL_TEMPLATE, include_str!("../../templates/entry_detail.html"))?;
        Ok(Self { env })
    }

    /// Renders the interactive ledger page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if rendering fails.
    pub fn ledger_page(&self, report: &LedgerReport, csrf_token: &str) -> Result<String, AppError> {
        self.render(LEDGER_TEMPLATE, &LedgerPageView::new(report, csrf_token))
    }

    /// Renders the entry detail fragment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if rendering fails.
    pub fn entry_detail(
        &self,
        detail: &TransactionDetail,
        date_format: &DateFormat,
    ) -> Result<String, AppError> {
        self.render(DETAIL_TEMPLATE, &DetailView::new(detail, date_format))
    }

    fn render<T: Serialize>(&self, name: &str, view: &T) -> Result<String, AppError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(view))
            .map_err(|e| AppError::Render(format!("{name}: {e}")))
    }
}
