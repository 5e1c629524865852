//! Partner ledger routes.
//!
//! The page, the three exports and the detail fragment all build from the
//! same report pipeline: resolve the filter, build the report, render.

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use portal_ledger_core::export::{self, ExportFormat};
use portal_ledger_core::ledger::{FilterParams, LedgerFilter};
use portal_ledger_core::reports::{LedgerReport, ReportService};
use portal_ledger_shared::AppError;
use portal_ledger_shared::types::LedgerEntryId;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    AppState,
    error::{PageError, csrf_rejection},
    extractors::PortalContext,
};

/// Creates the ledger page and export routes (requires auth middleware to be
/// applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/my/ledger", get(show_ledger).post(submit_ledger))
        .route("/my/ledger/export/{format}", get(export_ledger))
}

/// Creates the entry detail route (requires auth and CSRF header middleware
/// to be applied externally).
pub fn detail_routes() -> Router<AppState> {
    Router::new().route("/my/ledger/detail/{entry_id}", get(entry_detail))
}

/// Filter form submission.
#[derive(Debug, Deserialize)]
pub struct LedgerForm {
    /// Filter inputs.
    #[serde(flatten)]
    pub params: FilterParams,
    /// Token rendered into the form.
    pub csrf_token: Option<String>,
}

async fn build_report(
    state: &AppState,
    ctx: &PortalContext,
    params: &FilterParams,
) -> Result<LedgerReport, PageError> {
    let filter = LedgerFilter::resolve(ctx.partner_id(), params);
    Ok(ReportService::build(state.store.as_ref(), &ctx.report, &filter).await?)
}

async fn render_ledger(
    state: &AppState,
    ctx: &PortalContext,
    params: &FilterParams,
) -> Result<Html<String>, PageError> {
    let report = build_report(state, ctx, params).await?;
    let html = state.views.ledger_page(&report, &ctx.csrf_token)?;
    Ok(Html(html))
}

/// GET /my/ledger
async fn show_ledger(
    State(state): State<AppState>,
    ctx: PortalContext,
    Query(params): Query<FilterParams>,
) -> Result<Html<String>, PageError> {
    render_ledger(&state, &ctx, &params).await
}

/// POST /my/ledger
async fn submit_ledger(
    State(state): State<AppState>,
    ctx: PortalContext,
    Form(form): Form<LedgerForm>,
) -> Result<Html<String>, PageError> {
    state
        .csrf_service
        .validate(&ctx.claims, form.csrf_token.as_deref())
        .map_err(|e| csrf_rejection(&e))?;

    render_ledger(&state, &ctx, &form.params).await
}

/// GET /my/ledger/export/{format}
async fn export_ledger(
    State(state): State<AppState>,
    ctx: PortalContext,
    Path(format): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Response, PageError> {
    let format = ExportFormat::from_extension(&format)
        .ok_or_else(|| AppError::NotFound(format!("Unknown export format: {format}")))?;

    let report = build_report(&state, &ctx, &params).await?;
    let bytes = export::export(&report, format)?;

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, format.content_disposition()),
        ],
        bytes,
    )
        .into_response())
}

/// GET /my/ledger/detail/{entry_id}
async fn entry_detail(
    State(state): State<AppState>,
    ctx: PortalContext,
    Path(entry_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let Ok(entry_id) = entry_id.parse::<LedgerEntryId>() else {
        debug!(entry_id = %entry_id, "Malformed ledger entry id");
        return Err(AppError::NotFound(format!("Ledger entry not found: {entry_id}")).into());
    };

    let detail =
        ReportService::transaction_detail(state.store.as_ref(), &ctx.report, entry_id).await?;
    info!(
        partner_id = %ctx.partner_id(),
        entry_id = %entry_id,
        move_name = %detail.name,
        "Ledger entry detail loaded"
    );

    let html = state.views.entry_detail(&detail, &ctx.report.date_format)?;
    Ok(Html(html))
}
