//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use portal_ledger_core::ledger::LedgerError;
use portal_ledger_core::reports::ReportContext;
use portal_ledger_shared::types::{DateFormat, PartnerId};
use portal_ledger_shared::{AppError, Claims};
use tracing::{debug, warn};

use crate::AppState;
use crate::error::PageError;

/// Everything a portal handler needs to know about the caller.
///
/// Built once per request from the session claims: the partner record, the
/// date format of the user's language and the CSRF token for any forms the
/// response renders.
#[derive(Debug, Clone)]
pub struct PortalContext {
    /// Validated session claims.
    pub claims: Claims,
    /// Partner and date format for the report builder.
    pub report: ReportContext,
    /// CSRF token bound to this session.
    pub csrf_token: String,
}

impl PortalContext {
    /// Returns the partner the session is scoped to.
    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        self.report.partner.id
    }
}

/// Resolves the user's date format.
///
/// The language table wins; an unknown language or an unusable pattern falls
/// back to the configured default, then to ISO.
async fn resolve_date_format(state: &AppState, lang: &str) -> Result<DateFormat, LedgerError> {
    if let Some(pattern) = state.store.date_format(lang).await? {
        if let Some(format) = DateFormat::parse(&pattern) {
            return Ok(format);
        }
        warn!(lang, pattern = %pattern, "Ignoring unusable language date format");
    }

    debug!(lang, "Using default date format");
    Ok(DateFormat::parse_or_iso(&state.portal.default_date_format))
}

impl FromRequestParts<AppState> for PortalContext {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

        let partner_id = claims.partner_id();
        let partner = state
            .store
            .find_partner(partner_id)
            .await?
            .ok_or(LedgerError::PartnerNotFound(partner_id))?;

        let lang = claims
            .lang()
            .unwrap_or(&state.portal.default_lang)
            .to_string();
        let date_format = resolve_date_format(state, &lang).await?;
        let csrf_token = state.csrf_service.issue(&claims);

        Ok(Self {
            claims,
            report: ReportContext {
                partner,
                date_format,
            },
            csrf_token,
        })
    }
}
