//! Error responses.
//!
//! Handlers return [`ApiError`] on JSON routes and [`PageError`] on routes
//! that answer with HTML. Both log server errors and hide their details from
//! the client.

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use portal_ledger_core::export::ExportError;
use portal_ledger_core::ledger::LedgerError;
use portal_ledger_shared::{AppError, CsrfError};
use serde_json::json;
use tracing::{error, warn};

/// Fragment returned when a ledger entry cannot be shown.
pub const NOT_FOUND_FRAGMENT: &str =
    r#"<div class="alert alert-warning mb-0">This ledger entry could not be found.</div>"#;

const FORBIDDEN_FRAGMENT: &str =
    r#"<div class="alert alert-danger">You are not allowed to perform this action.</div>"#;

const SERVER_ERROR_FRAGMENT: &str =
    r#"<div class="alert alert-danger">Something went wrong. Please try again later.</div>"#;

fn status_of(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn log_server_error(err: &AppError) {
    if err.is_server_error() {
        error!(error = %err, code = err.error_code(), "Request failed");
    }
}

/// Converts a CSRF failure into a 403.
pub fn csrf_rejection(err: &CsrfError) -> AppError {
    warn!(error = %err, "CSRF validation failed");
    AppError::Forbidden(err.to_string())
}

macro_rules! app_error_wrapper {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug)]
        pub struct $name(pub AppError);

        impl From<AppError> for $name {
            fn from(err: AppError) -> Self {
                Self(err)
            }
        }

        impl From<LedgerError> for $name {
            fn from(err: LedgerError) -> Self {
                Self(err.into())
            }
        }

        impl From<ExportError> for $name {
            fn from(err: ExportError) -> Self {
                Self(err.into())
            }
        }
    };
}

app_error_wrapper!(ApiError, "Error answered with a JSON body.");
app_error_wrapper!(PageError, "Error answered with an HTML fragment.");

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_server_error(&self.0);
        let status = status_of(&self.0);
        let message = if self.0.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code().to_lowercase(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        log_server_error(&self.0);
        let status = status_of(&self.0);
        let body = match &self.0 {
            AppError::NotFound(_) => NOT_FOUND_FRAGMENT,
            AppError::Unauthorized(_) => {
                r#"<div class="alert alert-danger">Please sign in to view your ledger.</div>"#
            }
            AppError::Forbidden(_) => FORBIDDEN_FRAGMENT,
            AppError::Validation(_) => {
                r#"<div class="alert alert-danger">The request could not be processed.</div>"#
            }
            AppError::Database(_) | AppError::Render(_) | AppError::Internal(_) => {
                SERVER_ERROR_FRAGMENT
            }
        };

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_ledger_shared::types::LedgerEntryId;

    #[test]
    fn test_entry_not_found_is_404_fragment() {
        let response =
            PageError::from(LedgerError::EntryNotFound(LedgerEntryId::new())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_failure_is_500() {
        let response = ApiError::from(LedgerError::Store("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_csrf_rejection_is_forbidden() {
        assert_eq!(csrf_rejection(&CsrfError::Missing).status_code(), 403);
    }
}
