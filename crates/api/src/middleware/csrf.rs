//! CSRF checks for AJAX requests.
//!
//! Form posts carry the token in a `csrf_token` field and are checked by the
//! handler; `fetch` calls send it in a header checked here.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use portal_ledger_shared::{AppError, Claims};

use crate::AppState;
use crate::error::{PageError, csrf_rejection};

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Rejects requests whose `X-CSRF-Token` header does not match the session.
///
/// Must run after [`super::auth_middleware`].
pub async fn csrf_header_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(claims) = request.extensions().get::<Claims>() else {
        return PageError(AppError::Unauthorized("missing session".into())).into_response();
    };
    let supplied = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok());

    if let Err(e) = state.csrf_service.validate(claims, supplied) {
        return PageError(csrf_rejection(&e)).into_response();
    }

    next.run(request).await
}
