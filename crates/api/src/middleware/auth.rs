//! Authentication middleware for portal routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use portal_ledger_shared::types::PartnerId;
use portal_ledger_shared::{Claims, JwtError};
use serde_json::json;
use tracing::debug;

use crate::AppState;

/// Cookie carrying the session token for browser requests.
pub const SESSION_COOKIE: &str = "session";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Finds the session token: the Authorization header wins over the cookie.
fn session_token(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(ToString::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(request.headers())
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
    })
}

/// Authentication middleware that validates session tokens.
///
/// This middleware:
/// 1. Takes the token from `Authorization: Bearer` or the `session` cookie
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(&request) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "A session token is required"
            })),
        )
            .into_response();
    };

    match state.jwt_service.validate_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            let (error, message) = match e {
                JwtError::Expired => ("token_expired", "Session has expired"),
                _ => ("invalid_token", "Invalid or malformed session token"),
            };

            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response()
        }
    }
}

/// Extractor for authenticated session claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the partner ID from the claims.
    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        self.0.partner_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer from-header")
            .header("cookie", "session=from-cookie")
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_token(&request).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_cookie_fallback() {
        let request = Request::builder()
            .header("cookie", "theme=dark; session=from-cookie")
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_token(&request).as_deref(), Some("from-cookie"));
    }
}
