//! Route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::{auth_middleware, csrf_header_middleware},
};

pub mod counters;
pub mod health;
pub mod ledger;

/// Creates the router with public and session-protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn portal_routes_with_state(state: AppState) -> Router<AppState> {
    // Detail is fetched from script; its CSRF token travels in a header
    let detail_routes = ledger::detail_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        csrf_header_middleware,
    ));

    let protected_routes = Router::new()
        .merge(ledger::routes())
        .merge(detail_routes)
        .merge(counters::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
