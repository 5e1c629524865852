//! HTTP layer for the partner ledger portal.
//!
//! This crate provides:
//! - The ledger page, its exports and the entry detail fragment
//! - The portal home counters
//! - Session and CSRF middleware
//! - Template rendering

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod views;

use axum::Router;
use portal_ledger_core::ledger::LedgerStore;
use portal_ledger_shared::config::PortalConfig;
use portal_ledger_shared::{CsrfService, JwtService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::views::Views;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger data source.
    pub store: Arc<dyn LedgerStore>,
    /// JWT service for session tokens.
    pub jwt_service: Arc<JwtService>,
    /// CSRF token issuer and checker.
    pub csrf_service: Arc<CsrfService>,
    /// Compiled templates.
    pub views: Arc<Views>,
    /// Presentation defaults.
    pub portal: Arc<PortalConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::portal_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
