//! Portal home counters.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use portal_ledger_core::portal::{parse_counter_names, prepare_counters};
use serde::Deserialize;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the counter routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/my/counters", get(get_counters))
}

/// Query parameters for the counters endpoint.
#[derive(Debug, Deserialize)]
pub struct CountersQuery {
    /// Comma separated counter names.
    #[serde(default)]
    pub counters: String,
}

/// GET /my/counters
async fn get_counters(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CountersQuery>,
) -> Result<Json<BTreeMap<String, u64>>, ApiError> {
    let names = parse_counter_names(&query.counters);
    let values = prepare_counters(state.store.as_ref(), auth.partner_id(), &names).await?;
    Ok(Json(values))
}
