use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use farefinder_core::Airport;

use crate::state::AppState;

pub const SEARCH_PATH: &str = "/api/airports/search/";

#[derive(Debug, Deserialize)]
pub struct AirportSearchQuery {
    #[serde(default)]
    pub q: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(SEARCH_PATH, get(search_airports))
}

/// GET /api/airports/search/?q=
/// Substring match on city, name, or code. A blank `q` returns `[]`.
async fn search_airports(
    State(state): State<AppState>,
    Query(query): Query<AirportSearchQuery>,
) -> Json<Vec<Airport>> {
    let airports = state.catalog.search_airports(&query.q, state.limits.suggestion_limit);
    tracing::debug!("Airport search {:?} matched {}", query.q, airports.len());
    Json(airports)
}
