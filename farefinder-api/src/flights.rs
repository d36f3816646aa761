use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use farefinder_catalog::FlightQuery;
use farefinder_core::{FlightResult, ListingPage};

use crate::error::AppError;
use crate::state::AppState;

pub const SEARCH_PATH: &str = "/api/flights/search/";
pub const LIST_PATH: &str = "/api/flights/";

#[derive(Debug, Deserialize)]
pub struct FlightSearchParams {
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub date: Option<String>,
    pub passengers: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(SEARCH_PATH, get(search_flights))
        .route(LIST_PATH, get(list_flights))
}

/// GET /api/flights/search/?departure=&arrival=&date=&passengers=
async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<FlightSearchParams>,
) -> Result<Json<Vec<FlightResult>>, AppError> {
    let query = FlightQuery::parse(
        params.departure.as_deref(),
        params.arrival.as_deref(),
        params.date.as_deref(),
        params.passengers,
    )?;

    let flights = state.catalog.search_flights(&query);
    tracing::info!(
        "Flight search {} -> {} on {} for {}: {} result(s)",
        query.departure,
        query.arrival,
        query.date,
        query.passengers,
        flights.len()
    );
    Ok(Json(flights))
}

/// GET /api/flights/?page=
async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListingPage<FlightResult>>, AppError> {
    let page = state
        .catalog
        .list_flights(params.page.unwrap_or(1), state.limits.page_size)?;
    Ok(Json(page))
}
