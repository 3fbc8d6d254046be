//! Search routes — coastal cities and the hazard catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::{ErrorResponse, error_body};
use crate::services::directory::{self, CoastalCity, HazardInfo};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// City profile plus the live count of reports filed nearby.
#[derive(Debug, Serialize)]
pub struct CitySearchResult {
    #[serde(flatten)]
    pub city: CoastalCity,
    pub recent_reports: usize,
}

async fn with_report_counts(state: &AppState, cities: Vec<CoastalCity>) -> Vec<CitySearchResult> {
    let mut out = Vec::with_capacity(cities.len());
    for city in cities {
        let recent_reports = directory::city_recent_reports(state, &city).await;
        out.push(CitySearchResult { city, recent_reports });
    }
    out
}

/// `GET /api/search/cities` — match on name or state; empty query lists all.
pub async fn cities(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<CitySearchResult>> {
    Json(with_report_counts(&state, directory::search_cities(&query.q)).await)
}

/// `GET /api/search/hazards` — hazard catalog entries matching the query.
pub async fn hazards(Query(query): Query<SearchQuery>) -> Json<Vec<HazardInfo>> {
    Json(directory::search_hazards(&query.q))
}

/// `GET /api/cities/:id` — one city profile with its recent-report count.
pub async fn city_detail(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<CitySearchResult>, ErrorResponse> {
    let city = directory::coastal_cities()
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "city not found"))?;
    let recent_reports = directory::city_recent_reports(&state, &city).await;
    Ok(Json(CitySearchResult { city, recent_reports }))
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
