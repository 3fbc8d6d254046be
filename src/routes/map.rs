//! Map routes — report markers, provider config, nearby-alert checks.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{ErrorResponse, error_body};
use crate::services::geo;
use crate::state::{AppState, HazardReport, HazardType, Severity};

/// Alerts fire for reports within this distance unless the caller
/// overrides the radius.
const DEFAULT_ALERT_RADIUS_KM: f64 = 50.0;

/// A report pin on the map. Only reports with a parsed coordinate pair
/// become markers; free-text locations stay off the map.
#[derive(Debug, Serialize)]
pub struct MapMarker {
    pub id: Uuid,
    pub hazard_type: HazardType,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Severity,
    pub description: String,
}

fn marker(report: &HazardReport) -> Option<MapMarker> {
    Some(MapMarker {
        id: report.id,
        hazard_type: report.hazard_type,
        latitude: report.latitude?,
        longitude: report.longitude?,
        severity: report.severity,
        description: report.description.clone(),
    })
}

/// `GET /api/map/markers` — every located report as a map pin.
pub async fn markers(State(state): State<AppState>) -> Json<Vec<MapMarker>> {
    let reports = state.reports.read().await;
    Json(reports.iter().filter_map(marker).collect())
}

/// `GET /api/map/config` — provider and credential for the client
/// renderer. 404 when no provider is configured (map view disabled).
pub async fn config(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let map = state
        .map
        .as_ref()
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "map provider not configured"))?;
    Ok(Json(serde_json::json!({
        "provider": map.provider,
        "credential": map.credential,
    })))
}

#[derive(Deserialize)]
pub struct AlertQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub has_alerts: bool,
    pub reports: Vec<HazardReport>,
}

/// `GET /api/alerts` — reports near the caller's position.
pub async fn nearby_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<AlertResponse>, ErrorResponse> {
    geo::validate_fix(query.latitude, query.longitude)
        .map_err(|e| error_body(StatusCode::UNPROCESSABLE_ENTITY, e))?;
    let radius_km = query.radius_km.unwrap_or(DEFAULT_ALERT_RADIUS_KM);

    let reports = state.reports.read().await;
    let nearby: Vec<_> = reports
        .iter()
        .filter(|r| {
            r.latitude.zip(r.longitude).is_some_and(|coords| {
                geo::haversine_km(coords, (query.latitude, query.longitude)) <= radius_km
            })
        })
        .cloned()
        .collect();

    Ok(Json(AlertResponse { has_alerts: !nearby.is_empty(), reports: nearby }))
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
