//! Report routes — the public report log plus the per-user intake draft.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::routes::{ErrorResponse, error_body};
use crate::services::intake::{self, DraftUpdate, IntakeError};
use crate::services::relay::RelayError;
use crate::state::{AppState, HazardReport, HazardType, ReportDraft, Severity};

pub(crate) fn intake_error_status(err: &IntakeError) -> StatusCode {
    match err {
        IntakeError::MissingHazardType
        | IntakeError::MissingLocation
        | IntakeError::MissingDescription
        | IntakeError::Geo(_) => StatusCode::UNPROCESSABLE_ENTITY,
        IntakeError::SubmissionInFlight => StatusCode::CONFLICT,
        IntakeError::Relay(RelayError::Status { .. } | RelayError::Transport(_)) => StatusCode::BAD_GATEWAY,
    }
}

// =============================================================================
// REPORT LOG
// =============================================================================

#[derive(Deserialize)]
pub struct ReportFilter {
    pub hazard_type: Option<HazardType>,
    pub severity: Option<Severity>,
}

/// `GET /api/reports` — list reports, newest first, optionally filtered.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> Json<Vec<HazardReport>> {
    let reports = state.reports.read().await;
    let mut out: Vec<_> = reports
        .iter()
        .filter(|r| filter.hazard_type.is_none_or(|t| r.hazard_type == t))
        .filter(|r| filter.severity.is_none_or(|s| r.severity == s))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
    Json(out)
}

/// `GET /api/reports/:id` — fetch one report.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HazardReport>, ErrorResponse> {
    let reports = state.reports.read().await;
    reports
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "report not found"))
}

#[derive(Deserialize)]
pub struct CreateReportBody {
    pub hazard_type: Option<HazardType>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Vec<String>,
}

/// `POST /api/reports` — one-shot submission bypassing the draft.
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateReportBody>,
) -> Result<(StatusCode, Json<HazardReport>), ErrorResponse> {
    let report = intake::submit_direct(
        &state,
        &auth.user,
        body.hazard_type,
        &body.location,
        &body.description,
        body.media,
    )
    .await
    .map_err(|e| error_body(intake_error_status(&e), e))?;
    Ok((StatusCode::CREATED, Json(report)))
}

// =============================================================================
// INTAKE DRAFT
// =============================================================================

/// `GET /api/draft` — the caller's current draft.
pub async fn get_draft(State(state): State<AppState>, auth: AuthUser) -> Json<ReportDraft> {
    Json(intake::get_draft(&state, auth.user.user_id).await)
}

/// `PATCH /api/draft` — merge a partial edit into the draft. Rejected
/// while a submission is in flight.
pub async fn update_draft(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<DraftUpdate>,
) -> Result<Json<ReportDraft>, ErrorResponse> {
    let draft = intake::update_draft(&state, auth.user.user_id, update)
        .await
        .map_err(|e| error_body(intake_error_status(&e), e))?;
    Ok(Json(draft))
}

#[derive(Deserialize)]
pub struct LocationFixBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// `POST /api/draft/location` — write a geolocation fix into the draft.
/// A missing or invalid fix leaves the location unchanged.
pub async fn capture_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<LocationFixBody>,
) -> Result<Json<ReportDraft>, ErrorResponse> {
    let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) else {
        return Err(error_body(StatusCode::UNPROCESSABLE_ENTITY, "unable to resolve current location"));
    };
    let draft = intake::capture_location(&state, auth.user.user_id, latitude, longitude)
        .await
        .map_err(|e| error_body(intake_error_status(&e), e))?;
    Ok(Json(draft))
}

/// `POST /api/draft/submit` — validate, relay, clear on success.
pub async fn submit_draft(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<(StatusCode, Json<HazardReport>), ErrorResponse> {
    let report = intake::submit_draft(&state, &auth.user)
        .await
        .map_err(|e| error_body(intake_error_status(&e), e))?;
    Ok((StatusCode::CREATED, Json(report)))
}

#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;
