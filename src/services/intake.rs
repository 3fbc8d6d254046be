//! Report intake — field validation and the draft submission flow.
//!
//! DESIGN
//! ======
//! Each user owns one draft. Submission is a three-phase contract:
//! required-field validation (rejected drafts never go in-flight), an
//! in-flight phase guarded to at most one submission per draft, and a
//! terminal outcome — success clears every field, failure retains them
//! so the user can retry. The relay call happens without holding the
//! draft lock.

use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::services::geo::{self, GeoError};
use crate::services::relay::RelayError;
use crate::state::{AppState, HazardReport, HazardType, ReportDraft, UserSession};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("hazard type is required")]
    MissingHazardType,
    #[error("location is required")]
    MissingLocation,
    #[error("description is required")]
    MissingDescription,
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Partial edit of a draft. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct DraftUpdate {
    pub hazard_type: Option<HazardType>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub media: Option<Vec<String>>,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Check the three required intake fields, reporting the first missing
/// one. Whitespace-only text counts as missing. Location content is not
/// format-checked: free text and coordinate pairs are both fine.
///
/// # Errors
///
/// Returns the specific missing-field error.
pub fn validate(
    hazard_type: Option<HazardType>,
    location: &str,
    description: &str,
) -> Result<HazardType, IntakeError> {
    let Some(hazard_type) = hazard_type else {
        return Err(IntakeError::MissingHazardType);
    };
    if location.trim().is_empty() {
        return Err(IntakeError::MissingLocation);
    }
    if description.trim().is_empty() {
        return Err(IntakeError::MissingDescription);
    }
    Ok(hazard_type)
}

/// Build a report from validated intake fields. Coordinates are lifted
/// out of the location text when it parses as a pair.
#[must_use]
pub fn build_report(
    hazard_type: HazardType,
    location: &str,
    description: &str,
    media: Vec<String>,
    reporter: &str,
) -> HazardReport {
    let coords = geo::parse_coordinates(location);
    HazardReport {
        id: Uuid::new_v4(),
        hazard_type,
        location: location.trim().to_owned(),
        latitude: coords.map(|(lat, _)| lat),
        longitude: coords.map(|(_, lon)| lon),
        description: description.trim().to_owned(),
        media,
        severity: hazard_type.severity_hint(),
        reporter: reporter.to_owned(),
        reported_at: OffsetDateTime::now_utc(),
    }
}

// =============================================================================
// DRAFT OPERATIONS
// =============================================================================

/// Current draft for a user, a fresh empty one if none exists yet.
pub async fn get_draft(state: &AppState, user_id: Uuid) -> ReportDraft {
    let drafts = state.drafts.read().await;
    drafts.get(&user_id).cloned().unwrap_or_default()
}

/// Merge a partial edit into the user's draft and return the result.
/// The draft is frozen while a submission is in flight: edits would be
/// wiped by the success path clearing the form.
///
/// # Errors
///
/// `SubmissionInFlight` while a submission is running.
pub async fn update_draft(
    state: &AppState,
    user_id: Uuid,
    update: DraftUpdate,
) -> Result<ReportDraft, IntakeError> {
    let mut drafts = state.drafts.write().await;
    let draft = drafts.entry(user_id).or_default();
    if draft.in_flight {
        return Err(IntakeError::SubmissionInFlight);
    }
    if let Some(hazard_type) = update.hazard_type {
        draft.hazard_type = Some(hazard_type);
    }
    if let Some(location) = update.location {
        draft.location = location;
    }
    if let Some(description) = update.description {
        draft.description = description;
    }
    if let Some(media) = update.media {
        draft.media = media;
    }
    Ok(draft.clone())
}

/// Write a client position fix into the draft location, formatted to
/// 4 decimal places. An invalid fix leaves the location unchanged.
///
/// # Errors
///
/// `Geo` for out-of-range or non-finite coordinates,
/// `SubmissionInFlight` while a submission is running.
pub async fn capture_location(
    state: &AppState,
    user_id: Uuid,
    latitude: f64,
    longitude: f64,
) -> Result<ReportDraft, IntakeError> {
    geo::validate_fix(latitude, longitude)?;
    let mut drafts = state.drafts.write().await;
    let draft = drafts.entry(user_id).or_default();
    if draft.in_flight {
        return Err(IntakeError::SubmissionInFlight);
    }
    draft.location = geo::format_fix(latitude, longitude);
    Ok(draft.clone())
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Submit the user's draft: validate, relay, then clear on success or
/// retain the fields on failure.
///
/// # Errors
///
/// Missing-field errors and `SubmissionInFlight` reject before anything
/// goes in-flight; `Relay` errors surface the authority's reason.
pub async fn submit_draft(state: &AppState, session: &UserSession) -> Result<HazardReport, IntakeError> {
    // Phase 1: validate and mark in-flight under the lock.
    let report = {
        let mut drafts = state.drafts.write().await;
        let draft = drafts.entry(session.user_id).or_default();
        if draft.in_flight {
            return Err(IntakeError::SubmissionInFlight);
        }
        let hazard_type = validate(draft.hazard_type, &draft.location, &draft.description)?;
        draft.in_flight = true;
        build_report(hazard_type, &draft.location, &draft.description, draft.media.clone(), &session.name)
    };

    // Phase 2: relay without holding the draft lock.
    let outcome = state.relay.submit(&report).await;

    // Phase 3: terminal outcome.
    let mut drafts = state.drafts.write().await;
    let draft = drafts.entry(session.user_id).or_default();
    match outcome {
        Ok(()) => {
            *draft = ReportDraft::default();
            drop(drafts);
            state.reports.write().await.push(report.clone());
            tracing::info!(report_id = %report.id, hazard_type = ?report.hazard_type, "report accepted");
            Ok(report)
        }
        Err(e) => {
            draft.in_flight = false;
            tracing::warn!(error = %e, "report submission failed, draft retained");
            Err(IntakeError::Relay(e))
        }
    }
}

/// One-shot submission that bypasses the draft: same validation and
/// relay contract, fields supplied directly.
///
/// # Errors
///
/// Same as [`submit_draft`] minus the in-flight guard (nothing is
/// retained server-side on failure).
pub async fn submit_direct(
    state: &AppState,
    session: &UserSession,
    hazard_type: Option<HazardType>,
    location: &str,
    description: &str,
    media: Vec<String>,
) -> Result<HazardReport, IntakeError> {
    let hazard_type = validate(hazard_type, location, description)?;
    let report = build_report(hazard_type, location, description, media, &session.name);
    state.relay.submit(&report).await?;
    state.reports.write().await.push(report.clone());
    tracing::info!(report_id = %report.id, hazard_type = ?report.hazard_type, "report accepted");
    Ok(report)
}

#[cfg(test)]
#[path = "intake_test.rs"]
mod tests;
