//! Router assembly.
//!
//! All endpoints live under `/api` except the health probe and the
//! service banner. CORS is wide open for the mobile client; auth rides
//! on an HttpOnly session cookie (see `auth::AuthUser`).

pub mod auth;
pub mod feed;
pub mod map;
pub mod reports;
pub mod search;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/register/verify", post(auth::register_verify))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/reports", get(reports::list_reports).post(reports::create_report))
        .route("/api/reports/{id}", get(reports::get_report))
        .route("/api/draft", get(reports::get_draft).patch(reports::update_draft))
        .route("/api/draft/location", post(reports::capture_location))
        .route("/api/draft/submit", post(reports::submit_draft))
        .route("/api/feed", get(feed::list_updates))
        .route("/api/search/cities", get(search::cities))
        .route("/api/search/hazards", get(search::hazards))
        .route("/api/cities/{id}", get(search::city_detail))
        .route("/api/map/markers", get(map::markers))
        .route("/api/map/config", get(map::config))
        .route("/api/alerts", get(map::nearby_alerts))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// JSON error body shown to the user as a notification.
pub(crate) type ErrorResponse = (StatusCode, Json<serde_json::Value>);

pub(crate) fn error_body(status: StatusCode, message: impl std::fmt::Display) -> ErrorResponse {
    (status, Json(serde_json::json!({ "error": message.to_string() })))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Argus backend running" }))
}
