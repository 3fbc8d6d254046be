use super::*;
use std::sync::Arc;

use crate::services::directory;
use crate::services::relay::AcceptRelay;
use crate::state::{MapConfig, MapProviderKind, test_helpers};

#[tokio::test]
async fn markers_only_include_located_reports() {
    let state = test_helpers::test_app_state();
    directory::seed(&state).await;

    let mut unlocated = test_helpers::dummy_report();
    unlocated.location = "Somewhere along the ECR".into();
    unlocated.latitude = None;
    unlocated.longitude = None;
    state.reports.write().await.push(unlocated);

    let Json(markers) = markers(State(state)).await;
    assert_eq!(markers.len(), 2);
    assert!(markers.iter().all(|m| m.latitude.is_finite()));
}

#[tokio::test]
async fn config_is_not_found_without_provider() {
    let state = test_helpers::test_app_state();
    let (status, _) = config(State(state)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn config_hands_out_provider_and_credential() {
    let map = MapConfig { provider: MapProviderKind::Mapbox, credential: "pk.test".into() };
    let state = crate::state::AppState::new(Arc::new(AcceptRelay), Some(map));
    let Json(value) = config(State(state)).await.unwrap();
    assert_eq!(value["provider"], "mapbox");
    assert_eq!(value["credential"], "pk.test");
}

#[tokio::test]
async fn alerts_fire_within_default_radius() {
    let state = test_helpers::test_app_state();
    directory::seed(&state).await;

    // Standing on Marina Beach, both Chennai-area seed reports are close.
    let query = AlertQuery { latitude: 13.05, longitude: 80.27, radius_km: None };
    let Json(response) = nearby_alerts(State(state), Query(query)).await.unwrap();
    assert!(response.has_alerts);
    assert_eq!(response.reports.len(), 2);
}

#[tokio::test]
async fn alerts_stay_quiet_far_from_reports() {
    let state = test_helpers::test_app_state();
    directory::seed(&state).await;

    // Kochi is on the opposite coast from the Chennai seed reports.
    let query = AlertQuery { latitude: 9.9312, longitude: 76.2673, radius_km: None };
    let Json(response) = nearby_alerts(State(state), Query(query)).await.unwrap();
    assert!(!response.has_alerts);
    assert!(response.reports.is_empty());
}

#[tokio::test]
async fn alerts_honor_custom_radius() {
    let state = test_helpers::test_app_state();
    directory::seed(&state).await;

    // A country-spanning radius picks the Chennai reports up from Kochi.
    let query = AlertQuery { latitude: 9.9312, longitude: 76.2673, radius_km: Some(1000.0) };
    let Json(response) = nearby_alerts(State(state), Query(query)).await.unwrap();
    assert!(response.has_alerts);
    assert_eq!(response.reports.len(), 2);
}

#[tokio::test]
async fn alerts_reject_invalid_position() {
    let state = test_helpers::test_app_state();
    let query = AlertQuery { latitude: 123.0, longitude: 80.0, radius_km: None };
    let (status, _) = nearby_alerts(State(state), Query(query)).await.unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
