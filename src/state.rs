//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! All stores are in-memory: accounts, sessions, pending registrations,
//! the report log, and one intake draft per user. Persistence is out of
//! scope; the state lives for the process lifetime, seeded at startup.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::relay::ReportRelay;

// =============================================================================
// HAZARDS
// =============================================================================

/// Hazard categories a report can carry. Kebab-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardType {
    HighWaves,
    Flooding,
    Storm,
    Erosion,
    Tsunami,
    Other,
}

impl HazardType {
    /// Human-readable label shown in clients.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HighWaves => "High Waves",
            Self::Flooding => "Coastal Flooding",
            Self::Storm => "Storm/Cyclone",
            Self::Erosion => "Beach Erosion",
            Self::Tsunami => "Tsunami Warning",
            Self::Other => "Other Hazard",
        }
    }

    /// Severity assigned to newly submitted reports of this type.
    /// Tsunami warnings are always high, storms medium, the rest low
    /// until an authority reclassifies them.
    #[must_use]
    pub fn severity_hint(self) -> Severity {
        match self {
            Self::Tsunami => Severity::High,
            Self::Storm => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A submitted hazard observation awaiting verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardReport {
    pub id: Uuid,
    pub hazard_type: HazardType,
    /// Free text or a "lat, lon" pair; no format is enforced.
    pub location: String,
    /// Parsed from `location` when it is a coordinate pair.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    /// References to attached photos/videos.
    pub media: Vec<String>,
    pub severity: Severity,
    /// Display name of the reporting user.
    pub reporter: String,
    #[serde(with = "time::serde::rfc3339")]
    pub reported_at: OffsetDateTime,
}

/// Per-user intake form state. One draft per user, independent of any
/// other user's draft.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportDraft {
    pub hazard_type: Option<HazardType>,
    pub location: String,
    pub description: String,
    pub media: Vec<String>,
    /// True while a submission is running. At most one per draft.
    pub in_flight: bool,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Reporter,
}

/// Registered account. Credentials are held in memory only.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub location: String,
    pub profession: Option<String>,
    /// Whether the account passed identity verification. Gates the
    /// verified-reporter badge only; it grants no extra permissions.
    pub verified: bool,
    pub role: Role,
}

/// Session view of a user, returned to clients and attached to requests.
#[derive(Debug, Clone, Serialize)]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub verified: bool,
    pub location: String,
}

/// Output of registration step 1, consumed by step 2.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

// =============================================================================
// MAP PROVIDER
// =============================================================================

/// Supported map rendering providers. The client renders markers with
/// whichever one is configured; the server only hands out the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapProviderKind {
    Mapbox,
    GoogleMaps,
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub provider: MapProviderKind,
    pub credential: String,
}

impl MapConfig {
    /// Load from `MAP_PROVIDER` plus the provider's credential variable
    /// (`MAP_ACCESS_TOKEN` for Mapbox, `MAP_API_KEY` for Google Maps).
    /// Returns `None` if unset or incomplete (map view disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let provider = std::env::var("MAP_PROVIDER").ok()?;
        match provider.trim().to_ascii_lowercase().as_str() {
            "mapbox" => Some(Self {
                provider: MapProviderKind::Mapbox,
                credential: std::env::var("MAP_ACCESS_TOKEN").ok()?,
            }),
            "google-maps" | "googlemaps" | "google" => Some(Self {
                provider: MapProviderKind::GoogleMaps,
                credential: std::env::var("MAP_API_KEY").ok()?,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Accounts keyed by lowercase email.
    pub accounts: Arc<RwLock<HashMap<String, UserAccount>>>,
    /// Live sessions keyed by token.
    pub sessions: Arc<RwLock<HashMap<String, UserSession>>>,
    /// Step-1 registrations keyed by registration token.
    pub registrations: Arc<RwLock<HashMap<String, PendingRegistration>>>,
    /// Append-only report log, newest last.
    pub reports: Arc<RwLock<Vec<HazardReport>>>,
    /// Intake drafts keyed by user id.
    pub drafts: Arc<RwLock<HashMap<Uuid, ReportDraft>>>,
    /// Where accepted reports are forwarded.
    pub relay: Arc<dyn ReportRelay>,
    /// Map provider credential handed to clients. `None` disables the map view.
    pub map: Option<MapConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(relay: Arc<dyn ReportRelay>, map: Option<MapConfig>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            registrations: Arc::new(RwLock::new(HashMap::new())),
            reports: Arc::new(RwLock::new(Vec::new())),
            drafts: Arc::new(RwLock::new(HashMap::new())),
            relay,
            map,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_type_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&HazardType::HighWaves).unwrap();
        assert_eq!(json, "\"high-waves\"");
        let parsed: HazardType = serde_json::from_str("\"tsunami\"").unwrap();
        assert_eq!(parsed, HazardType::Tsunami);
    }

    #[test]
    fn severity_hint_matches_priority_badges() {
        assert_eq!(HazardType::Tsunami.severity_hint(), Severity::High);
        assert_eq!(HazardType::Storm.severity_hint(), Severity::Medium);
        assert_eq!(HazardType::HighWaves.severity_hint(), Severity::Low);
        assert_eq!(HazardType::Flooding.severity_hint(), Severity::Low);
        assert_eq!(HazardType::Erosion.severity_hint(), Severity::Low);
        assert_eq!(HazardType::Other.severity_hint(), Severity::Low);
    }

    #[test]
    fn draft_default_is_empty_and_idle() {
        let draft = ReportDraft::default();
        assert!(draft.hazard_type.is_none());
        assert!(draft.location.is_empty());
        assert!(draft.description.is_empty());
        assert!(draft.media.is_empty());
        assert!(!draft.in_flight);
    }

    #[test]
    fn report_serde_round_trip() {
        let report = test_helpers::dummy_report();
        let json = serde_json::to_string(&report).unwrap();
        let restored: HazardReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, report.id);
        assert_eq!(restored.hazard_type, HazardType::HighWaves);
        assert_eq!(restored.severity, Severity::High);
        assert_eq!(restored.latitude, Some(13.0827));
    }

    #[test]
    fn map_config_missing_provider_is_none() {
        // MAP_PROVIDER is never set in the test environment.
        assert!(MapConfig::from_env().is_none());
    }

    #[test]
    fn map_provider_kind_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&MapProviderKind::GoogleMaps).unwrap(), "\"google-maps\"");
        assert_eq!(serde_json::to_string(&MapProviderKind::Mapbox).unwrap(), "\"mapbox\"");
    }
}
