//! Reference data — seed accounts and reports, the official-updates
//! feed, coastal city profiles, and the hazard catalog.
//!
//! Feed and city data are demo fixtures standing in for upstream
//! agency integrations; search and recent-report counts run against
//! them plus the live report store.

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::services::{geo, registration};
use crate::state::{AppState, HazardReport, HazardType, Role, Severity, UserAccount};

/// Reports within this distance of a city count toward its recent total.
const CITY_RADIUS_KM: f64 = 100.0;
/// Lookback window for a city's recent-report count.
const RECENT_WINDOW_DAYS: i64 = 30;

// =============================================================================
// TYPES
// =============================================================================

/// A verified update from a disaster management authority.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OfficialUpdate {
    pub id: u32,
    pub source: String,
    pub title: String,
    pub content: String,
    pub priority: Severity,
    pub verified: bool,
    pub url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

/// Profile of a coastal city covered by the service.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CoastalCity {
    pub id: u32,
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    pub elevation_m: u32,
    pub climate: String,
    pub hazard_history: Vec<String>,
    pub emergency_number: String,
}

/// Catalog entry describing a hazard category.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HazardInfo {
    pub hazard_type: HazardType,
    pub name: String,
    pub description: String,
}

// =============================================================================
// SEED DATA
// =============================================================================

fn seed_account(email: &str, password: &str, name: &str, location: &str, role: Role) -> UserAccount {
    UserAccount {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        password_hash: registration::hash_password(password),
        name: name.to_owned(),
        location: location.to_owned(),
        profession: None,
        verified: true,
        role,
    }
}

fn seed_report(
    hazard_type: HazardType,
    latitude: f64,
    longitude: f64,
    severity: Severity,
    description: &str,
    reporter: &str,
    hours_ago: i64,
) -> HazardReport {
    HazardReport {
        id: Uuid::new_v4(),
        hazard_type,
        location: geo::format_fix(latitude, longitude),
        latitude: Some(latitude),
        longitude: Some(longitude),
        description: description.to_owned(),
        media: Vec::new(),
        severity,
        reporter: reporter.to_owned(),
        reported_at: OffsetDateTime::now_utc() - Duration::hours(hours_ago),
    }
}

/// Populate an empty state with the demo accounts and reports.
pub async fn seed(state: &AppState) {
    {
        let mut accounts = state.accounts.write().await;
        if accounts.is_empty() {
            for account in [
                seed_account("admin@argus.dev", "admin123", "Admin", "Chennai, Tamil Nadu", Role::Admin),
                seed_account("alice@argus.dev", "alicepwd", "Alice", "Chennai, Tamil Nadu", Role::Reporter),
                seed_account("bob@argus.dev", "bobpwd", "Bob", "Chennai, Tamil Nadu", Role::Reporter),
            ] {
                accounts.insert(account.email.clone(), account);
            }
        }
    }

    let mut reports = state.reports.write().await;
    if reports.is_empty() {
        reports.push(seed_report(
            HazardType::HighWaves,
            13.0827,
            80.2707,
            Severity::High,
            "High waves reported at Marina Beach, big waves near the shore",
            "Alice",
            2,
        ));
        reports.push(seed_report(
            HazardType::Flooding,
            12.9659,
            80.2380,
            Severity::Medium,
            "Water entering low-lying areas along East Coast Road",
            "Bob",
            4,
        ));
    }
}

fn update(
    id: u32,
    source: &str,
    title: &str,
    content: &str,
    priority: Severity,
    hours_ago: i64,
) -> OfficialUpdate {
    OfficialUpdate {
        id,
        source: source.to_owned(),
        title: title.to_owned(),
        content: content.to_owned(),
        priority,
        verified: true,
        url: None,
        published_at: OffsetDateTime::now_utc() - Duration::hours(hours_ago),
    }
}

/// Current official updates, unsorted.
#[must_use]
pub fn official_updates() -> Vec<OfficialUpdate> {
    vec![
        update(
            1,
            "INCOIS",
            "High Wave Alert for Tamil Nadu Coast",
            "Wave heights of 2.5-3.5m expected along Tamil Nadu coast for next 24 hours. \
             Fishermen advised not to venture into sea.",
            Severity::High,
            2,
        ),
        update(
            2,
            "IMD Chennai",
            "Weather Update - Coastal Districts",
            "Moderate to heavy rainfall expected in coastal districts of Tamil Nadu and \
             Puducherry. Strong surface winds likely.",
            Severity::Medium,
            4,
        ),
        update(
            3,
            "NDMA",
            "Coastal Flood Advisory",
            "Low-lying areas along the east coast may experience minor flooding during \
             high tide periods. Stay alert.",
            Severity::Medium,
            6,
        ),
        update(
            4,
            "Kerala DMO",
            "Cyclone Watch Discontinued",
            "The cyclone watch for Kerala coast has been discontinued as the system has \
             weakened significantly.",
            Severity::Low,
            8,
        ),
        update(
            5,
            "Coast Guard",
            "Search and Rescue Operations",
            "SAR operations concluded successfully. All fishing vessels reported safe. \
             Normal fishing activities may resume.",
            Severity::Low,
            12,
        ),
    ]
}

/// Covered coastal cities.
#[must_use]
pub fn coastal_cities() -> Vec<CoastalCity> {
    vec![
        CoastalCity {
            id: 1,
            name: "Chennai".into(),
            state: "Tamil Nadu".into(),
            latitude: 13.0827,
            longitude: 80.2707,
            elevation_m: 6,
            climate: "Tropical wet and dry".into(),
            hazard_history: vec![
                "Cyclone Vardah (2016)".into(),
                "Tsunami (2004)".into(),
                "Coastal flooding".into(),
            ],
            emergency_number: "+91-44-25619131".into(),
        },
        CoastalCity {
            id: 2,
            name: "Puducherry".into(),
            state: "Puducherry".into(),
            latitude: 11.9416,
            longitude: 79.8083,
            elevation_m: 3,
            climate: "Tropical savanna".into(),
            hazard_history: vec![
                "Cyclone Thane (2011)".into(),
                "Coastal erosion".into(),
                "High waves".into(),
            ],
            emergency_number: "+91-413-2334139".into(),
        },
        CoastalCity {
            id: 3,
            name: "Kochi".into(),
            state: "Kerala".into(),
            latitude: 9.9312,
            longitude: 76.2673,
            elevation_m: 0,
            climate: "Tropical monsoon".into(),
            hazard_history: vec![
                "Cyclone Ockhi (2017)".into(),
                "Storm surge".into(),
                "Flooding".into(),
            ],
            emergency_number: "+91-484-2668272".into(),
        },
    ]
}

/// Hazard category catalog shown in search.
#[must_use]
pub fn hazard_catalog() -> Vec<HazardInfo> {
    let entry = |hazard_type: HazardType, description: &str| HazardInfo {
        hazard_type,
        name: hazard_type.label().to_owned(),
        description: description.to_owned(),
    };
    vec![
        entry(HazardType::HighWaves, "Wave heights exceeding normal conditions"),
        entry(HazardType::Flooding, "Inundation of coastal areas"),
        entry(HazardType::Storm, "Severe weather systems"),
        entry(HazardType::Erosion, "Progressive loss of shoreline"),
        entry(HazardType::Tsunami, "Seismic sea waves"),
    ]
}

// =============================================================================
// SEARCH & FEED QUERIES
// =============================================================================

fn matches(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Cities whose name or state contains the query, case-insensitive.
/// An empty query returns everything.
#[must_use]
pub fn search_cities(query: &str) -> Vec<CoastalCity> {
    let query = query.trim();
    coastal_cities()
        .into_iter()
        .filter(|c| query.is_empty() || matches(&c.name, query) || matches(&c.state, query))
        .collect()
}

/// Catalog entries whose name contains the query, case-insensitive.
#[must_use]
pub fn search_hazards(query: &str) -> Vec<HazardInfo> {
    let query = query.trim();
    hazard_catalog()
        .into_iter()
        .filter(|h| query.is_empty() || matches(&h.name, query))
        .collect()
}

/// Official updates, optionally filtered by priority, newest first.
#[must_use]
pub fn filter_updates(priority: Option<Severity>) -> Vec<OfficialUpdate> {
    let mut updates: Vec<_> = official_updates()
        .into_iter()
        .filter(|u| priority.is_none_or(|p| u.priority == p))
        .collect();
    updates.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    updates
}

/// Count of reports filed near a city within the recent window.
pub async fn city_recent_reports(state: &AppState, city: &CoastalCity) -> usize {
    let cutoff = OffsetDateTime::now_utc() - Duration::days(RECENT_WINDOW_DAYS);
    let reports = state.reports.read().await;
    reports
        .iter()
        .filter(|r| r.reported_at >= cutoff)
        .filter_map(|r| Some((r.latitude?, r.longitude?)))
        .filter(|&coords| geo::haversine_km(coords, (city.latitude, city.longitude)) <= CITY_RADIUS_KM)
        .count()
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
