//! Official-updates feed.

use axum::extract::Query;
use axum::response::Json;
use serde::Deserialize;

use crate::services::directory::{self, OfficialUpdate};
use crate::state::Severity;

#[derive(Deserialize)]
pub struct FeedFilter {
    pub priority: Option<Severity>,
}

/// `GET /api/feed` — verified agency updates, newest first.
pub async fn list_updates(Query(filter): Query<FeedFilter>) -> Json<Vec<OfficialUpdate>> {
    Json(directory::filter_updates(filter.priority))
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
