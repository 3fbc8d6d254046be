//! Coordinate helpers for location capture and nearby-alert checks.
//!
//! A location fix coming from a client is formatted to four decimal
//! places before it lands in the intake form, matching what the report
//! feed and map expect. Free-text locations pass through untouched.

/// Raised when a client hands us an unusable position fix.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("unable to resolve current location")]
    InvalidFix,
}

/// Check that a latitude/longitude pair is a plausible position.
///
/// # Errors
///
/// Returns `InvalidFix` for non-finite or out-of-range values.
pub fn validate_fix(latitude: f64, longitude: f64) -> Result<(), GeoError> {
    if latitude.is_finite() && longitude.is_finite() && latitude.abs() <= 90.0 && longitude.abs() <= 180.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidFix)
    }
}

/// Format a fix as `"lat, lon"` with both values rounded to 4 decimals.
#[must_use]
pub fn format_fix(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

/// Parse a `"lat, lon"` pair out of a location string. Returns `None`
/// for free text, malformed numbers, or out-of-range coordinates, in
/// which case the location stays free text.
#[must_use]
pub fn parse_coordinates(text: &str) -> Option<(f64, f64)> {
    let (lat, lon) = text.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;
    validate_fix(latitude, longitude).ok()?;
    Some((latitude, longitude))
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two `(lat, lon)` points in kilometers.
#[must_use]
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
