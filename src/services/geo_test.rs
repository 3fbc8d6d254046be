use super::*;

// =============================================================================
// format_fix
// =============================================================================

#[test]
fn format_fix_rounds_to_four_decimals() {
    assert_eq!(format_fix(13.082_712_9, 80.270_698_2), "13.0827, 80.2707");
}

#[test]
fn format_fix_pads_short_fractions() {
    assert_eq!(format_fix(13.0, 80.25), "13.0000, 80.2500");
}

#[test]
fn format_fix_negative_coordinates() {
    assert_eq!(format_fix(-33.8688, -151.2093), "-33.8688, -151.2093");
}

#[test]
fn format_fix_round_trips_through_parse() {
    let text = format_fix(12.9659, 80.2380);
    let (lat, lon) = parse_coordinates(&text).unwrap();
    assert!((lat - 12.9659).abs() < 1e-9);
    assert!((lon - 80.2380).abs() < 1e-9);
}

// =============================================================================
// parse_coordinates
// =============================================================================

#[test]
fn parse_coordinates_accepts_pair_with_spaces() {
    let (lat, lon) = parse_coordinates(" 13.0827 ,  80.2707 ").unwrap();
    assert!((lat - 13.0827).abs() < 1e-9);
    assert!((lon - 80.2707).abs() < 1e-9);
}

#[test]
fn parse_coordinates_rejects_free_text() {
    assert!(parse_coordinates("Marina Beach, Chennai").is_none());
    assert!(parse_coordinates("somewhere on the coast").is_none());
}

#[test]
fn parse_coordinates_rejects_out_of_range() {
    assert!(parse_coordinates("91.0, 10.0").is_none());
    assert!(parse_coordinates("45.0, 181.0").is_none());
    assert!(parse_coordinates("-90.5, 0.0").is_none());
}

#[test]
fn parse_coordinates_accepts_boundary_values() {
    assert!(parse_coordinates("90.0, 180.0").is_some());
    assert!(parse_coordinates("-90.0, -180.0").is_some());
}

#[test]
fn parse_coordinates_rejects_missing_half() {
    assert!(parse_coordinates("13.0827").is_none());
    assert!(parse_coordinates("13.0827,").is_none());
}

// =============================================================================
// validate_fix
// =============================================================================

#[test]
fn validate_fix_rejects_nan_and_infinity() {
    assert!(validate_fix(f64::NAN, 0.0).is_err());
    assert!(validate_fix(0.0, f64::INFINITY).is_err());
}

#[test]
fn validate_fix_accepts_origin() {
    assert!(validate_fix(0.0, 0.0).is_ok());
}

// =============================================================================
// haversine_km
// =============================================================================

#[test]
fn haversine_zero_distance_for_same_point() {
    let chennai = (13.0827, 80.2707);
    assert!(haversine_km(chennai, chennai) < 1e-9);
}

#[test]
fn haversine_chennai_to_puducherry() {
    // Roughly 130 km down the coast.
    let d = haversine_km((13.0827, 80.2707), (11.9416, 79.8083));
    assert!(d > 110.0 && d < 150.0, "got {d}");
}

#[test]
fn haversine_is_symmetric() {
    let a = (13.0827, 80.2707);
    let b = (9.9312, 76.2673);
    assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
}
