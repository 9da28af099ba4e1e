//! Coarse city-name-to-coordinate lookup.
//!
//! A fixed table of major cities used to back-fill candidates the
//! generator returned without coordinates. This is a known-weak
//! heuristic, not a geocoder: unknown locations fall back to a
//! continental-US default so downstream consumers always get a pair.

/// (lowercase city fragment, latitude, longitude)
const CITY_COORDS: &[(&str, f64, f64)] = &[
    ("san francisco", 37.7749, -122.4194),
    ("new york", 40.7128, -74.0060),
    ("los angeles", 34.0522, -118.2437),
    ("chicago", 41.8781, -87.6298),
    ("seattle", 47.6062, -122.3321),
    ("boston", 42.3601, -71.0589),
    ("austin", 30.2672, -97.7431),
    ("portland", 45.5152, -122.6784),
    ("denver", 39.7392, -104.9903),
    ("miami", 25.7617, -80.1918),
    ("vancouver", 49.2827, -123.1207),
    ("toronto", 43.6532, -79.3832),
    ("london", 51.5074, -0.1278),
    ("paris", 48.8566, 2.3522),
];

/// Geographic center of the contiguous US.
const DEFAULT_COORDS: (f64, f64) = (39.8283, -98.5795);

/// Look up coordinates for a free-form location string.
pub fn city_coords(location: &str) -> (f64, f64) {
    let needle = location.to_lowercase();
    for (city, lat, lng) in CITY_COORDS {
        if needle.contains(city) {
            return (*lat, *lng);
        }
    }
    tracing::debug!(location = %location, "unknown city, using default coordinates");
    DEFAULT_COORDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_city() {
        let (lat, lng) = city_coords("San Francisco, CA");
        assert!((lat - 37.7749).abs() < 1e-6);
        assert!((lng + 122.4194).abs() < 1e-6);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(city_coords("downtown TORONTO"), (43.6532, -79.3832));
    }

    #[test]
    fn test_unknown_city_falls_back() {
        assert_eq!(city_coords("Nowhereville, ZZ"), DEFAULT_COORDS);
    }
}
