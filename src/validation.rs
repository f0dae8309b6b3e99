//! Validation for geographic coordinates.
//!
//! The index itself accepts any coordinates; these checks are applied by the
//! loader only when `validate_coordinates` is enabled.

use crate::error::{GeoError, Result};
use geo::Point;
use geokd_types::Location;

/// Validates a point has finite, in-range longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use geokd::validation::validate_geographic_point;
/// use geo::Point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// let invalid = Point::new(-74.0, 95.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point<f64>) -> Result<()> {
    let (lon, lat) = (point.x(), point.y());

    if !lat.is_finite() {
        return Err(GeoError::InvalidCoordinate(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lon.is_finite() {
        return Err(GeoError::InvalidCoordinate(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeoError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    Ok(())
}

/// Validates a location's coordinates, naming the location in the error.
pub fn validate_location(location: &Location) -> Result<()> {
    validate_geographic_point(location.point()).map_err(|e| match e {
        GeoError::InvalidCoordinate(msg) => {
            GeoError::InvalidCoordinate(format!("{}: {}", location.label(), msg))
        }
        other => other,
    })
}

/// Validates every location, reporting the first failure with its index.
pub fn validate_locations(locations: &[Location]) -> Result<()> {
    for (idx, location) in locations.iter().enumerate() {
        validate_location(location).map_err(|e| {
            GeoError::InvalidCoordinate(format!("Location at index {}: {}", idx, e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        assert!(validate_geographic_point(&Point::new(2.3522, 48.8566)).is_ok());
        assert!(validate_geographic_point(&Point::new(139.6917, 35.6895)).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(validate_geographic_point(&Point::new(180.1, 0.0)).is_err());
        assert!(validate_geographic_point(&Point::new(0.0, -90.5)).is_err());
    }

    #[test]
    fn test_non_finite() {
        assert!(validate_geographic_point(&Point::new(f64::NAN, 0.0)).is_err());
        assert!(validate_geographic_point(&Point::new(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_validate_location_names_label() {
        let bad = Location::new("Atlantis", 123.0, 0.0);
        let err = validate_location(&bad).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
        assert!(err.to_string().contains("Latitude"));
    }

    #[test]
    fn test_validate_locations() {
        let locations = vec![
            Location::new("ok", 10.0, 10.0),
            Location::new("bad", 10.0, 999.0),
        ];
        let err = validate_locations(&locations).unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(validate_locations(&locations[..1]).is_ok());
    }
}
