//! Great-circle distance on a spherical Earth.
//!
//! All distances are in kilometers on a sphere of radius [`EARTH_RADIUS_KM`].
//! No ellipsoidal correction is applied.

use geo::Point;
use geokd_types::Location;

/// Mean Earth radius used by every distance in this crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// The haversine term is clamped to `[0, 1]` before the square roots, so
/// rounding near zero distance or near antipodal points never produces NaN.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use geokd::distance::haversine_km;
///
/// let origin = Point::new(0.0, 0.0);
/// let one_one = Point::new(1.0, 1.0);
/// let d = haversine_km(&origin, &one_one);
/// assert!((d - 157.25).abs() < 0.1);
/// ```
#[inline]
pub fn haversine_km(a: &Point<f64>, b: &Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let delta_lat = (b.y() - a.y()).to_radians();
    let delta_lon = (b.x() - a.x()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two locations in kilometers.
#[inline]
pub fn distance(a: &Location, b: &Location) -> f64 {
    haversine_km(a.point(), b.point())
}

/// Find the nearest location to `target` by checking every candidate.
///
/// Returns `None` for an empty slice. When several candidates are equally
/// close, the first one in slice order wins.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use geokd::Location;
/// use geokd::distance::nearest_by_scan;
///
/// let candidates = vec![
///     Location::new("Brooklyn", 40.6782, -73.9442),
///     Location::new("LA", 34.0522, -118.2437),
/// ];
/// let (nearest, _km) = nearest_by_scan(&candidates, &Point::new(-74.0060, 40.7128)).unwrap();
/// assert_eq!(nearest.label(), "Brooklyn");
/// ```
pub fn nearest_by_scan<'a>(
    locations: &'a [Location],
    target: &Point<f64>,
) -> Option<(&'a Location, f64)> {
    let mut best: Option<(&Location, f64)> = None;
    for location in locations {
        let d = haversine_km(target, location.point());
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((location, d)),
        }
    }
    best
}
