use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named geographic location.
///
/// Latitude and longitude are degrees. No range checks happen here; see
/// `geokd::validation` for opt-in validation.
///
/// # Examples
///
/// ```
/// use geokd_types::Location;
///
/// let nyc = Location::new("New York", 40.7128, -74.0060);
/// assert_eq!(nyc.label(), "New York");
/// assert_eq!(nyc.latitude(), 40.7128);
/// assert_eq!(nyc.longitude(), -74.0060);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name of the location
    pub label: String,
    /// Coordinates (x = longitude, y = latitude)
    pub point: Point<f64>,
}

impl Location {
    /// Create a location from a label and latitude/longitude in degrees.
    ///
    /// Note the argument order is latitude first, matching the record layout
    /// `label, latitude, longitude`.
    pub fn new(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            point: Point::new(longitude, latitude),
        }
    }

    /// Create a location from an existing `geo::Point`.
    pub fn from_point(label: impl Into<String>, point: Point<f64>) -> Self {
        Self {
            label: label.into(),
            point,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    /// Get a reference to the underlying point.
    #[inline]
    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    /// Coordinate of this location on the given axis.
    #[inline]
    pub fn coordinate(&self, axis: Axis) -> f64 {
        axis.coordinate(&self.point)
    }

    /// Whether both locations sit on exactly the same coordinates.
    pub fn same_position(&self, other: &Location) -> bool {
        self.point == other.point
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.label,
            self.latitude(),
            self.longitude()
        )
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        location.point
    }
}

/// Split axis of a KD-tree level.
///
/// Levels alternate with period two: latitude at even depths, longitude at
/// odd depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Axis used at the given tree depth (root is depth 0).
    ///
    /// ```
    /// use geokd_types::Axis;
    ///
    /// assert_eq!(Axis::for_depth(0), Axis::Latitude);
    /// assert_eq!(Axis::for_depth(1), Axis::Longitude);
    /// assert_eq!(Axis::for_depth(6), Axis::Latitude);
    /// ```
    #[inline]
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Axis::Latitude
        } else {
            Axis::Longitude
        }
    }

    /// The other axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::Latitude => Axis::Longitude,
            Axis::Longitude => Axis::Latitude,
        }
    }

    /// Read this axis' coordinate from a point.
    #[inline]
    pub fn coordinate(self, point: &Point<f64>) -> f64 {
        match self {
            Axis::Latitude => point.y(),
            Axis::Longitude => point.x(),
        }
    }

    /// Copy of `point` with this axis' coordinate replaced by `value`.
    #[inline]
    pub fn with_coordinate(self, point: &Point<f64>, value: f64) -> Point<f64> {
        match self {
            Axis::Latitude => Point::new(point.x(), value),
            Axis::Longitude => Point::new(value, point.y()),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}
