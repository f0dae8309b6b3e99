//! Nearest-location lookup over a static KD-tree using great-circle distance.
//!
//! ```rust
//! use geokd::{KdTree, Location, Point};
//! use geokd::loader::{read_locations, LoaderOptions};
//!
//! let csv = "A,0,0\nB,10,10\nC,-10,-10\n";
//! let locations = read_locations(csv.as_bytes(), &LoaderOptions::default());
//!
//! let tree = KdTree::build(locations);
//! // Points are (longitude, latitude)
//! let nearest = tree.nearest(&Point::new(1.0, 1.0))?;
//! assert_eq!(nearest.location.label(), "A");
//! # Ok::<(), geokd::GeoError>(())
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod kdtree;
pub mod loader;
pub mod validation;

pub use config::Config;
pub use error::{GeoError, Result};
pub use kdtree::{IndexStats, KdTree, Neighbor, Node, NodeId, PruningBound, QueryStats};
pub use loader::{LoaderOptions, load_locations, read_locations};

pub use geo::Point;
pub use geokd_types::{Axis, Location};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Config, GeoError, KdTree, LoaderOptions, PruningBound, Result};

    pub use crate::{Axis, Location, Point};

    pub use crate::distance::{EARTH_RADIUS_KM, distance, haversine_km};
}
