//! # geokd-types
//!
//! Core data types shared by the geokd index and its loaders:
//!
//! - **`Location`**: a labelled latitude/longitude record
//! - **`Axis`**: the coordinate a KD-tree level splits on
//!
//! Coordinates are stored in a `geo::Point<f64>` with `x` as longitude and
//! `y` as latitude, the same convention the `geo` crate uses.
//!
//! ## Examples
//!
//! ```rust
//! use geokd_types::{Axis, Location};
//!
//! let paris = Location::new("Paris", 48.8566, 2.3522);
//! assert_eq!(Axis::for_depth(0).coordinate(paris.point()), 48.8566);
//! ```

pub mod location;

pub use location::{Axis, Location};
