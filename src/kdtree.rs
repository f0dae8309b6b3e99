//! Static two-dimensional KD-tree over latitude/longitude.
//!
//! The tree is built once from a set of [`Location`]s and answers a single
//! kind of query: the nearest location to a target point by great-circle
//! distance. Split axes alternate with depth, latitude at even levels and
//! longitude at odd levels.
//!
//! Nodes live in a flat arena and refer to their children by [`NodeId`], so
//! dropping the tree releases every node at once without recursion.
//!
//! ```rust
//! use geo::Point;
//! use geokd::{KdTree, Location};
//!
//! let tree = KdTree::build(vec![
//!     Location::new("A", 0.0, 0.0),
//!     Location::new("B", 10.0, 10.0),
//!     Location::new("C", -10.0, -10.0),
//! ]);
//!
//! // Points are (longitude, latitude)
//! let nearest = tree.nearest(&Point::new(1.0, 1.0))?;
//! assert_eq!(nearest.location.label(), "A");
//! # Ok::<(), geokd::GeoError>(())
//! ```

use crate::distance::{EARTH_RADIUS_KM, haversine_km};
use crate::error::{GeoError, Result};
use geo::Point;
use geokd_types::{Axis, Location};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

/// Index of a node inside a [`KdTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A tree node: one location plus optional children.
#[derive(Debug, Clone)]
pub struct Node {
    location: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    /// Position of this node's location in [`KdTree::locations`].
    #[inline]
    pub fn location_index(&self) -> usize {
        self.location
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// How the search decides whether the far side of a split can hold a closer
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruningBound {
    /// Distance from the target to the point that takes the node's coordinate
    /// on the split axis and the target's coordinate on the other axis.
    ///
    /// Exact on latitude splits. On longitude splits this is only an
    /// approximation of the distance to the far half-space: it ignores the
    /// shortcut over the poles and across the antimeridian, so a branch that
    /// holds the true nearest point can occasionally be pruned.
    #[default]
    Planar,
    /// Great-circle distance from the target to the boundary of the far
    /// region. Latitude splits use the meridian arc to the splitting parallel;
    /// longitude splits use the nearer of the splitting meridian and the
    /// antimeridian. Never prunes the true nearest point when all
    /// coordinates are within [-90, 90] x [-180, 180].
    Spherical,
}

impl PruningBound {
    /// Lower bound in kilometers used to decide whether the far side of
    /// `split` on `axis` must be searched.
    pub fn far_side_km(self, target: &Point<f64>, split: &Point<f64>, axis: Axis) -> f64 {
        let split_coord = axis.coordinate(split);
        match self {
            PruningBound::Planar => {
                let projected = axis.with_coordinate(target, split_coord);
                haversine_km(target, &projected)
            }
            PruningBound::Spherical => match axis {
                Axis::Latitude => EARTH_RADIUS_KM * (target.y() - split_coord).abs().to_radians(),
                Axis::Longitude => meridian_distance_km(target, split_coord)
                    .min(meridian_distance_km(target, 180.0)),
            },
        }
    }
}

/// Great-circle distance from `target` to the meridian half-circle at
/// `meridian` degrees longitude, poles included.
fn meridian_distance_km(target: &Point<f64>, meridian: f64) -> f64 {
    let lat = target.y().to_radians();
    let mut delta = (target.x() - meridian).rem_euclid(360.0);
    if delta > 180.0 {
        delta = 360.0 - delta;
    }

    if delta >= 90.0 {
        // foot of the perpendicular falls on the opposite meridian, closest is a pole
        EARTH_RADIUS_KM * (FRAC_PI_2 - lat.abs()).max(0.0)
    } else {
        let s = (lat.cos() * delta.to_radians().sin()).clamp(0.0, 1.0);
        EARTH_RADIUS_KM * s.asin()
    }
}

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub location: &'a Location,
    pub distance_km: f64,
}

/// Counters collected while answering one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Nodes whose distance to the target was computed
    pub visited: usize,
    /// Far branches skipped by the pruning bound
    pub pruned: usize,
}

/// Shape summary of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub points: usize,
    pub height: usize,
}

/// Static KD-tree keyed on latitude and longitude.
#[derive(Debug, Clone)]
pub struct KdTree {
    locations: Vec<Location>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
    height: usize,
    pruning: PruningBound,
}

impl KdTree {
    /// Build a tree using the default pruning bound.
    pub fn build(locations: Vec<Location>) -> Self {
        Self::with_pruning(locations, PruningBound::default())
    }

    /// Build a tree that searches with the given pruning bound.
    ///
    /// Each level picks the element at `len / 2` of its subset ordered by the
    /// split-axis coordinate, ties broken by insertion order. The ordering
    /// key is total, so the resulting shape is the same as sorting every
    /// subset, while the median is found by selection instead of a full sort.
    pub fn with_pruning(locations: Vec<Location>, pruning: PruningBound) -> Self {
        let mut tree = KdTree {
            nodes: Vec::with_capacity(locations.len()),
            locations,
            root: None,
            height: 0,
            pruning,
        };

        let mut order: Vec<usize> = (0..tree.locations.len()).collect();
        tree.root = tree.build_recursive(&mut order, 0);

        log::debug!(
            "built KD-tree with {} locations, height {}",
            tree.locations.len(),
            tree.height
        );
        tree
    }

    fn build_recursive(&mut self, order: &mut [usize], depth: usize) -> Option<NodeId> {
        if order.is_empty() {
            return None;
        }
        self.height = self.height.max(depth + 1);

        let axis = Axis::for_depth(depth);
        let mid = order.len() / 2;
        let locations = &self.locations;
        order.select_nth_unstable_by(mid, |&a, &b| split_order(locations, axis, a, b));

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            location: order[mid],
            left: None,
            right: None,
        });

        let (before, rest) = order.split_at_mut(mid);
        let after = &mut rest[1..];
        let left = self.build_recursive(before, depth + 1);
        let right = self.build_recursive(after, depth + 1);

        let node = &mut self.nodes[id.0];
        node.left = left;
        node.right = right;
        Some(id)
    }

    /// Find the location closest to `target` (x = longitude, y = latitude).
    ///
    /// Returns [`GeoError::EmptyIndex`] when the tree holds no locations.
    /// Among equally distant locations the first one reached by the
    /// traversal is returned, which is fixed for a given tree and target.
    pub fn nearest(&self, target: &Point<f64>) -> Result<Neighbor<'_>> {
        self.nearest_with_stats(target).map(|(neighbor, _)| neighbor)
    }

    /// Same as [`KdTree::nearest`], also reporting how much of the tree was
    /// searched.
    pub fn nearest_with_stats(&self, target: &Point<f64>) -> Result<(Neighbor<'_>, QueryStats)> {
        let root = self.root.ok_or(GeoError::EmptyIndex)?;
        let root_location = self.nodes[root.0].location;

        let mut search = Search {
            best: root_location,
            best_km: haversine_km(target, self.locations[root_location].point()),
            stats: QueryStats::default(),
        };
        self.search(Some(root), target, 0, &mut search);

        log::debug!(
            "nearest query visited {} nodes, pruned {} branches",
            search.stats.visited,
            search.stats.pruned
        );

        Ok((
            Neighbor {
                location: &self.locations[search.best],
                distance_km: search.best_km,
            },
            search.stats,
        ))
    }

    fn search(&self, node: Option<NodeId>, target: &Point<f64>, depth: usize, search: &mut Search) {
        let Some(id) = node else {
            return;
        };
        let node = &self.nodes[id.0];
        let location = &self.locations[node.location];

        search.stats.visited += 1;
        let d = haversine_km(target, location.point());
        if d < search.best_km {
            search.best = node.location;
            search.best_km = d;
        }

        let axis = Axis::for_depth(depth);
        let (near, far) = if axis.coordinate(target) < location.coordinate(axis) {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.search(near, target, depth + 1, search);

        if far.is_none() {
            return;
        }
        if self.pruning.far_side_km(target, location.point(), axis) < search.best_km {
            self.search(far, target, depth + 1, search);
        } else {
            search.stats.pruned += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of levels; 0 for an empty tree.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Location stored at a node.
    pub fn location(&self, node: &Node) -> &Location {
        &self.locations[node.location]
    }

    /// All indexed locations in insertion order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn pruning(&self) -> PruningBound {
        self.pruning
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            points: self.len(),
            height: self.height,
        }
    }

    /// Locations in pre-order (node, left subtree, right subtree).
    pub fn iter(&self) -> impl Iterator<Item = &Location> + '_ {
        self.nodes.iter().map(|node| &self.locations[node.location])
    }
}

impl FromIterator<Location> for KdTree {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        KdTree::build(iter.into_iter().collect())
    }
}

struct Search {
    best: usize,
    best_km: f64,
    stats: QueryStats,
}

fn split_order(locations: &[Location], axis: Axis, a: usize, b: usize) -> Ordering {
    locations[a]
        .coordinate(axis)
        .total_cmp(&locations[b].coordinate(axis))
        .then(a.cmp(&b))
}
