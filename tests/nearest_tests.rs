use geokd::distance::{distance, haversine_km, nearest_by_scan};
use geokd::{GeoError, KdTree, Location, Point, PruningBound};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_locations(rng: &mut StdRng, n: usize, lat: (f64, f64), lon: (f64, f64)) -> Vec<Location> {
    (0..n)
        .map(|i| {
            Location::new(
                format!("loc{}", i),
                rng.gen_range(lat.0..=lat.1),
                rng.gen_range(lon.0..=lon.1),
            )
        })
        .collect()
}

fn random_point(rng: &mut StdRng, lat: (f64, f64), lon: (f64, f64)) -> Point {
    Point::new(rng.gen_range(lon.0..=lon.1), rng.gen_range(lat.0..=lat.1))
}

const WORLD_LAT: (f64, f64) = (-90.0, 90.0);
const WORLD_LON: (f64, f64) = (-180.0, 180.0);

/// Test 1: Three-point scenario
#[test]
fn test_three_point_scenario() {
    let tree = KdTree::build(vec![
        Location::new("A", 0.0, 0.0),
        Location::new("B", 10.0, 10.0),
        Location::new("C", -10.0, -10.0),
    ]);

    let nearest = tree.nearest(&Point::new(1.0, 1.0)).expect("non-empty tree");
    assert_eq!(nearest.location.label(), "A");
    assert!((nearest.distance_km - 157.25).abs() < 0.01);
}

/// Test 2: Spherical pruning always agrees with a linear scan
#[test]
fn test_spherical_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[1usize, 2, 3, 7, 16, 64, 255, 500, 1000] {
        let locations = random_locations(&mut rng, n, WORLD_LAT, WORLD_LON);
        let tree = KdTree::with_pruning(locations.clone(), PruningBound::Spherical);

        for _ in 0..50 {
            let q = random_point(&mut rng, WORLD_LAT, WORLD_LON);
            let (_, expected_km) = nearest_by_scan(&locations, &q).unwrap();
            let nearest = tree.nearest(&q).unwrap();
            assert!(
                (nearest.distance_km - expected_km).abs() < 1e-9,
                "n={} query={:?}: tree {} km, scan {} km",
                n,
                q,
                nearest.distance_km,
                expected_km
            );
        }
    }
}

/// Test 3: Known divergence of the planar bound
///
/// The planar bound is not a valid lower bound on longitude splits, so on
/// global data it occasionally prunes the branch holding the true answer.
/// Every divergence must be recovered by the spherical bound.
#[test]
fn test_planar_divergence_is_rare_and_explained() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut total = 0usize;
    let mut divergent = 0usize;

    for round in 0..40 {
        let n = 1 + (round * 25) % 1000;
        let locations = random_locations(&mut rng, n, WORLD_LAT, WORLD_LON);
        let planar = KdTree::with_pruning(locations.clone(), PruningBound::Planar);
        let spherical = KdTree::with_pruning(locations.clone(), PruningBound::Spherical);

        for _ in 0..25 {
            let q = random_point(&mut rng, WORLD_LAT, WORLD_LON);
            let (_, expected_km) = nearest_by_scan(&locations, &q).unwrap();
            let got = planar.nearest(&q).unwrap();
            total += 1;

            // never better than the true minimum
            assert!(got.distance_km >= expected_km - 1e-9);

            if got.distance_km > expected_km + 1e-9 {
                divergent += 1;
                let fixed = spherical.nearest(&q).unwrap();
                assert!((fixed.distance_km - expected_km).abs() < 1e-9);
            }
        }
    }

    assert!(
        divergent * 10 < total,
        "{} of {} planar queries diverged",
        divergent,
        total
    );
}

/// Test 4: Regional data rarely hits the planar approximation
#[test]
fn test_planar_regional_agreement() {
    let lat = (35.0, 60.0);
    let lon = (-10.0, 30.0);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut total = 0usize;
    let mut divergent = 0usize;

    for &n in &[10usize, 100, 1000] {
        let locations = random_locations(&mut rng, n, lat, lon);
        let tree = KdTree::build(locations.clone());
        for _ in 0..100 {
            let q = random_point(&mut rng, lat, lon);
            let (_, expected_km) = nearest_by_scan(&locations, &q).unwrap();
            total += 1;
            if tree.nearest(&q).unwrap().distance_km > expected_km + 1e-9 {
                divergent += 1;
            }
        }
    }

    assert!(divergent * 100 <= total, "{} of {} diverged", divergent, total);
}

/// Test 5: Every indexed point finds itself (or an exact duplicate)
#[test]
fn test_self_lookup_with_duplicates() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut locations = random_locations(&mut rng, 300, WORLD_LAT, WORLD_LON);
    let copies: Vec<Location> = locations
        .iter()
        .take(50)
        .map(|l| Location::from_point(format!("{}-copy", l.label()), *l.point()))
        .collect();
    locations.extend(copies);

    for pruning in [PruningBound::Planar, PruningBound::Spherical] {
        let tree = KdTree::with_pruning(locations.clone(), pruning);
        for location in &locations {
            let nearest = tree.nearest(location.point()).unwrap();
            assert_eq!(nearest.distance_km, 0.0);
            assert!(nearest.location.same_position(location));
        }
    }
}

/// Test 6: Same query, same answer
#[test]
fn test_determinism() {
    let mut rng = StdRng::seed_from_u64(5);
    // a coarse grid produces many equidistant candidates
    let locations: Vec<Location> = (0..400)
        .map(|i| Location::new(format!("g{}", i), (i / 20) as f64, (i % 20) as f64))
        .collect();
    let tree = KdTree::build(locations.clone());
    let rebuilt = KdTree::build(locations);

    for _ in 0..100 {
        let q = Point::new(rng.gen_range(0..20u32) as f64 + 0.5, rng.gen_range(0..20u32) as f64 + 0.5);
        let first = tree.nearest(&q).unwrap();
        for _ in 0..5 {
            assert_eq!(tree.nearest(&q).unwrap().location.label(), first.location.label());
        }
        assert_eq!(
            rebuilt.nearest(&q).unwrap().location.label(),
            first.location.label()
        );
    }
}

/// Test 7: Querying an empty index is an explicit error
#[test]
fn test_empty_index_query() {
    let tree = KdTree::build(Vec::new());
    let err = tree.nearest(&Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, GeoError::EmptyIndex));
    assert_eq!(err.to_string(), "nearest-neighbor query on an empty index");
}

/// Test 8: Extreme coordinate values
#[test]
fn test_extreme_coordinates() {
    let tree = KdTree::with_pruning(
        vec![
            Location::new("North Pole", 90.0, 0.0),
            Location::new("South Pole", -90.0, 0.0),
            Location::new("Date Line West", 0.0, 180.0),
            Location::new("Date Line East", 0.0, -180.0),
            Location::new("Null Island", 0.0, 0.0),
        ],
        PruningBound::Spherical,
    );

    let near_pole = tree.nearest(&Point::new(123.0, 89.5)).unwrap();
    assert_eq!(near_pole.location.label(), "North Pole");

    let across = tree.nearest(&Point::new(179.5, 0.0)).unwrap();
    assert!(across.location.label().starts_with("Date Line"));
    assert!(across.distance_km < 60.0);
}

/// Test 9: Distance properties on random pairs
#[test]
fn test_distance_properties() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let a = random_point(&mut rng, WORLD_LAT, WORLD_LON);
        let b = random_point(&mut rng, WORLD_LAT, WORLD_LON);
        let c = random_point(&mut rng, (-60.0, 60.0), (-60.0, 60.0));

        let ab = haversine_km(&a, &b);
        assert!(ab >= 0.0 && ab.is_finite());
        assert!((ab - haversine_km(&b, &a)).abs() < 1e-9);
        assert_eq!(haversine_km(&a, &a), 0.0);

        let ac = haversine_km(&a, &c);
        let cb = haversine_km(&c, &b);
        assert!(ab <= ac + cb + 1e-3);
    }

    let paris = Location::new("Paris", 48.8566, 2.3522);
    let london = Location::new("London", 51.5074, -0.1278);
    let d = distance(&paris, &london);
    assert!(d > 340.0 && d < 350.0);
}

/// Test 10: Large dataset keeps queries sub-linear
#[test]
fn test_large_dataset() {
    let mut rng = StdRng::seed_from_u64(1);
    let locations = random_locations(&mut rng, 20_000, (30.0, 60.0), (-20.0, 40.0));
    let tree = KdTree::build(locations);
    assert_eq!(tree.height(), 15);

    let (_, stats) = tree.nearest_with_stats(&Point::new(10.0, 45.0)).unwrap();
    assert!(stats.visited < 1_000, "visited {} nodes", stats.visited);
    assert!(stats.pruned > 0);
}
