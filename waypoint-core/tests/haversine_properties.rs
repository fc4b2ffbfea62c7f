//! Property tests for great-circle distances.

use geo::Coord;
use proptest::prelude::*;
use waypoint_core::{EARTH_RADIUS_KM, GreatCircleFallback, haversine_km};
use waypoint_core::test_support::point;

fn coord() -> impl Strategy<Value = Coord<f64>> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coord { x: lon, y: lat })
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_bounded(a in coord(), b in coord()) {
        let there = haversine_km(a, b);
        let back = haversine_km(b, a);
        prop_assert!((there - back).abs() < 1e-9);
        prop_assert!(there >= 0.0);
        prop_assert!(there <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
    }

    #[test]
    fn fallback_matrix_is_exactly_symmetric(coords in prop::collection::vec(coord(), 2..8)) {
        let points: Vec<_> = coords
            .iter()
            .zip(1u64..)
            .map(|(c, id)| point(id, c.y, c.x))
            .collect();
        let matrix = GreatCircleFallback.matrix(&points);
        prop_assert!(matrix.is_symmetric());
        for i in 0..points.len() {
            prop_assert_eq!(matrix.between(i, i), 0.0);
        }
    }
}
