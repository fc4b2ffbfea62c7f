//! Savings metrics and per-edge segments for a finished tour.

use waypoint_core::{
    Algorithm, CostMatrix, DistanceAdapter, DistanceSource, InvalidInputError,
    OptimisationResult, Point, RouteSegment,
};

use crate::tour::closed_tour_distance;
use crate::{solve_nearest_neighbour, solve_two_opt};

/// Turns an optimised tour into a complete [`OptimisationResult`].
///
/// The assembler compares the optimised distance with the closed tour in
/// input order and fetches one detailed segment per tour edge from the
/// distance adapter, closing edge included.
#[derive(Debug)]
pub struct RouteAssembler<'a, S> {
    adapter: &'a DistanceAdapter<S>,
}

impl<'a, S: DistanceSource> RouteAssembler<'a, S> {
    /// Assembler fetching segments through `adapter`.
    pub const fn new(adapter: &'a DistanceAdapter<S>) -> Self {
        Self { adapter }
    }

    /// Optimise `points` with `algorithm` and attach savings and segments.
    ///
    /// `saved_distance_km` is the input-order distance minus the optimised
    /// distance and is negative when the heuristic loses to the input order.
    /// `efficiency_percent` expresses it relative to the input-order
    /// distance, or is zero when that distance is zero.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::TooFewPoints`] for fewer than two points.
    ///
    /// # Panics
    ///
    /// Panics if a point is missing from `matrix`.
    pub fn assemble(
        &self,
        points: &[Point],
        matrix: &CostMatrix,
        algorithm: Algorithm,
    ) -> Result<OptimisationResult, InvalidInputError> {
        let mut result = match algorithm {
            Algorithm::NearestNeighbor => solve_nearest_neighbour(points, matrix)?,
            Algorithm::TwoOpt => solve_two_opt(points, matrix)?,
        };
        let original = closed_tour_distance(points, matrix);
        let (saved, efficiency) = savings(original, result.total_distance_km);
        result.saved_distance_km = Some(saved);
        result.efficiency_percent = Some(efficiency);
        result.segments = self.segments(&result.ordered_points);
        Ok(result)
    }

    /// One segment per directed edge of the closed tour, in tour order.
    pub fn segments(&self, tour: &[Point]) -> Vec<RouteSegment> {
        tour.iter()
            .zip(tour.iter().skip(1).chain(tour.first()))
            .map(|(from, to)| self.adapter.detailed_segment(from, to))
            .collect()
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "savings are differences and ratios of kilometre totals"
)]
fn savings(original_km: f64, optimised_km: f64) -> (f64, f64) {
    let saved = original_km - optimised_km;
    let efficiency = if original_km > 0.0 {
        saved / original_km * 100.0
    } else {
        0.0
    };
    (saved, efficiency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use waypoint_core::test_support::{FailingRoutingProvider, point, square_points};
    use waypoint_core::{GreatCircleFallback, RemoteProvider};

    #[fixture]
    fn adapter() -> DistanceAdapter<RemoteProvider<FailingRoutingProvider>> {
        DistanceAdapter::remote(FailingRoutingProvider)
    }

    #[rstest]
    #[case(Algorithm::NearestNeighbor)]
    #[case(Algorithm::TwoOpt)]
    fn crossing_input_order_reports_positive_savings(
        #[case] algorithm: Algorithm,
        adapter: DistanceAdapter<RemoteProvider<FailingRoutingProvider>>,
    ) {
        let [a, b, c, d] = square_points();
        let points = vec![a, c, b, d];
        let matrix = GreatCircleFallback.matrix(&points);
        let assembler = RouteAssembler::new(&adapter);

        let result = assembler
            .assemble(&points, &matrix, algorithm)
            .expect("four points");

        let ids: Vec<_> = result.ordered_points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let original = closed_tour_distance(&points, &matrix);
        let saved = result.saved_distance_km.expect("savings set");
        assert!((saved - (original - result.total_distance_km)).abs() < 1e-9);
        assert!(saved > 90.0);
        let efficiency = result.efficiency_percent.expect("efficiency set");
        assert!((efficiency - saved / original * 100.0).abs() < 1e-9);
        assert_eq!(result.algorithm_used, algorithm);
    }

    #[rstest]
    fn segments_close_the_loop(adapter: DistanceAdapter<RemoteProvider<FailingRoutingProvider>>) {
        let points = square_points();
        let matrix = GreatCircleFallback.matrix(&points);

        let result = RouteAssembler::new(&adapter)
            .assemble(&points, &matrix, Algorithm::TwoOpt)
            .expect("four points");

        assert_eq!(result.segments.len(), points.len());
        for (segment, window) in result
            .segments
            .iter()
            .zip(result.ordered_points.iter().zip(result.ordered_points.iter().cycle().skip(1)))
        {
            assert_eq!(&segment.from, window.0);
            assert_eq!(&segment.to, window.1);
        }
        let last = result.segments.last().expect("segments present");
        assert_eq!(Some(&last.to), result.ordered_points.first());
    }

    #[rstest]
    fn negative_savings_are_reported_unclamped() {
        assert_eq!(savings(10.0, 12.5), (-2.5, -25.0));
    }

    #[rstest]
    fn zero_length_input_has_zero_efficiency() {
        let adapter = DistanceAdapter::offline();
        let points = vec![point(1, 0.0, 0.0), point(2, 0.0, 0.0)];
        let matrix = GreatCircleFallback.matrix(&points);

        let result = RouteAssembler::new(&adapter)
            .assemble(&points, &matrix, Algorithm::NearestNeighbor)
            .expect("two points");

        assert_eq!(result.saved_distance_km, Some(0.0));
        assert_eq!(result.efficiency_percent, Some(0.0));
        assert_eq!(result.segments.len(), 2);
    }
}
