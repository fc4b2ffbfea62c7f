//! 2-opt local search over a nearest-neighbour seed.

use log::debug;
use waypoint_core::{Algorithm, CostMatrix, InvalidInputError, OptimisationResult, Point};

use crate::nearest_neighbour::nearest_neighbour_order;
use crate::tour::{closed_length, tour_from_order};

/// Hard cap on full improvement sweeps.
pub const MAX_PASSES: usize = 1000;

/// Refine the nearest-neighbour tour by segment reversal.
///
/// Each pass considers every pair of non-adjacent edge starts `i < j` with
/// `i` in `1..n - 2`, reverses `tour[i..=j]` and keeps the reversal as soon as
/// it shortens the closed tour. Scanning continues on the updated tour. The
/// search stops after a pass without improvement or [`MAX_PASSES`] passes,
/// so the result is never longer than its seed.
///
/// # Errors
///
/// Returns [`InvalidInputError::TooFewPoints`] for fewer than two points.
///
/// # Panics
///
/// Panics if a point is missing from `matrix`.
///
/// # Examples
///
/// ```
/// use waypoint_core::{Algorithm, GreatCircleFallback, Point};
/// use waypoint_solver::{solve_nearest_neighbour, solve_two_opt};
///
/// let points = vec![
///     Point::new(1, "A", "", 0.0, 0.0),
///     Point::new(2, "B", "", 0.0, 2.0),
///     Point::new(3, "C", "", 1.0, 1.0),
///     Point::new(4, "D", "", 1.0, 3.0),
///     Point::new(5, "E", "", 0.5, 4.0),
/// ];
/// let matrix = GreatCircleFallback.matrix(&points);
///
/// let seed = solve_nearest_neighbour(&points, &matrix)?;
/// let refined = solve_two_opt(&points, &matrix)?;
/// assert_eq!(refined.algorithm_used, Algorithm::TwoOpt);
/// assert!(refined.total_distance_km <= seed.total_distance_km);
/// # Ok::<(), waypoint_core::InvalidInputError>(())
/// ```
pub fn solve_two_opt(
    points: &[Point],
    matrix: &CostMatrix,
) -> Result<OptimisationResult, InvalidInputError> {
    InvalidInputError::check_minimum(points.len())?;
    let aligned = matrix.aligned_to(points);
    let (order, total) = refine(nearest_neighbour_order(&aligned), &aligned);
    Ok(OptimisationResult::for_tour(
        tour_from_order(points, &order),
        total,
        Algorithm::TwoOpt,
    ))
}

/// First-improvement 2-opt over matrix indices.
///
/// Returns the refined order and its closed length.
pub(crate) fn refine(mut tour: Vec<usize>, matrix: &CostMatrix) -> (Vec<usize>, f64) {
    let n = tour.len();
    let mut best = closed_length(&tour, matrix);
    let mut passes = 0;
    let mut improved = true;

    while improved && passes < MAX_PASSES {
        improved = false;
        passes += 1;
        for i in 1..n.saturating_sub(2) {
            for j in i + 2..n {
                reverse_span(&mut tour, i, j);
                let candidate = closed_length(&tour, matrix);
                if candidate < best {
                    debug!("2-opt pass {passes}: reversed {i}..={j}, {best:.3} -> {candidate:.3} km");
                    best = candidate;
                    improved = true;
                } else {
                    reverse_span(&mut tour, i, j);
                }
            }
        }
    }

    debug!("2-opt settled after {passes} passes at {best:.3} km");
    (tour, best)
}

fn reverse_span(tour: &mut [usize], i: usize, j: usize) {
    if let Some(span) = tour.get_mut(i..=j) {
        span.reverse();
    }
}
