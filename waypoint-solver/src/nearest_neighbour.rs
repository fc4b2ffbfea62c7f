//! Greedy tour construction.

use waypoint_core::{Algorithm, CostMatrix, InvalidInputError, OptimisationResult, Point};

use crate::tour::{closed_length, tour_from_order};

/// Build a closed tour by always moving to the nearest unvisited point.
///
/// The tour starts at `points[0]`. When several candidates are equally near,
/// the one listed first in `points` wins. The result carries the closed-tour
/// distance and the 2 min/km time estimate; savings and segments are left
/// for the [`RouteAssembler`](crate::RouteAssembler).
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
/// use waypoint_core::{CostMatrix, Point};
/// use waypoint_solver::solve_nearest_neighbour;
///
/// let points = vec![
///     Point::new(1, "Depot", "", 0.0, 0.0),
///     Point::new(2, "Far", "", 0.0, 3.0),
///     Point::new(3, "Near", "", 0.0, 1.0),
/// ];
/// let matrix = CostMatrix::from_fn(&points, |a, b| (a.longitude - b.longitude).abs());
///
/// let result = solve_nearest_neighbour(&points, &matrix)?;
/// let order: Vec<_> = result.ordered_points.iter().map(|p| p.id).collect();
/// assert_eq!(order, vec![1, 3, 2]);
/// assert_eq!(result.total_distance_km, 6.0);
/// # Ok::<(), waypoint_core::InvalidInputError>(())
/// ```
pub fn solve_nearest_neighbour(
    points: &[Point],
    matrix: &CostMatrix,
) -> Result<OptimisationResult, InvalidInputError> {
    InvalidInputError::check_minimum(points.len())?;
    let aligned = matrix.aligned_to(points);
    let order = nearest_neighbour_order(&aligned);
    let total = closed_length(&order, &aligned);
    Ok(OptimisationResult::for_tour(
        tour_from_order(points, &order),
        total,
        Algorithm::NearestNeighbor,
    ))
}

/// Greedy visiting order over matrix indices, starting at index 0.
pub(crate) fn nearest_neighbour_order(matrix: &CostMatrix) -> Vec<usize> {
    let mut remaining: Vec<usize> = (1..matrix.len()).collect();
    let mut order = Vec::with_capacity(matrix.len());
    let mut current = 0;
    order.push(current);
    while let Some(position) = nearest(&remaining, current, matrix) {
        current = remaining.remove(position);
        order.push(current);
    }
    order
}

/// Position within `remaining` of the cheapest successor to `from`.
fn nearest(remaining: &[usize], from: usize, matrix: &CostMatrix) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, &candidate) in remaining.iter().enumerate() {
        let cost = matrix.between(from, candidate);
        // Strict comparison keeps the first of equally near candidates.
        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((position, cost));
        }
    }
    best.map(|(position, _)| position)
}
