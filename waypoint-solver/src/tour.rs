//! Closed-tour bookkeeping shared by the solvers.

use std::iter;

use waypoint_core::{CostMatrix, Point, Tour};

/// Length of the closed tour visiting matrix indices in `order`.
///
/// Edges are summed in visiting order, closing edge last. Tours with fewer
/// than two indices have zero length.
///
/// # Panics
///
/// Panics if an index is out of range for `matrix`.
#[must_use]
pub fn closed_length(order: &[usize], matrix: &CostMatrix) -> f64 {
    let Some(first) = order.first() else {
        return 0.0;
    };
    order
        .iter()
        .zip(order.iter().skip(1).chain(iter::once(first)))
        .map(|(&from, &to)| matrix.between(from, to))
        .sum()
}

/// Length of the closed tour visiting `points` in the given order.
///
/// # Panics
///
/// Panics if a point is missing from `matrix`.
#[must_use]
pub fn closed_tour_distance(points: &[Point], matrix: &CostMatrix) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    points
        .iter()
        .zip(points.iter().skip(1).chain(iter::once(first)))
        .map(|(from, to)| matrix.distance(from.id, to.id))
        .sum()
}

/// Materialise an index order over `points`.
///
/// Indices come from `0..points.len()`.
pub(crate) fn tour_from_order(points: &[Point], order: &[usize]) -> Tour {
    order
        .iter()
        .filter_map(|&index| points.get(index).cloned())
        .collect()
}
