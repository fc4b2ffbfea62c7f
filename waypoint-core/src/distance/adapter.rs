//! Primary/fallback selection for distance lookups.

use log::warn;

use crate::{CostMatrix, InvalidInputError, MIN_POINTS, Point, RouteSegment, RoutingProvider};

use super::source::{DistanceSource, GreatCircleFallback, RemoteProvider};

/// Distance lookups that never fail because of the routing service.
///
/// The adapter asks its primary [`DistanceSource`] first. Any error is
/// logged and replaced by the [`GreatCircleFallback`] result, so the only
/// error callers can observe is a point set that is too small.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{DistanceAdapter, Point};
///
/// let adapter = DistanceAdapter::offline();
/// let points = vec![
///     Point::new(1, "A", "", 0.0, 0.0),
///     Point::new(2, "B", "", 0.0, 1.0),
/// ];
///
/// let matrix = adapter.build_cost_matrix(&points)?;
/// assert!(matrix.distance(1, 2) > 111.0);
/// # Ok::<(), waypoint_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DistanceAdapter<S = GreatCircleFallback> {
    primary: S,
    fallback: GreatCircleFallback,
}

impl DistanceAdapter<GreatCircleFallback> {
    /// Adapter that never contacts a routing service.
    pub const fn offline() -> Self {
        Self::new(GreatCircleFallback)
    }
}

impl<P: RoutingProvider> DistanceAdapter<RemoteProvider<P>> {
    /// Adapter backed by `provider`, with great-circle fallback.
    pub const fn remote(provider: P) -> Self {
        Self::new(RemoteProvider::new(provider))
    }
}

impl<S> DistanceAdapter<S> {
    /// Adapter with an explicit primary source.
    pub const fn new(primary: S) -> Self {
        Self {
            primary,
            fallback: GreatCircleFallback,
        }
    }

    /// Borrow the primary source.
    pub const fn primary(&self) -> &S {
        &self.primary
    }
}

impl<S: DistanceSource> DistanceAdapter<S> {
    /// Build the cost matrix for `points`.
    ///
    /// Returns an error only when fewer than two points are supplied.
    pub fn build_cost_matrix(&self, points: &[Point]) -> Result<CostMatrix, InvalidInputError> {
        InvalidInputError::check_minimum(points.len())?;
        Ok(self.primary.cost_matrix(points).unwrap_or_else(|err| {
            warn!(
                "distance matrix for {} points unavailable ({err}); using great-circle distances",
                points.len()
            );
            self.fallback.matrix(points)
        }))
    }

    /// Detailed segment for the directed edge `from -> to`.
    pub fn detailed_segment(&self, from: &Point, to: &Point) -> RouteSegment {
        self.primary.segment(from, to).unwrap_or_else(|err| {
            warn!(
                "route {} -> {} unavailable ({err}); using straight-line segment",
                from.id, to.id
            );
            self.fallback.straight_segment(from, to)
        })
    }
}

impl Default for DistanceAdapter<GreatCircleFallback> {
    fn default() -> Self {
        Self::offline()
    }
}
