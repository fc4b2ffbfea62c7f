//! Deterministic fixtures and routing doubles for unit and behaviour tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use geo::Coord;

use crate::{DistanceTable, Point, ProviderRoute, RoutingError, RoutingProvider};

/// A point named `Point {id}` with an empty address.
pub fn point(id: u64, latitude: f64, longitude: f64) -> Point {
    Point::new(id, format!("Point {id}"), "", latitude, longitude)
}

/// Four points on a one-degree square at the equator, indexed clockwise.
///
/// Ids are `1..=4`, named `A` to `D`. Walking the perimeter is optimal; the
/// input order `A, C, B, D` crosses both diagonals.
pub fn square_points() -> [Point; 4] {
    [
        Point::new(1, "A", "", 0.0, 0.0),
        Point::new(2, "B", "", 0.0, 1.0),
        Point::new(3, "C", "", 1.0, 1.0),
        Point::new(4, "D", "", 1.0, 0.0),
    ]
}

fn unreachable(url: &str) -> RoutingError {
    RoutingError::NetworkError {
        url: url.to_owned(),
        message: "connection refused".to_owned(),
    }
}

/// Provider whose every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRoutingProvider;

impl RoutingProvider for FailingRoutingProvider {
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
        if coords.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        Err(unreachable("stub://table"))
    }

    fn route(&self, _from: Coord<f64>, _to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
        Err(unreachable("stub://route"))
    }
}

/// Provider replaying canned responses.
///
/// Whatever is not configured fails with a network error.
#[derive(Debug, Default, Clone)]
pub struct StubRoutingProvider {
    table: Option<DistanceTable>,
    route: Option<ProviderRoute>,
    error: Option<RoutingError>,
}

impl StubRoutingProvider {
    /// Provider returning `table` for every matrix request.
    pub fn with_table(table: DistanceTable) -> Self {
        Self {
            table: Some(table),
            ..Self::default()
        }
    }

    /// Provider returning `route` for every route request.
    pub fn with_route(route: ProviderRoute) -> Self {
        Self {
            route: Some(route),
            ..Self::default()
        }
    }

    /// Provider failing every request with `error`.
    pub fn with_error(error: RoutingError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Add a canned route to an existing stub.
    #[must_use]
    pub fn and_route(mut self, route: ProviderRoute) -> Self {
        self.route = Some(route);
        self
    }
}

impl RoutingProvider for StubRoutingProvider {
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
        if coords.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.table.clone().ok_or_else(|| unreachable("stub://table"))
    }

    fn route(&self, _from: Coord<f64>, _to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.route.clone().ok_or_else(|| unreachable("stub://route"))
    }
}

/// Provider that records how often it is called before delegating.
#[derive(Debug, Default)]
pub struct CountingRoutingProvider<P = FailingRoutingProvider> {
    inner: P,
    matrix_calls: AtomicUsize,
    route_calls: AtomicUsize,
}

impl<P> CountingRoutingProvider<P> {
    /// Wrap `inner`.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            matrix_calls: AtomicUsize::new(0),
            route_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `distance_matrix` calls so far.
    pub fn matrix_calls(&self) -> usize {
        self.matrix_calls.load(Ordering::SeqCst)
    }

    /// Number of `route` calls so far.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    /// Total calls of either kind.
    pub fn total_calls(&self) -> usize {
        self.matrix_calls() + self.route_calls()
    }
}

impl<P: RoutingProvider> RoutingProvider for CountingRoutingProvider<P> {
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
        self.matrix_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.distance_matrix(coords)
    }

    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.route(from, to)
    }
}
