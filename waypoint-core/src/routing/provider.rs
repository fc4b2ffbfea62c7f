//! Routing provider trait and the raw shapes it returns.

use geo::Coord;

use crate::PathGeometry;

use super::error::RoutingError;

/// Dense distances in metres, `table[i][j]` from the i-th to the j-th input.
pub type DistanceTable = Vec<Vec<f64>>;

/// A single manoeuvre as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderStep {
    /// Instruction text.
    pub instruction: String,
    /// Step length in metres.
    pub distance_meters: f64,
    /// Step travel time in seconds.
    pub duration_seconds: f64,
    /// Path covered by the step.
    pub geometry: PathGeometry,
}

/// A routed path between two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    /// Total length in metres.
    pub distance_meters: f64,
    /// Total travel time in seconds.
    pub duration_seconds: f64,
    /// Full path geometry.
    pub geometry: PathGeometry,
    /// Manoeuvres in travel order.
    pub steps: Vec<ProviderStep>,
}

/// Fetch road distances and detailed routes from an external service.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use waypoint_core::{DistanceTable, ProviderRoute, RoutingError, RoutingProvider};
///
/// struct Offline;
///
/// impl RoutingProvider for Offline {
///     fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
///         if coords.is_empty() {
///             return Err(RoutingError::EmptyInput);
///         }
///         Err(RoutingError::NetworkError {
///             url: "offline".into(),
///             message: "no network".into(),
///         })
///     }
///
///     fn route(&self, _from: Coord<f64>, _to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
///         Err(RoutingError::NetworkError {
///             url: "offline".into(),
///             message: "no network".into(),
///         })
///     }
/// }
///
/// assert_eq!(Offline.distance_matrix(&[]), Err(RoutingError::EmptyInput));
/// ```
pub trait RoutingProvider {
    /// Return an `n×n` table of distances in metres for `coords`.
    ///
    /// Implementations must return `Err(RoutingError::EmptyInput)` when
    /// `coords` is empty. Rows and columns follow the input order.
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError>;

    /// Return the detailed route from `from` to `to`.
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<ProviderRoute, RoutingError>;
}

impl<P: RoutingProvider + ?Sized> RoutingProvider for &P {
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
        (**self).distance_matrix(coords)
    }

    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
        (**self).route(from, to)
    }
}

impl<P: RoutingProvider + ?Sized> RoutingProvider for Box<P> {
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
        (**self).distance_matrix(coords)
    }

    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
        (**self).route(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::{FailingRoutingProvider, StubRoutingProvider};

    #[rstest]
    fn stub_returns_configured_table() {
        let table = vec![vec![0.0, 1500.0], vec![1500.0, 0.0]];
        let provider = StubRoutingProvider::with_table(table.clone());
        let coords = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];

        let result = provider
            .distance_matrix(&coords)
            .expect("stub should return its table");

        assert_eq!(result, table);
    }

    #[rstest]
    fn references_delegate_to_the_provider() {
        let provider = FailingRoutingProvider;
        let by_ref: &dyn RoutingProvider = &provider;
        let err = by_ref
            .distance_matrix(&[])
            .expect_err("expected EmptyInput for empty slice");
        assert_eq!(err, RoutingError::EmptyInput);
    }
}
