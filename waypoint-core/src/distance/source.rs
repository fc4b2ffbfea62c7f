//! Distance sources: remote routing and the great-circle fallback.

use crate::{
    CostMatrix, PathGeometry, Point, ProviderRoute, RouteSegment, RoutingError, RoutingProvider,
    MINUTES_PER_KM, Step, estimated_minutes,
};

use super::haversine::haversine_km;

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// A capability that prices tour edges.
///
/// Implementations must return matrices whose rows follow the order of
/// `points`, in kilometres.
pub trait DistanceSource {
    /// Pairwise distances for `points`.
    fn cost_matrix(&self, points: &[Point]) -> Result<CostMatrix, RoutingError>;

    /// Detailed path and instructions for the directed edge `from -> to`.
    fn segment(&self, from: &Point, to: &Point) -> Result<RouteSegment, RoutingError>;
}

/// Distances from an external [`RoutingProvider`].
#[derive(Debug, Clone)]
pub struct RemoteProvider<P> {
    provider: P,
}

impl<P: RoutingProvider> RemoteProvider<P> {
    /// Wrap `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Borrow the wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: RoutingProvider> DistanceSource for RemoteProvider<P> {
    fn cost_matrix(&self, points: &[Point]) -> Result<CostMatrix, RoutingError> {
        let coords: Vec<_> = points.iter().map(Point::coord).collect();
        let table = self.provider.distance_matrix(&coords)?;
        let rows = table
            .into_iter()
            .map(|row| row.into_iter().map(|meters| meters / METERS_PER_KM).collect())
            .collect();
        CostMatrix::from_rows(points, rows).map_err(|err| RoutingError::ParseError {
            message: err.to_string(),
        })
    }

    fn segment(&self, from: &Point, to: &Point) -> Result<RouteSegment, RoutingError> {
        let route = self.provider.route(from.coord(), to.coord())?;
        convert_route(from, to, route)
    }
}

fn convert_route(from: &Point, to: &Point, route: ProviderRoute) -> Result<RouteSegment, RoutingError> {
    let meters = require_measure(route.distance_meters, "route distance")?;
    let seconds = require_measure(route.duration_seconds, "route duration")?;
    let steps = route
        .steps
        .into_iter()
        .map(|step| {
            Ok(Step {
                instruction_text: step.instruction,
                distance_meters: whole(require_measure(step.distance_meters, "step distance")?),
                duration_seconds: whole(require_measure(step.duration_seconds, "step duration")?),
                step_geometry: step.geometry,
            })
        })
        .collect::<Result<Vec<_>, RoutingError>>()?;

    Ok(RouteSegment {
        from: from.clone(),
        to: to.clone(),
        distance_km: one_decimal(meters / METERS_PER_KM),
        duration_minutes: whole(seconds / SECONDS_PER_MINUTE),
        path_geometry: route.geometry,
        steps,
    })
}

fn require_measure(value: f64, field: &str) -> Result<f64, RoutingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RoutingError::ParseError {
            message: format!("{field} must be a non-negative number, got {value}"),
        })
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn whole(value: f64) -> u32 {
    // `as` saturates; inputs are already checked to be finite and non-negative.
    value.round() as u32
}

/// Straight-line distances on a sphere. Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreatCircleFallback;

impl GreatCircleFallback {
    /// Symmetric haversine matrix with a zero diagonal.
    pub fn matrix(&self, points: &[Point]) -> CostMatrix {
        CostMatrix::from_fn(points, |from, to| {
            if from.id == to.id {
                return 0.0;
            }
            // Evaluate each unordered pair in one direction so both halves
            // of the matrix hold identical bits.
            let (a, b) = if from.id < to.id { (from, to) } else { (to, from) };
            haversine_km(a.coord(), b.coord())
        })
    }

    /// Single-step segment along the straight line between the points.
    pub fn straight_segment(&self, from: &Point, to: &Point) -> RouteSegment {
        let km = haversine_km(from.coord(), to.coord());
        let geometry = PathGeometry::straight_line(from.coord(), to.coord());
        RouteSegment {
            from: from.clone(),
            to: to.clone(),
            distance_km: one_decimal(km),
            duration_minutes: estimated_minutes(km),
            path_geometry: geometry.clone(),
            steps: vec![Step {
                instruction_text: format!("Drive to {}", to.name),
                distance_meters: whole(km * METERS_PER_KM),
                duration_seconds: whole(km * MINUTES_PER_KM * SECONDS_PER_MINUTE),
                step_geometry: geometry,
            }],
        }
    }
}

impl DistanceSource for GreatCircleFallback {
    fn cost_matrix(&self, points: &[Point]) -> Result<CostMatrix, RoutingError> {
        Ok(self.matrix(points))
    }

    fn segment(&self, from: &Point, to: &Point) -> Result<RouteSegment, RoutingError> {
        Ok(self.straight_segment(from, to))
    }
}

impl<S: DistanceSource + ?Sized> DistanceSource for &S {
    fn cost_matrix(&self, points: &[Point]) -> Result<CostMatrix, RoutingError> {
        (**self).cost_matrix(points)
    }

    fn segment(&self, from: &Point, to: &Point) -> Result<RouteSegment, RoutingError> {
        (**self).segment(from, to)
    }
}
