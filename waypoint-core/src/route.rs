//! Optimised tours and their turn-by-turn description.
//!
//! An [`OptimisationResult`] carries the visiting order chosen by a solver,
//! aggregate metrics and one [`RouteSegment`] per tour edge, closing edge
//! included.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::Point;

/// Travel-time heuristic shared by solvers and synthetic segments.
pub const MINUTES_PER_KM: f64 = 2.0;

/// Estimate whole minutes of travel for `distance_km` at [`MINUTES_PER_KM`].
///
/// # Examples
/// ```
/// use waypoint_core::estimated_minutes;
///
/// assert_eq!(estimated_minutes(10.2), 20);
/// assert_eq!(estimated_minutes(10.3), 21);
/// ```
pub fn estimated_minutes(distance_km: f64) -> u32 {
    (distance_km * MINUTES_PER_KM).round() as u32
}

/// An ordered, implicitly closed visiting sequence.
pub type Tour = Vec<Point>;

/// Tour construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Greedy nearest-neighbour construction.
    #[serde(rename = "NearestNeighbor", alias = "nearest-neighbor")]
    NearestNeighbor,
    /// Nearest-neighbour seed refined by 2-opt local search.
    #[default]
    #[serde(rename = "TwoOpt", alias = "2-opt")]
    TwoOpt,
}

impl Algorithm {
    /// Canonical wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "NearestNeighbor",
            Self::TwoOpt => "TwoOpt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?} (expected NearestNeighbor or TwoOpt)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NearestNeighbor" | "nearest-neighbor" => Ok(Self::NearestNeighbor),
            "TwoOpt" | "2-opt" => Ok(Self::TwoOpt),
            other => Err(ParseAlgorithmError(other.to_owned())),
        }
    }
}

/// Opaque encoded path, stored as GeoJSON `LineString` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathGeometry(String);

impl PathGeometry {
    /// Wrap an already-encoded path.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encode a provider-supplied GeoJSON value.
    pub fn from_geojson(value: &serde_json::Value) -> Self {
        Self(value.to_string())
    }

    /// A two-vertex line from `from` to `to`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use waypoint_core::PathGeometry;
    ///
    /// let path = PathGeometry::straight_line(Coord { x: 1.0, y: 2.0 }, Coord { x: 3.0, y: 4.0 });
    /// assert_eq!(
    ///     path.as_str(),
    ///     r#"{"coordinates":[[1.0,2.0],[3.0,4.0]],"type":"LineString"}"#
    /// );
    /// ```
    pub fn straight_line(from: Coord<f64>, to: Coord<f64>) -> Self {
        let line = LineString::from(vec![from, to]);
        let coordinates: Vec<[f64; 2]> = line.coords().map(|c| [c.x, c.y]).collect();
        Self::from_geojson(&json!({ "type": "LineString", "coordinates": coordinates }))
    }

    /// Encoded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single manoeuvre within a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Human-readable instruction.
    pub instruction_text: String,
    /// Length of the step in metres.
    pub distance_meters: u32,
    /// Travel time for the step in seconds.
    pub duration_seconds: u32,
    /// Path covered by the step.
    pub step_geometry: PathGeometry,
}

/// One directed edge of the final tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    /// Edge origin.
    pub from: Point,
    /// Edge destination.
    pub to: Point,
    /// Distance in kilometres, one decimal place.
    pub distance_km: f64,
    /// Travel time in whole minutes.
    pub duration_minutes: u32,
    /// Full path of the edge.
    pub path_geometry: PathGeometry,
    /// Turn-by-turn instructions in travel order.
    pub steps: Vec<Step>,
}

/// Outcome of optimising a set of points.
///
/// Solvers fill the tour, distance and time fields; the route assembler adds
/// savings metrics and segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimisationResult {
    /// Visiting order; the last point connects back to the first.
    pub ordered_points: Tour,
    /// Closed-tour distance in kilometres.
    pub total_distance_km: f64,
    /// Estimated travel time in minutes.
    pub estimated_time_minutes: u32,
    /// Strategy that produced the tour.
    pub algorithm_used: Algorithm,
    /// Distance saved relative to the input order. May be negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_distance_km: Option<f64>,
    /// Saved distance as a percentage of the input-order distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_percent: Option<f64>,
    /// Detailed path for each tour edge.
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
}

impl OptimisationResult {
    /// Result for a finished tour without savings metrics or segments.
    pub fn for_tour(ordered_points: Tour, total_distance_km: f64, algorithm: Algorithm) -> Self {
        Self {
            ordered_points,
            total_distance_km,
            estimated_time_minutes: estimated_minutes(total_distance_km),
            algorithm_used: algorithm,
            saved_distance_km: None,
            efficiency_percent: None,
            segments: Vec::new(),
        }
    }

    /// Compact record of the tour suitable for storage.
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            name: None,
            algorithm: self.algorithm_used,
            total_distance_km: self.total_distance_km,
            estimated_time_minutes: self.estimated_time_minutes,
            address_order: self.ordered_points.iter().map(|point| point.id).collect(),
        }
    }
}

/// Persistable digest of an [`OptimisationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Optional caller-chosen label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Strategy that produced the tour.
    pub algorithm: Algorithm,
    /// Closed-tour distance in kilometres.
    pub total_distance_km: f64,
    /// Estimated travel time in minutes.
    pub estimated_time_minutes: u32,
    /// Point ids in visiting order.
    pub address_order: Vec<u64>,
}

impl RouteSummary {
    /// Attach a label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
