//! OSRM API response types for the Table and Route services.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;
use serde_json::Value;

/// Status code OSRM returns on success.
const OK: &str = "Ok";

/// OSRM Table API response.
///
/// The response contains a distance matrix on success or an error message on
/// failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of road distances in metres.
    ///
    /// `distances[i][j]` is the length of the fastest route from the i-th to
    /// the j-th coordinate. Values are `None` when no route exists.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == OK
    }
}

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM; `"NoRoute"` when the points are disconnected.
    pub code: String,
    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,
    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == OK
    }
}

/// A single route between the requested waypoints.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// GeoJSON `LineString` when requested with `geometries=geojson`.
    pub geometry: Value,
    /// One leg per consecutive waypoint pair.
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// Part of a route between two consecutive waypoints.
#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    /// Manoeuvres in travel order; empty unless requested with `steps=true`.
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

/// A single manoeuvre.
#[derive(Debug, Deserialize)]
pub struct OsrmStep {
    /// Length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// GeoJSON geometry of the step.
    pub geometry: Value,
    /// What the traveller does at the start of the step.
    pub maneuver: Maneuver,
}

/// Manoeuvre metadata attached to a step.
#[derive(Debug, Deserialize)]
pub struct Maneuver {
    /// Manoeuvre type, such as `"turn"` or `"depart"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Direction qualifier, such as `"left"`.
    pub modifier: Option<String>,
    /// Pre-rendered instruction, supplied by some OSRM deployments.
    pub instruction: Option<String>,
}

impl Maneuver {
    /// Human-readable instruction.
    ///
    /// Prefers the service-provided text and otherwise joins the type and
    /// modifier.
    #[must_use]
    pub fn instruction_text(&self) -> String {
        match self.instruction.as_deref().filter(|text| !text.is_empty()) {
            Some(text) => text.to_owned(),
            None => format!("{} {}", self.kind, self.modifier.as_deref().unwrap_or_default())
                .trim()
                .to_owned(),
        }
    }
}
