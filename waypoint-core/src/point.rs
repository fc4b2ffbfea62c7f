use geo::Coord;
use serde::{Deserialize, Serialize};

/// A named geographic location that can be placed on a tour.
///
/// Coordinates are WGS84 degrees. Identifiers are assigned by the address
/// store and stay stable for the duration of an optimisation run.
///
/// # Examples
/// ```
/// use waypoint_core::Point;
///
/// let point = Point::new(1, "Depot", "1 High Street", 51.5, -0.1);
///
/// assert_eq!(point.id, 1);
/// assert_eq!(point.coord().x, -0.1);
/// assert_eq!(point.coord().y, 51.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Unique identifier.
    pub id: u64,
    /// Human-readable label, used in turn instructions.
    pub name: String,
    /// Postal address text.
    #[serde(default)]
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Point {
    /// Construct a `Point`.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::Point;
    ///
    /// let point = Point::new(7, "Warehouse", "", 0.0, 0.0);
    /// assert_eq!(point.name, "Warehouse");
    /// ```
    pub fn new(
        id: u64,
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
        }
    }

    /// Position as a `geo` coordinate with `x = longitude` and `y = latitude`.
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}
