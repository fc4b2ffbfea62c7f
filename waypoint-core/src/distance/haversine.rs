use geo::Coord;

/// Mean Earth radius used for great-circle estimates.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two WGS84 coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypoint_core::haversine_km;
///
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let km = haversine_km(london, paris);
/// assert!((km - 343.5).abs() < 1.0);
/// ```
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lon = (to.x - from.x).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for near-antipodal pairs.
    let a = a.min(1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
