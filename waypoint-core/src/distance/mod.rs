//! Turn point sets into cost matrices and tour edges into detailed segments.
//!
//! Distances come from a [`DistanceSource`]. Two sources exist: a
//! [`RemoteProvider`] wrapping any [`RoutingProvider`](crate::RoutingProvider),
//! and the always-available [`GreatCircleFallback`]. The [`DistanceAdapter`]
//! tries its primary source and silently substitutes the fallback on failure,
//! so solver code never sees provider errors.

mod adapter;
mod haversine;
mod source;

pub use adapter::DistanceAdapter;
pub use haversine::{EARTH_RADIUS_KM, haversine_km};
pub use source::{DistanceSource, GreatCircleFallback, RemoteProvider};
