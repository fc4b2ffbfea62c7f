//! Contract for external routing services.
//!
//! A [`RoutingProvider`] supplies road distances between coordinates and a
//! detailed path for a single origin/destination pair. Coordinates use
//! `geo::Coord` with `x = longitude` and `y = latitude`.

mod error;
mod provider;

pub use error::RoutingError;
pub use provider::{DistanceTable, ProviderRoute, ProviderStep, RoutingProvider};
