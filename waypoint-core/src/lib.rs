//! Core domain types for the Waypoint route optimiser.
//!
//! The crate defines the vocabulary shared by solvers, data adapters and the
//! CLI: [`Point`], [`CostMatrix`], [`OptimisationResult`], and the traits at
//! the system's seams ([`AddressStore`], [`RoutingProvider`],
//! [`DistanceSource`] and [`Optimiser`]). It also hosts the
//! [`DistanceAdapter`], which prices tour edges with a remote provider and
//! degrades to great-circle estimates when that provider fails.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod matrix;
mod optimise;
mod point;
mod route;
mod routing;
mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{
    DistanceAdapter, DistanceSource, EARTH_RADIUS_KM, GreatCircleFallback, RemoteProvider,
    haversine_km,
};
pub use matrix::{CostMatrix, CostMatrixError};
pub use optimise::{
    InvalidInputError, MAX_POINTS, MIN_POINTS, OptimiseError, OptimiseRequest, Optimiser,
};
pub use point::Point;
pub use route::{
    Algorithm, MINUTES_PER_KM, OptimisationResult, ParseAlgorithmError, PathGeometry,
    RouteSegment, RouteSummary, Step, Tour, estimated_minutes,
};
pub use routing::{DistanceTable, ProviderRoute, ProviderStep, RoutingError, RoutingProvider};
pub use store::{AddressStore, AddressStoreError, MemoryAddressStore};
