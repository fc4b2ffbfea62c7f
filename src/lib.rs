//! Facade crate for the Waypoint route optimiser.
//!
//! This crate re-exports the core domain types and exposes the solver and the
//! OSRM routing provider behind feature flags.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "solver")]
//! # {
//! use waypoint_engine::{Algorithm, MemoryAddressStore, Point, RouteOptimiser};
//!
//! let store = MemoryAddressStore::with_points([
//!     Point::new(1, "Depot", "", 0.0, 0.0),
//!     Point::new(2, "Bakery", "", 0.0, 0.1),
//!     Point::new(3, "Florist", "", 0.1, 0.1),
//! ])?;
//! let optimiser = RouteOptimiser::offline(store);
//! let result = optimiser.optimise_route(&[1, 2, 3], Algorithm::TwoOpt)?;
//! assert_eq!(result.segments.len(), 3);
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use waypoint_core::{
    AddressStore, AddressStoreError, Algorithm, CostMatrix, CostMatrixError, DistanceAdapter,
    DistanceSource, GreatCircleFallback, InvalidInputError, MAX_POINTS, MIN_POINTS,
    MemoryAddressStore, OptimisationResult, OptimiseError, OptimiseRequest, Optimiser,
    PathGeometry, Point, RemoteProvider, RouteSegment, RouteSummary, RoutingError,
    RoutingProvider, Step, Tour, haversine_km,
};

#[cfg(feature = "solver")]
pub use waypoint_solver::{RouteAssembler, RouteOptimiser};

#[cfg(feature = "routing-http")]
pub use waypoint_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
