//! HTTP routing provider backed by OSRM.
//!
//! This module provides [`HttpRoutingProvider`], an implementation of
//! [`waypoint_core::RoutingProvider`] that fetches distance tables from the
//! OSRM Table service and turn-by-turn routes from the Route service.
//!
//! # Architecture
//!
//! The [`RoutingProvider`](waypoint_core::RoutingProvider) trait is
//! synchronous so the optimiser stays embeddable in synchronous contexts.
//! The provider blocks on async HTTP calls internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use waypoint_core::RoutingProvider;
//! use waypoint_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
//!
//! let config = HttpRoutingProviderConfig::new("http://localhost:5000")
//!     .with_profile("cycling")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpRoutingProvider::with_config(config)?;
//!
//! let coords = [Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }];
//! let table = provider.distance_matrix(&coords)?;
//! let route = provider.route(coords[0], coords[1])?;
//! println!("{} m by table, {} m by route", table[0][1], route.distance_meters);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRoutingProvider,
    HttpRoutingProviderConfig, ProviderBuildError,
};
