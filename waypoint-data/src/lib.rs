//! External data adapters for the Waypoint engine.
//!
//! Responsibilities:
//! - Implement the routing contracts defined in `waypoint-core` against
//!   real services.
//! - Encapsulate wire formats and map service failures onto
//!   [`RoutingError`](waypoint_core::RoutingError).
//!
//! Boundaries:
//! - Do not encode domain rules (live in `waypoint-core`).
//! - Do not decide fallbacks; the distance adapter in `waypoint-core` does.
//!
//! Invariants:
//! - No global mutable state.

pub mod routing;
