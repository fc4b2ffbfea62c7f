//! Tour construction and refinement for Waypoint.
//!
//! This crate provides the heuristics that order a small set of points into
//! a short closed tour, and [`RouteOptimiser`], the default implementation of
//! the [`Optimiser`](waypoint_core::Optimiser) trait.
//!
//! The pipeline runs strictly forward: resolve ids through an
//! [`AddressStore`](waypoint_core::AddressStore), build a cost matrix with the
//! [`DistanceAdapter`](waypoint_core::DistanceAdapter), seed a tour with
//! [`solve_nearest_neighbour`], optionally refine it with [`solve_two_opt`],
//! then let the [`RouteAssembler`] attach savings metrics and one detailed
//! segment per tour edge.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assemble;
mod nearest_neighbour;
mod optimiser;
mod tour;
mod two_opt;

pub use assemble::RouteAssembler;
pub use nearest_neighbour::solve_nearest_neighbour;
pub use optimiser::RouteOptimiser;
pub use tour::{closed_length, closed_tour_distance};
pub use two_opt::{MAX_PASSES, solve_two_opt};
