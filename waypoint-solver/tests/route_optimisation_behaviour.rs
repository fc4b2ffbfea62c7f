//! Behavioural tests for `RouteOptimiser` using rstest-bdd.

#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use waypoint_core::test_support::{CountingRoutingProvider, point, square_points};
use waypoint_core::{
    Algorithm, DistanceAdapter, InvalidInputError, MemoryAddressStore, OptimisationResult,
    OptimiseError, OptimiseRequest, Optimiser, Point,
};
use waypoint_solver::RouteOptimiser;

#[derive(Debug, Default)]
struct OptimiseWorld {
    addresses: RefCell<Vec<Point>>,
    provider: CountingRoutingProvider,
    outcome: RefCell<Option<Result<OptimisationResult, OptimiseError>>>,
}

impl OptimiseWorld {
    fn run(&self, ids: Vec<u64>, algorithm: Algorithm) {
        let store = MemoryAddressStore::with_points(self.addresses.borrow().clone())
            .expect("scenario addresses are unique");
        let optimiser = RouteOptimiser::new(store, DistanceAdapter::remote(&self.provider));
        let outcome = optimiser.optimise(&OptimiseRequest::new(ids, algorithm));
        self.outcome.replace(Some(outcome));
    }

    fn expect_result(&self) -> OptimisationResult {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected the optimisation to succeed")
    }

    fn expect_error(&self) -> OptimiseError {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect_err("expected the optimisation to fail")
    }
}

#[fixture]
fn world() -> OptimiseWorld {
    OptimiseWorld::default()
}

#[given("an address store holding the unit square")]
fn given_square(world: &OptimiseWorld) {
    world.addresses.replace(square_points().to_vec());
}

#[given("an address store holding twenty-one addresses")]
fn given_twenty_one(world: &OptimiseWorld) {
    let addresses = (1..=21_u32)
        .map(|n| point(u64::from(n), 0.0, f64::from(n)))
        .collect();
    world.addresses.replace(addresses);
}

#[given("a routing provider that cannot be reached")]
fn given_unreachable_provider(world: &OptimiseWorld) {
    // The default counting provider wraps a failing provider.
    assert_eq!(world.provider.total_calls(), 0);
}

#[when("I optimise addresses 1, 3, 2 and 4 with TwoOpt")]
fn when_square_two_opt(world: &OptimiseWorld) {
    world.run(vec![1, 3, 2, 4], Algorithm::TwoOpt);
}

#[when("I optimise addresses 1, 3, 2 and 4 with NearestNeighbor")]
fn when_square_nearest(world: &OptimiseWorld) {
    world.run(vec![1, 3, 2, 4], Algorithm::NearestNeighbor);
}

#[when("I optimise all twenty-one addresses")]
fn when_twenty_one(world: &OptimiseWorld) {
    world.run((1..=21).collect(), Algorithm::TwoOpt);
}

#[when("I optimise addresses 1 and 42")]
fn when_unknown(world: &OptimiseWorld) {
    world.run(vec![1, 42], Algorithm::TwoOpt);
}

#[then("the tour visits 1, 2, 3 and 4")]
fn then_perimeter(world: &OptimiseWorld) {
    let result = world.expect_result();
    let ids: Vec<_> = result.ordered_points.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[then("the route has one segment per address")]
fn then_segments(world: &OptimiseWorld) {
    let result = world.expect_result();
    assert_eq!(result.segments.len(), result.ordered_points.len());
    assert!(result.segments.iter().all(|s| s.steps.len() == 1));
}

#[then("the distance saved is positive")]
fn then_saved(world: &OptimiseWorld) {
    let result = world.expect_result();
    assert!(result.saved_distance_km.expect("saved distance set") > 0.0);
}

#[then("the algorithm used is NearestNeighbor")]
fn then_nearest(world: &OptimiseWorld) {
    assert_eq!(world.expect_result().algorithm_used, Algorithm::NearestNeighbor);
}

#[then("the request is rejected as invalid input")]
fn then_invalid(world: &OptimiseWorld) {
    assert_eq!(
        world.expect_error(),
        OptimiseError::InvalidInput(InvalidInputError::TooManyPoints {
            actual: 21,
            maximum: 20
        })
    );
}

#[then("the request fails because address 42 was not found")]
fn then_not_found(world: &OptimiseWorld) {
    assert_eq!(world.expect_error(), OptimiseError::NotFound { id: 42 });
}

#[then("the routing provider was never contacted")]
fn then_no_contact(world: &OptimiseWorld) {
    assert_eq!(world.provider.total_calls(), 0);
}

#[scenario(path = "tests/features/route_optimisation.feature", index = 0)]
fn square_perimeter(world: OptimiseWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_optimisation.feature", index = 1)]
fn nearest_neighbour_requested(world: OptimiseWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_optimisation.feature", index = 2)]
fn too_many_addresses(world: OptimiseWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_optimisation.feature", index = 3)]
fn unknown_address(world: OptimiseWorld) {
    let _ = world;
}
