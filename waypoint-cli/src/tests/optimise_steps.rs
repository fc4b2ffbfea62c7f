//! Behaviour-driven step definitions driving the optimise CLI scenarios.

use super::helpers::{OfflineOptimiserBuilder, Workspace};
use super::*;
use crate::optimise::run_optimise_with;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use waypoint_core::{OptimisationResult, OptimiseError};

#[derive(Debug)]
struct OptimiseWorld {
    workspace: Workspace,
    include_request: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl OptimiseWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            include_request: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["waypoint".to_owned(), "optimise".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.workspace.request.as_str().to_owned());
        }
        argv.extend([
            format!("--{ARG_ADDRESSES}"),
            self.workspace.addresses.as_str().to_owned(),
            format!("--{ARG_OFFLINE}"),
        ]);
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> OptimiseWorld {
    OptimiseWorld::new()
}

#[given("the square addresses exist on disk")]
fn square_addresses_exist(#[from(world)] world: &OptimiseWorld) {
    world.workspace.write_square_addresses();
}

#[given("a request for ids 1, 3, 2, 4 exists on disk")]
fn crossing_request_exists(#[from(world)] world: &OptimiseWorld) {
    world.workspace.write_request(r#"{"addressIds": [1, 3, 2, 4]}"#);
}

#[given("a request for ids 1, 2, 42 exists on disk")]
fn unknown_id_request_exists(#[from(world)] world: &OptimiseWorld) {
    world.workspace.write_request(r#"{"addressIds": [1, 2, 42]}"#);
}

#[given("I omit the request path")]
fn omit_request_path(#[from(world)] world: &OptimiseWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("the request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &OptimiseWorld) {
    world.workspace.write_request("{ not valid json");
}

#[when("I run the optimise command offline")]
fn run_optimise_command(#[from(world)] world: &OptimiseWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Optimise(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_optimise_with(args, &OfflineOptimiserBuilder, &mut *buffer)
        }
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints a tour of ids 1, 2, 3, 4")]
fn command_prints_square_tour(#[from(world)] world: &OptimiseWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let result: OptimisationResult =
        serde_json::from_str(&stdout).expect("output should be an optimisation result");
    let ids: Vec<u64> = result.ordered_points.iter().map(|point| point.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(result.segments.len(), 4);
}

#[then("the command fails because address 42 was not found")]
fn command_fails_not_found(#[from(world)] world: &OptimiseWorld) {
    match &*world.error() {
        CliError::Optimise {
            source: OptimiseError::NotFound { id },
        } => assert_eq!(*id, 42),
        other => panic!("expected NotFound, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &OptimiseWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &OptimiseWorld) {
    match &*world.error() {
        CliError::ParseRequest { .. } => {}
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

macro_rules! register_optimise_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/optimise_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: OptimiseWorld) {
            let _ = world;
        }
    };
}

register_optimise_scenario!(optimise_square, "optimising a square of addresses offline");
register_optimise_scenario!(
    optimise_unknown_address,
    "rejecting a request that names an unknown address"
);
register_optimise_scenario!(optimise_missing_request, "rejecting missing request paths");
register_optimise_scenario!(optimise_invalid_json, "rejecting invalid request JSON");
