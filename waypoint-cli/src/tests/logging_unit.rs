//! Logger configuration and global flag parsing.

use super::*;
use crate::logging::logger_builder;
use rstest::rstest;

#[rstest]
#[case("debug", LevelFilter::Debug)]
#[case("off", LevelFilter::Off)]
#[case("WARN", LevelFilter::Warn)]
fn log_level_flag_parses_level_names(#[case] raw: &str, #[case] expected: LevelFilter) {
    let cli = Cli::try_parse_from(["waypoint", "--log-level", raw, "optimise", "request.json"])
        .expect("arguments should parse");

    assert_eq!(cli.log_level, Some(expected));
}

#[rstest]
fn log_level_is_global_to_subcommands() {
    let cli = Cli::try_parse_from(["waypoint", "optimise", "request.json", "--log-level", "info"])
        .expect("arguments should parse");

    assert_eq!(cli.log_level, Some(LevelFilter::Info));
}

#[rstest]
fn unknown_log_level_is_rejected() {
    let err = Cli::try_parse_from(["waypoint", "--log-level", "chatty", "optimise"])
        .expect_err("invalid level");

    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[rstest]
fn explicit_level_overrides_the_environment_default() {
    let logger = logger_builder(Some(LevelFilter::Debug)).build();

    assert_eq!(logger.filter(), LevelFilter::Debug);
}
