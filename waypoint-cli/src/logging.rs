//! Logger installation for the binary.
//!
//! Output goes to stderr so stdout stays machine-readable JSON.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Level used when neither `--log-level` nor `RUST_LOG` is set.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the logger. An explicit `level` overrides `RUST_LOG`.
pub(crate) fn logger_builder(level: Option<LevelFilter>) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER));
    builder.target(Target::Stderr);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
}

/// Install the global logger. Repeated calls keep the first logger.
pub(crate) fn init_logging(level: Option<LevelFilter>) {
    if let Err(err) = logger_builder(level).try_init() {
        log::debug!("logger already installed: {err}");
    }
}
