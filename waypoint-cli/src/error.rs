//! Error types emitted by the Waypoint CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypoint_core::{AddressStoreError, InvalidInputError, OptimiseError};
use waypoint_data::routing::ProviderBuildError;

/// Errors emitted by the Waypoint CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {path:?}: {source}")]
    OpenInput {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The optimise request JSON could not be decoded.
    #[error("failed to parse optimise request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request file.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The optimise request was rejected before any distance work.
    #[error("optimise request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Request file.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: InvalidInputError,
    },
    /// The address file could not be loaded.
    #[error("failed to load addresses from {path:?}: {source}")]
    LoadAddresses {
        /// Address file.
        path: Utf8PathBuf,
        /// Store construction failure.
        #[source]
        source: AddressStoreError,
    },
    /// Constructing the routing provider failed.
    #[error("failed to build routing provider for {base_url:?}: {source}")]
    BuildRoutingProvider {
        /// Configured OSRM base URL.
        base_url: String,
        /// Client or runtime construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The optimiser rejected the request.
    #[error("optimisation failed: {source}")]
    Optimise {
        /// Optimiser failure.
        source: OptimiseError,
    },
    /// Serialising the result failed.
    #[error("failed to serialise optimisation output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the result failed.
    #[error("failed to write optimisation output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
