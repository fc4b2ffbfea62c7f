//! Optimise command implementation for the Waypoint CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypoint_core::{Algorithm, DistanceAdapter, MemoryAddressStore, OptimiseRequest, Optimiser};
use waypoint_data::routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
use waypoint_fs::{create_utf8_file, file_is_file, open_utf8_file};
use waypoint_solver::RouteOptimiser;

use crate::{
    ARG_ADDRESSES, ARG_ALGORITHM, ARG_OFFLINE, ARG_OSRM_BASE_URL, ARG_OSRM_PROFILE, ARG_OUTPUT,
    ARG_REQUEST, ARG_ROUTE_NAME, ARG_SUMMARY, CliError, ENV_ADDRESSES, ENV_REQUEST,
};

/// CLI arguments for the `optimise` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Optimise the visiting order of addresses loaded from a \
                 JSON file. The request names the address ids and the \
                 algorithm; road distances come from an OSRM instance with \
                 great-circle estimates whenever it is unavailable.",
    about = "Optimise a closed delivery tour"
)]
#[ortho_config(prefix = "WAYPOINT")]
pub(crate) struct OptimiseArgs {
    /// Path to a JSON file containing an optimise request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON array of addresses (`id`, `name`, `latitude`, `longitude`).
    #[arg(long = ARG_ADDRESSES, value_name = "path")]
    #[serde(default)]
    pub(crate) addresses: Option<Utf8PathBuf>,
    /// Override the algorithm named in the request.
    #[arg(long = ARG_ALGORITHM, value_name = "name")]
    #[serde(default)]
    pub(crate) algorithm: Option<Algorithm>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile (e.g. "driving").
    #[arg(long = ARG_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Skip OSRM and use great-circle distances only.
    #[arg(long = ARG_OFFLINE)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) offline: bool,
    /// Print a compact route summary instead of the full result.
    #[arg(long = ARG_SUMMARY)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) summary: bool,
    /// Label attached to the summary.
    #[arg(long = ARG_ROUTE_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) route_name: Option<String>,
    /// Write the output to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl OptimiseArgs {
    pub(crate) fn into_config(self) -> Result<OptimiseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimiseConfig::try_from(merged)
    }
}

/// Where distances come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DistanceMode {
    /// Great-circle estimates only.
    Offline,
    /// OSRM with great-circle fallback.
    Osrm {
        /// Base URL of the OSRM instance.
        base_url: String,
        /// Routing profile path segment.
        profile: String,
    },
}

/// Resolved `optimise` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimiseConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the JSON address file.
    pub(crate) addresses: Utf8PathBuf,
    /// Algorithm override.
    pub(crate) algorithm: Option<Algorithm>,
    /// Distance source selection.
    pub(crate) distances: DistanceMode,
    /// Emit a summary rather than the full result.
    pub(crate) summary: bool,
    /// Summary label.
    pub(crate) route_name: Option<String>,
    /// Output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl OptimiseConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_REQUEST)?;
        Self::require_existing(&self.addresses, ARG_ADDRESSES)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimiseArgs> for OptimiseConfig {
    type Error = CliError;

    fn try_from(args: OptimiseArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;
        let addresses = args.addresses.ok_or(CliError::MissingArgument {
            field: ARG_ADDRESSES,
            env: ENV_ADDRESSES,
        })?;

        let distances = if args.offline {
            DistanceMode::Offline
        } else {
            let defaults = HttpRoutingProviderConfig::default();
            DistanceMode::Osrm {
                base_url: args.osrm_base_url.unwrap_or(defaults.base_url),
                profile: args.osrm_profile.unwrap_or(defaults.profile),
            }
        };

        Ok(Self {
            request_path,
            addresses,
            algorithm: args.algorithm,
            distances,
            summary: args.summary,
            route_name: args.route_name,
            output: args.output,
        })
    }
}

/// Builds an optimiser over the loaded addresses.
pub(crate) trait OptimiserBuilder {
    fn build(
        &self,
        config: &OptimiseConfig,
        store: MemoryAddressStore,
    ) -> Result<Box<dyn Optimiser>, CliError>;
}

pub(crate) struct DefaultOptimiserBuilder;

impl OptimiserBuilder for DefaultOptimiserBuilder {
    fn build(
        &self,
        config: &OptimiseConfig,
        store: MemoryAddressStore,
    ) -> Result<Box<dyn Optimiser>, CliError> {
        match &config.distances {
            DistanceMode::Offline => Ok(Box::new(RouteOptimiser::offline(store))),
            DistanceMode::Osrm { base_url, profile } => {
                let provider_config =
                    HttpRoutingProviderConfig::new(base_url.clone()).with_profile(profile.clone());
                let provider = HttpRoutingProvider::with_config(provider_config).map_err(
                    |source| CliError::BuildRoutingProvider {
                        base_url: base_url.clone(),
                        source,
                    },
                )?;
                Ok(Box::new(RouteOptimiser::new(
                    store,
                    DistanceAdapter::remote(provider),
                )))
            }
        }
    }
}

pub(crate) fn run_optimise(
    args: OptimiseArgs,
    builder: &dyn OptimiserBuilder,
) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimise_with(args, builder, &mut stdout)
}

/// Run the command, writing to `writer` unless an output file is configured.
pub(crate) fn run_optimise_with(
    args: OptimiseArgs,
    builder: &dyn OptimiserBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_optimise_config(args)?;
    let payload = execute_optimise(&config, builder)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(CliError::WriteOutput)?;
            write_payload(&mut file, &payload)
        }
        None => write_payload(writer, &payload),
    }
}

fn resolve_optimise_config(args: OptimiseArgs) -> Result<OptimiseConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Optimise and render the configured output document.
fn execute_optimise(
    config: &OptimiseConfig,
    builder: &dyn OptimiserBuilder,
) -> Result<String, CliError> {
    let mut request = load_optimise_request(&config.request_path)?;
    if let Some(algorithm) = config.algorithm {
        request.algorithm = algorithm;
    }
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;

    let store = load_addresses(&config.addresses)?;
    info!(
        "loaded {} addresses from {}",
        store.len(),
        config.addresses
    );
    let optimiser = builder.build(config, store)?;
    let result = optimiser
        .optimise(&request)
        .map_err(|source| CliError::Optimise { source })?;

    let rendered = if config.summary {
        let summary = result.summary();
        let summary = match &config.route_name {
            Some(name) => summary.with_name(name.clone()),
            None => summary,
        };
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string_pretty(&result)
    };
    rendered.map_err(CliError::SerialiseOutput)
}

/// Loads a JSON-encoded [`OptimiseRequest`] from disk.
pub(crate) fn load_optimise_request(path: &Utf8Path) -> Result<OptimiseRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the address file into an in-memory store.
pub(crate) fn load_addresses(path: &Utf8Path) -> Result<MemoryAddressStore, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    MemoryAddressStore::from_json_reader(BufReader::new(file)).map_err(|source| {
        CliError::LoadAddresses {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimiseConfig, CliError> {
    let merged = OptimiseArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimiseConfig::try_from(merged)
}
