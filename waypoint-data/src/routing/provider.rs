//! HTTP-based `RoutingProvider` using OSRM's Table and Route services.
//!
//! The [`RoutingProvider`] trait is synchronous to keep the optimiser
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.

use std::future::Future;
use std::time::Duration;

use geo::Coord;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use waypoint_core::{
    DistanceTable, PathGeometry, ProviderRoute, ProviderStep, RoutingError, RoutingProvider,
};

use super::osrm::{RouteResponse, TableResponse};

/// Error type for [`HttpRoutingProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Routing profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "waypoint-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRoutingProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRoutingProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment of the request path (e.g., `"driving"`).
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRoutingProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRoutingProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP routing provider using the OSRM Table and Route APIs.
///
/// The provider owns a Tokio runtime that is reused across calls, avoiding
/// the overhead of creating a new runtime per request.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the provider
/// falls back to using its own internal runtime. This may deadlock if the
/// caller's runtime is driving IO or timers that this request depends on.
pub struct HttpRoutingProvider {
    client: Client,
    config: HttpRoutingProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRoutingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoutingProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRoutingProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRoutingProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The active configuration.
    pub const fn config(&self) -> &HttpRoutingProviderConfig {
        &self.config
    }

    /// `{base_url}/{service}/v1/{profile}/{lon,lat;...}`
    fn service_url(&self, service: &str, coords: &[Coord<f64>]) -> String {
        let coords: String = coords
            .iter()
            .map(|c| format!("{},{}", c.x, c.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/{service}/v1/{}/{coords}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
        )
    }

    /// Build the OSRM Table API URL requesting road distances.
    fn build_table_url(&self, coords: &[Coord<f64>]) -> String {
        format!(
            "{}?annotations=distance,duration",
            self.service_url("table", coords)
        )
    }

    /// Build the OSRM Route API URL requesting steps and GeoJSON geometry.
    fn build_route_url(&self, from: Coord<f64>, to: Coord<f64>) -> String {
        format!(
            "{}?steps=true&geometries=geojson&overview=full",
            self.service_url("route", &[from, to])
        )
    }

    /// Fetch and decode a JSON document.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RoutingError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        response
            .json()
            .await
            .map_err(|err| RoutingError::ParseError {
                message: err.to_string(),
            })
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// When called from within an existing Tokio runtime, that runtime must
    /// be multi-threaded; `current_thread` callers fall back to the
    /// provider's own runtime.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

/// Convert an OSRM table response into a dense table in metres.
///
/// Unreachable pairs (`null` cells) make the table unusable as a whole.
fn convert_table(response: TableResponse) -> Result<DistanceTable, RoutingError> {
    if !response.is_ok() {
        return Err(RoutingError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let distances = response
        .distances
        .ok_or_else(|| RoutingError::ParseError {
            message: "OSRM response missing distances array".to_owned(),
        })?;

    distances
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .into_iter()
                .enumerate()
                .map(|(column, cell)| {
                    cell.ok_or_else(|| RoutingError::ParseError {
                        message: format!("no route between coordinates {row} and {column}"),
                    })
                })
                .collect::<Result<Vec<f64>, RoutingError>>()
        })
        .collect()
}

/// Convert an OSRM route response into the first route's path and steps.
fn convert_route(response: RouteResponse) -> Result<ProviderRoute, RoutingError> {
    if !response.is_ok() {
        return Err(RoutingError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::ParseError {
            message: "OSRM response contained no routes".to_owned(),
        })?;

    let steps = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| ProviderStep {
            instruction: step.maneuver.instruction_text(),
            distance_meters: step.distance,
            duration_seconds: step.duration,
            geometry: PathGeometry::from_geojson(&step.geometry),
        })
        .collect();

    Ok(ProviderRoute {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        geometry: PathGeometry::from_geojson(&route.geometry),
        steps,
    })
}

impl RoutingProvider for HttpRoutingProvider {
    fn distance_matrix(&self, coords: &[Coord<f64>]) -> Result<DistanceTable, RoutingError> {
        if coords.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        let url = self.build_table_url(coords);
        let response: TableResponse = self.block_on(self.fetch_json(&url))?;
        convert_table(response)
    }

    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<ProviderRoute, RoutingError> {
        let url = self.build_route_url(from, to);
        let response: RouteResponse = self.block_on(self.fetch_json(&url))?;
        convert_route(response)
    }
}
