use thiserror::Error;

/// Failures talking to a [`RoutingProvider`](super::RoutingProvider).
///
/// These never reach callers of the optimiser; the distance adapter absorbs
/// them by falling back to great-circle estimates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No coordinates were provided.
    #[error("at least one coordinate is required")]
    EmptyInput,
    /// The request could not reach the service.
    #[error("request to {url} failed: {message}")]
    NetworkError { url: String, message: String },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} returned HTTP {status}: {message}")]
    HttpError {
        url: String,
        status: u16,
        message: String,
    },
    /// The service reported an application-level error.
    #[error("routing service error {code}: {message}")]
    ServiceError { code: String, message: String },
    /// The response body could not be interpreted.
    #[error("malformed routing response: {message}")]
    ParseError { message: String },
}
