use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Algorithm, OptimisationResult};

/// Smallest point set that forms a tour.
pub const MIN_POINTS: usize = 2;

/// Largest point set accepted by the optimiser.
pub const MAX_POINTS: usize = 20;

/// Parameters for an optimisation request.
///
/// # Examples
/// ```rust
/// use waypoint_core::{Algorithm, OptimiseRequest};
///
/// let request: OptimiseRequest = serde_json::from_str(r#"{"addressIds": [3, 1, 2]}"#)?;
/// assert_eq!(request.algorithm, Algorithm::TwoOpt);
/// assert!(request.validate().is_ok());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimiseRequest {
    /// Address Store ids, in the caller's order. The first id starts the tour.
    pub address_ids: Vec<u64>,
    /// Tour construction strategy.
    #[serde(default)]
    pub algorithm: Algorithm,
}

impl OptimiseRequest {
    /// Construct a request.
    pub fn new(address_ids: Vec<u64>, algorithm: Algorithm) -> Self {
        Self {
            address_ids,
            algorithm,
        }
    }

    /// Check the id count and uniqueness.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let count = self.address_ids.len();
        InvalidInputError::check_minimum(count)?;
        if count > MAX_POINTS {
            return Err(InvalidInputError::TooManyPoints {
                actual: count,
                maximum: MAX_POINTS,
            });
        }
        let mut seen = HashSet::with_capacity(count);
        if let Some(&id) = self.address_ids.iter().find(|&&id| !seen.insert(id)) {
            return Err(InvalidInputError::DuplicateId { id });
        }
        Ok(())
    }
}

/// Rejected input. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Fewer points than a tour needs.
    #[error("at least {minimum} points are required, got {actual}")]
    TooFewPoints { actual: usize, minimum: usize },
    /// More points than the optimiser accepts.
    #[error("at most {maximum} points are allowed, got {actual}")]
    TooManyPoints { actual: usize, maximum: usize },
    /// The same id was requested twice.
    #[error("address id {id} is listed more than once")]
    DuplicateId { id: u64 },
}

impl InvalidInputError {
    /// Fail when `count` is below [`MIN_POINTS`].
    pub const fn check_minimum(count: usize) -> Result<(), Self> {
        if count < MIN_POINTS {
            Err(Self::TooFewPoints {
                actual: count,
                minimum: MIN_POINTS,
            })
        } else {
            Ok(())
        }
    }
}

/// Errors returned by [`Optimiser::optimise`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimiseError {
    /// The request was malformed.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    /// An id did not resolve in the Address Store.
    #[error("address with id {id} not found")]
    NotFound { id: u64 },
}

/// Compute a short closed tour over stored addresses.
///
/// Implementations validate the request and resolve every id before any
/// distance work, returning [`OptimiseError::NotFound`] for the first id that
/// does not resolve.
pub trait Optimiser {
    /// Optimise a request, producing an assembled route or an error.
    fn optimise(&self, request: &OptimiseRequest) -> Result<OptimisationResult, OptimiseError>;
}

impl<O: Optimiser + ?Sized> Optimiser for Box<O> {
    fn optimise(&self, request: &OptimiseRequest) -> Result<OptimisationResult, OptimiseError> {
        (**self).optimise(request)
    }
}
