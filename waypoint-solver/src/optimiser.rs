//! Public entry point: validate, resolve, price and assemble.

use log::{debug, info};
use waypoint_core::{
    AddressStore, Algorithm, DistanceAdapter, DistanceSource, GreatCircleFallback,
    OptimisationResult, OptimiseError, OptimiseRequest, Optimiser, Point,
};

use crate::RouteAssembler;

/// Default [`Optimiser`] implementation.
///
/// The optimiser is generic over the engine boundaries: an address store and
/// the primary distance source behind its [`DistanceAdapter`]. Requests are
/// rejected before any distance work when they name fewer than two or more
/// than twenty ids, repeat an id, or reference an unknown address.
///
/// # Examples
///
/// ```
/// use waypoint_core::{Algorithm, MemoryAddressStore, OptimiseRequest, Optimiser, Point};
/// use waypoint_solver::RouteOptimiser;
///
/// let store = MemoryAddressStore::with_points([
///     Point::new(1, "Depot", "", 0.0, 0.0),
///     Point::new(2, "Shop", "", 0.0, 1.0),
///     Point::new(3, "Depot annexe", "", 1.0, 1.0),
/// ])?;
/// let optimiser = RouteOptimiser::offline(store);
///
/// let result = optimiser.optimise(&OptimiseRequest::new(vec![1, 2, 3], Algorithm::TwoOpt))?;
/// assert_eq!(result.ordered_points.len(), 3);
/// assert_eq!(result.segments.len(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteOptimiser<A, S = GreatCircleFallback> {
    store: A,
    adapter: DistanceAdapter<S>,
}

impl<A: AddressStore> RouteOptimiser<A> {
    /// Optimiser using great-circle distances only.
    pub const fn offline(store: A) -> Self {
        Self::new(store, DistanceAdapter::offline())
    }
}

impl<A, S> RouteOptimiser<A, S> {
    /// Construct an optimiser over `store` that prices edges with `adapter`.
    pub const fn new(store: A, adapter: DistanceAdapter<S>) -> Self {
        Self { store, adapter }
    }

    /// Borrow the address store.
    pub const fn store(&self) -> &A {
        &self.store
    }

    /// Borrow the distance adapter.
    pub const fn adapter(&self) -> &DistanceAdapter<S> {
        &self.adapter
    }
}

impl<A: AddressStore, S: DistanceSource> RouteOptimiser<A, S> {
    /// Optimise the addresses `address_ids` with `algorithm`.
    ///
    /// # Errors
    ///
    /// See [`Optimiser::optimise`].
    pub fn optimise_route(
        &self,
        address_ids: &[u64],
        algorithm: Algorithm,
    ) -> Result<OptimisationResult, OptimiseError> {
        self.optimise(&OptimiseRequest::new(address_ids.to_vec(), algorithm))
    }

    /// Resolve every id, stopping at the first that is missing.
    fn resolve(&self, address_ids: &[u64]) -> Result<Vec<Point>, OptimiseError> {
        address_ids
            .iter()
            .map(|&id| {
                self.store
                    .get_by_id(id)
                    .ok_or(OptimiseError::NotFound { id })
            })
            .collect()
    }
}

impl<A: AddressStore, S: DistanceSource> Optimiser for RouteOptimiser<A, S> {
    fn optimise(&self, request: &OptimiseRequest) -> Result<OptimisationResult, OptimiseError> {
        request.validate()?;
        info!(
            "optimising {} addresses with {}",
            request.address_ids.len(),
            request.algorithm
        );

        let points = self.resolve(&request.address_ids)?;
        let matrix = self.adapter.build_cost_matrix(&points)?;
        debug!("cost matrix ready for {} points", matrix.len());

        let result =
            RouteAssembler::new(&self.adapter).assemble(&points, &matrix, request.algorithm)?;
        info!(
            "optimised tour: {:.1} km, {} min, saved {:.1} km",
            result.total_distance_km,
            result.estimated_time_minutes,
            result.saved_distance_km.unwrap_or_default()
        );
        Ok(result)
    }
}
