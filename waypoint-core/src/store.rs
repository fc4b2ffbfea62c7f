//! Lookup of stored addresses by id.
//!
//! The optimiser never reads persistence directly; it resolves ids through
//! [`AddressStore`]. [`MemoryAddressStore`] backs the CLI and tests with a
//! JSON list of points.

use std::collections::BTreeMap;
use std::io::Read;

use thiserror::Error;

use crate::Point;

/// Read-only access to stored addresses.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{AddressStore, MemoryAddressStore, Point};
///
/// let store = MemoryAddressStore::with_points([Point::new(7, "Depot", "1 Quay St", 51.5, -0.1)])?;
/// assert_eq!(store.get_by_id(7).map(|p| p.name), Some("Depot".to_owned()));
/// assert!(store.get_by_id(8).is_none());
/// # Ok::<(), waypoint_core::AddressStoreError>(())
/// ```
pub trait AddressStore {
    /// Return the point stored under `id`, if any.
    fn get_by_id(&self, id: u64) -> Option<Point>;
}

impl<T: AddressStore + ?Sized> AddressStore for &T {
    fn get_by_id(&self, id: u64) -> Option<Point> {
        (**self).get_by_id(id)
    }
}

impl<T: AddressStore + ?Sized> AddressStore for Box<T> {
    fn get_by_id(&self, id: u64) -> Option<Point> {
        (**self).get_by_id(id)
    }
}

/// Errors raised while loading a [`MemoryAddressStore`].
#[derive(Debug, Error)]
pub enum AddressStoreError {
    /// The input was not a JSON array of points.
    #[error("failed to parse addresses: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two entries shared an id.
    #[error("address id {id} appears more than once")]
    DuplicateId { id: u64 },
}

/// In-memory [`AddressStore`] keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryAddressStore {
    points: BTreeMap<u64, Point>,
}

impl MemoryAddressStore {
    /// Build a store from `points`, rejecting duplicate ids.
    pub fn with_points<I>(points: I) -> Result<Self, AddressStoreError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut map = BTreeMap::new();
        for point in points {
            let id = point.id;
            if map.insert(id, point).is_some() {
                return Err(AddressStoreError::DuplicateId { id });
            }
        }
        Ok(Self { points: map })
    }

    /// Load a JSON array of points.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, AddressStoreError> {
        let points: Vec<Point> = serde_json::from_reader(reader)?;
        Self::with_points(points)
    }

    /// Number of stored addresses.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no addresses.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl AddressStore for MemoryAddressStore {
    fn get_by_id(&self, id: u64) -> Option<Point> {
        self.points.get(&id).cloned()
    }
}
