//! Test helpers for laying out request and address files.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use waypoint_core::test_support::square_points;
use waypoint_core::{MemoryAddressStore, Optimiser};
use waypoint_solver::RouteOptimiser;

use crate::CliError;
use crate::optimise::{OptimiseConfig, OptimiserBuilder};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding `request.json` and `addresses.json`.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) request: Utf8PathBuf,
    pub(super) addresses: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            request: root.join("request.json"),
            addresses: root.join("addresses.json"),
            root,
            _dir: dir,
        }
    }

    /// Write the four corners of a one-degree square as the address file.
    pub(super) fn write_square_addresses(&self) {
        let payload = serde_json::to_vec(&square_points()).expect("serialise addresses");
        write_utf8(&self.addresses, &payload);
    }

    pub(super) fn write_request(&self, json: &str) {
        write_utf8(&self.request, json.as_bytes());
    }
}

/// Builds a great-circle optimiser so tests never reach the network.
pub(super) struct OfflineOptimiserBuilder;

impl OptimiserBuilder for OfflineOptimiserBuilder {
    fn build(
        &self,
        _config: &OptimiseConfig,
        store: MemoryAddressStore,
    ) -> Result<Box<dyn Optimiser>, CliError> {
        Ok(Box::new(RouteOptimiser::offline(store)))
    }
}
