//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `mock_dataset`: the parsed `fixtures/reference_mock.json` dataset
//! - `mock_catalog`: a catalog built from the mock dataset
//! - `bundled_catalog`: a catalog built from the dataset compiled into the crate
//!
//! The mock dataset mirrors the upstream reference shape on a small scale:
//! `allow` is defined first in `ngx_http_access_module` and again in
//! `ngx_stream_access_module`, and one module has `"directives": null`.

use directive_ref::{Catalog, Classifier, Dataset};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn mock_dataset_path() -> PathBuf {
    project_root().join("tests/fixtures/reference_mock.json")
}

#[fixture]
pub fn mock_dataset() -> Dataset {
    directive_ref::tracing::init();
    Dataset::from_path(&mock_dataset_path()).expect("mock dataset should parse")
}

#[fixture]
pub fn mock_catalog(mock_dataset: Dataset) -> Catalog {
    Catalog::build(&mock_dataset, Classifier::default()).expect("mock dataset should load")
}

#[fixture]
pub fn bundled_catalog() -> Catalog {
    directive_ref::tracing::init();
    let dataset = Dataset::bundled().expect("bundled dataset should parse");
    Catalog::build(&dataset, Classifier::default()).expect("bundled dataset should load")
}

/// A temporary directory for dataset and config files.
///
/// The directory is removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempFiles {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempFiles {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file relative to the temp root and returns its full path.
    ///
    /// # Panics
    /// Panics if the write fails.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }
}

impl Default for TempFiles {
    fn default() -> Self {
        Self::new()
    }
}
