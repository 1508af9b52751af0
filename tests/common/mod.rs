//! Test fixture utilities for integration tests.

pub mod harness;

use std::path::PathBuf;

/// Returns the path to the fixtures directory.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Returns the path to the sample vault.
#[allow(dead_code)]
pub fn fixture_vault() -> PathBuf {
    fixtures_dir().join("vault")
}
