//! Paths to on-disk fixtures shipped with the testkit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding the testkit fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Absolute path of a fixture, relative to [`fixtures_dir`].
pub fn fixture_path(relative: &str) -> PathBuf {
    fixtures_dir().join(relative)
}

/// Read a fixture as UTF-8 text.
pub fn read_fixture(relative: &str) -> io::Result<String> {
    fs::read_to_string(fixture_path(relative))
}
