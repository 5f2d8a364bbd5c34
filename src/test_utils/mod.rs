//! Test utilities for asset-digest
//!
//! Helpers shared by unit and integration tests: one-time logging setup and a
//! throwaway site directory fixture.
//!
//! # Example
//!
//! ```rust,no_run
//! use asset_digest::test_utils::TestSite;
//!
//! let site = TestSite::new().unwrap();
//! site.write_file("css/site.css", "body {}").unwrap();
//! site.write_file("index.html", "{{ '/css/site.css' | asset_digest }}").unwrap();
//! assert!(site.path().join("css/site.css").is_file());
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_FILE_NAME;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=asset_digest=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A site root in a temporary directory, removed on drop.
pub struct TestSite {
    temp_dir: TempDir,
}

impl TestSite {
    /// Create an empty site.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self {
            temp_dir,
        })
    }

    /// Root of the site.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write `asset-digest.toml` at the root.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.write_file(CONFIG_FILE_NAME, content)
    }

    /// Read a file relative to the root.
    pub fn read_file(&self, relative: &str) -> Result<String> {
        let path = self.temp_dir.path().join(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
