//! File system helpers for writing the built site.
//!
//! Writes go through a temporary file in the destination directory that is
//! renamed into place, so an interrupted build never leaves a half-written
//! page behind.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Create `path` and all missing parents.
///
/// # Errors
///
/// Fails if the directory cannot be created or `path` exists as a file.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Atomically write `content` to `path`, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    temp.as_file().sync_all().with_context(|| format!("Failed to sync {}", path.display()))?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move temp file into place: {}", path.display()))?;

    Ok(())
}

/// Async wrapper around [`atomic_write`].
pub async fn atomic_write_async(path: &Path, content: Vec<u8>) -> Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || atomic_write(&path, &content))
        .await
        .context("Failed to join file write task")?
}

/// Render a relative path with forward slashes for logs and glob matching.
#[must_use]
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}
