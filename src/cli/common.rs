//! Common context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;

/// Configuration shared by all commands after global flags are applied
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Effective site configuration
    pub config: SiteConfig,
    /// File the configuration was loaded from, if any
    pub config_path: Option<PathBuf>,
    /// Working directory relative CLI paths are resolved against
    pub cwd: PathBuf,
}

impl CommandContext {
    /// Load the site configuration and apply the `--root` override.
    ///
    /// # Errors
    /// Returns an error if the working directory cannot be determined or the
    /// configuration file is missing, malformed or invalid
    pub async fn load(config_path: Option<PathBuf>, root: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::load_in(&cwd, config_path, root).await
    }

    /// Same as [`load`](Self::load) with an explicit working directory.
    pub async fn load_in(
        cwd: &Path,
        config_path: Option<PathBuf>,
        root: Option<PathBuf>,
    ) -> Result<Self> {
        let (mut config, config_path) = SiteConfig::load_with_optional(config_path, cwd).await?;

        if let Some(root) = root {
            config.source = resolve_against(cwd, root);
            tracing::debug!("Site root overridden to {}", config.source.display());
        }

        Ok(Self {
            config,
            config_path,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Resolve a path given on the command line.
    pub fn resolve(&self, path: impl Into<PathBuf>) -> PathBuf {
        resolve_against(&self.cwd, path.into())
    }
}

fn resolve_against(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
