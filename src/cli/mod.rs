//! Command-line interface for asset-digest.
//!
//! Each command lives in its own module with its own argument struct and an
//! `execute` method. Global flags are collected into a [`CliConfig`] before
//! dispatch so tests can drive commands without touching process state.
//!
//! # Available Commands
//!
//! - `digest` - Print cache-busted references for asset paths
//! - `render` - Render one template to stdout or a file
//! - `build` - Render every template under the site root into the destination
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors and suppress the build summary
//! - `--config` - Path to an `asset-digest.toml` (also `ASSET_DIGEST_CONFIG`)
//! - `--root` - Override the site root from the config file
//!
//! # Example
//!
//! ```bash
//! asset-digest digest /css/site.css
//! asset-digest --root site render index.html
//! asset-digest --verbose build --destination public
//! ```
//!
//! Logs go to stderr. `RUST_LOG`, when set, takes precedence over the
//! verbosity flags.

mod build;
pub mod common;
mod digest;
mod render;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::CONFIG_ENV_VAR;
use common::CommandContext;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    ///
    /// - `"error"` with `--quiet`
    /// - `"info"` by default
    /// - `"debug"` with `--verbose`
    pub log_level: Option<String>,

    /// Explicit configuration file, from `--config` or `ASSET_DIGEST_CONFIG`.
    pub config_path: Option<PathBuf>,

    /// Site root override from `--root`.
    pub root: Option<PathBuf>,

    /// Whether `--quiet` was given.
    pub quiet: bool,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// Does nothing if a subscriber is already installed, which lets tests
    /// call this repeatedly.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command-line interface.
#[derive(Parser)]
#[command(
    name = "asset-digest",
    about = "Cache-bust static asset references with content digests",
    version,
    author,
    long_about = "asset-digest rewrites asset references such as /css/site.css into \
                  /css/site.css?v=<digest>, so browsers refetch an asset exactly when its \
                  content changes. It provides an `asset_digest` template filter and a \
                  small site builder around it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    ///
    /// By default `asset-digest.toml` is searched for in the current directory
    /// and its parents. When none is found built-in defaults are used.
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Site root assets are resolved against
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print cache-busted references for asset paths.
    ///
    /// See [`digest::DigestCommand`] for options.
    Digest(digest::DigestCommand),

    /// Render a single template.
    ///
    /// See [`render::RenderCommand`] for options.
    Render(render::RenderCommand),

    /// Build the site into the destination directory.
    ///
    /// See [`build::BuildCommand`] for options.
    Build(build::BuildCommand),
}

impl Cli {
    /// Execute the CLI, installing logging from the global flags first.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed arguments.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
            root: self.root.clone(),
            quiet: self.quiet,
        }
    }

    /// Execute the command with an explicit configuration.
    ///
    /// Logging is not initialized here.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let ctx = CommandContext::load(config.config_path, config.root).await?;
        tracing::debug!(
            "Using config {}",
            ctx.config_path
                .as_ref()
                .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string())
        );

        match self.command {
            Commands::Digest(cmd) => cmd.execute(ctx).await,
            Commands::Render(cmd) => cmd.execute(ctx).await,
            Commands::Build(cmd) => cmd.execute(ctx, config.quiet).await,
        }
    }
}
