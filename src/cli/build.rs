//! Build the site into its destination directory.
//!
//! ```bash
//! asset-digest build
//! asset-digest build --destination public
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::CommandContext;
use crate::site::SiteBuilder;

/// Arguments for the `build` command
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Override the destination directory from the config file
    #[arg(short, long)]
    destination: Option<PathBuf>,
}

impl BuildCommand {
    /// Execute the command and print a summary.
    pub async fn execute(self, ctx: CommandContext, quiet: bool) -> Result<()> {
        let mut config = ctx.config.clone();
        if let Some(destination) = &self.destination {
            config.destination = ctx.resolve(destination);
        }

        let destination = config.destination.clone();
        let builder = SiteBuilder::new(config, ctx.config_path)?;
        let report = builder.build().await?;

        if !quiet {
            println!(
                "{} {} rendered, {} copied, {} skipped -> {}",
                "✓".green(),
                report.rendered,
                report.copied,
                report.skipped,
                destination.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_with_destination_override() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "{{ 'style.css' | asset_digest }}").unwrap();
        std::fs::write(temp.path().join("style.css"), "hello").unwrap();

        let ctx = CommandContext::load_in(temp.path(), None, None).await.unwrap();
        let cmd = BuildCommand {
            destination: Some(PathBuf::from("public")),
        };
        cmd.execute(ctx, true).await.unwrap();

        let html = std::fs::read_to_string(temp.path().join("public/index.html")).unwrap();
        assert!(html.starts_with("style.css?v="));
        assert!(temp.path().join("public/style.css").is_file());
        assert!(!temp.path().join("_site").exists());
    }
}
