//! Render a single template.
//!
//! ```bash
//! asset-digest render index.html
//! asset-digest render index.html --output public/index.html
//! ```

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use super::common::CommandContext;
use crate::site::SiteBuilder;
use crate::utils::atomic_write_async;

/// Arguments for the `render` command
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template file to render
    template: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderCommand {
    /// Execute the command.
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let template = ctx.resolve(&self.template);
        let output = self.output.as_ref().map(|p| ctx.resolve(p));

        let builder = SiteBuilder::new(ctx.config, ctx.config_path)?;
        let rendered = builder.render_page(&template).await?;

        match output {
            Some(path) => {
                atomic_write_async(&path, rendered.into_bytes()).await?;
                tracing::info!("Wrote {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
