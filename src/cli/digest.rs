//! Print cache-busted references for asset paths.
//!
//! ```bash
//! asset-digest digest /css/site.css /js/app.js
//! # /css/site.css?v=2cf24dba5fb0a30e...
//! # /js/app.js?v=9a0364b9e99bb480...
//!
//! asset-digest digest --algorithm md5 --length 8 /css/site.css
//! # /css/site.css?v=5d41402a
//! ```
//!
//! Paths that do not resolve to a file under the site root are printed
//! unchanged, exactly as the template filter would emit them.

use anyhow::Result;
use clap::Args;
use std::io::Write;

use super::common::CommandContext;
use crate::core::SiteError;
use crate::digest::{AssetDigester, DigestAlgorithm};

/// Arguments for the `digest` command
#[derive(Args, Debug)]
pub struct DigestCommand {
    /// Asset paths, as they would appear in a template
    #[arg(required = true)]
    paths: Vec<String>,

    /// Override the digest algorithm from the config file
    #[arg(long, value_enum)]
    algorithm: Option<DigestAlgorithm>,

    /// Keep only the first N hex characters of the digest
    #[arg(long)]
    length: Option<usize>,

    /// Override the query parameter name
    #[arg(long)]
    param: Option<String>,
}

impl DigestCommand {
    /// Execute the command, writing one reference per line to stdout.
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute_with_writer(ctx, &mut out)
    }

    /// Execute the command writing to `out`.
    pub fn execute_with_writer(self, ctx: CommandContext, out: &mut impl Write) -> Result<()> {
        let mut config = ctx.config;
        if let Some(algorithm) = self.algorithm {
            config.digest.algorithm = algorithm;
        }
        if let Some(length) = self.length {
            config.digest.length = Some(length);
        }
        if let Some(param) = self.param {
            config.digest.param = param;
        }
        config.validate()?;

        if !config.source.is_dir() {
            return Err(SiteError::SourceNotFound {
                path: config.source.display().to_string(),
            }
            .into());
        }

        let digester = AssetDigester::new(config.source, config.digest);
        for path in &self.paths {
            writeln!(out, "{}", digester.bust(path))?;
        }
        Ok(())
    }
}
