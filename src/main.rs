//! asset-digest CLI entry point
//!
//! Parses arguments, runs the selected command and prints a user-friendly
//! error with suggestions on failure.

use anyhow::Result;
use asset_digest::cli;
use asset_digest::core::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
