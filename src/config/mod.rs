//! Site configuration (`asset-digest.toml`).
//!
//! # Location
//!
//! The configuration file is looked up in this order:
//!
//! 1. `--config <PATH>` or the `ASSET_DIGEST_CONFIG` environment variable
//! 2. `asset-digest.toml` in the current directory or the nearest ancestor
//!    containing one
//! 3. Built-in defaults rooted at the current directory
//!
//! An explicitly named file must exist. A discovered file is optional.
//!
//! # File Format
//!
//! ```toml
//! # Directory asset references are resolved against
//! source = "."
//! # Where `build` writes the rendered site
//! destination = "_site"
//!
//! [digest]
//! algorithm = "sha256"   # md5 | sha256 | sha512
//! param = "v"            # /css/site.css?v=<digest>
//! length = 12            # optional: keep only the first 12 hex characters
//!
//! [templates]
//! extensions = ["html", "xml"]
//! exclude = ["drafts/**"]
//! ```
//!
//! Relative `source` and `destination` paths are resolved against the
//! directory containing the config file.

mod site;

pub use site::{SiteConfig, TemplateSettings};
