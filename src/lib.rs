//! asset-digest - content-digest cache busting for static sites
//!
//! Browsers cache static assets aggressively. Appending a digest of the
//! asset's content to its URL (`/css/site.css?v=2cf24dba...`) makes the URL
//! change exactly when the file does, so long cache lifetimes stay safe.
//!
//! The core is the `asset_digest` template filter:
//!
//! ```text
//! <link rel="stylesheet" href="{{ '/css/site.css' | asset_digest }}">
//! ```
//!
//! 1. One leading `/` (or `\`) is stripped from the input.
//! 2. The rest is resolved against the site root. Paths escaping the root
//!    are never read.
//! 3. If a regular file is found, its content is hashed and the filter
//!    returns `"{input}?v={hex}"`, with the input exactly as written.
//! 4. Otherwise the input is returned unchanged.
//!
//! Every digest that is generated is logged at info level.
//!
//! # Modules
//!
//! - [`digest`] - Hash algorithms, digest settings and asset resolution
//! - [`templating`] - Tera rendering with the `asset_digest` filter registered
//! - [`page`] - Front matter extraction for page templates
//! - [`site`] - Site builds that render templates and copy other files
//! - [`config`] - `asset-digest.toml` discovery, parsing and validation
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `asset-digest` command-line interface
//! - [`utils`] - File system helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use asset_digest::digest::asset_digest;
//! use std::path::Path;
//!
//! let url = asset_digest(Path::new("site"), "/css/site.css");
//! println!("{url}");
//! ```
//!
//! # Configuration
//!
//! ```toml
//! source = "site"
//! destination = "_site"
//!
//! [digest]
//! algorithm = "sha256"   # md5 | sha256 | sha512
//! param = "v"
//! length = 16            # optional truncation
//!
//! [templates]
//! extensions = ["html", "xml"]
//! exclude = ["drafts/**"]
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod digest;
pub mod page;
pub mod site;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
