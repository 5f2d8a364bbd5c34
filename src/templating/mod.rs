//! Tera templating for site pages.
//!
//! Site templates are rendered with [Tera](https://keats.github.io/tera/) plus
//! one custom filter:
//!
//! - `asset_digest`: append a content digest to an asset reference
//!
//! # Template Context
//!
//! When rendered as part of a site build, templates see:
//! - `page`: the template's YAML front matter (empty object if none)
//! - `site.source`, `site.destination`: the build directories
//!
//! # Examples
//!
//! ```html
//! ---
//! title: Home
//! ---
//! <!doctype html>
//! <title>{{ page.title }}</title>
//! <link rel="stylesheet" href="{{ '/css/site.css' | asset_digest }}">
//! <script src="{{ '/js/app.js' | asset_digest }}"></script>
//! ```
//!
//! Tera's own `{% raw %}...{% endraw %}` blocks keep template syntax from
//! being rendered.

pub mod error;
pub mod filters;
pub mod renderer;

pub use error::{ErrorLocation, TemplateError};
pub use filters::{ASSET_DIGEST_FILTER, create_asset_digest_filter};
pub use renderer::TemplateRenderer;
