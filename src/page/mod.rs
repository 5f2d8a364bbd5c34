//! Site pages: template source split into front matter and body.
//!
//! A page template may start with a YAML front matter block:
//!
//! ```text
//! ---
//! title: Home
//! stylesheets: [/css/site.css]
//! ---
//! <h1>{{ page.title }}</h1>
//! ```
//!
//! The block is removed from the output and its data is exposed to the
//! template as `page`.

mod frontmatter;

pub use frontmatter::{FrontMatterParser, Page};
