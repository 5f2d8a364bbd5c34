//! Custom Tera filters for site templates.
//!
//! # `asset_digest`
//!
//! Appends a content digest to an asset reference so browsers refetch the
//! asset whenever it changes:
//!
//! ```html
//! <link rel="stylesheet" href="{{ '/css/site.css' | asset_digest }}">
//! <!-- renders as -->
//! <link rel="stylesheet" href="/css/site.css?v=2cf24dba5fb0a30e...">
//! ```
//!
//! References that do not resolve to a file under the site root are emitted
//! unchanged. See [`crate::digest::AssetDigester`] for the resolution rules.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::digest::{AssetDigester, DigestSettings};

/// Name the cache-busting filter is registered under.
pub const ASSET_DIGEST_FILTER: &str = "asset_digest";

/// Creates the `asset_digest` Tera filter.
///
/// The returned closure captures the site root and digest settings, so the
/// filter needs nothing from the render context.
///
/// # Errors
///
/// The filter only fails when the piped value is not a string. Missing or
/// unreadable assets are passed through.
///
/// # Examples
///
/// ```rust,no_run
/// # use std::path::PathBuf;
/// # use asset_digest::digest::DigestSettings;
/// # use asset_digest::templating::filters::create_asset_digest_filter;
/// let mut tera = tera::Tera::default();
/// tera.register_filter(
///     "asset_digest",
///     create_asset_digest_filter(PathBuf::from("site"), DigestSettings::default()),
/// );
/// ```
pub fn create_asset_digest_filter(
    site_root: PathBuf,
    settings: DigestSettings,
) -> impl tera::Filter + 'static {
    let digester = AssetDigester::new(site_root, settings);

    move |value: &tera::Value, _args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let path = value.as_str().ok_or_else(|| {
            tera::Error::msg(format!(
                "{} filter requires a string path, got {}",
                ASSET_DIGEST_FILTER, value
            ))
        })?;

        Ok(tera::Value::String(digester.bust(path)))
    }
}
