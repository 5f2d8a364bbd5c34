//! Global constants used throughout the asset-digest codebase.

/// Name of the site configuration file searched for in the working
/// directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "asset-digest.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "ASSET_DIGEST_CONFIG";

/// Default query parameter carrying the digest (`?v=...`).
pub const DEFAULT_QUERY_PARAM: &str = "v";

/// Default build output directory, relative to the config file.
pub const DEFAULT_DESTINATION: &str = "_site";

/// File extensions rendered as templates by default.
pub const DEFAULT_TEMPLATE_EXTENSIONS: &[&str] = &["html"];
