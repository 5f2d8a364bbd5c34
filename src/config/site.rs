//! Site configuration loading and validation.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_DESTINATION, DEFAULT_TEMPLATE_EXTENSIONS};
use crate::core::SiteError;
use crate::digest::DigestSettings;

/// Query parameter names that need no URL escaping.
static PARAM_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").ok());

/// Contents of `asset-digest.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site root that asset references resolve against.
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Output directory for `build`.
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Digest algorithm, query parameter and truncation.
    #[serde(default)]
    pub digest: DigestSettings,

    /// Which files `build` renders as templates.
    #[serde(default)]
    pub templates: TemplateSettings,
}

/// Template selection for site builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSettings {
    /// Extensions (without the dot) rendered as templates. Everything else is copied.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns, relative to `source`, excluded from the build.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_source() -> PathBuf {
    PathBuf::from(".")
}

fn default_destination() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION)
}

fn default_extensions() -> Vec<String> {
    DEFAULT_TEMPLATE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            destination: default_destination(),
            digest: DigestSettings::default(),
            templates: TemplateSettings::default(),
        }
    }
}

impl TemplateSettings {
    /// Whether files with this extension are rendered.
    pub fn is_template_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

impl SiteConfig {
    /// Default configuration with paths resolved against `base_dir`.
    pub fn defaults_at(base_dir: &Path) -> Self {
        Self::default().resolve_paths(base_dir)
    }

    /// Search `start` and its ancestors for `asset-digest.toml`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|candidate| candidate.is_file())
    }

    /// Parse and validate configuration text.
    ///
    /// `base_dir` is the directory relative paths are resolved against,
    /// normally the directory containing the file. `file` is only used in
    /// error messages.
    pub fn from_toml_str(content: &str, base_dir: &Path, file: &str) -> Result<Self, SiteError> {
        let config: Self = toml::from_str(content).map_err(|e| SiteError::ConfigParse {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config.resolve_paths(base_dir))
    }

    /// Load configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read site config from {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::from_toml_str(&content, base_dir, &path.display().to_string())?;

        tracing::debug!("Loaded site config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from an explicit path or by discovery from `cwd`.
    ///
    /// Returns the configuration together with the file it came from, or
    /// `None` when defaults were used.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::ConfigNotFound`] if `explicit` names a file that
    /// does not exist, and parse or validation errors from the file.
    pub async fn load_with_optional(
        explicit: Option<PathBuf>,
        cwd: &Path,
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path
            } else {
                cwd.join(path)
            };
            if !path.is_file() {
                return Err(SiteError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            let config = Self::load_from(&path).await?;
            return Ok((config, Some(path)));
        }

        match Self::find(cwd) {
            Some(path) => {
                let config = Self::load_from(&path).await?;
                Ok((config, Some(path)))
            }
            None => {
                tracing::debug!("No {} found from {}, using defaults", CONFIG_FILE_NAME, cwd.display());
                Ok((Self::defaults_at(cwd), None))
            }
        }
    }

    /// Check values that the type system does not.
    pub fn validate(&self) -> Result<(), SiteError> {
        let param_ok = PARAM_RE.as_ref().is_some_and(|re| re.is_match(&self.digest.param));
        if !param_ok {
            return Err(SiteError::ConfigValidation {
                field: "digest.param".to_string(),
                reason: format!(
                    "'{}' must be a non-empty query parameter name made of letters, digits, '_' or '-'",
                    self.digest.param
                ),
            });
        }

        if let Some(length) = self.digest.length {
            let max = self.digest.algorithm.hex_len();
            if length == 0 || length > max {
                return Err(SiteError::ConfigValidation {
                    field: "digest.length".to_string(),
                    reason: format!(
                        "{} is out of range; {} digests have 1 to {} hex characters",
                        length, self.digest.algorithm, max
                    ),
                });
            }
        }

        if self.templates.extensions.is_empty() {
            return Err(SiteError::ConfigValidation {
                field: "templates.extensions".to_string(),
                reason: "at least one template extension is required".to_string(),
            });
        }

        for pattern in &self.templates.exclude {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(SiteError::ConfigValidation {
                    field: "templates.exclude".to_string(),
                    reason: format!("invalid glob pattern '{}': {}", pattern, e),
                });
            }
        }

        Ok(())
    }

    /// Resolve relative `source` and `destination` against `base_dir`.
    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        if self.source.is_relative() {
            self.source = normalize(&base_dir.join(&self.source));
        }
        if self.destination.is_relative() {
            self.destination = normalize(&base_dir.join(&self.destination));
        }
        self
    }
}

/// Drop `.` components so joined paths print cleanly.
fn normalize(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, std::path::Component::CurDir)).collect()
}
