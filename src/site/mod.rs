//! Site builds: render templates and copy everything else.
//!
//! The builder walks the configured source directory and mirrors it into the
//! destination:
//!
//! | Source file | Action |
//! |-------------|--------|
//! | extension listed in `templates.extensions` | rendered with front matter as `page` |
//! | any other file | copied byte-for-byte |
//! | path with a component starting with `_` or `.` | skipped |
//! | path matching a `templates.exclude` glob | skipped |
//! | the destination directory and the config file | skipped |
//!
//! Private directories are pruned without being descended into, so the files
//! inside them do not appear in [`BuildReport::skipped`].
//!
//! The destination may live inside the source (the default `_site` does)
//! but must not be the source itself or one of its ancestors.
//!
//! Files are processed in sorted order so repeated builds log identically.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tera::Context as TeraContext;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::core::SiteError;
use crate::page::FrontMatterParser;
use crate::templating::TemplateRenderer;
use crate::utils::{atomic_write_async, ensure_dir, normalize_path_for_storage};

/// Counts of what a build did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Templates rendered
    pub rendered: usize,
    /// Files copied unchanged
    pub copied: usize,
    /// Files skipped as private, excluded or the config file.
    ///
    /// Files under pruned private directories are not counted.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileAction {
    Render,
    Copy,
    Skip,
}

/// Builds a site directory according to a [`SiteConfig`].
pub struct SiteBuilder {
    config: SiteConfig,
    config_file: Option<PathBuf>,
    renderer: TemplateRenderer,
    parser: FrontMatterParser,
    excludes: Vec<glob::Pattern>,
}

impl SiteBuilder {
    /// Create a builder.
    ///
    /// `config_file` is the file the configuration was loaded from, so that
    /// it is not copied into the output when it lives inside the source.
    pub fn new(config: SiteConfig, config_file: Option<PathBuf>) -> Result<Self> {
        let excludes = config
            .templates
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern)
                    .with_context(|| format!("Invalid exclude pattern '{}'", pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        let renderer = TemplateRenderer::new(config.source.clone(), config.digest.clone());

        Ok(Self {
            config,
            config_file,
            renderer,
            parser: FrontMatterParser::new(),
            excludes,
        })
    }

    /// The configuration this builder uses.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render one page template from disk.
    ///
    /// Front matter is stripped and exposed as `page`, with `page.path` set
    /// to the template's path relative to the source directory.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::TemplateNotFound`] if the file does not exist and
    /// [`SiteError::RenderFailed`] if the template does not render.
    pub async fn render_page(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            return Err(SiteError::TemplateNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read template {}", path.display()))?;

        let page = self.parser.parse(&source, path);
        let mut data = page.data;
        if let serde_json::Value::Object(map) = &mut data {
            map.insert("path".to_string(), serde_json::Value::String(self.relative_display(path)));
        }

        let mut context = TeraContext::new();
        context.insert("page", &data);
        context.insert(
            "site",
            &serde_json::json!({
                "source": self.config.source.display().to_string(),
                "destination": self.config.destination.display().to_string(),
            }),
        );

        self.renderer
            .render_str(&page.content, &context, Some(path))
            .map_err(|e| SiteError::render_failed(path.display().to_string(), &e).into())
    }

    /// Build the whole site into the destination directory.
    pub async fn build(&self) -> Result<BuildReport> {
        let source = &self.config.source;
        if !source.is_dir() {
            return Err(SiteError::SourceNotFound {
                path: source.display().to_string(),
            }
            .into());
        }

        self.check_destination()?;
        ensure_dir(&self.config.destination)?;
        tracing::info!(
            "Building {} -> {}",
            source.display(),
            self.config.destination.display()
        );

        let mut report = BuildReport::default();
        let destination = self.config.destination.clone();

        let walker = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_pruned_dir(entry));

        for entry in walker {
            let entry = entry
                .with_context(|| format!("Failed to read directory entry in: {}", source.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(source).unwrap_or(path);
            let target = destination.join(relative);

            match self.classify(path, relative) {
                FileAction::Render => {
                    let rendered = self.render_page(path).await?;
                    atomic_write_async(&target, rendered.into_bytes()).await?;
                    tracing::debug!("Rendered {}", normalize_path_for_storage(relative));
                    report.rendered += 1;
                }
                FileAction::Copy => {
                    if let Some(parent) = target.parent() {
                        tokio::fs::create_dir_all(parent).await.with_context(|| {
                            format!("Failed to create directory: {}", parent.display())
                        })?;
                    }
                    tokio::fs::copy(path, &target).await.with_context(|| {
                        format!("Failed to copy {} to {}", path.display(), target.display())
                    })?;
                    tracing::debug!("Copied {}", normalize_path_for_storage(relative));
                    report.copied += 1;
                }
                FileAction::Skip => {
                    tracing::debug!("Skipped {}", normalize_path_for_storage(relative));
                    report.skipped += 1;
                }
            }
        }

        tracing::info!(
            "Build finished: {} rendered, {} copied, {} skipped",
            report.rendered,
            report.copied,
            report.skipped
        );
        Ok(report)
    }

    /// Refuse a destination that is the source or contains it.
    ///
    /// Writing there would overwrite templates and truncate copied assets in
    /// place.
    fn check_destination(&self) -> Result<(), SiteError> {
        let destination = &self.config.destination;
        if !destination.exists() {
            return Ok(());
        }

        let canonical = |path: &Path| {
            path.canonicalize().map_err(|_| SiteError::FileSystemError {
                operation: "resolve path".to_string(),
                path: path.display().to_string(),
            })
        };
        let source = canonical(&self.config.source)?;
        let destination_canonical = canonical(destination)?;

        if source.starts_with(&destination_canonical) {
            return Err(SiteError::ConfigValidation {
                field: "destination".to_string(),
                reason: format!(
                    "{} would overwrite the site source {}; choose a directory inside or beside it",
                    destination.display(),
                    self.config.source.display()
                ),
            });
        }
        Ok(())
    }

    /// Directories never descended into
    fn is_pruned_dir(&self, entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_dir()
            && (entry.path().starts_with(&self.config.destination) || is_private(entry.file_name()))
    }

    fn classify(&self, path: &Path, relative: &Path) -> FileAction {
        if self.config_file.as_deref() == Some(path) {
            return FileAction::Skip;
        }

        if relative.components().any(|c| is_private(c.as_os_str())) {
            return FileAction::Skip;
        }

        let relative_str = normalize_path_for_storage(relative);
        if self.excludes.iter().any(|pattern| pattern.matches(&relative_str)) {
            return FileAction::Skip;
        }

        let is_template = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.templates.is_template_extension(ext));

        if is_template {
            FileAction::Render
        } else {
            FileAction::Copy
        }
    }

    fn relative_display(&self, path: &Path) -> String {
        normalize_path_for_storage(path.strip_prefix(&self.config.source).unwrap_or(path))
    }
}

fn is_private(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('_') || s.starts_with('.'))
}
