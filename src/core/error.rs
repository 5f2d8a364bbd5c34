//! Error handling for asset-digest
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`SiteError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! Note that a missing asset is never an error: the `asset_digest` filter
//! passes such references through unchanged. The errors here cover the host
//! around the filter: configuration, template files and the site build.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asset_digest::core::{ErrorContext, SiteError, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(SiteError::TemplateNotFound {
//!         path: "index.html".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = load() {
//!     user_friendly_error(e).display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::CONFIG_FILE_NAME;
use crate::templating::TemplateError;

/// The main error type for asset-digest operations
#[derive(Error, Debug, Clone)]
pub enum SiteError {
    /// An explicitly requested config file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Config file is not valid TOML or has unknown keys
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigParse {
        /// Config file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// Config file parsed but holds unusable values
    #[error("Invalid configuration value for '{field}': {reason}")]
    ConfigValidation {
        /// Dotted field name, e.g. `digest.param`
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Site source directory is missing
    #[error("Site source directory not found: {path}")]
    SourceNotFound {
        /// Directory that was expected
        path: String,
    },

    /// Template file passed to `render` does not exist
    #[error("Template not found: {path}")]
    TemplateNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Template failed to render
    #[error("Failed to render {path}: {message}")]
    RenderFailed {
        /// Template file
        path: String,
        /// Headline of the template error
        message: String,
        /// Full report from [`TemplateError::format_with_context`]
        report: String,
    },

    /// Filesystem failure outside asset lookup
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// What was being done
        operation: String,
        /// Path involved
        path: String,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl SiteError {
    /// Wrap a [`TemplateError`] raised while rendering `path`.
    pub fn render_failed(path: impl Into<String>, error: &TemplateError) -> Self {
        Self::RenderFailed {
            path: path.into(),
            message: error.to_string(),
            report: error.format_with_context(),
        }
    }
}

/// Error wrapper with a suggestion and details for display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SiteError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SiteError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions for the CLI
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(site_error) = error.downcast_ref::<SiteError>() {
        return create_error_context(site_error.clone());
    }

    if let Some(template_error) = error.downcast_ref::<TemplateError>() {
        let path = template_error
            .location()
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "template".to_string());
        return create_error_context(SiteError::render_failed(path, template_error));
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(SiteError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the site directories")
                .with_details(io_error.to_string());
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(SiteError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(io_error.to_string());
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return create_error_context(SiteError::ConfigParse {
            file: CONFIG_FILE_NAME.to_string(),
            reason: toml_error.to_string(),
        });
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SiteError::Other {
        message,
    })
}

fn create_error_context(error: SiteError) -> ErrorContext {
    match &error {
        SiteError::ConfigNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion(format!(
            "Check the --config path, or unset ASSET_DIGEST_CONFIG to search for {} automatically",
            CONFIG_FILE_NAME
        )),
        SiteError::ConfigParse {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(format!(
                "Check the TOML syntax in {}. Allowed top-level keys: source, destination, [digest], [templates]",
                CONFIG_FILE_NAME
            ))
            .with_details("Unknown keys are rejected so that typos do not silently fall back to defaults"),
        SiteError::ConfigValidation {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(format!("Fix the value in {}", CONFIG_FILE_NAME)),
        SiteError::SourceNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Set 'source' in the config file or pass --root pointing at the site directory",
        ),
        SiteError::TemplateNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the template path; it is resolved relative to the current directory"),
        SiteError::RenderFailed {
            report,
            ..
        } => {
            let details = report.trim_end().to_string();
            ErrorContext::new(error)
                .with_suggestion(
                    "Asset references must be quoted strings, e.g. {{ '/css/site.css' | asset_digest }}",
                )
                .with_details(details)
        }
        SiteError::FileSystemError {
            ..
        } => ErrorContext::new(error).with_suggestion("Check permissions and free disk space"),
        SiteError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
