//! Core types for asset-digest
//!
//! ## `error` - Error Handling
//!
//! - [`SiteError`] - Enumerated failures of the site host (config, templates, build)
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use asset_digest::core::{ErrorContext, SiteError};
//!
//! let context = ErrorContext::new(SiteError::SourceNotFound {
//!     path: "site".to_string(),
//! })
//! .with_suggestion("Pass --root pointing at the site directory");
//!
//! assert!(context.to_string().contains("Suggestion: Pass --root"));
//! ```

pub mod error;

pub use error::{ErrorContext, SiteError, user_friendly_error};
