//! Content digests for cache busting.
//!
//! This module computes the hex digest that gets appended to asset references
//! and hosts the [`AssetDigester`] that turns an asset path into a
//! cache-busted reference.
//!
//! # Algorithms
//!
//! | Algorithm | Hex length | Notes |
//! |-----------|-----------|-------|
//! | `md5`     | 32        | Matches digests produced by the Jekyll `asset_digest` plugin |
//! | `sha256`  | 64        | Default |
//! | `sha512`  | 128       | |
//!
//! # Examples
//!
//! ```rust
//! use asset_digest::digest::{DigestAlgorithm, compute_digest};
//!
//! let hex = compute_digest(b"hello", DigestAlgorithm::Md5);
//! assert_eq!(hex, "5d41402abc4b2a76b9719d911017c592");
//! ```

mod cache_bust;

pub use cache_bust::{AssetDigester, asset_digest};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_QUERY_PARAM;

/// Hash algorithm used to fingerprint asset content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// MD5, kept for URL compatibility with sites migrated from Jekyll.
    Md5,
    /// SHA-256.
    #[default]
    Sha256,
    /// SHA-512.
    Sha512,
}

impl DigestAlgorithm {
    /// Length of the full lowercase hex digest for this algorithm.
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }

    /// Lowercase name as used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the lowercase hex digest of `content`.
///
/// The digest depends only on the bytes, so identical content always yields
/// the same string on every platform.
pub fn compute_digest(content: &[u8], algorithm: DigestAlgorithm) -> String {
    use sha2::{Digest, Sha256, Sha512};

    match algorithm {
        DigestAlgorithm::Md5 => format!("{:x}", md5::compute(content)),
        DigestAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(content);
            hex::encode(hasher.finalize())
        }
        DigestAlgorithm::Sha512 => {
            let mut hasher = Sha512::new();
            hasher.update(content);
            hex::encode(hasher.finalize())
        }
    }
}

/// How digests are computed and attached to asset references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigestSettings {
    /// Hash algorithm.
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Query parameter name used for the token (`v` in `app.css?v=...`).
    #[serde(default = "default_param")]
    pub param: String,

    /// Keep only the first `length` hex characters of the digest.
    ///
    /// `None` keeps the full digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

fn default_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            param: default_param(),
            length: None,
        }
    }
}

impl DigestSettings {
    /// Apply the configured truncation to a full hex digest.
    pub fn truncate<'a>(&self, hex: &'a str) -> &'a str {
        match self.length {
            Some(len) if len < hex.len() => &hex[..len],
            _ => hex,
        }
    }
}
