//! Path-to-cache-busted-path transformation.
//!
//! [`AssetDigester`] resolves an asset reference against the site root, hashes
//! the file it points at, and appends the digest as a query parameter:
//!
//! ```text
//! /css/site.css  ->  /css/site.css?v=2cf24dba5fb0a30e...
//! ```
//!
//! References that do not point at a regular file inside the root are
//! returned untouched. This includes missing files, directories, paths that
//! climb out of the root with `..`, and files that cannot be read. None of
//! these fail the render; a template referencing a file that is generated
//! later in the build still produces a usable URL.

use std::path::{Component, Path, PathBuf};

use super::{DigestSettings, compute_digest};

/// Turns asset references into cache-busted references.
///
/// Holds no state beyond its configuration. Every call to [`bust`](Self::bust)
/// reads the file again, so edits between renders are always picked up.
#[derive(Debug, Clone)]
pub struct AssetDigester {
    root: PathBuf,
    settings: DigestSettings,
}

impl AssetDigester {
    /// Create a digester resolving references against `root`.
    pub fn new(root: impl Into<PathBuf>, settings: DigestSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    /// The site root references are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The digest settings in use.
    pub fn settings(&self) -> &DigestSettings {
        &self.settings
    }

    /// Resolve an asset reference to a file inside the root.
    ///
    /// A single leading `/` (or `\`) is stripped first, so `/css/site.css` and
    /// `css/site.css` resolve to the same file. Returns `None` when the result
    /// is not a regular file contained in the root.
    pub fn resolve(&self, input: &str) -> Option<PathBuf> {
        let relative = strip_leading_separator(input);
        let path = Path::new(relative);

        let mut depth: i32 = 0;
        for component in path.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => {
                    depth -= 1;
                    if depth < 0 {
                        tracing::warn!(
                            "asset_digest: '{}' points outside the site root, leaving it unchanged",
                            input
                        );
                        return None;
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    tracing::warn!(
                        "asset_digest: '{}' is not relative to the site root, leaving it unchanged",
                        input
                    );
                    return None;
                }
            }
        }

        let candidate = self.root.join(path);
        if !candidate.is_file() {
            tracing::debug!("asset_digest: no file at {}", candidate.display());
            return None;
        }

        // Symlinks may still lead outside the root
        let canonical = candidate.canonicalize().ok()?;
        let canonical_root = self.root.canonicalize().ok()?;
        if !canonical.starts_with(&canonical_root) {
            tracing::warn!(
                "asset_digest: '{}' resolves to {} outside {}, leaving it unchanged",
                input,
                canonical.display(),
                canonical_root.display()
            );
            return None;
        }

        Some(canonical)
    }

    /// Hex digest of the asset `input` refers to, truncated per the settings.
    ///
    /// Returns `None` if the reference does not resolve or the file cannot
    /// be read.
    pub fn digest(&self, input: &str) -> Option<String> {
        let path = self.resolve(input)?;

        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "asset_digest: failed to read {}: {}. Leaving '{}' unchanged",
                    path.display(),
                    e,
                    input
                );
                return None;
            }
        };

        let full = compute_digest(&content, self.settings.algorithm);
        Some(self.settings.truncate(&full).to_string())
    }

    /// Append the content digest of `input` as a query parameter.
    ///
    /// Returns `"{input}?{param}={digest}"` for an existing file and `input`
    /// unchanged otherwise. The reference keeps its original form, including
    /// any leading `/`.
    pub fn bust(&self, input: &str) -> String {
        match self.digest(input) {
            Some(digest) => {
                tracing::info!("asset_digest: generated {} => {}", input, digest);
                format!("{}?{}={}", input, self.settings.param, digest)
            }
            None => input.to_string(),
        }
    }
}

/// Cache-bust `input` against `root` with default settings.
pub fn asset_digest(root: &Path, input: &str) -> String {
    AssetDigester::new(root, DigestSettings::default()).bust(input)
}

fn strip_leading_separator(input: &str) -> &str {
    input.strip_prefix(['/', '\\']).unwrap_or(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestAlgorithm;
    use std::fs;
    use tempfile::TempDir;

    fn create_site() -> TempDir {
        crate::test_utils::init_test_logging(None);
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("css")).unwrap();
        fs::write(temp.path().join("css/site.css"), "hello").unwrap();
        fs::write(temp.path().join("app.js"), "console.log(1);").unwrap();
        temp
    }

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_existing_file_gets_digest() {
        let site = create_site();
        let digester = AssetDigester::new(site.path(), DigestSettings::default());

        assert_eq!(digester.bust("css/site.css"), format!("css/site.css?v={}", HELLO_SHA256));
    }

    #[test]
    fn test_leading_slash_kept_in_output() {
        let site = create_site();
        let digester = AssetDigester::new(site.path(), DigestSettings::default());

        assert_eq!(digester.bust("/css/site.css"), format!("/css/site.css?v={}", HELLO_SHA256));
    }

    #[test]
    fn test_only_one_leading_separator_stripped() {
        let site = create_site();
        let digester = AssetDigester::new(site.path(), DigestSettings::default());

        assert_eq!(digester.bust("//css/site.css"), "//css/site.css");
    }

    #[test]
    fn test_missing_file_unchanged() {
        let site = create_site();
        let digester = AssetDigester::new(site.path(), DigestSettings::default());

        assert_eq!(digester.bust("/css/missing.css"), "/css/missing.css");
        assert_eq!(digester.bust(""), "");
        assert_eq!(digester.bust("/"), "/");
    }

    #[test]
    fn test_directory_unchanged() {
        let site = create_site();
        let digester = AssetDigester::new(site.path(), DigestSettings::default());

        assert_eq!(digester.bust("/css"), "/css");
        assert!(digester.resolve("css").is_none());
    }

    #[test]
    fn test_traversal_unchanged() {
        let site = create_site();
        let inner = site.path().join("css");
        let digester = AssetDigester::new(&inner, DigestSettings::default());

        // app.js exists one level up but outside this root
        assert_eq!(digester.bust("../app.js"), "../app.js");
        // Climbing back in is fine
        fs::create_dir_all(inner.join("sub")).unwrap();
        assert_eq!(digester.bust("sub/../site.css"), format!("sub/../site.css?v={}", HELLO_SHA256));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_unchanged() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let site = create_site();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), site.path().join("link.txt"))
            .unwrap();

        let digester = AssetDigester::new(site.path(), DigestSettings::default());
        assert_eq!(digester.bust("link.txt"), "link.txt");
    }

    #[test]
    fn test_content_change_changes_digest() {
        let site = create_site();
        let digester = AssetDigester::new(site.path(), DigestSettings::default());

        let before = digester.bust("/app.js");
        assert_eq!(before, digester.bust("/app.js"), "digest must be stable");

        fs::write(site.path().join("app.js"), "console.log(2);").unwrap();
        let after = digester.bust("/app.js");

        assert_ne!(before, after);
        assert!(after.starts_with("/app.js?v="));
    }

    #[test]
    fn test_custom_param_algorithm_and_length() {
        let site = create_site();
        let settings = DigestSettings {
            algorithm: DigestAlgorithm::Md5,
            param: "rev".to_string(),
            length: Some(10),
        };
        let digester = AssetDigester::new(site.path(), settings);

        assert_eq!(digester.bust("/css/site.css"), "/css/site.css?rev=5d41402abc");
    }

    #[test]
    fn test_convenience_function() {
        let site = create_site();
        assert_eq!(asset_digest(site.path(), "css/site.css"), format!("css/site.css?v={}", HELLO_SHA256));
        assert_eq!(asset_digest(site.path(), "nope.css"), "nope.css");
    }

    #[test]
    fn test_missing_root() {
        let digester = AssetDigester::new("/definitely/not/a/site/root", DigestSettings::default());
        assert_eq!(digester.bust("/css/site.css"), "/css/site.css");
    }
}
