//! Front matter extraction with gray_matter.

use gray_matter::{Matter, Pod, engine::Engine};
use std::path::Path;

/// Custom gray_matter engine that returns raw front matter text without parsing.
///
/// YAML parsing happens afterwards so that malformed front matter can be
/// reported as a warning while its delimiters are still stripped.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// A page template split into its front matter data and template body.
#[derive(Debug, Clone)]
pub struct Page {
    /// Front matter as a JSON object; empty when the page has none.
    pub data: serde_json::Value,

    /// Template source with the front matter block removed.
    pub content: String,

    /// Whether the source started with a front matter block.
    pub has_frontmatter: bool,
}

/// Splits page templates into front matter and body.
pub struct FrontMatterParser {
    raw_matter: Matter<RawFrontmatter>,
}

impl Default for FrontMatterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontMatterParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            raw_matter: Matter::new(),
        }
    }

    /// Parse a page template.
    ///
    /// Never fails: content that gray_matter cannot split is treated as a
    /// page without front matter, and front matter that is not a YAML
    /// mapping is logged and replaced by an empty object.
    ///
    /// # Arguments
    /// * `content` - The template source
    /// * `path` - Source file, used only for log messages
    pub fn parse(&self, content: &str, path: &Path) -> Page {
        let parsed = match self.raw_matter.parse::<String>(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    "Failed to split front matter in '{}': {}. Treating the whole file as template",
                    path.display(),
                    e
                );
                return Page {
                    data: empty_object(),
                    content: content.to_string(),
                    has_frontmatter: false,
                };
            }
        };

        let Some(raw) = parsed.data else {
            return Page {
                data: empty_object(),
                content: parsed.content,
                has_frontmatter: false,
            };
        };

        Page {
            data: parse_yaml_object(&raw, path),
            content: parsed.content,
            has_frontmatter: true,
        }
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn parse_yaml_object(raw: &str, path: &Path) -> serde_json::Value {
    let yaml = match serde_yaml::from_str::<serde_yaml::Value>(raw) {
        Ok(yaml) => yaml,
        Err(e) => {
            tracing::warn!(
                "Unable to parse YAML front matter in '{}': {}. The page will be rendered without it",
                path.display(),
                e
            );
            return empty_object();
        }
    };

    match yaml {
        serde_yaml::Value::Null => empty_object(),
        serde_yaml::Value::Mapping(_) => match serde_json::to_value(&yaml) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "Front matter in '{}' cannot be used as template data: {}",
                    path.display(),
                    e
                );
                empty_object()
            }
        },
        _ => {
            tracing::warn!(
                "Front matter in '{}' must be a mapping of keys to values, ignoring it",
                path.display()
            );
            empty_object()
        }
    }
}
