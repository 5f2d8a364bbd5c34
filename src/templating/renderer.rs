//! Template rendering engine with Tera.
//!
//! This module provides the TemplateRenderer struct that wraps Tera with the
//! site's custom filters and turns Tera's error chains into [`TemplateError`]s.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};
use super::filters::{self, ASSET_DIGEST_FILTER};
use crate::digest::DigestSettings;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
/// This represents a 50% similarity threshold for name suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Lines of template source shown before and after an error line.
const ERROR_CONTEXT_LINES: usize = 5;

static FILTER_NOT_FOUND_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Filter '([^']+)' not found").ok());

static VARIABLE_NOT_FOUND_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Variable `([^`]+)` not found").ok());

static LINE_COLUMN_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+):(\d+)").ok());

/// Filters Tera ships with, used for "did you mean" suggestions.
const BUILTIN_FILTERS: &[&str] = &[
    "abs",
    "addslashes",
    "as_str",
    "capitalize",
    "concat",
    "date",
    "default",
    "escape",
    "escape_xml",
    "filesizeformat",
    "filter",
    "first",
    "float",
    "get",
    "group_by",
    "indent",
    "int",
    "join",
    "json_encode",
    "last",
    "length",
    "linebreaksbr",
    "lower",
    "map",
    "nth",
    "pluralize",
    "replace",
    "reverse",
    "round",
    "safe",
    "slice",
    "slugify",
    "sort",
    "spaceless",
    "split",
    "striptags",
    "title",
    "trim",
    "trim_end",
    "trim_end_matches",
    "trim_start",
    "trim_start_matches",
    "truncate",
    "unique",
    "upper",
    "urlencode",
    "urlencode_strict",
    "wordcount",
];

/// Template renderer with Tera engine and the site's custom filters.
///
/// # Filters
///
/// - `asset_digest`: cache-bust an asset reference with its content digest
pub struct TemplateRenderer {
    /// Root directory asset references are resolved against
    site_root: PathBuf,
    /// Digest configuration for `asset_digest`
    settings: DigestSettings,
}

impl TemplateRenderer {
    /// Create a new template renderer.
    ///
    /// # Arguments
    ///
    /// * `site_root` - Directory asset references are resolved against
    /// * `settings` - Digest algorithm, query parameter and truncation
    pub fn new(site_root: PathBuf, settings: DigestSettings) -> Self {
        Self {
            site_root,
            settings,
        }
    }

    /// Root directory asset references are resolved against.
    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Render template source with the given context.
    ///
    /// A fresh Tera instance is built for each call so filters always see
    /// the current state of the site root.
    ///
    /// # Arguments
    ///
    /// * `template_content` - Raw template source
    /// * `context` - Variables available to the template
    /// * `source_path` - File the template came from, used in error messages
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the template does not parse, references an
    /// unknown filter or variable, or a filter rejects its input.
    pub fn render_str(
        &self,
        template_content: &str,
        context: &TeraContext,
        source_path: Option<&Path>,
    ) -> Result<String, TemplateError> {
        tracing::debug!(
            "Rendering template {}",
            source_path.map(|p| p.display().to_string()).unwrap_or_else(|| "<inline>".to_string())
        );
        Self::log_context_as_kv(context);

        let mut tera = Tera::default();
        tera.register_filter(
            ASSET_DIGEST_FILTER,
            filters::create_asset_digest_filter(self.site_root.clone(), self.settings.clone()),
        );

        tera.render_str(template_content, context)
            .map_err(|e| Self::parse_tera_error(&e, template_content, context, source_path))
    }

    /// Parse a Tera error into a structured TemplateError
    fn parse_tera_error(
        error: &tera::Error,
        template_content: &str,
        context: &TeraContext,
        source_path: Option<&Path>,
    ) -> TemplateError {
        let line_number = Self::extract_line_from_tera_error(error);

        if let Some(name) = Self::find_unknown_filter(error) {
            let line = line_number.or_else(|| Self::locate_line(template_content, &name));
            let mut candidates: Vec<String> = BUILTIN_FILTERS.iter().map(|s| s.to_string()).collect();
            candidates.push(ASSET_DIGEST_FILTER.to_string());

            return TemplateError::UnknownFilter {
                suggestions: Box::new(Self::find_similar(&name, &candidates)),
                location: Box::new(Self::build_error_location(template_content, source_path, line)),
                name,
            };
        }

        let message = Self::format_tera_error(error);
        if let Some(variable) = Self::extract_variable_name(&message) {
            let line = line_number.or_else(|| Self::locate_line(template_content, &variable));
            let available = Self::extract_available_variables(context);

            return TemplateError::VariableNotFound {
                suggestions: Box::new(Self::find_similar(&variable, &available)),
                location: Box::new(Self::build_error_location(template_content, source_path, line)),
                variable,
            };
        }

        TemplateError::SyntaxError {
            message,
            location: Box::new(Self::build_error_location(
                template_content,
                source_path,
                line_number,
            )),
        }
    }

    /// Walk the error chain looking for Tera's "filter not found"
    fn find_unknown_filter(error: &tera::Error) -> Option<String> {
        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
        while let Some(err) = current {
            if let Some(tera_err) = err.downcast_ref::<tera::Error>() {
                if let tera::ErrorKind::FilterNotFound(name) = &tera_err.kind {
                    return Some(name.clone());
                }
            }
            current = err.source();
        }

        // Older Tera versions report it as a plain message
        let re = FILTER_NOT_FOUND_RE.as_ref()?;
        re.captures(&Self::format_tera_error(error))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        let re = VARIABLE_NOT_FOUND_RE.as_ref()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }

    /// Dotted paths of every variable in the context, up to three levels deep
    fn extract_available_variables(context: &TeraContext) -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, depth: usize, out: &mut Vec<String>) {
            out.push(prefix.to_string());
            if depth == 0 {
                return;
            }
            if let serde_json::Value::Object(map) = value {
                for (key, child) in map {
                    walk(&format!("{}.{}", prefix, key), child, depth - 1, out);
                }
            }
        }

        let mut vars = Vec::new();
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in &map {
                walk(key, value, 2, &mut vars);
            }
        }
        vars
    }

    /// Find similar names using Levenshtein distance
    fn find_similar(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> = available
            .iter()
            .map(|candidate| {
                let distance = levenshtein(target, candidate);
                (candidate.clone(), distance)
            })
            .collect();

        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist > 0 && *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(name, _)| name)
            .collect()
    }

    /// First 1-indexed line of the template mentioning `needle`
    fn locate_line(content: &str, needle: &str) -> Option<usize> {
        content.lines().position(|line| line.contains(needle)).map(|idx| idx + 1)
    }

    /// Extract context lines around an error location
    ///
    /// Returns up to `context_size` lines before and after the error line,
    /// along with their line numbers (1-indexed).
    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, line.to_string()))
            .collect()
    }

    /// Extract line number from Tera error message
    ///
    /// Tera includes line:column information in parse error messages.
    /// Examples: "1:7", "15:23", "864:1"
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let error_msg = format!("{:?}", error);

        let re = LINE_COLUMN_RE.as_ref()?;
        re.captures(&error_msg)
            .and_then(|caps| caps.get(1))
            .and_then(|line_str| line_str.as_str().parse::<usize>().ok())
    }

    fn build_error_location(
        template_content: &str,
        source_path: Option<&Path>,
        line_number: Option<usize>,
    ) -> ErrorLocation {
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template_content, line, ERROR_CONTEXT_LINES))
            .filter(|lines| !lines.is_empty());

        ErrorLocation {
            file_path: source_path.map(Path::to_path_buf),
            line_number,
            context_lines,
        }
    }

    /// Format a Tera error with detailed information about what went wrong.
    ///
    /// Walks the entire error chain and drops Tera's internal one-off
    /// template name (`__tera_one_off`), which means nothing to site authors.
    pub fn format_tera_error(error: &tera::Error) -> String {
        use std::error::Error;

        let mut messages = Vec::new();

        let mut all_messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            all_messages.push(err.to_string());
            current_error = err.source();
        }

        for msg in all_messages {
            let cleaned = msg
                .replace("while rendering '__tera_one_off'", "")
                .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string();

            if !cleaned.is_empty()
                && cleaned != "Template rendering failed"
                && cleaned != "Template syntax error"
            {
                messages.push(cleaned);
            }
        }

        if !messages.is_empty() {
            messages.join("\n  → ")
        } else {
            "Template syntax error (see details above)".to_string()
        }
    }

    /// Log the template context as key-value pairs at debug level.
    fn log_context_as_kv(context: &TeraContext) {
        fn format_value(key: &str, value: &serde_json::Value, indent: usize, lines: &mut Vec<String>) {
            let prefix = "  ".repeat(indent);
            match value {
                serde_json::Value::Object(map) => {
                    lines.push(format!("{}{}:", prefix, key));
                    for (k, v) in map {
                        format_value(k, v, indent + 1, lines);
                    }
                }
                serde_json::Value::Array(arr) => {
                    lines.push(format!("{}{}: [{} items]", prefix, key, arr.len()));
                }
                serde_json::Value::String(s) if s.chars().count() > 100 => {
                    let head: String = s.chars().take(97).collect();
                    lines.push(format!("{}{}: \"{}...\" ({} chars)", prefix, key, head, s.len()));
                }
                other => lines.push(format!("{}{}: {}", prefix, key, other)),
            }
        }

        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }

        let mut lines = Vec::new();
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in &map {
                format_value(key, value, 1, &mut lines);
            }
        }
        for line in lines {
            tracing::debug!("{}", line);
        }
    }
}
