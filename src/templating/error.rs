//! Structured template errors.
//!
//! Tera reports failures as a chain of strings. [`TemplateError`] pulls out
//! the parts a site author needs (what broke, which file, which line) and
//! [`TemplateError::format_with_context`] prints them with the surrounding
//! template source.

use std::path::PathBuf;

/// Template rendering failure with location details
#[derive(Debug)]
pub enum TemplateError {
    VariableNotFound {
        variable: String,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    UnknownFilter {
        name: String,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Where in the site a template error occurred
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Template file, if rendering came from disk
    pub file_path: Option<PathBuf>,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Lines around the error as (1-indexed line number, text)
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl ErrorLocation {
    fn describe_file(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<inline template>".to_string())
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                ..
            } => {
                write!(f, "Template variable not found: '{}'", variable)
            }
            TemplateError::UnknownFilter {
                name,
                ..
            } => {
                write!(f, "Unknown template filter: '{}'", name)
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// Location details of this error
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::UnknownFilter {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            } => location,
        }
    }

    /// Generate user-friendly error message with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                suggestions,
                location,
            } => format_not_found_error("Template Variable Not Found", "Variable", variable, suggestions, location),
            TemplateError::UnknownFilter {
                name,
                suggestions,
                location,
            } => format_not_found_error("Unknown Template Filter", "Filter", name, suggestions, location),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
        }
    }
}

/// Format an unknown variable/filter error
fn format_not_found_error(
    title: &str,
    kind: &str,
    name: &str,
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str(&format!("ERROR: {}\n\n", title));
    msg.push_str(&format!("{}: {}\n", kind, name));
    msg.push_str(&format!("Template: {}\n", location.describe_file()));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push('\n');

    push_context_lines(&mut msg, location);

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions.iter() {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    msg
}

/// Format syntax error
fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    msg.push_str(&format!("Template: {}\n", location.describe_file()));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push('\n');

    push_context_lines(&mut msg, location);

    msg.push_str("SUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Missing quotes around asset paths, e.g. {{ '/css/site.css' | asset_digest }}\n");
    msg.push_str("  - Piping a non-string value into asset_digest\n\n");

    msg
}

fn push_context_lines(msg: &mut String, location: &ErrorLocation) {
    let Some(lines) = &location.context_lines else {
        return;
    };

    let width = lines.last().map(|(n, _)| n.to_string().len()).unwrap_or(1);
    for (number, text) in lines {
        let marker = if Some(*number) == location.line_number {
            ">"
        } else {
            " "
        };
        msg.push_str(&format!("{} {:>width$} | {}\n", marker, number, text, width = width));
    }
    msg.push('\n');
}
