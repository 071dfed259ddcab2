//! Error types for the sheetgen library.
//!
//! A single fatal error enum, [`SheetgenError`], covers every way a run can
//! fail. Variants are grouped by [`ErrorKind`] so callers (and the CLI) can
//! tell a bad invocation from an unreadable data file or a template that
//! references a key the data does not provide.
//!
//! Nothing is recovered internally: the first error aborts the pipeline and
//! no document is emitted.

use std::path::PathBuf;
use thiserror::Error;

/// Broad failure category of a [`SheetgenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid invocation: missing required input or an out-of-set value.
    Usage,
    /// A data, template or stylesheet file could not be read or parsed.
    DataLoad,
    /// The template could not be rendered or the skeleton could not be filled.
    Render,
    /// The finished document could not be written.
    Output,
}

/// All fatal errors returned by the sheetgen library.
#[derive(Debug, Error)]
pub enum SheetgenError {
    // ── Usage errors ──────────────────────────────────────────────────────
    /// Builder validation or enum parsing failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Data load errors ──────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading, including invalid UTF-8.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not well-formed YAML.
    #[error("Data file '{path}' is not valid YAML: {detail}")]
    InvalidData { path: PathBuf, detail: String },

    /// The data file parsed, but its top level is not a mapping.
    #[error("Data file '{path}' must contain a mapping at the top level (found {found})")]
    DataNotAMapping { path: PathBuf, found: &'static str },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The template contains a malformed construct.
    #[error("Syntax error in template '{name}': {detail}")]
    TemplateSyntax { name: String, detail: String },

    /// Rendering failed, typically an undefined variable or a helper error.
    #[error("Failed to render template '{name}': {detail}")]
    RenderFailed { name: String, detail: String },

    /// A key the document skeleton needs is absent from the data.
    #[error("Data is missing required key '{key}'")]
    MissingKey { key: String },

    /// A key the document skeleton needs holds a non-scalar value.
    #[error("Data key '{key}' must be a scalar value, found {found}")]
    InvalidKey { key: String, found: &'static str },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not write the finished document.
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SheetgenError {
    /// The failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetgenError::InvalidConfig(_) => ErrorKind::Usage,
            SheetgenError::FileNotFound { .. }
            | SheetgenError::PermissionDenied { .. }
            | SheetgenError::ReadFailed { .. }
            | SheetgenError::InvalidData { .. }
            | SheetgenError::DataNotAMapping { .. } => ErrorKind::DataLoad,
            SheetgenError::TemplateSyntax { .. }
            | SheetgenError::RenderFailed { .. }
            | SheetgenError::MissingKey { .. }
            | SheetgenError::InvalidKey { .. } => ErrorKind::Render,
            SheetgenError::OutputWriteFailed { .. } => ErrorKind::Output,
        }
    }

    /// Map a template engine error onto the render variants.
    pub(crate) fn from_template(name: &str, err: &minijinja::Error) -> Self {
        let detail = describe_template_error(err);
        if err.kind() == minijinja::ErrorKind::SyntaxError {
            SheetgenError::TemplateSyntax {
                name: name.to_string(),
                detail,
            }
        } else {
            SheetgenError::RenderFailed {
                name: name.to_string(),
                detail,
            }
        }
    }
}

/// Flatten a MiniJinja error and its causes into one line.
fn describe_template_error(err: &minijinja::Error) -> String {
    let mut detail = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_display() {
        let e = SheetgenError::MissingKey {
            key: "title".into(),
        };
        assert!(e.to_string().contains("'title'"), "got: {e}");
        assert_eq!(e.kind(), ErrorKind::Render);
    }

    #[test]
    fn file_not_found_is_data_load() {
        let e = SheetgenError::FileNotFound {
            path: PathBuf::from("/nope/data.yaml"),
        };
        assert!(e.to_string().contains("/nope/data.yaml"));
        assert_eq!(e.kind(), ErrorKind::DataLoad);
    }

    #[test]
    fn invalid_config_is_usage() {
        let e = SheetgenError::InvalidConfig("template path is required".into());
        assert_eq!(e.kind(), ErrorKind::Usage);
        assert!(e.to_string().contains("template path"));
    }

    #[test]
    fn syntax_errors_map_to_template_syntax() {
        let env = minijinja::Environment::new();
        let err = env
            .template_from_str("{% if %}")
            .err()
            .expect("template must not parse");
        let mapped = SheetgenError::from_template("content", &err);
        assert!(matches!(mapped, SheetgenError::TemplateSyntax { .. }), "got: {mapped:?}");
        assert_eq!(mapped.kind(), ErrorKind::Render);
    }
}
