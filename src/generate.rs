//! Generation entry points: run the whole pipeline and emit the document.
//!
//! The stages run strictly in order (read, render, assemble) and the
//! document is only handed to a writer once it is complete, so a failed run
//! never leaves partial output behind.

use crate::clock::{Clock, SystemClock};
use crate::config::{Orientation, PaperSize, RenderConfig};
use crate::data::DataEnvironment;
use crate::error::SheetgenError;
use crate::pipeline::{assemble, content::ContentRenderer, input};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Name under which the content template appears in error messages when it
/// did not come from a file.
const INLINE_TEMPLATE_NAME: &str = "content";

/// A fully assembled document plus the values that shaped it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    /// The complete HTML document, without a trailing newline.
    pub html: String,
    pub lang: String,
    pub title: String,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
}

/// Already-loaded inputs for [`render_document`].
#[derive(Debug, Clone)]
pub struct DocumentSources<'a> {
    /// Template text.
    pub template: &'a str,
    /// Template name used in error messages.
    pub template_name: &'a str,
    pub data: &'a DataEnvironment,
    pub css: Option<&'a str>,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
}

impl<'a> DocumentSources<'a> {
    pub fn new(template: &'a str, data: &'a DataEnvironment) -> Self {
        Self {
            template,
            template_name: INLINE_TEMPLATE_NAME,
            data,
            css: None,
            paper_size: PaperSize::default(),
            orientation: Orientation::default(),
        }
    }
}

/// Generate a document from the files named in `config`, using the system
/// clock for `current_datetime()`.
pub fn generate(config: &RenderConfig) -> Result<GeneratedDocument, SheetgenError> {
    generate_with_clock(config, Arc::new(SystemClock))
}

/// Generate a document with an injected clock.
pub fn generate_with_clock(
    config: &RenderConfig,
    clock: Arc<dyn Clock>,
) -> Result<GeneratedDocument, SheetgenError> {
    let start = Instant::now();
    info!(
        "Generating {} document from {}",
        config.page_geometry(),
        config.template_path.display()
    );

    // ── Step 1: Load inputs ──────────────────────────────────────────────
    let data = input::load_data(&config.data_path)?;
    let css = input::read_stylesheet(config.css_path.as_deref())?;
    let template = input::read_text(&config.template_path)?;
    let template_name = config.template_path.display().to_string();

    // ── Step 2 + 3: Render and assemble ──────────────────────────────────
    let document = render_document(
        &DocumentSources {
            template: &template,
            template_name: &template_name,
            data: &data,
            css: css.as_deref(),
            paper_size: config.paper_size,
            orientation: config.orientation,
        },
        clock,
    )?;

    info!(
        "Generated '{}' ({} bytes) in {}ms",
        document.title,
        document.html.len(),
        start.elapsed().as_millis()
    );
    Ok(document)
}

/// Render and assemble a document from in-memory inputs.
pub fn render_document(
    sources: &DocumentSources<'_>,
    clock: Arc<dyn Clock>,
) -> Result<GeneratedDocument, SheetgenError> {
    let renderer = ContentRenderer::new(clock);
    let content = renderer.render(sources.template_name, sources.template, sources.data)?;

    assemble::assemble(
        &content,
        sources.css,
        sources.data,
        sources.paper_size,
        sources.orientation,
    )
}

/// Write a finished document followed by a newline, then flush.
///
/// `label` names the destination in errors (e.g. `<stdout>`).
pub fn write_document(
    mut writer: impl Write,
    html: &str,
    label: impl Into<PathBuf>,
) -> Result<(), SheetgenError> {
    let result = writer
        .write_all(html.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .and_then(|()| writer.flush());
    result.map_err(|source| SheetgenError::OutputWriteFailed {
        path: label.into(),
        source,
    })
}

/// Generate a document and write it to `output_path`.
///
/// Uses an atomic write (temp file in the same directory, then rename) so an
/// existing file is either fully replaced or left untouched.
pub fn generate_to_file(
    config: &RenderConfig,
    output_path: impl AsRef<Path>,
) -> Result<GeneratedDocument, SheetgenError> {
    let document = generate(config)?;
    write_file_atomic(output_path.as_ref(), &document.html)?;
    Ok(document)
}

fn write_file_atomic(path: &Path, html: &str) -> Result<(), SheetgenError> {
    let write_failed = |source| SheetgenError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_failed)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    write_document(tmp.as_file_mut(), html, path)?;
    set_output_permissions(&tmp, path).map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Temp files are created owner-only (0600). Give the output the mode of the
/// file it replaces, or 0644 for a new file.
#[cfg(unix)]
fn set_output_permissions(tmp: &NamedTempFile, path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = match std::fs::metadata(path) {
        Ok(existing) => existing.permissions().mode() & 0o7777,
        Err(_) => 0o644,
    };
    tmp.as_file()
        .set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_output_permissions(_tmp: &NamedTempFile, _path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::DateTime;

    fn fixed_clock() -> Arc<dyn Clock> {
        let moment = DateTime::parse_from_rfc3339("2024-01-31T09:00:00+00:00").unwrap();
        Arc::new(FixedClock::new(moment))
    }

    #[test]
    fn render_document_in_memory() {
        let data = DataEnvironment::from_yaml_str(
            "lang: en\ntitle: Invoice\n",
            Path::new("inline.yaml"),
        )
        .unwrap();
        let doc = render_document(
            &DocumentSources::new("<p>Hello {{ title }}</p>", &data),
            fixed_clock(),
        )
        .unwrap();
        assert_eq!(doc.title, "Invoice");
        assert_eq!(doc.lang, "en");
        assert!(doc.html.contains("<body class=\"A4 portrait\">"));
        assert!(doc.html.contains("<p>Hello Invoice</p>"));
        assert!(doc.html.contains("/* empty */"));
    }

    #[test]
    fn write_document_appends_newline() {
        let mut buf = Vec::new();
        write_document(&mut buf, "<html></html>", "<memory>").unwrap();
        assert_eq!(buf, b"<html></html>\n");
    }
}
