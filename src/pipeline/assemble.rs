//! Document assembly: wrap rendered content in the fixed HTML skeleton.
//!
//! The skeleton is deliberately not a template: its shape is fixed, and the
//! only values that vary are the page geometry, the two data keys `lang` and
//! `title`, the user stylesheet and the rendered content, all inserted
//! verbatim.
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang="{lang}">
//! <head>
//! <meta charset="UTF-8">
//! <title>{title}</title>
//! </head>
//! <body class="{paper_size} {orientation}">
//! <style>
//! {PAPER_CSS}
//! @page { size: {paper_size} {orientation}; }
//! {user css | /* empty */}
//! </style>
//! {content}
//! </body>
//! </html>
//! ```

use crate::config::{page_geometry, Orientation, PaperSize};
use crate::data::DataEnvironment;
use crate::error::SheetgenError;
use crate::generate::GeneratedDocument;
use crate::paper_css::PAPER_CSS;
use tracing::debug;

/// Placeholder written into the style slot when no stylesheet was given.
pub const EMPTY_CSS: &str = "/* empty */";

/// Everything the skeleton needs, already resolved to text.
#[derive(Debug, Clone, Copy)]
pub struct Skeleton<'a> {
    pub lang: &'a str,
    pub title: &'a str,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub css: Option<&'a str>,
    pub content: &'a str,
}

impl Skeleton<'_> {
    /// Produce the final document text (no trailing newline).
    pub fn render(&self) -> String {
        let geometry = page_geometry(self.paper_size, self.orientation);
        let css = self.css.unwrap_or(EMPTY_CSS);
        let mut html = String::with_capacity(
            PAPER_CSS.len() + css.len() + self.content.len() + 256,
        );
        html.push_str("<!DOCTYPE html>\n");
        html.push_str(&format!("<html lang=\"{}\">\n", self.lang));
        html.push_str("<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", self.title));
        html.push_str("</head>\n");
        html.push_str(&format!("<body class=\"{geometry}\">\n"));
        html.push_str("<style>\n");
        html.push_str(PAPER_CSS);
        html.push('\n');
        html.push_str(&format!("@page {{ size: {geometry}; }}\n"));
        html.push_str(css);
        html.push_str("\n</style>\n");
        html.push_str(self.content);
        html.push_str("\n</body>\n</html>");
        html
    }
}

/// Build the final document from rendered content and the data environment.
///
/// `lang` and `title` are resolved once here and returned alongside the
/// HTML. Fails with [`SheetgenError::MissingKey`] when either is absent.
pub fn assemble(
    content: &str,
    css: Option<&str>,
    data: &DataEnvironment,
    paper_size: PaperSize,
    orientation: Orientation,
) -> Result<GeneratedDocument, SheetgenError> {
    let lang = data.require_str("lang")?;
    let title = data.require_str("title")?;
    let html = Skeleton {
        lang: &lang,
        title: &title,
        paper_size,
        orientation,
        css,
        content,
    }
    .render();
    debug!(
        "Assembled {} document ({} bytes)",
        page_geometry(paper_size, orientation),
        html.len()
    );
    Ok(GeneratedDocument {
        html,
        lang,
        title,
        paper_size,
        orientation,
    })
}
