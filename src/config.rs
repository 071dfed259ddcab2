//! Configuration types for document generation.
//!
//! Everything a run needs is held in one [`RenderConfig`], built via its
//! [`RenderConfigBuilder`]. The CLI maps its flags onto the builder; library
//! callers set only the fields they care about and rely on the defaults
//! (`A4`, `portrait`, no stylesheet) for the rest.

use crate::error::SheetgenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration for one document generation run.
///
/// # Example
/// ```rust
/// use sheetgen::{Orientation, PaperSize, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .template("letter.html")
///     .data("letter.yaml")
///     .paper_size(PaperSize::Letter)
///     .orientation(Orientation::Landscape)
///     .build()
///     .unwrap();
/// assert_eq!(config.paper_size.as_str(), "letter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Path to the HTML content template.
    pub template_path: PathBuf,

    /// Path to the user stylesheet. When `None` the style slot is filled
    /// with `/* empty */`.
    pub css_path: Option<PathBuf>,

    /// Path to the YAML data file supplying the template variables.
    pub data_path: PathBuf,

    /// Physical paper format. Default: [`PaperSize::A4`].
    pub paper_size: PaperSize,

    /// Page orientation. Default: [`Orientation::Portrait`].
    pub orientation: Orientation,
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// The `"{paper_size} {orientation}"` pair used both as the body class
    /// list and as the `@page` size value.
    pub fn page_geometry(&self) -> String {
        page_geometry(self.paper_size, self.orientation)
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug, Default)]
pub struct RenderConfigBuilder {
    template_path: Option<PathBuf>,
    css_path: Option<PathBuf>,
    data_path: Option<PathBuf>,
    paper_size: PaperSize,
    orientation: Orientation,
}

impl RenderConfigBuilder {
    pub fn template(mut self, path: impl AsRef<Path>) -> Self {
        self.template_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn css(mut self, path: impl AsRef<Path>) -> Self {
        self.css_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set or clear the stylesheet path.
    pub fn css_opt(mut self, path: Option<PathBuf>) -> Self {
        self.css_path = path;
        self
    }

    pub fn data(mut self, path: impl AsRef<Path>) -> Self {
        self.data_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn paper_size(mut self, size: PaperSize) -> Self {
        self.paper_size = size;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Build the configuration, validating that both required paths are set.
    ///
    /// Does not touch the filesystem.
    pub fn build(self) -> Result<RenderConfig, SheetgenError> {
        let template_path = self
            .template_path
            .ok_or_else(|| SheetgenError::InvalidConfig("a template path is required".into()))?;
        let data_path = self
            .data_path
            .ok_or_else(|| SheetgenError::InvalidConfig("a data path is required".into()))?;
        Ok(RenderConfig {
            template_path,
            css_path: self.css_path,
            data_path,
            paper_size: self.paper_size,
            orientation: self.orientation,
        })
    }
}

/// Format the class list / `@page` size value for a size and orientation.
pub fn page_geometry(paper_size: PaperSize, orientation: Orientation) -> String {
    format!("{paper_size} {orientation}")
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Physical paper format.
///
/// The canonical spellings (`A3`, `A4`, `A5`, `letter`, `legal`) are what the
/// built-in stylesheet's `body.<SIZE>` selectors and the CSS `@page size`
/// keyword expect, so they are used verbatim everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[serde(rename = "A3")]
    A3,
    /// ISO A4, 210 × 297 mm. (default)
    #[default]
    #[serde(rename = "A4")]
    A4,
    #[serde(rename = "A5")]
    A5,
    /// US letter, 8.5 × 11 in.
    #[serde(rename = "letter")]
    Letter,
    /// US legal, 8.5 × 14 in.
    #[serde(rename = "legal")]
    Legal,
}

impl PaperSize {
    /// Every supported size, in stylesheet order.
    pub const ALL: [PaperSize; 5] = [
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::Letter,
        PaperSize::Legal,
    ];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperSize {
    type Err = SheetgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| {
                SheetgenError::InvalidConfig(format!(
                    "unknown paper size '{s}' (expected one of: A3, A4, A5, letter, legal)"
                ))
            })
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide. (default)
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = SheetgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| {
                SheetgenError::InvalidConfig(format!(
                    "unknown orientation '{s}' (expected portrait or landscape)"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = RenderConfig::builder()
            .template("t.html")
            .data("d.yaml")
            .build()
            .unwrap();
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert!(config.css_path.is_none());
        assert_eq!(config.page_geometry(), "A4 portrait");
    }

    #[test]
    fn builder_requires_template_and_data() {
        let err = RenderConfig::builder().data("d.yaml").build().unwrap_err();
        assert!(err.to_string().contains("template"), "got: {err}");

        let err = RenderConfig::builder().template("t.html").build().unwrap_err();
        assert!(err.to_string().contains("data"), "got: {err}");
    }

    #[test]
    fn paper_size_spellings_are_exact() {
        for size in PaperSize::ALL {
            assert_eq!(size.as_str().parse::<PaperSize>().unwrap(), size);
        }
        assert!("a4".parse::<PaperSize>().is_err());
        assert!("Letter".parse::<PaperSize>().is_err());
        assert!("A6".parse::<PaperSize>().is_err());
    }

    #[test]
    fn orientation_parse() {
        assert_eq!("landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert_eq!("portrait".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert!("sideways".parse::<Orientation>().is_err());
    }

    #[test]
    fn page_geometry_formats_both_parts() {
        assert_eq!(page_geometry(PaperSize::Legal, Orientation::Landscape), "legal landscape");
    }
}
