//! # sheetgen
//!
//! Render a YAML data file and a Jinja-style HTML template into a single,
//! standalone HTML document sized for a physical paper format, ready to be
//! printed to PDF from any browser.
//!
//! ## Pipeline Overview
//!
//! ```text
//! template.html + data.yaml [+ style.css]
//!  │
//!  ├─ 1. Config    paths, paper size (A3/A4/A5/letter/legal), orientation
//!  ├─ 2. Input     read the files; YAML → data environment
//!  ├─ 3. Content   render the template (MiniJinja, strict undefined)
//!  ├─ 4. Assemble  paper.css + @page rule + user css + content → skeleton
//!  └─ 5. Output    document + newline to stdout (or a file, atomically)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sheetgen::{generate, PaperSize, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::builder()
//!         .template("invoice.html")
//!         .data("invoice.yaml")
//!         .css("invoice.css")
//!         .paper_size(PaperSize::A4)
//!         .build()?;
//!     let document = generate(&config)?;
//!     println!("{}", document.html);
//!     Ok(())
//! }
//! ```
//!
//! ## Template helpers
//!
//! Besides the data keys, templates can call `current_datetime()` (alias
//! `now()`) and `format_datetime(moment, pattern)` (alias `strftime`). The
//! clock behind them is injectable; see [`clock`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sheetgen` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod generate;
pub mod paper_css;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use clock::{Clock, FixedClock, Moment, SystemClock};
pub use config::{Orientation, PaperSize, RenderConfig, RenderConfigBuilder};
pub use data::DataEnvironment;
pub use error::{ErrorKind, SheetgenError};
pub use generate::{
    generate, generate_to_file, generate_with_clock, render_document, write_document,
    DocumentSources, GeneratedDocument,
};
pub use paper_css::PAPER_CSS;
