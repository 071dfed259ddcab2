//! CLI binary for sheetgen.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `RenderConfig` and prints the finished document.

use anyhow::{Context, Result};
use clap::Parser;
use sheetgen::{generate, generate_to_file, write_document, Orientation, PaperSize, RenderConfig};
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # A4 portrait letter to stdout
  sheetgen -t letter.html -d letter.yaml > letter.html

  # Landscape US letter with a custom stylesheet
  sheetgen -t report.html -s report.css -d q3.yaml --size letter --orientation landscape

  # Write atomically to a file
  sheetgen -t invoice.html -d invoice.yaml -o out/invoice.html

DATA FILE:
  A YAML mapping. `lang` (the <html lang> attribute) and `title` (the
  document <title>) are required; every other key is available to the
  template.

TEMPLATE HELPERS:
  current_datetime() / now()                 the current local time
  format_datetime(moment, pattern)           strftime-style formatting,
  strftime(moment, pattern)                  e.g. format_datetime(now(), "%d.%m.%Y")

  `moment` can also be a date string from the data file (2024-03-05).

PRINTING:
  Open the output in a browser and print to PDF. Wrap each page in
  <section class="sheet padding-15mm">…</section>.
"#;

/// Render an HTML template and YAML data into a print-ready, paper-sized HTML document.
#[derive(Parser, Debug)]
#[command(
    name = "sheetgen",
    version,
    about = "Render an HTML template and YAML data into a print-ready, paper-sized HTML document",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// The path to the HTML content template.
    #[arg(short, long, value_name = "PATH", env = "SHEETGEN_TEMPLATE")]
    template: PathBuf,

    /// The path to the CSS file.
    #[arg(short = 's', long = "css", value_name = "PATH", env = "SHEETGEN_CSS")]
    css: Option<PathBuf>,

    /// The path to the YAML file containing the variables used in the templates.
    #[arg(short, long, value_name = "PATH", env = "SHEETGEN_DATA")]
    data: PathBuf,

    /// The paper size.
    #[arg(long, env = "SHEETGEN_SIZE", value_enum, default_value = "A4")]
    size: PaperSizeArg,

    /// The page orientation.
    #[arg(long, env = "SHEETGEN_ORIENTATION", value_enum, default_value = "portrait")]
    orientation: OrientationArg,

    /// Write the document to this file instead of stdout.
    #[arg(short, long, value_name = "PATH", env = "SHEETGEN_OUTPUT")]
    output: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SHEETGEN_VERBOSE")]
    verbose: bool,

    /// Suppress all log output except errors.
    #[arg(short, long, env = "SHEETGEN_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PaperSizeArg {
    #[value(name = "A3")]
    A3,
    #[value(name = "A4")]
    A4,
    #[value(name = "A5")]
    A5,
    #[value(name = "letter")]
    Letter,
    #[value(name = "legal")]
    Legal,
}

impl From<PaperSizeArg> for PaperSize {
    fn from(v: PaperSizeArg) -> Self {
        match v {
            PaperSizeArg::A3 => PaperSize::A3,
            PaperSizeArg::A4 => PaperSize::A4,
            PaperSizeArg::A5 => PaperSize::A5,
            PaperSizeArg::Letter => PaperSize::Letter,
            PaperSizeArg::Legal => PaperSize::Legal,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(v: OrientationArg) -> Self {
        match v {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

fn main() -> Result<()> {
    // Usage errors exit here, before any file is touched.
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Logs go to stderr; stdout carries only the document.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    debug!("{:?}", config);

    // ── Generate ─────────────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        generate_to_file(&config, output_path).context("Document generation failed")?;
    } else {
        let document = generate(&config).context("Document generation failed")?;
        write_document(io::stdout().lock(), &document.html, "<stdout>")
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Map CLI args to `RenderConfig`.
fn build_config(cli: &Cli) -> Result<RenderConfig> {
    RenderConfig::builder()
        .template(&cli.template)
        .data(&cli.data)
        .css_opt(cli.css.clone())
        .paper_size(cli.size.into())
        .orientation(cli.orientation.into())
        .build()
        .context("Invalid configuration")
}
