//! Input loading: read the template, stylesheet and data files.
//!
//! Every file is opened, read to the end and closed before the next stage
//! starts. I/O failures are mapped onto the data-load variants of
//! [`SheetgenError`] so the message names the file that could not be read.

use crate::data::DataEnvironment;
use crate::error::SheetgenError;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String, SheetgenError> {
    let mut file = std::fs::File::open(path).map_err(|e| map_io_error(path, e))?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| map_io_error(path, e))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Read an optional stylesheet. `None` in, `None` out.
pub fn read_stylesheet(path: Option<&Path>) -> Result<Option<String>, SheetgenError> {
    path.map(read_text).transpose()
}

/// Load and parse the YAML data file.
///
/// Only checks that the file is a YAML mapping; the keys the skeleton needs
/// are looked up later, at assembly time.
pub fn load_data(path: &Path) -> Result<DataEnvironment, SheetgenError> {
    let text = read_text(path)?;
    let data = DataEnvironment::from_yaml_str(&text, path)?;
    debug!("Loaded {} top-level keys from {}", data.len(), path.display());
    Ok(data)
}

fn map_io_error(path: &Path, err: std::io::Error) -> SheetgenError {
    let path = path.to_path_buf();
    match err.kind() {
        ErrorKind::NotFound => SheetgenError::FileNotFound { path },
        ErrorKind::PermissionDenied => SheetgenError::PermissionDenied { path },
        _ => SheetgenError::ReadFailed { path, source: err },
    }
}
