//! Export collaborator: writes the rendered frame and the instance list, and
//! reads the files scripts point at.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::fs;
use std::path::{Path, PathBuf};

use canvas::doc::PlacedFixture;
use canvas::engine::Engine;

use crate::error::HostError;

/// Write the current frame as a PNG.
///
/// # Errors
///
/// Returns an error if encoding or the file write fails.
pub fn write_png(engine: &Engine, path: &Path) -> Result<(), HostError> {
    let png = engine.encode_png()?;
    fs::write(path, png).map_err(|source| HostError::Write { path: path.to_owned(), source })
}

/// Write fixtures as a pretty-printed JSON array in paint order.
///
/// # Errors
///
/// Returns [`HostError::Encode`] if serialization fails and
/// [`HostError::Write`] if the file write fails.
pub fn write_instance_list(fixtures: &[PlacedFixture], path: &Path) -> Result<(), HostError> {
    let json = serde_json::to_string_pretty(fixtures).map_err(HostError::Encode)?;
    fs::write(path, json).map_err(|source| HostError::Write { path: path.to_owned(), source })
}

/// Read a fixture list previously written by [`write_instance_list`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a fixture list.
pub fn read_instance_list(path: &Path) -> Result<Vec<PlacedFixture>, HostError> {
    let text = read_text(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a binary file such as an imported image.
///
/// # Errors
///
/// Returns [`HostError::Read`] on I/O failure.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, HostError> {
    fs::read(path).map_err(|source| HostError::Read { path: path.to_owned(), source })
}

/// Resolve `path` against the directory of the file that named it. Absolute
/// paths are returned unchanged.
#[must_use]
pub fn relative_to(origin: &Path, path: &Path) -> PathBuf {
    match origin.parent() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_owned(),
    }
}

/// Read a UTF-8 file, tagging failures with the path.
///
/// # Errors
///
/// Returns [`HostError::Read`] on I/O failure.
pub fn read_text(path: &Path) -> Result<String, HostError> {
    fs::read_to_string(path).map_err(|source| HostError::Read { path: path.to_owned(), source })
}
