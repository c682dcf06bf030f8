//! Rendered-output persistence.
//!
//! The service keeps exactly two transient artifacts: the last rendered
//! banner as plain text and its zip archive. Both live at fixed configured
//! paths and are overwritten by every render; concurrent requests racing on
//! them is an accepted boundary condition of the design, not something this
//! layer guards.

use crate::error::Result;
use crate::zip;
use std::path::{Path, PathBuf};

/// Persists and retrieves the rendered banner and its archive.
pub struct OutputStore {
    output_path: PathBuf,
    archive_path: PathBuf,
}

impl OutputStore {
    pub fn new(output_path: impl Into<PathBuf>, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            archive_path: archive_path.into(),
        }
    }

    /// Persist a freshly rendered banner (the `text` download source).
    pub fn write_banner(&self, banner: &str) -> Result<()> {
        std::fs::write(&self.output_path, banner)?;
        tracing::debug!(path = %self.output_path.display(), bytes = banner.len(), "banner persisted");
        Ok(())
    }

    /// Read back the last rendered banner.
    pub fn read_banner(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.output_path)?)
    }

    /// Build the zip archive around the current banner file, persist it and
    /// return its bytes.
    pub fn build_archive(&self) -> Result<Vec<u8>> {
        let banner = self.read_banner()?;
        let name = self.output_name();
        let archive = zip::write_archive(&[(name.as_str(), banner.as_slice())]);
        std::fs::write(&self.archive_path, &archive)?;
        Ok(archive)
    }

    /// Filename offered for the text download.
    pub fn output_name(&self) -> String {
        file_name(&self.output_path)
    }

    /// Filename offered for the zip download.
    pub fn archive_name(&self) -> String {
        file_name(&self.archive_path)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
