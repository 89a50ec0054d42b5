//! Export formats for loaded atlases.
//!
//! # Supported Formats
//!
//! - **JSON**: pages and regions with their UV coordinates, for tooling
//! - **Descriptor**: the same line-oriented `.atlas` format the loader reads
//!
//! # Example
//!
//! ```ignore
//! use texatlas::export::{DescriptorExporter, ExportOptions, Exporter};
//!
//! let exporter = DescriptorExporter::new();
//! exporter.export(&atlas, Path::new("out/hero.atlas"), &ExportOptions::default())?;
//! ```

pub mod descriptor;
pub mod json;

pub use descriptor::*;
pub use json::*;

use crate::atlas::Atlas;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Common error type for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// IO error during file writing
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Options for export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty print output (with indentation)
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Trait for export format implementations.
pub trait Exporter {
    /// Render the atlas in this format.
    fn export_to_string<T>(&self, atlas: &Atlas<T>, options: &ExportOptions) -> Result<String>;

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;

    /// Export the atlas to `output_path`, creating parent directories.
    fn export<T>(&self, atlas: &Atlas<T>, output_path: &Path, options: &ExportOptions) -> Result<()> {
        let content = self.export_to_string(atlas, options)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = File::create(output_path)?;
        file.write_all(content.as_bytes())?;
        log::debug!("wrote {} export to {}", self.format_name(), output_path.display());

        Ok(())
    }
}
