//! Configuration schema types for `texatlas.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How descriptors are loaded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtlasSection {
    /// Directory page images are resolved against. Defaults to the
    /// directory containing the descriptor.
    #[serde(default)]
    pub images_dir: Option<PathBuf>,
    /// Flip v coordinates after loading
    #[serde(default)]
    pub flip_v: bool,
}

/// Output settings for `texatlas export`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportSection {
    fn default() -> Self {
        Self { pretty: default_pretty() }
    }
}

/// Complete `texatlas.toml` contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TexatlasConfig {
    #[serde(default)]
    pub atlas: AtlasSection,
    #[serde(default)]
    pub export: ExportSection,
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "atlas.images_dir")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "texatlas.toml: '{}' {}", self.field, self.message)
    }
}

impl TexatlasConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Some(dir) = &self.atlas.images_dir {
            if dir.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: "atlas.images_dir".to_string(),
                    message: "must be a non-empty path".to_string(),
                });
            }
        }

        errors
    }
}
