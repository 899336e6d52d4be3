//! Writing computed engines back to package.json
//!
//! This module provides:
//! - ManifestWriter for applying engine changes to package.json
//! - Dry-run mode support (no actual file modifications)

use super::package_json::{update_engines, ProjectManifest};
use crate::domain::EngineChange;
use crate::error::ManifestError;
use std::fs;
use std::path::{Path, PathBuf};

/// Writer that applies engine changes to a project manifest
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of applying engine changes to package.json
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Engines whose constraint was rewritten
    pub engines_updated: Vec<String>,
    /// Whether the file was actually modified
    pub file_modified: bool,
}

impl WriteResult {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            engines_updated: Vec::new(),
            file_modified: false,
        }
    }
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Writes the humanized `to` value of every changed engine
    pub fn apply(
        &self,
        manifest: &ProjectManifest,
        changes: &[EngineChange],
    ) -> Result<WriteResult, ManifestError> {
        let mut result = WriteResult::new(&manifest.path);

        let values: Vec<(String, String)> = changes
            .iter()
            .filter(|c| c.is_changed())
            .map(|c| (c.engine.clone(), c.to_display()))
            .collect();
        if values.is_empty() {
            return Ok(result);
        }

        let updates: Vec<(&str, &str)> = values
            .iter()
            .map(|(engine, constraint)| (engine.as_str(), constraint.as_str()))
            .collect();
        let content = update_engines(&manifest.path, &manifest.content, &updates)?;

        result.engines_updated = values.into_iter().map(|(engine, _)| engine).collect();

        if self.dry_run {
            tracing::info!("dry run: not writing {}", manifest.path.display());
        } else {
            write_manifest(&manifest.path, &content)?;
            tracing::info!(
                "updated {} in {}",
                result.engines_updated.join(", "),
                manifest.path.display()
            );
            result.file_modified = true;
        }

        Ok(result)
    }
}

/// Write content to a manifest file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))
}
