//! Per-engine results
//!
//! Provides the `{from, to}` pair computed for each engine and the report
//! collecting them for a whole project.

use super::Range;
use crate::reduce::humanize;
use std::path::PathBuf;

/// Declared (`from`) versus computed (`to`) constraint for one engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineChange {
    /// Engine name (e.g. `node`)
    pub engine: String,
    /// Constraint found in the project's own manifest
    pub from: Range,
    /// Constraint computed from the dependency tree
    pub to: Range,
}

impl EngineChange {
    pub fn new(engine: impl Into<String>, from: Range, to: Range) -> Self {
        Self {
            engine: engine.into(),
            from,
            to,
        }
    }

    /// Humanized form of `from`
    pub fn from_display(&self) -> String {
        humanize(Some(&self.from))
    }

    /// Humanized form of `to`
    pub fn to_display(&self) -> String {
        humanize(Some(&self.to))
    }

    /// Returns true if the computed constraint differs from the declared one
    ///
    /// Compared on the humanized forms, so `^14.17.0` and
    /// `>=14.17.0 <15.0.0-0` count as the same constraint.
    pub fn is_changed(&self) -> bool {
        self.from_display() != self.to_display()
    }
}

/// Result of computing engines for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReport {
    /// Path to the project's package.json
    pub manifest: PathBuf,
    /// Project name from package.json
    pub project: Option<String>,
    /// Number of dependencies taken into account
    pub dependencies_scanned: usize,
    /// One entry per selected engine, sorted by engine name
    pub changes: Vec<EngineChange>,
    /// Whether changed engines were written back to package.json
    pub saved: bool,
}

impl EngineReport {
    pub fn new(manifest: impl Into<PathBuf>, project: Option<String>) -> Self {
        Self {
            manifest: manifest.into(),
            project,
            dependencies_scanned: 0,
            changes: Vec::new(),
            saved: false,
        }
    }

    /// Engines whose computed constraint differs from the declared one
    pub fn changed(&self) -> impl Iterator<Item = &EngineChange> {
        self.changes.iter().filter(|c| c.is_changed())
    }

    /// Returns true if any engine changed
    pub fn has_changes(&self) -> bool {
        self.changed().next().is_some()
    }
}
