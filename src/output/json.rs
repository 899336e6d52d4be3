//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of per-engine results
//! - Whether package.json was written

use crate::domain::EngineChange;
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn engine_to_json(&self, change: &EngineChange) -> JsonEngine {
        let verbose = self.verbosity == Verbosity::Verbose;
        JsonEngine {
            from: change.from_display(),
            to: change.to_display(),
            changed: change.is_changed(),
            from_range: verbose.then(|| change.from.raw().to_string()),
            to_range: verbose.then(|| change.to.raw().to_string()),
        }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Project name from package.json
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    /// Per-engine results keyed by engine name
    engines: BTreeMap<String, JsonEngine>,
    /// Whether package.json was written
    saved: bool,
}

/// JSON representation of one engine
#[derive(Serialize)]
struct JsonEngine {
    /// Humanized declared constraint
    from: String,
    /// Humanized computed constraint
    to: String,
    /// Whether the two differ
    changed: bool,
    /// Declared range as written (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    from_range: Option<String>,
    /// Computed range in comparator form (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    to_range: Option<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let report = &result.report;
        let engines = report
            .changes
            .iter()
            .filter(|c| self.verbosity != Verbosity::Quiet || c.is_changed())
            .map(|c| (c.engine.clone(), self.engine_to_json(c)))
            .collect();

        let output = JsonOutput {
            project: report.project.clone(),
            engines,
            saved: report.saved,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
