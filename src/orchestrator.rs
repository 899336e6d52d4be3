//! Engine computation orchestrator
//!
//! This module provides:
//! - Workflow coordination: read manifest → read lockfile → select engines →
//!   aggregate → write
//! - Engine selection against the engines the project tree knows about
//! - Production-only filtering and dry-run support

use crate::cli::CliArgs;
use crate::domain::{Dependency, EngineChange, EngineReport};
use crate::error::{AppError, ConfigError};
use crate::manifest::{read_lockfile, read_project, ManifestWriter, ProjectManifest, WriteResult};
use crate::reduce::aggregate;
use std::collections::BTreeSet;

/// Orchestrator for the engine computation workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Per-engine results for the project
    pub report: EngineReport,
    /// Outcome of writing package.json, when `--save` was given
    pub write_result: Option<WriteResult>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    /// Run the workflow
    pub fn run(&self) -> Result<OrchestratorResult, AppError> {
        let dir = &self.args.path;
        if !dir.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: dir.clone(),
                message: "not a directory".to_string(),
            }
            .into());
        }

        let project = read_project(dir)?;
        let dependencies: Vec<Dependency> = read_lockfile(dir)?
            .into_iter()
            .filter(|d| !(self.args.production && d.is_dev))
            .collect();
        tracing::debug!(
            "{} dependencies considered in {}",
            dependencies.len(),
            dir.display()
        );

        let available = recognized_engines(&project, &dependencies);
        let engines = select_engines(&self.args.requested_engines(), &available)?;

        let mut report = EngineReport::new(&project.path, project.name.clone());
        report.dependencies_scanned = dependencies.len();
        for engine in &engines {
            report.changes.push(compute_engine(engine, &project, &dependencies)?);
        }

        let write_result = if self.args.save {
            let writer = ManifestWriter::new(self.args.dry_run);
            let result = writer.apply(&project, &report.changes)?;
            report.saved = result.file_modified;
            Some(result)
        } else {
            None
        };

        Ok(OrchestratorResult {
            report,
            write_result,
        })
    }
}

/// Declared (`from`) and computed (`to`) range of one engine
pub fn compute_engine(
    engine: &str,
    project: &ProjectManifest,
    dependencies: &[Dependency],
) -> Result<EngineChange, AppError> {
    let project_name = project.name.as_deref().unwrap_or("package.json");
    let from = aggregate(engine, [(project_name, project.engine_constraint(engine))])?;
    let to = aggregate(
        engine,
        dependencies
            .iter()
            .map(|d| (d.name.as_str(), d.engine_constraint(engine))),
    )?;

    tracing::debug!(
        "{}: {} of {} dependencies constrain it",
        engine,
        to.contributors(),
        dependencies.len()
    );
    Ok(EngineChange::new(engine, from.range, to.range))
}

/// Every engine named by the project or any dependency, sorted
pub fn recognized_engines(project: &ProjectManifest, dependencies: &[Dependency]) -> Vec<String> {
    let mut names = BTreeSet::new();
    let declared = project
        .engines
        .iter()
        .chain(dependencies.iter().filter_map(|d| d.engines.as_ref()));
    for engines in declared {
        names.extend(engines.names().map(str::to_string));
    }
    names.into_iter().collect()
}

/// Narrows `available` to the `requested` engines (all of them if none requested)
pub fn select_engines(requested: &[String], available: &[String]) -> Result<Vec<String>, ConfigError> {
    let selected: Vec<String> = if requested.is_empty() {
        available.to_vec()
    } else {
        available
            .iter()
            .filter(|name| requested.contains(name))
            .cloned()
            .collect()
    };

    if selected.is_empty() {
        return Err(ConfigError::no_engines_selected(requested, available));
    }
    for name in requested.iter().filter(|r| !available.contains(r)) {
        tracing::warn!("engine '{}' is not declared anywhere in the project", name);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const PACKAGE: &str = r#"{
  "name": "my-app",
  "engines": {
    "node": ">=12"
  }
}
"#;

    const LOCK: &str = r#"{
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "my-app" },
    "node_modules/a": { "engines": { "node": ">=12.22.0" } },
    "node_modules/b": { "engines": { "node": "^14.17.0 || >=16.0.0", "npm": ">=7" } },
    "node_modules/c": { "dev": true, "engines": { "node": ">=16.10.0", "yarn": ">=1" } },
    "node_modules/d": { "engines": { "node": ">=a.b.c" } }
  }
}"#;

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), PACKAGE).unwrap();
        fs::write(temp.path().join("package-lock.json"), LOCK).unwrap();
        temp
    }

    fn make_args_with_path(path: &Path, extra: &[&str]) -> CliArgs {
        let mut argv = vec!["enginup", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    fn run(temp: &TempDir, extra: &[&str]) -> Result<OrchestratorResult, AppError> {
        Orchestrator::new(make_args_with_path(temp.path(), extra)).run()
    }

    #[test]
    fn test_run_all_engines() {
        let temp = setup();
        let result = run(&temp, &[]).unwrap();
        let report = result.report;

        assert_eq!(report.project.as_deref(), Some("my-app"));
        assert_eq!(report.dependencies_scanned, 4);
        let engines: Vec<_> = report.changes.iter().map(|c| c.engine.as_str()).collect();
        assert_eq!(engines, vec!["node", "npm", "yarn"]);

        let node = &report.changes[0];
        assert_eq!(node.from_display(), ">=12.0.0");
        assert_eq!(node.to_display(), ">=16.10.0");
        assert!(node.is_changed());
        assert!(result.write_result.is_none());
    }

    #[test]
    fn test_run_production_only() {
        let temp = setup();
        let report = run(&temp, &["--production"]).unwrap().report;

        let engines: Vec<_> = report.changes.iter().map(|c| c.engine.as_str()).collect();
        assert_eq!(engines, vec!["node", "npm"]);
        assert_eq!(report.changes[0].to_display(), "^14.17.0 || >=16.0.0");
        assert_eq!(report.changes[1].from_display(), "*");
        assert_eq!(report.changes[1].to_display(), ">=7.0.0");
    }

    #[test]
    fn test_run_engine_filter() {
        let temp = setup();
        let report = run(&temp, &["--engines", "npm,deno"]).unwrap().report;
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].engine, "npm");
    }

    #[test]
    fn test_run_engine_filter_matches_nothing() {
        let temp = setup();
        let err = run(&temp, &["--engines", "deno"]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::NoEnginesSelected { .. })
        ));
    }

    #[test]
    fn test_run_save() {
        let temp = setup();
        let result = run(&temp, &["--save", "-e", "node"]).unwrap();
        assert!(result.report.saved);

        let written = fs::read_to_string(temp.path().join("package.json")).unwrap();
        assert!(written.contains(r#""node": ">=16.10.0""#));

        let again = run(&temp, &["-e", "node"]).unwrap();
        assert!(!again.report.has_changes());
    }

    #[test]
    fn test_run_save_dry_run() {
        let temp = setup();
        let result = run(&temp, &["--save", "--dry-run"]).unwrap();
        assert!(!result.report.saved);
        assert!(!result.write_result.unwrap().engines_updated.is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join("package.json")).unwrap(),
            PACKAGE
        );
    }

    #[test]
    fn test_run_reduce_error_is_fatal() {
        let temp = setup();
        fs::write(
            temp.path().join("package-lock.json"),
            r#"{"lockfileVersion": 3, "packages": {
                "node_modules/a": { "engines": { "node": "^14.0.0" } },
                "node_modules/b": { "engines": { "node": "^16.0.0" } }
            }}"#,
        )
        .unwrap();

        let err = run(&temp, &[]).unwrap_err();
        assert!(matches!(err, AppError::Reduce(_)));
    }

    #[test]
    fn test_run_missing_lockfile() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), PACKAGE).unwrap();
        assert!(matches!(run(&temp, &[]).unwrap_err(), AppError::Manifest(_)));
    }

    #[test]
    fn test_run_invalid_path() {
        let args = CliArgs::parse_from(["enginup", "/nonexistent/project"]);
        let err = Orchestrator::new(args).run().unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidPath { .. })));
    }

    #[test]
    fn test_select_engines() {
        let available = vec!["node".to_string(), "npm".to_string()];

        assert_eq!(select_engines(&[], &available).unwrap(), available);
        assert_eq!(
            select_engines(&["npm".to_string()], &available).unwrap(),
            vec!["npm"]
        );
        assert!(select_engines(&["deno".to_string()], &available).is_err());
        assert!(select_engines(&[], &[]).is_err());
    }
}
