//! CLI argument parsing module for enginup

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Computes the engines a project supports from its installed dependencies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "enginup",
    version,
    about = "Compute package.json engines from the dependency tree"
)]
pub struct CliArgs {
    /// Project directory containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Engine selection
    /// Compute only these engines (repeatable or comma-separated, e.g. node,npm)
    #[arg(short, long, action = ArgAction::Append, value_delimiter = ',')]
    pub engines: Vec<String>,

    /// Ignore dev-only dependencies
    #[arg(short, long)]
    pub production: bool,

    // Write options
    /// Write changed engines back to package.json
    #[arg(short, long)]
    pub save: bool,

    /// Dry run mode - show what would be saved without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - print changed engines only
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Engine names requested on the command line, trimmed and deduplicated
    pub fn requested_engines(&self) -> Vec<String> {
        let mut requested: Vec<String> = Vec::new();
        for name in self.engines.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
            if !requested.iter().any(|r| r == name) {
                requested.push(name.to_string());
            }
        }
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["enginup"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert!(args.engines.is_empty());
        assert!(!args.production);
        assert!(!args.save);
        assert!(!args.dry_run);
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.no_color);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["enginup", "/some/path"]);
        assert_eq!(args.path, PathBuf::from("/some/path"));
    }

    #[test]
    fn test_engines_repeated() {
        let args = CliArgs::parse_from(["enginup", "--engines", "node", "--engines", "npm"]);
        assert_eq!(args.engines, vec!["node", "npm"]);
    }

    #[test]
    fn test_engines_comma_separated() {
        let args = CliArgs::parse_from(["enginup", "-e", "node,npm"]);
        assert_eq!(args.engines, vec!["node", "npm"]);
    }

    #[test]
    fn test_requested_engines_dedup() {
        let args = CliArgs::parse_from(["enginup", "-e", "node, npm,node", "-e", "npm"]);
        assert_eq!(args.requested_engines(), vec!["node", "npm"]);
    }

    #[test]
    fn test_production_flag() {
        assert!(CliArgs::parse_from(["enginup", "-p"]).production);
        assert!(CliArgs::parse_from(["enginup", "--production"]).production);
    }

    #[test]
    fn test_dry_run_flags() {
        assert!(CliArgs::parse_from(["enginup", "-n"]).dry_run);
        assert!(CliArgs::parse_from(["enginup", "--dry-run"]).dry_run);
    }

    #[test]
    fn test_quiet_flags() {
        assert!(CliArgs::parse_from(["enginup", "-q"]).quiet);
        assert!(CliArgs::parse_from(["enginup", "--quiet"]).quiet);
    }

    #[test]
    fn test_save_flags() {
        let args = CliArgs::parse_from(["enginup", "-s", "-n"]);
        assert!(args.save);
        assert!(args.dry_run);
        assert!(CliArgs::parse_from(["enginup", "--save"]).save);
    }

    #[test]
    fn test_output_flags() {
        let args = CliArgs::parse_from(["enginup", "--json", "--no-color", "--verbose"]);
        assert!(args.json);
        assert!(args.no_color);
        assert!(args.verbose);
    }
}
