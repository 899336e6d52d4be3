//! enginup - package.json engines calculator CLI tool
//!
//! Reads the project's package.json and lockfile, computes the engines
//! range every installed dependency agrees on, and optionally saves it.

use clap::Parser;
use enginup::cli::CliArgs;
use enginup::orchestrator::Orchestrator;
use enginup::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code when engines changed but package.json was not written
const EXIT_CHANGED: u8 = 2;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::debug!("enginup v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("target: {}", args.path.display());

    let orchestrator = Orchestrator::new(args.clone());
    let result = orchestrator.run()?;

    let output_config =
        OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.dry_run, args.no_color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.report.has_changes() && !result.report.saved {
        Ok(ExitCode::from(EXIT_CHANGED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
