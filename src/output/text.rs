//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One aligned `engine  from → to` line per engine, with colors
//! - Changed/ok markers
//! - A closing summary that says whether package.json was written

use crate::domain::{EngineChange, EngineReport};
use crate::orchestrator::OrchestratorResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if !self.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn format_line(
        &self,
        change: &EngineChange,
        name_width: usize,
        from_width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let from = change.from_display();
        let to = change.to_display();
        let changed = change.is_changed();

        if self.color {
            let name = format!("{:width$}", change.engine, width = name_width);
            let from = format!("{:width$}", from, width = from_width);
            let (to, marker) = if changed {
                (to.bright_white().bold(), "changed".yellow())
            } else {
                (to.normal(), "ok".green())
            };
            writeln!(
                writer,
                "  {} {} {} {} [{}]",
                name.bold(),
                from.dimmed(),
                "→".dimmed(),
                to,
                marker
            )?;
        } else {
            writeln!(
                writer,
                "  {:nw$} {:fw$} -> {} [{}]",
                change.engine,
                from,
                to,
                if changed { "changed" } else { "ok" },
                nw = name_width,
                fw = from_width
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "      from: {}", change.from.raw())?;
            writeln!(writer, "      to:   {}", change.to.raw())?;
        }
        Ok(())
    }

    fn format_header(&self, report: &EngineReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let name = report.project.as_deref().unwrap_or("(unnamed)");
        let path = report.manifest.display().to_string();

        if self.color {
            writeln!(writer, "{}{} {}", self.dry_run_prefix(), name.bold(), path.dimmed())?;
        } else {
            writeln!(writer, "{}{} {}", self.dry_run_prefix(), name, path)?;
        }
        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "  {} dependencies scanned", report.dependencies_scanned)?;
        }
        Ok(())
    }

    fn format_summary(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let report = &result.report;
        let changed = report.changed().count();
        let noun = if changed == 1 { "engine" } else { "engines" };

        let message = if changed == 0 {
            "All engines are up to date.".to_string()
        } else if report.saved {
            format!("Updated {} {} in {}.", changed, noun, report.manifest.display())
        } else if result.write_result.is_some() {
            format!("{}{} {} would be updated.", self.dry_run_prefix(), changed, noun)
        } else {
            format!(
                "{} {} changed. Run with --save to update package.json.",
                changed, noun
            )
        };

        writeln!(writer)?;
        if !self.color {
            writeln!(writer, "{}", message)
        } else if changed == 0 || report.saved {
            writeln!(writer, "{}", message.green())
        } else {
            writeln!(writer, "{}", message.yellow())
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let report = &result.report;
        let shown: Vec<&EngineChange> = if self.verbosity == Verbosity::Quiet {
            report.changed().collect()
        } else {
            report.changes.iter().collect()
        };

        let name_width = shown.iter().map(|c| c.engine.len()).max().unwrap_or(0);
        let from_width = shown
            .iter()
            .map(|c| c.from_display().chars().count())
            .max()
            .unwrap_or(0);

        if self.verbosity != Verbosity::Quiet {
            self.format_header(report, writer)?;
        }
        for change in shown {
            self.format_line(change, name_width, from_width, writer)?;
        }
        if self.verbosity != Verbosity::Quiet {
            self.format_summary(result, writer)?;
        }
        Ok(())
    }
}
