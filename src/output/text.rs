//! Text output formatter for human-readable display

use crate::domain::{PackageFile, PublishOutcome};
use crate::gate::RunReport;
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
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color: true,
        }
    }

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
            return String::new();
        }
        if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn headline(&self, report: &RunReport) -> String {
        let id = format!("{} {}", report.package, report.version);
        let id = if self.color {
            id.bold().to_string()
        } else {
            id
        };

        let preposition = if report.published() { "to" } else { "on" };
        let status = match report.outcome {
            PublishOutcome::NotFound | PublishOutcome::NewVersion => {
                let verb = if self.dry_run {
                    "would be published"
                } else if report.artifacts.package.is_some() {
                    "published"
                } else {
                    "not pushed"
                };
                let label = format!("{} ({})", verb, report.outcome.label());
                if self.color {
                    label.green().to_string()
                } else {
                    label
                }
            }
            PublishOutcome::Duplicate => {
                let label = format!("skipped ({})", report.outcome.label());
                if self.color {
                    label.yellow().to_string()
                } else {
                    label
                }
            }
        };

        format!(
            "{}{} {} {} {}",
            self.dry_run_prefix(),
            id,
            status,
            preposition,
            report.registry
        )
    }

    fn write_file(
        &self,
        writer: &mut dyn Write,
        label: &str,
        file: &PackageFile,
    ) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "  {}: {} ({})", label, file.name, file.path.display())
        } else {
            writeln!(writer, "  {}: {}", label, file.name)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        writeln!(writer, "{}", self.headline(report))?;

        if let Some(package) = &report.artifacts.package {
            self.write_file(writer, "package", package)?;
        }
        if let Some(symbols) = &report.artifacts.symbols {
            self.write_file(writer, "symbols", symbols)?;
        }
        if let Some(tag) = &report.artifacts.tag {
            writeln!(writer, "  tag: {}", tag)?;
        }

        Ok(())
    }
}
