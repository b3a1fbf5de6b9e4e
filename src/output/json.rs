//! JSON output formatter for machine processing

use crate::gate::RunReport;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    dry_run: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Whether a publish was attempted
    published: bool,
    #[serde(flatten)]
    report: &'a RunReport,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dry_run: self.dry_run,
            published: report.published(),
            report,
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
