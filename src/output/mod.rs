//! Output formatting for run results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Run outputs and annotations for the CI host

mod json;
mod run_outputs;
mod text;

pub use json::JsonFormatter;
pub use run_outputs::{annotation, write_run_outputs, AnnotationLevel, RunOutputs};
pub use text::TextFormatter;

use crate::gate::RunReport;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether this is a dry-run
    pub dry_run: bool,
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, dry_run: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            dry_run,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the run report
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config.verbosity, config.dry_run)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.dry_run)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_verbose() {
        let config = OutputConfig::from_cli(false, true, false, false);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_output_config_from_cli_quiet() {
        let config = OutputConfig::from_cli(false, false, true, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert!(config.dry_run);
    }
}
