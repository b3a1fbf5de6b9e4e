//! Run outputs and log annotations for the CI host
//!
//! Outputs go to the file named by `GITHUB_OUTPUT` when the runner provides
//! one, otherwise they are printed as `::set-output` workflow commands.

use crate::gate::RunReport;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Named values published at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutputs {
    entries: Vec<(&'static str, String)>,
}

impl RunOutputs {
    /// Collect the outputs of a report
    pub fn from_report(report: &RunReport) -> Self {
        let mut entries = Vec::new();
        if let Some(package) = &report.artifacts.package {
            entries.push(("PACKAGE_NAME", package.name.clone()));
            entries.push(("PACKAGE_PATH", package.path.display().to_string()));
        }
        if let Some(symbols) = &report.artifacts.symbols {
            entries.push(("SYMBOLS_PACKAGE_NAME", symbols.name.clone()));
            entries.push(("SYMBOLS_PACKAGE_PATH", symbols.path.display().to_string()));
        }
        if let Some(tag) = &report.artifacts.tag {
            entries.push(("VERSION", tag.clone()));
        }
        Self { entries }
    }

    /// Get an output by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether there is nothing to publish
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write outputs to `output_file` if given, else as workflow commands
pub fn write_run_outputs(
    outputs: &RunOutputs,
    output_file: Option<&Path>,
    stdout: &mut dyn Write,
) -> std::io::Result<()> {
    match output_file {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            for (name, value) in &outputs.entries {
                writeln!(file, "{}={}", name, value)?;
            }
        }
        None => {
            for (name, value) in &outputs.entries {
                writeln!(stdout, "::set-output name={}::{}", name, escape_data(value))?;
            }
        }
    }
    Ok(())
}

/// Severity of a log annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Error,
    Warning,
}

impl AnnotationLevel {
    fn as_str(&self) -> &'static str {
        match self {
            AnnotationLevel::Error => "error",
            AnnotationLevel::Warning => "warning",
        }
    }
}

/// Render a workflow annotation line, e.g. `::error::message`
pub fn annotation(level: AnnotationLevel, message: &str) -> String {
    format!("::{}::{}", level.as_str(), escape_data(message))
}

/// Escape a value for a workflow command
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageFile, PublishOutcome, PublishedArtifacts};
    use std::path::PathBuf;

    fn report() -> RunReport {
        RunReport {
            package: "Foo".to_string(),
            version: "1.2.3".to_string(),
            registry: "nuget.org".to_string(),
            outcome: PublishOutcome::NewVersion,
            artifacts: PublishedArtifacts {
                package: Some(PackageFile {
                    name: "Foo.1.2.3.nupkg".to_string(),
                    path: PathBuf::from("/work/Foo.1.2.3.nupkg"),
                }),
                symbols: Some(PackageFile {
                    name: "Foo.1.2.3.snupkg".to_string(),
                    path: PathBuf::from("/work/Foo.1.2.3.snupkg"),
                }),
                tag: Some("v1.2.3".to_string()),
            },
        }
    }

    #[test]
    fn test_outputs_from_report() {
        let outputs = RunOutputs::from_report(&report());
        assert_eq!(outputs.get("PACKAGE_NAME"), Some("Foo.1.2.3.nupkg"));
        assert_eq!(outputs.get("PACKAGE_PATH"), Some("/work/Foo.1.2.3.nupkg"));
        assert_eq!(outputs.get("SYMBOLS_PACKAGE_NAME"), Some("Foo.1.2.3.snupkg"));
        assert_eq!(outputs.get("VERSION"), Some("v1.2.3"));
    }

    #[test]
    fn test_outputs_empty_for_skip() {
        let mut report = report();
        report.outcome = PublishOutcome::Duplicate;
        report.artifacts = PublishedArtifacts::default();
        assert!(RunOutputs::from_report(&report).is_empty());
    }

    #[test]
    fn test_write_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "EXISTING=1\n").unwrap();

        let mut stdout = Vec::new();
        write_run_outputs(&RunOutputs::from_report(&report()), Some(path.as_path()), &mut stdout).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("EXISTING=1\n"));
        assert!(content.contains("PACKAGE_NAME=Foo.1.2.3.nupkg\n"));
        assert!(content.contains("VERSION=v1.2.3\n"));
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_write_as_workflow_commands() {
        let mut stdout = Vec::new();
        write_run_outputs(&RunOutputs::from_report(&report()), None, &mut stdout).unwrap();

        let text = String::from_utf8(stdout).unwrap();
        assert!(text.contains("::set-output name=PACKAGE_NAME::Foo.1.2.3.nupkg\n"));
        assert!(text.contains("::set-output name=VERSION::v1.2.3\n"));
    }

    #[test]
    fn test_annotation_escapes_newlines() {
        assert_eq!(
            annotation(AnnotationLevel::Error, "first\nsecond 100%"),
            "::error::first%0Asecond 100%25"
        );
        assert_eq!(
            annotation(AnnotationLevel::Warning, "Version 1.2.3 already exists"),
            "::warning::Version 1.2.3 already exists"
        );
    }
}
