//! Version resolution
//!
//! The version to publish is either given verbatim or extracted from a file
//! with the first capture group of a configured regex. The extracted string is
//! not validated; any non-empty capture is accepted.

use crate::error::{ConfigError, VersionError};
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default pattern, matching a `<Version>` element on its own line
pub const DEFAULT_VERSION_REGEX: &str = r"^\s*<Version>(.*)<\/Version>\s*$";

/// Where the version to publish comes from
#[derive(Debug, Clone)]
pub enum VersionSource {
    /// A version supplied directly
    Static(String),
    /// First capture group of `regex` applied to the contents of `file`
    Pattern { file: PathBuf, regex: Regex },
}

impl VersionSource {
    /// Resolve the version
    pub fn resolve(&self) -> Result<String, VersionError> {
        match self {
            VersionSource::Static(version) => Ok(version.clone()),
            VersionSource::Pattern { file, regex } => {
                info!("Version Filepath: {}", file.display());
                info!("Version Regex: {}", regex.as_str());
                let content = read_version_file(file)?;
                extract_version(&content, regex).ok_or_else(|| VersionError::NoMatch {
                    path: file.clone(),
                    pattern: regex.as_str().to_string(),
                })
            }
        }
    }
}

/// Compile a version pattern in multi-line mode
///
/// The pattern must contain at least one capture group.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    let regex = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| ConfigError::invalid_pattern(pattern, e.to_string()))?;

    if regex.captures_len() < 2 {
        return Err(ConfigError::invalid_pattern(
            pattern,
            "pattern needs a capture group for the version",
        ));
    }

    Ok(regex)
}

/// Extract the first capture group of the first match
pub fn extract_version(content: &str, regex: &Regex) -> Option<String> {
    let captures = regex.captures(content)?;
    let version = captures.get(1)?.as_str();
    if version.is_empty() {
        debug!("version pattern matched an empty string");
        return None;
    }
    Some(version.to_string())
}

fn read_version_file(path: &Path) -> Result<String, VersionError> {
    if !path.is_file() {
        return Err(VersionError::file_not_found(path));
    }
    std::fs::read_to_string(path).map_err(|e| VersionError::read_error(path, e))
}
