//! Outcome of the version check and the artifacts a publish produced

use serde::Serialize;
use std::path::PathBuf;

/// What the registry query means for the candidate version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    /// The package was never published; push the first version
    NotFound,
    /// The version is not yet on the registry
    NewVersion,
    /// The version is already on the registry
    Duplicate,
}

impl PublishOutcome {
    /// Decide the outcome from the registry's version list
    ///
    /// `None` means the registry does not know the package at all.
    pub fn decide(existing: Option<&[String]>, version: &str) -> Self {
        match existing {
            None => PublishOutcome::NotFound,
            Some(versions) if versions.iter().any(|v| v == version) => PublishOutcome::Duplicate,
            Some(_) => PublishOutcome::NewVersion,
        }
    }

    /// Whether this outcome leads to a publish
    pub fn should_publish(&self) -> bool {
        !matches!(self, PublishOutcome::Duplicate)
    }

    /// Get the display label
    pub fn label(&self) -> &'static str {
        match self {
            PublishOutcome::NotFound => "first version",
            PublishOutcome::NewVersion => "new version",
            PublishOutcome::Duplicate => "already published",
        }
    }
}

/// A package file produced by `dotnet pack`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFile {
    /// File name, e.g. `Foo.1.2.3.nupkg`
    pub name: String,
    /// Absolute path to the file
    pub path: PathBuf,
}

/// Everything a publish produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishedArtifacts {
    /// The main package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageFile>,
    /// The symbols package, when symbols were included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<PackageFile>,
    /// The tag pushed for this version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl PublishedArtifacts {
    /// Whether anything was actually pushed
    pub fn is_empty(&self) -> bool {
        self.package.is_none() && self.symbols.is_none() && self.tag.is_none()
    }
}
