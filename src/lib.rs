//! publish-nuget - conditional NuGet publishing library
//!
//! This library provides the pieces of the publish step:
//! - Configuration from CLI arguments and CI inputs
//! - Version resolution from a static value or a file pattern
//! - Registry version listing (NuGet flat container, GitHub packages)
//! - Publishing through the dotnet and git CLIs
//! - The version gate deciding whether to publish

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod gate;
pub mod output;
pub mod progress;
pub mod publish;
pub mod registry;
pub mod version;
