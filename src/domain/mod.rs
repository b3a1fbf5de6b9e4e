//! Core domain models for publish-nuget
//!
//! This module contains the fundamental types used throughout the application:
//! - Registry kinds and sources
//! - The outcome of a version check
//! - Artifacts produced by a publish

mod outcome;
mod registry_kind;

pub use outcome::{PackageFile, PublishOutcome, PublishedArtifacts};
pub use registry_kind::{RegistryKind, RegistrySource};
