//! Publishing through the dotnet and git command line tools
//!
//! This module provides:
//! - Structured command execution with captured output
//! - dotnet build/pack/push and git tag invocations
//! - The publisher that ties them together

mod command;
pub mod dotnet;
pub mod git;
mod packages;
mod publisher;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use packages::{find_packages, remove_stale_packages, PackageSet};
pub use publisher::{DotnetPublisher, Publish, PublishSettings};
