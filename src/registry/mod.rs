//! Registry adapters for listing published package versions
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - NuGet v3 flat container adapter
//! - GitHub package registry adapter

mod client;
mod flat_container;
mod github;

pub use client::{BasicAuth, HttpClient, VersionListing};
pub use flat_container::FlatContainerRegistry;
pub use github::GitHubRegistry;

use crate::domain::{RegistryKind, RegistrySource};
use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registries that can list the versions of a package
#[async_trait]
pub trait VersionLister: Send + Sync {
    /// Get the registry name used in messages
    fn registry_name(&self) -> &str;

    /// Fetch the published versions of a package
    async fn fetch_versions(&self, package: &str) -> Result<VersionListing, RegistryError>;
}

/// Create the lister matching the source's kind
///
/// `user` and `token` are only used by the GitHub registry.
pub fn create_lister(
    source: &RegistrySource,
    client: HttpClient,
    user: Option<&str>,
    token: Option<&str>,
) -> Box<dyn VersionLister> {
    match source.kind {
        RegistryKind::Generic => Box::new(FlatContainerRegistry::new(
            client,
            &source.url,
            &source.name,
        )),
        RegistryKind::GitHub => Box::new(GitHubRegistry::new(
            client,
            &source.url,
            &source.name,
            user.unwrap_or_default(),
            token.unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lister_generic() {
        let source = RegistrySource::parse("https://api.nuget.org", None).unwrap();
        let lister = create_lister(&source, HttpClient::new().unwrap(), None, None);
        assert_eq!(lister.registry_name(), "nuget.org");
    }

    #[test]
    fn test_create_lister_github() {
        let source = RegistrySource::parse("https://nuget.pkg.github.com/octo", None).unwrap();
        let lister = create_lister(
            &source,
            HttpClient::new().unwrap(),
            Some("octo"),
            Some("token"),
        );
        assert_eq!(lister.registry_name(), "https://nuget.pkg.github.com/octo");
    }
}
