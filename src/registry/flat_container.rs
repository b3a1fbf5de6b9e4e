//! NuGet v3 flat container adapter
//!
//! Lists versions from the anonymous package base address.
//! API endpoint: {source}/v3-flatcontainer/{package}/index.json

use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionListing, VersionLister};
use async_trait::async_trait;

/// Flat container registry adapter
#[derive(Debug)]
pub struct FlatContainerRegistry {
    client: HttpClient,
    source: String,
    name: String,
}

impl FlatContainerRegistry {
    /// Create a new adapter for a source URL
    pub fn new(client: HttpClient, source: &str, name: &str) -> Self {
        Self {
            client,
            source: source.trim_end_matches('/').to_string(),
            name: name.to_string(),
        }
    }

    /// Build the index URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/v3-flatcontainer/{}/index.json", self.source, package)
    }
}

#[async_trait]
impl VersionLister for FlatContainerRegistry {
    fn registry_name(&self) -> &str {
        &self.name
    }

    async fn fetch_versions(&self, package: &str) -> Result<VersionListing, RegistryError> {
        let url = self.build_url(package);
        self.client
            .fetch_index(&url, None, package, self.registry_name())
            .await
    }
}
