//! GitHub package registry adapter
//!
//! The GitHub registry has no anonymous flat container; versions are read
//! from the download index with basic auth.
//! API endpoint: {source}/download/{package}/index.json

use crate::error::RegistryError;
use crate::registry::{BasicAuth, HttpClient, VersionListing, VersionLister};
use async_trait::async_trait;

/// GitHub package registry adapter
#[derive(Debug)]
pub struct GitHubRegistry {
    client: HttpClient,
    source: String,
    name: String,
    auth: BasicAuth,
}

impl GitHubRegistry {
    /// Create a new adapter for a source URL, authenticating as `user`
    pub fn new(client: HttpClient, source: &str, name: &str, user: &str, token: &str) -> Self {
        Self {
            client,
            source: source.trim_end_matches('/').to_string(),
            name: name.to_string(),
            auth: BasicAuth {
                user: user.to_string(),
                token: token.to_string(),
            },
        }
    }

    /// Build the index URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/download/{}/index.json", self.source, package)
    }
}

#[async_trait]
impl VersionLister for GitHubRegistry {
    fn registry_name(&self) -> &str {
        &self.name
    }

    async fn fetch_versions(&self, package: &str) -> Result<VersionListing, RegistryError> {
        let url = self.build_url(package);
        self.client
            .fetch_index(&url, Some(&self.auth), package, self.registry_name())
            .await
    }
}
