//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry on transport failures (max 3 retries)
//! - Redirects disabled, so a `301` from the registry is seen as such
//! - Interpretation of version index responses

use crate::error::RegistryError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("publish-nuget/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Versions a registry reports for a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionListing {
    /// The registry has never seen the package
    NotFound,
    /// Published versions, in registry order
    Versions(Vec<String>),
}

impl VersionListing {
    /// The version list, `None` when the package is unknown
    pub fn versions(&self) -> Option<&[String]> {
        match self {
            VersionListing::NotFound => None,
            VersionListing::Versions(versions) => Some(versions),
        }
    }
}

/// Body of a version index (`index.json`)
#[derive(Debug, Deserialize)]
struct VersionIndex {
    versions: Vec<String>,
}

/// Credentials for HTTP basic auth
#[derive(Clone)]
pub struct BasicAuth {
    pub user: String,
    pub token: String,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .field("token", &"***")
            .finish()
    }
}

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, RegistryError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request, retrying only when no response arrived
    pub async fn get_with_context(
        &self,
        url: &str,
        auth: Option<&BasicAuth>,
        package: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let mut delay = BASE_DELAY_MS;
        let mut attempt = 0;

        loop {
            let mut request = self.client.get(url);
            if let Some(auth) = auth {
                request = request.basic_auth(&auth.user, Some(&auth.token));
            }

            let error = match request.send().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_timeout() => RegistryError::timeout(package, registry),
                Err(e) => RegistryError::network_error(package, registry, error_chain(&e)),
            };

            if attempt >= self.max_retries {
                return Err(error);
            }

            warn!("{}; retrying in {}ms", error, delay);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            delay *= 2;
            attempt += 1;
        }
    }

    /// Fetch and interpret a version index
    ///
    /// `200` yields the `versions` array, `404` and `301` mean the package was
    /// never published, anything else is an error.
    pub async fn fetch_index(
        &self,
        url: &str,
        auth: Option<&BasicAuth>,
        package: &str,
        registry: &str,
    ) -> Result<VersionListing, RegistryError> {
        info!("Requesting: {}", url);
        let response = self.get_with_context(url, auth, package, registry).await?;
        let status = response.status();
        info!("Status code: {}", status);

        match status {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| {
                    RegistryError::invalid_response(
                        package,
                        registry,
                        format!("failed to read body: {}", e),
                    )
                })?;
                let index = parse_index(&body).map_err(|e| {
                    RegistryError::invalid_response(
                        package,
                        registry,
                        format!("failed to parse JSON: {}", e),
                    )
                })?;
                debug!("{} reports {} version(s)", registry, index.len());
                Ok(VersionListing::Versions(index))
            }
            StatusCode::NOT_FOUND | StatusCode::MOVED_PERMANENTLY => Ok(VersionListing::NotFound),
            _ => Err(RegistryError::UnexpectedStatus {
                package: package.to_string(),
                registry: registry.to_string(),
                status,
            }),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn parse_index(body: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str::<VersionIndex>(body).map(|index| index.versions)
}

/// Render an error with its sources, the way the transport reported it
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
