//! Registry kind and source definitions

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Host of the GitHub package registry
const GITHUB_REGISTRY_HOST: &str = "nuget.pkg.github.com";

/// Host of the public nuget.org API
const NUGET_ORG_HOST: &str = "api.nuget.org";

/// The protocol variant used to list versions on a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// NuGet v3 flat container index, anonymous
    Generic,
    /// GitHub package registry download index, basic auth
    GitHub,
}

impl RegistryKind {
    /// Detect the kind from the source URL host
    pub fn detect(url: &Url) -> Self {
        match url.host_str() {
            Some(host) if host.eq_ignore_ascii_case(GITHUB_REGISTRY_HOST) => RegistryKind::GitHub,
            _ => RegistryKind::Generic,
        }
    }

    /// Returns the identifier used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Generic => "generic",
            RegistryKind::GitHub => "github",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RegistryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "nuget" => Ok(RegistryKind::Generic),
            "github" | "gpr" => Ok(RegistryKind::GitHub),
            _ => Err(ConfigError::InvalidRegistryKind {
                value: s.to_string(),
            }),
        }
    }
}

/// A package registry endpoint together with its protocol variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySource {
    /// Source URL without trailing slash
    pub url: String,
    /// How versions are listed on this source
    pub kind: RegistryKind,
    /// Name the source is registered under in the dotnet NuGet config
    pub name: String,
}

impl RegistrySource {
    /// Parse a source URL, detecting the kind unless one is given
    pub fn parse(raw: &str, kind: Option<RegistryKind>) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidSource {
            value: raw.to_string(),
            message: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidSource {
                value: raw.to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let name = match url.host_str() {
            Some(host) if host.eq_ignore_ascii_case(NUGET_ORG_HOST) => "nuget.org".to_string(),
            _ => trimmed.to_string(),
        };

        Ok(Self {
            url: trimmed.to_string(),
            kind: kind.unwrap_or_else(|| RegistryKind::detect(&url)),
            name,
        })
    }
}
