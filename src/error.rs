//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Issues with inputs and CLI configuration
//! - VersionError: Issues resolving the version to publish
//! - RegistryError: Issues with package registry communication
//! - PublishError: Duplicate versions and failures of the dotnet/git commands

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version resolution errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Publishing related errors
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No project file was configured
    #[error("project file not given")]
    MissingProjectFile,

    /// The configured project file does not exist
    #[error("project file not found: {path}")]
    ProjectFileNotFound { path: PathBuf },

    /// A boolean input could not be parsed
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: String, value: String },

    /// A numeric input could not be parsed
    #[error("invalid number for {name}: '{value}'")]
    InvalidNumber { name: String, value: String },

    /// Unknown registry kind
    #[error("invalid registry kind '{value}': expected 'generic' or 'github'")]
    InvalidRegistryKind { value: String },

    /// Source is not a usable URL
    #[error("invalid package source '{value}': {message}")]
    InvalidSource { value: String, message: String },

    /// Version regex does not compile or has no capture group
    #[error("invalid version regex '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The GitHub registry needs a user for authentication
    #[error("a github user is required for the GitHub package registry")]
    MissingGithubUser,
}

/// Errors related to resolving the version to publish
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version file not found
    #[error("version file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read version file
    #[error("failed to read version file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pattern matched nothing, or captured an empty string
    #[error("unable to extract version info from {path} using '{pattern}'")]
    NoMatch { path: PathBuf, pattern: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed
    #[error("failed to fetch versions of '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Registry answered with a status other than 200, 301 or 404
    #[error("{registry} returned {status} for '{package}'")]
    UnexpectedStatus {
        package: String,
        registry: String,
        status: reqwest::StatusCode,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },
}

/// Errors related to publishing the package
#[derive(Error, Debug)]
pub enum PublishError {
    /// Version already on the registry and duplicates are fatal
    #[error("Version {version} already exists")]
    DuplicateVersion { version: String },

    /// Command could not be started
    #[error("failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command exited unsuccessfully or reported an error
    #[error("'{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Pack produced nothing to push
    #[error("no .nupkg files found in {dir}")]
    NoPackages { dir: PathBuf },

    /// Filesystem work around the package directory failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl VersionError {
    /// Creates a new FileNotFound error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        VersionError::FileNotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VersionError::ReadError {
            path: path.into(),
            source,
        }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }
}

impl PublishError {
    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        PublishError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_project_file_not_found() {
        let err = ConfigError::ProjectFileNotFound {
            path: PathBuf::from("src/Foo/Foo.csproj"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("project file not found"));
        assert!(msg.contains("Foo.csproj"));
    }

    #[test]
    fn test_config_error_invalid_bool() {
        let err = ConfigError::InvalidBool {
            name: "tag_commit".to_string(),
            value: "maybe".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("tag_commit"));
        assert!(msg.contains("maybe"));
    }

    #[test]
    fn test_version_error_no_match() {
        let err = VersionError::NoMatch {
            path: PathBuf::from("Foo.csproj"),
            pattern: "<Version>(.*)</Version>".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("unable to extract version info"));
        assert!(msg.contains("Foo.csproj"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("Foo", "nuget.org", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_registry_error_unexpected_status_includes_code() {
        let err = RegistryError::UnexpectedStatus {
            package: "Foo".to_string(),
            registry: "nuget.org".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("500"));
        assert!(msg.contains("Internal Server Error"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("Foo", "nuget.org");
        assert!(format!("{}", err).contains("timeout"));
    }

    #[test]
    fn test_publish_error_duplicate_version() {
        let err = PublishError::DuplicateVersion {
            version: "1.2.3".to_string(),
        };
        assert_eq!(format!("{}", err), "Version 1.2.3 already exists");
    }

    #[test]
    fn test_publish_error_command_failed() {
        let err = PublishError::command_failed("dotnet nuget push", "error: 403 Forbidden");
        let msg = format!("{}", err);
        assert!(msg.contains("dotnet nuget push"));
        assert!(msg.contains("403"));
    }

    #[test]
    fn test_app_error_from_publish_error() {
        let app_err: AppError = PublishError::DuplicateVersion {
            version: "2.0.0".to_string(),
        }
        .into();
        assert!(format!("{}", app_err).contains("2.0.0"));
    }

    #[test]
    fn test_app_error_from_version_error() {
        let app_err: AppError = VersionError::file_not_found("/missing/version.props").into();
        assert!(format!("{}", app_err).contains("version file not found"));
    }
}
