//! Run configuration
//!
//! `PublishConfig` is resolved once at startup from the command line and the
//! environment (CI inputs arrive as `INPUT_*` variables) and is immutable
//! afterwards.

use crate::cli::CliArgs;
use crate::domain::{RegistryKind, RegistrySource};
use crate::error::ConfigError;
use crate::version::{compile_pattern, VersionSource, DEFAULT_VERSION_REGEX};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default package source
pub const DEFAULT_NUGET_SOURCE: &str = "https://api.nuget.org";

/// Default tag format
pub const DEFAULT_TAG_FORMAT: &str = "v*";

/// Default timeout for registry requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of environment variables
pub trait EnvSource {
    /// Get a variable, `None` when unset
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Immutable configuration for one run
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Project file to build and pack
    pub project_file: PathBuf,
    /// Package id on the registry
    pub package_name: String,
    /// Where the version comes from
    pub version_source: VersionSource,
    /// Tag format when tagging is enabled
    pub tag_format: Option<String>,
    /// User for the GitHub package registry
    pub github_user: Option<String>,
    /// API key used to push
    pub nuget_key: Option<String>,
    /// Registry to query and push to
    pub source: RegistrySource,
    /// Whether to produce and push a symbols package
    pub include_symbols: bool,
    /// Whether an existing version fails the run
    pub fail_on_duplicate: bool,
    /// Whether `dotnet pack` skips the build
    pub no_build: bool,
    /// Timeout for registry requests
    pub timeout: Duration,
    /// Directory for generated packages
    pub output_dir: PathBuf,
    /// Only print publish commands
    pub dry_run: bool,
}

/// Looks up one input: CLI value first, then each env name in order
struct Inputs<'a> {
    env: &'a dyn EnvSource,
}

impl Inputs<'_> {
    fn string(&self, cli: Option<&str>, names: &[&str]) -> Option<String> {
        if let Some(value) = cli.filter(|v| !v.trim().is_empty()) {
            return Some(value.to_string());
        }
        names
            .iter()
            .filter_map(|name| self.env.var(name))
            .find(|value| !value.trim().is_empty())
    }

    fn bool(&self, cli: Option<bool>, names: &[&str]) -> Result<bool, ConfigError> {
        if let Some(value) = cli {
            return Ok(value);
        }
        match self.string(None, names) {
            Some(raw) => parse_bool(names[0], &raw),
            None => Ok(false),
        }
    }
}

/// Parse a boolean input
pub fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Package id derived from the project file name
pub fn package_name_from_project(project_file: &Path) -> Option<String> {
    project_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

impl PublishConfig {
    /// Resolve the configuration from CLI arguments and the environment
    pub fn resolve(args: &CliArgs, env: &dyn EnvSource) -> Result<Self, ConfigError> {
        let inputs = Inputs { env };

        let project_file = inputs
            .string(
                args.project_file.as_deref().and_then(Path::to_str),
                &["INPUT_PROJECT_FILE_PATH", "PROJECT_FILE_PATH"],
            )
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingProjectFile)?;

        if !project_file.is_file() {
            return Err(ConfigError::ProjectFileNotFound { path: project_file });
        }

        let package_name = inputs
            .string(
                args.package_name.as_deref(),
                &["INPUT_PACKAGE_NAME", "PACKAGE_NAME"],
            )
            .or_else(|| package_name_from_project(&project_file))
            .ok_or(ConfigError::MissingProjectFile)?;

        let version_source = match inputs.string(
            args.version_static.as_deref(),
            &["INPUT_VERSION_STATIC", "VERSION_STATIC"],
        ) {
            Some(version) => VersionSource::Static(version),
            None => {
                let file = inputs
                    .string(
                        args.version_file.as_deref().and_then(Path::to_str),
                        &["INPUT_VERSION_FILE_PATH", "VERSION_FILE_PATH"],
                    )
                    .map(PathBuf::from)
                    .unwrap_or_else(|| project_file.clone());
                let pattern = inputs
                    .string(
                        args.version_regex.as_deref(),
                        &["INPUT_VERSION_REGEX", "VERSION_REGEX"],
                    )
                    .unwrap_or_else(|| DEFAULT_VERSION_REGEX.to_string());
                VersionSource::Pattern {
                    file,
                    regex: compile_pattern(&pattern)?,
                }
            }
        };

        let tag_commit = inputs.bool(args.tag_commit, &["INPUT_TAG_COMMIT", "TAG_COMMIT"])?;
        let tag_format = tag_commit.then(|| {
            inputs
                .string(
                    args.tag_format.as_deref(),
                    &["INPUT_TAG_FORMAT", "TAG_FORMAT"],
                )
                .unwrap_or_else(|| DEFAULT_TAG_FORMAT.to_string())
        });

        let github_user = inputs.string(
            args.github_user.as_deref(),
            &["INPUT_GITHUB_USER", "GITHUB_ACTOR"],
        );
        let nuget_key = inputs.string(args.nuget_key.as_deref(), &["INPUT_NUGET_KEY", "NUGET_KEY"]);

        let kind = inputs
            .string(
                args.registry_kind.as_deref(),
                &["INPUT_REGISTRY_KIND", "REGISTRY_KIND"],
            )
            .map(|raw| raw.parse::<RegistryKind>())
            .transpose()?;
        let raw_source = inputs
            .string(
                args.nuget_source.as_deref(),
                &["INPUT_NUGET_SOURCE", "NUGET_SOURCE"],
            )
            .unwrap_or_else(|| DEFAULT_NUGET_SOURCE.to_string());
        let source = RegistrySource::parse(&raw_source, kind)?;

        if source.kind == RegistryKind::GitHub && github_user.is_none() {
            return Err(ConfigError::MissingGithubUser);
        }

        let include_symbols = inputs.bool(
            args.include_symbols,
            &["INPUT_INCLUDE_SYMBOLS", "INCLUDE_SYMBOLS"],
        )?;
        let fail_on_duplicate = inputs.bool(
            args.fail_on_duplicate,
            &[
                "INPUT_THOW_ERROR_IF_VERSION_EXISTS",
                "THOW_ERROR_IF_VERSION_EXISTS",
            ],
        )?;
        let no_build = inputs.bool(args.no_build, &["INPUT_PACK_NO_BUILD", "PACK_NO_BUILD"])?;

        let timeout_secs = match args.timeout {
            Some(secs) => secs,
            None => match inputs.string(None, &["INPUT_TIMEOUT", "TIMEOUT"]) {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                    name: "INPUT_TIMEOUT".to_string(),
                    value: raw,
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "timeout".to_string(),
                value: timeout_secs.to_string(),
            });
        }

        let output_dir = if args.output_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            args.output_dir.clone()
        };

        Ok(Self {
            project_file,
            package_name,
            version_source,
            tag_format,
            github_user,
            nuget_key,
            source,
            include_symbols,
            fail_on_duplicate,
            no_build,
            timeout: Duration::from_secs(timeout_secs),
            output_dir,
            dry_run: args.dry_run,
        })
    }

    /// Whether a tag is created after publishing
    pub fn tag_commit(&self) -> bool {
        self.tag_format.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, "<Project>\n  <Version>1.0.0</Version>\n</Project>\n").unwrap();
        path
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn args_for(path: &Path) -> CliArgs {
        CliArgs {
            project_file: Some(path.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Acme.Widgets.csproj");

        let config = PublishConfig::resolve(&args_for(&path), &env(&[])).unwrap();
        assert_eq!(config.package_name, "Acme.Widgets");
        assert_eq!(config.source.url, DEFAULT_NUGET_SOURCE);
        assert_eq!(config.source.kind, RegistryKind::Generic);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.tag_commit());
        assert!(!config.fail_on_duplicate);
        assert!(!config.include_symbols);
        assert!(!config.no_build);
        assert!(config.nuget_key.is_none());
        match config.version_source {
            VersionSource::Pattern { file, regex } => {
                assert_eq!(file, path);
                assert_eq!(regex.as_str(), DEFAULT_VERSION_REGEX);
            }
            VersionSource::Static(_) => panic!("expected pattern source"),
        }
    }

    #[test]
    fn test_missing_project_file() {
        let result = PublishConfig::resolve(&CliArgs::default(), &env(&[]));
        assert!(matches!(result, Err(ConfigError::MissingProjectFile)));
    }

    #[test]
    fn test_project_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir.path().join("Nope.csproj"));
        let result = PublishConfig::resolve(&args, &env(&[]));
        assert!(matches!(result, Err(ConfigError::ProjectFileNotFound { .. })));
    }

    #[test]
    fn test_inputs_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let path_str = path.to_str().unwrap();

        let env = env(&[
            ("INPUT_PROJECT_FILE_PATH", path_str),
            ("INPUT_PACKAGE_NAME", "Foo.Core"),
            ("INPUT_VERSION_STATIC", "2.0.0"),
            ("INPUT_TAG_COMMIT", "true"),
            ("INPUT_TAG_FORMAT", "release/*"),
            ("INPUT_NUGET_KEY", "secret"),
            ("INPUT_INCLUDE_SYMBOLS", "TRUE"),
            ("INPUT_THOW_ERROR_IF_VERSION_EXISTS", "1"),
            ("INPUT_PACK_NO_BUILD", "false"),
            ("INPUT_TIMEOUT", "12"),
        ]);

        let config = PublishConfig::resolve(&CliArgs::default(), &env).unwrap();
        assert_eq!(config.project_file, path);
        assert_eq!(config.package_name, "Foo.Core");
        assert!(matches!(config.version_source, VersionSource::Static(ref v) if v == "2.0.0"));
        assert_eq!(config.tag_format.as_deref(), Some("release/*"));
        assert_eq!(config.nuget_key.as_deref(), Some("secret"));
        assert!(config.include_symbols);
        assert!(config.fail_on_duplicate);
        assert!(!config.no_build);
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_unprefixed_env_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");

        let env = env(&[
            ("INPUT_PACKAGE_NAME", ""),
            ("PACKAGE_NAME", "Legacy.Name"),
            ("NUGET_KEY", "k"),
            ("TAG_COMMIT", "yes"),
        ]);

        let config = PublishConfig::resolve(&args_for(&path), &env).unwrap();
        assert_eq!(config.package_name, "Legacy.Name");
        assert_eq!(config.nuget_key.as_deref(), Some("k"));
        assert_eq!(config.tag_format.as_deref(), Some(DEFAULT_TAG_FORMAT));
    }

    #[test]
    fn test_cli_overrides_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");

        let args = CliArgs {
            package_name: Some("FromCli".to_string()),
            fail_on_duplicate: Some(false),
            timeout: Some(3),
            ..args_for(&path)
        };
        let env = env(&[
            ("INPUT_PACKAGE_NAME", "FromEnv"),
            ("INPUT_THOW_ERROR_IF_VERSION_EXISTS", "true"),
            ("INPUT_TIMEOUT", "99"),
        ]);

        let config = PublishConfig::resolve(&args, &env).unwrap();
        assert_eq!(config.package_name, "FromCli");
        assert!(!config.fail_on_duplicate);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_bool() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let result =
            PublishConfig::resolve(&args_for(&path), &env(&[("INPUT_TAG_COMMIT", "sometimes")]));
        assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
    }

    #[test]
    fn test_invalid_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let result = PublishConfig::resolve(&args_for(&path), &env(&[("INPUT_TIMEOUT", "1m")]));
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");

        let from_env = PublishConfig::resolve(&args_for(&path), &env(&[("INPUT_TIMEOUT", "0")]));
        assert!(matches!(from_env, Err(ConfigError::InvalidNumber { .. })));

        let args = CliArgs {
            timeout: Some(0),
            ..args_for(&path)
        };
        let from_cli = PublishConfig::resolve(&args, &env(&[]));
        assert!(matches!(from_cli, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn test_version_file_and_regex() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let version_file = dir.path().join("version.txt");

        let args = CliArgs {
            version_file: Some(version_file.clone()),
            version_regex: Some(r"^(\d+\.\d+\.\d+)$".to_string()),
            ..args_for(&path)
        };

        let config = PublishConfig::resolve(&args, &env(&[])).unwrap();
        match config.version_source {
            VersionSource::Pattern { file, .. } => assert_eq!(file, version_file),
            VersionSource::Static(_) => panic!("expected pattern source"),
        }
    }

    #[test]
    fn test_regex_without_group_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let args = CliArgs {
            version_regex: Some(r"\d+\.\d+".to_string()),
            ..args_for(&path)
        };
        let result = PublishConfig::resolve(&args, &env(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_github_source_needs_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let args = CliArgs {
            nuget_source: Some("https://nuget.pkg.github.com/octo".to_string()),
            ..args_for(&path)
        };

        let result = PublishConfig::resolve(&args, &env(&[]));
        assert!(matches!(result, Err(ConfigError::MissingGithubUser)));

        let config = PublishConfig::resolve(&args, &env(&[("GITHUB_ACTOR", "octo")])).unwrap();
        assert_eq!(config.source.kind, RegistryKind::GitHub);
        assert_eq!(config.github_user.as_deref(), Some("octo"));
    }

    #[test]
    fn test_explicit_registry_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = project(&dir, "Foo.csproj");
        let args = CliArgs {
            nuget_source: Some("https://nuget.example.com".to_string()),
            registry_kind: Some("github".to_string()),
            github_user: Some("ci".to_string()),
            ..args_for(&path)
        };
        let config = PublishConfig::resolve(&args, &env(&[])).unwrap();
        assert_eq!(config.source.kind, RegistryKind::GitHub);

        let args = CliArgs {
            registry_kind: Some("proget".to_string()),
            ..args_for(&path)
        };
        assert!(matches!(
            PublishConfig::resolve(&args, &env(&[])),
            Err(ConfigError::InvalidRegistryKind { .. })
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("x", "true").unwrap());
        assert!(parse_bool("x", " On ").unwrap());
        assert!(!parse_bool("x", "FALSE").unwrap());
        assert!(!parse_bool("x", "0").unwrap());
        assert!(parse_bool("x", "").is_err());
        assert!(parse_bool("x", "2").is_err());
    }

    #[test]
    fn test_package_name_from_project() {
        assert_eq!(
            package_name_from_project(Path::new("src/My.Lib/My.Lib.csproj")),
            Some("My.Lib".to_string())
        );
        assert_eq!(
            package_name_from_project(Path::new("Plain")),
            Some("Plain".to_string())
        );
    }
}
