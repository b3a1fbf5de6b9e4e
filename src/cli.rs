//! CLI argument parsing module for publish-nuget
//!
//! Every input can also come from the environment (see `config`); values
//! given on the command line take precedence.

use clap::Parser;
use std::path::PathBuf;

/// Publish a NuGet package when its version is not on the registry yet
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "publish-nuget",
    version,
    about = "Publish a NuGet package when its version is not on the registry yet"
)]
pub struct CliArgs {
    /// Path to the project file (.csproj/.fsproj/.vbproj)
    #[arg(long)]
    pub project_file: Option<PathBuf>,

    /// Package id (default: project file name without extension)
    #[arg(long)]
    pub package_name: Option<String>,

    /// File to extract the version from (default: the project file)
    #[arg(long)]
    pub version_file: Option<PathBuf>,

    /// Regex whose first capture group is the version
    #[arg(long)]
    pub version_regex: Option<String>,

    /// Use this version instead of extracting one
    #[arg(long)]
    pub version_static: Option<String>,

    /// Create and push a git tag for the published version
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub tag_commit: Option<bool>,

    /// Tag name format, `*` is replaced by the version
    #[arg(long)]
    pub tag_format: Option<String>,

    /// User for the GitHub package registry
    #[arg(long)]
    pub github_user: Option<String>,

    /// API key used to push the package
    #[arg(long)]
    pub nuget_key: Option<String>,

    /// Package source URL
    #[arg(long)]
    pub nuget_source: Option<String>,

    /// Registry protocol: generic or github (default: detected from the source)
    #[arg(long)]
    pub registry_kind: Option<String>,

    /// Include a symbols package (.snupkg)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub include_symbols: Option<bool>,

    /// Fail the run when the version already exists
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub fail_on_duplicate: Option<bool>,

    /// Do not rebuild the project when packing
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub no_build: Option<bool>,

    /// Registry request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory the packages are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    // General options
    /// Dry run mode - check the registry but only print the publish commands
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
