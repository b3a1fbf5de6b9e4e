//! Package publisher driving the dotnet and git CLIs

use crate::config::PublishConfig;
use crate::domain::{PublishedArtifacts, RegistrySource};
use crate::error::PublishError;
use crate::publish::packages::{find_packages, remove_stale_packages};
use crate::publish::{dotnet, git, CommandOutput, CommandRunner, CommandSpec};
use std::path::PathBuf;
use tracing::{info, warn};

/// Trait for publishing a version of a package
pub trait Publish {
    /// Build, pack and push `version` of `package`
    fn publish(&self, package: &str, version: &str) -> Result<PublishedArtifacts, PublishError>;
}

/// The parts of the configuration the publisher needs
#[derive(Debug, Clone)]
pub struct PublishSettings {
    pub project_file: PathBuf,
    pub output_dir: PathBuf,
    pub source: RegistrySource,
    pub github_user: Option<String>,
    pub nuget_key: Option<String>,
    pub include_symbols: bool,
    pub no_build: bool,
    pub tag_format: Option<String>,
    pub dry_run: bool,
}

impl From<&PublishConfig> for PublishSettings {
    fn from(config: &PublishConfig) -> Self {
        Self {
            project_file: config.project_file.clone(),
            output_dir: config.output_dir.clone(),
            source: config.source.clone(),
            github_user: config.github_user.clone(),
            nuget_key: config.nuget_key.clone(),
            include_symbols: config.include_symbols,
            no_build: config.no_build,
            tag_format: config.tag_format.clone(),
            dry_run: config.dry_run,
        }
    }
}

/// Publisher that runs `dotnet build/pack/nuget push` and optionally tags
pub struct DotnetPublisher<R: CommandRunner> {
    settings: PublishSettings,
    runner: R,
}

impl<R: CommandRunner> DotnetPublisher<R> {
    /// Create a publisher with the given command runner
    pub fn new(settings: PublishSettings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Run a command, log its output and fail on error
    fn execute(&self, spec: &CommandSpec, scan_output: bool) -> Result<CommandOutput, PublishError> {
        info!("executing: [{}]", spec.display());
        let output = self.runner.run(spec)?;
        for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
            info!("{}", line);
        }
        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            warn!("{}", line);
        }
        output.check(spec, scan_output)?;
        Ok(output)
    }

    /// Register and enable the package source in the NuGet config
    fn ensure_source(&self, key: &str) -> Result<(), PublishError> {
        let source = &self.settings.source;
        let listed = self.execute(&dotnet::list_sources(), false)?;

        if listed.stdout.contains(&source.url) {
            info!("{} is already in sources.", source.url);
        } else {
            self.execute(
                &dotnet::add_source(source, self.settings.github_user.as_deref(), key),
                false,
            )?;
        }

        self.execute(&dotnet::enable_source(source), false)?;
        Ok(())
    }

    /// Commands a dry run reports instead of executing
    fn planned_commands(&self, version: &str, key: &str) -> Vec<CommandSpec> {
        let settings = &self.settings;
        let mut plan = vec![
            dotnet::build(&settings.project_file),
            dotnet::pack(
                &settings.project_file,
                &settings.output_dir,
                settings.include_symbols,
                settings.no_build,
            ),
            dotnet::push(
                &[settings.output_dir.join("*.nupkg")],
                &settings.source,
                key,
                settings.include_symbols,
            ),
        ];
        if let Some(format) = &settings.tag_format {
            let tag = git::tag_name(format, version);
            plan.push(git::tag(&tag));
            plan.push(git::push_tag(&tag));
        }
        plan
    }

    fn create_tag(&self, version: &str) -> Result<Option<String>, PublishError> {
        let Some(format) = &self.settings.tag_format else {
            return Ok(None);
        };

        let tag = git::tag_name(format, version);
        info!("creating new tag {}", tag);
        self.execute(&git::tag(&tag), false)?;
        self.execute(&git::push_tag(&tag), false)?;
        Ok(Some(tag))
    }
}

impl<R: CommandRunner> Publish for DotnetPublisher<R> {
    fn publish(&self, package: &str, version: &str) -> Result<PublishedArtifacts, PublishError> {
        info!("found new version ({}) of {}", version, package);

        let Some(key) = self.settings.nuget_key.as_deref() else {
            warn!("NUGET_KEY not given");
            return Ok(PublishedArtifacts::default());
        };

        info!("NuGet Source: {}", self.settings.source.url);

        if self.settings.dry_run {
            for spec in self.planned_commands(version, key) {
                info!("(dry-run) would execute: [{}]", spec.display());
            }
            return Ok(PublishedArtifacts::default());
        }

        self.ensure_source(key)?;

        let output_dir = &self.settings.output_dir;
        let removed = remove_stale_packages(output_dir)?;
        if removed > 0 {
            info!("removed {} stale package(s) from {}", removed, output_dir.display());
        }

        self.execute(&dotnet::build(&self.settings.project_file), false)?;
        self.execute(
            &dotnet::pack(
                &self.settings.project_file,
                output_dir,
                self.settings.include_symbols,
                self.settings.no_build,
            ),
            false,
        )?;

        let packages = find_packages(output_dir)?;
        if packages.packages.is_empty() {
            return Err(PublishError::NoPackages {
                dir: output_dir.clone(),
            });
        }
        let names: Vec<String> = packages
            .all()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        info!("Generated Package(s): {}", names.join(", "));

        self.execute(
            &dotnet::push(
                &packages.packages,
                &self.settings.source,
                key,
                self.settings.include_symbols,
            ),
            true,
        )?;

        let tag = self.create_tag(version)?;

        Ok(PublishedArtifacts {
            package: packages.primary_package(),
            symbols: packages.primary_symbols(),
            tag,
        })
    }
}
