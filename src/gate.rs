//! Version gate coordinating the publish workflow
//!
//! Workflow: resolve version → query registry → decide → publish or report.
//! Every failure ends the run; nothing is retried at this level.

use crate::config::PublishConfig;
use crate::domain::{PublishOutcome, PublishedArtifacts};
use crate::error::{AppError, PublishError};
use crate::progress::Progress;
use crate::publish::{DotnetPublisher, Publish, PublishSettings, SystemCommandRunner};
use crate::registry::{create_lister, HttpClient, VersionLister};
use serde::Serialize;
use tracing::{info, warn};

/// Result of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Package id
    pub package: String,
    /// Version that was checked
    pub version: String,
    /// Registry that was queried
    pub registry: String,
    /// What the registry said about the version
    pub outcome: PublishOutcome,
    /// What the publish produced
    pub artifacts: PublishedArtifacts,
}

impl RunReport {
    /// Whether a publish was attempted
    pub fn published(&self) -> bool {
        self.outcome.should_publish()
    }
}

/// Decides whether a version is new and publishes it if so
pub struct VersionGate<'a> {
    lister: &'a dyn VersionLister,
    publisher: &'a dyn Publish,
    fail_on_duplicate: bool,
    show_progress: bool,
}

impl<'a> VersionGate<'a> {
    /// Create a new gate
    pub fn new(
        lister: &'a dyn VersionLister,
        publisher: &'a dyn Publish,
        fail_on_duplicate: bool,
    ) -> Self {
        Self {
            lister,
            publisher,
            fail_on_duplicate,
            show_progress: false,
        }
    }

    /// Show a spinner while the registry is queried
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check `version` of `package` against the registry and act on it
    pub async fn run(&self, package: &str, version: &str) -> Result<RunReport, AppError> {
        let registry = self.lister.registry_name().to_string();

        let mut progress = Progress::new(self.show_progress);
        progress.spinner(&format!("Checking {} on {}...", package, registry));
        let listing = self.lister.fetch_versions(package).await;
        progress.finish_and_clear();

        let listing = listing?;
        let outcome = PublishOutcome::decide(listing.versions(), version);

        let artifacts = match outcome {
            PublishOutcome::NotFound => {
                info!("No packages found. Pushing initial version...");
                self.publisher.publish(package, version)?
            }
            PublishOutcome::NewVersion => {
                info!("This version is new, pushing...");
                self.publisher.publish(package, version)?
            }
            PublishOutcome::Duplicate => {
                if self.fail_on_duplicate {
                    return Err(PublishError::DuplicateVersion {
                        version: version.to_string(),
                    }
                    .into());
                }
                warn!("Version {} already exists", version);
                PublishedArtifacts::default()
            }
        };

        Ok(RunReport {
            package: package.to_string(),
            version: version.to_string(),
            registry,
            outcome,
            artifacts,
        })
    }
}

/// Run the whole workflow for a resolved configuration
///
/// The version is resolved before the registry is contacted, so a failed
/// extraction never causes a request.
pub async fn run(config: &PublishConfig, show_progress: bool) -> Result<RunReport, AppError> {
    info!("Project Filepath: {}", config.project_file.display());
    let version = config.version_source.resolve()?;
    info!("Version: {}", version);
    info!("Package Name: {}", config.package_name);

    let client = HttpClient::with_timeout(config.timeout)?;
    let lister = create_lister(
        &config.source,
        client,
        config.github_user.as_deref(),
        config.nuget_key.as_deref(),
    );
    let publisher = DotnetPublisher::new(PublishSettings::from(config), SystemCommandRunner::new());

    VersionGate::new(lister.as_ref(), &publisher, config.fail_on_duplicate)
        .with_progress(show_progress)
        .run(&config.package_name, &version)
        .await
}
