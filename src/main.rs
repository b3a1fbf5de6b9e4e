//! publish-nuget - publish a NuGet package when its version is new
//!
//! Reads the package version, asks the registry which versions exist and
//! runs `dotnet pack`/`dotnet nuget push` only for a version it has not seen.

use clap::Parser;
use publish_nuget::cli::CliArgs;
use publish_nuget::config::{ProcessEnv, PublishConfig};
use publish_nuget::domain::PublishOutcome;
use publish_nuget::gate;
use publish_nuget::output::{
    annotation, create_formatter, write_run_outputs, AnnotationLevel, OutputConfig, RunOutputs,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            let message = format!("{:#}", e);
            error!("{}", message);
            println!("{}", annotation(AnnotationLevel::Error, &message));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr without timestamps; `RUST_LOG` overrides the level
fn init_tracing(args: &CliArgs) {
    let default_level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = PublishConfig::resolve(&args, &ProcessEnv)?;
    let report = gate::run(&config, !args.quiet).await?;

    let mut stdout = io::stdout().lock();

    // with --json, stdout carries only the report
    if report.outcome == PublishOutcome::Duplicate && !args.json {
        let notice = format!("Version {} already exists", report.version);
        writeln!(stdout, "{}", annotation(AnnotationLevel::Warning, &notice))?;
    }

    let output_file = std::env::var_os("GITHUB_OUTPUT")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let outputs = RunOutputs::from_report(&report);
    if output_file.is_some() || !args.json {
        write_run_outputs(&outputs, output_file.as_deref(), &mut stdout)?;
    }

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, config.dry_run);
    let formatter = create_formatter(output_config);
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
