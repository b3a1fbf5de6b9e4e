//! dotnet CLI invocations used to build, pack and push a package

use crate::domain::{RegistryKind, RegistrySource};
use crate::publish::CommandSpec;
use std::path::{Path, PathBuf};

const DOTNET: &str = "dotnet";

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// `dotnet nuget list source`
pub fn list_sources() -> CommandSpec {
    CommandSpec::new(DOTNET, ["nuget", "list", "source"])
}

/// `dotnet nuget add source` for the package source
///
/// The GitHub registry is registered per owner with stored credentials.
pub fn add_source(source: &RegistrySource, user: Option<&str>, key: &str) -> CommandSpec {
    match source.kind {
        RegistryKind::Generic => CommandSpec::new(
            DOTNET,
            [
                "nuget".to_string(),
                "add".to_string(),
                "source".to_string(),
                format!("{}/v3/index.json", source.url),
                format!("--name={}", source.name),
            ],
        ),
        RegistryKind::GitHub => {
            let user = user.unwrap_or_default();
            CommandSpec::new(
                DOTNET,
                [
                    "nuget".to_string(),
                    "add".to_string(),
                    "source".to_string(),
                    format!("{}/{}/index.json", source.url, user),
                    format!("--name={}", source.name),
                    format!("--username={}", user),
                    format!("--password={}", key),
                    "--store-password-in-clear-text".to_string(),
                ],
            )
        }
    }
}

/// `dotnet nuget enable source <name>`
pub fn enable_source(source: &RegistrySource) -> CommandSpec {
    CommandSpec::new(
        DOTNET,
        [
            "nuget".to_string(),
            "enable".to_string(),
            "source".to_string(),
            source.name.clone(),
        ],
    )
}

/// `dotnet build -c Release <project>`
pub fn build(project_file: &Path) -> CommandSpec {
    CommandSpec::new(
        DOTNET,
        [
            "build".to_string(),
            "-c".to_string(),
            "Release".to_string(),
            path_arg(project_file),
        ],
    )
}

/// `dotnet pack` into the output directory
pub fn pack(
    project_file: &Path,
    output_dir: &Path,
    include_symbols: bool,
    no_build: bool,
) -> CommandSpec {
    let mut args = vec!["pack".to_string()];
    if include_symbols {
        args.push("--include-symbols".to_string());
        args.push("-p:SymbolPackageFormat=snupkg".to_string());
    }
    if no_build {
        args.push("--no-build".to_string());
    }
    args.extend([
        "-c".to_string(),
        "Release".to_string(),
        path_arg(project_file),
        "-o".to_string(),
        path_arg(output_dir),
    ]);
    CommandSpec::new(DOTNET, args)
}

/// `dotnet nuget push` for the generated packages
///
/// Symbols packages next to a `.nupkg` are pushed along with it unless
/// `--no-symbols` is given.
pub fn push(
    packages: &[PathBuf],
    source: &RegistrySource,
    key: &str,
    include_symbols: bool,
) -> CommandSpec {
    let mut args = vec!["nuget".to_string(), "push".to_string()];
    args.extend(packages.iter().map(|p| path_arg(p)));
    args.extend([
        "--source".to_string(),
        source.name.clone(),
        "--api-key".to_string(),
        key.to_string(),
    ]);
    if source.kind == RegistryKind::Generic {
        args.push("--skip-duplicate".to_string());
        if !include_symbols {
            args.push("--no-symbols".to_string());
        }
    }
    CommandSpec::new(DOTNET, args)
}
