//! Package files in the pack output directory

use crate::domain::PackageFile;
use crate::error::PublishError;
use std::path::{Path, PathBuf};

/// Packages found in a directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackageSet {
    /// `.nupkg` files
    pub packages: Vec<PathBuf>,
    /// `.snupkg` files
    pub symbols: Vec<PathBuf>,
}

impl PackageSet {
    /// All files, packages first
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.packages.iter().chain(self.symbols.iter())
    }

    /// First package as a reported artifact
    pub fn primary_package(&self) -> Option<PackageFile> {
        self.packages.first().map(|p| package_file(p))
    }

    /// First symbols package as a reported artifact
    pub fn primary_symbols(&self) -> Option<PackageFile> {
        self.symbols.first().map(|p| package_file(p))
    }
}

fn package_file(path: &Path) -> PackageFile {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    PackageFile { name, path }
}

fn io_error(dir: &Path, source: std::io::Error) -> PublishError {
    PublishError::Io {
        path: dir.to_path_buf(),
        source,
    }
}

/// List `.nupkg` and `.snupkg` files directly inside `dir`, sorted by name
pub fn find_packages(dir: &Path) -> Result<PackageSet, PublishError> {
    let mut set = PackageSet::default();
    if !dir.exists() {
        return Ok(set);
    }

    for entry in std::fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("nupkg") => set.packages.push(path),
            Some("snupkg") => set.symbols.push(path),
            _ => {}
        }
    }

    set.packages.sort();
    set.symbols.sort();
    Ok(set)
}

/// Delete packages left over from earlier runs
pub fn remove_stale_packages(dir: &Path) -> Result<usize, PublishError> {
    let stale = find_packages(dir)?;
    let mut removed = 0;
    for path in stale.all() {
        std::fs::remove_file(path).map_err(|e| io_error(path, e))?;
        removed += 1;
    }
    Ok(removed)
}
