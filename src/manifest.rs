//! Reading the release version out of the project manifest.

use regex::Regex;
use semver::Version;
use std::fs;
use std::path::Path;

use crate::config::VersionSource;
use crate::error::{PackageError, Result};

/// Reads the manifest at `path` and extracts its version with the given strategy.
///
/// # Returns
/// * `Ok(Version)` - A plain `major.minor.patch` version
/// * `Err` - If the manifest is missing, unreadable, or carries no usable version
pub fn read_version(path: &Path, source: VersionSource) -> Result<Version> {
    if !path.is_file() {
        return Err(PackageError::manifest(format!(
            "Manifest not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PackageError::manifest(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let version = match source {
        VersionSource::Structured => version_from_toml(&content),
        VersionSource::Pattern => version_from_pattern(&content),
    };
    version.map_err(|e| match e {
        PackageError::Manifest(msg) => {
            PackageError::manifest(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parses the manifest as TOML and returns `package.version`,
/// falling back to `workspace.package.version`.
pub fn version_from_toml(content: &str) -> Result<Version> {
    let table: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| PackageError::manifest(format!("invalid TOML: {}", e)))?;

    let package_version = table
        .get("package")
        .and_then(|p| p.get("version"));
    let workspace_version = table
        .get("workspace")
        .and_then(|w| w.get("package"))
        .and_then(|p| p.get("version"));

    let value = package_version
        .or(workspace_version)
        .ok_or_else(|| PackageError::manifest("no [package] version field"))?;

    // `version.workspace = true` inherits and is not a literal we can use here.
    let raw = value.as_str().ok_or_else(|| {
        PackageError::manifest(format!("version field is not a string: {}", value))
    })?;

    parse_release_version(raw)
}

/// Finds the first line containing `version` and takes the first `N.N.N` on it.
///
/// The match must still be a valid semantic version: `1.02.3` (leading zero)
/// and components beyond `u64` are errors, not silently rewritten.
pub fn version_from_pattern(content: &str) -> Result<Version> {
    let re = Regex::new(r"\d+\.\d+\.\d+")
        .map_err(|e| PackageError::manifest(format!("bad version pattern: {}", e)))?;

    let line = content
        .lines()
        .find(|line| line.contains("version"))
        .ok_or_else(|| PackageError::manifest("no line containing 'version'"))?;

    let found = re.find(line).ok_or_else(|| {
        PackageError::manifest(format!("no N.N.N version on line '{}'", line.trim()))
    })?;

    parse_release_version(found.as_str())
}

/// Parses a three-component release version, rejecting pre-release and build suffixes.
pub fn parse_release_version(raw: &str) -> Result<Version> {
    let version = Version::parse(raw.trim()).map_err(|e| {
        PackageError::manifest(format!("invalid version '{}': {}", raw, e))
    })?;

    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(PackageError::manifest(format!(
            "version '{}' must be plain major.minor.patch",
            raw
        )));
    }

    Ok(version)
}
