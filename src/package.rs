//! The packaging workflow
//!
//! Runs the whole job from a start directory: resolve the project, read the
//! version, replace any previous archive and hand the bundle to an [Archiver].
//! Every failure aborts the run; the only filesystem changes are removing the
//! old archive and writing the new one.

use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{ArchiveRequest, Archiver};
use crate::config::Config;
use crate::error::{PackageError, Result};
use crate::layout::ProjectLayout;
use crate::manifest;
use crate::notice::PackageNotice;

/// Arguments for one packaging run
///
/// Decoupled from the CLI so the workflow can be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageArgs {
    /// Directory to resolve the project from (the project dir or its parent)
    pub start_dir: PathBuf,

    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
}

impl PackageArgs {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        PackageArgs {
            start_dir: start_dir.into(),
            dry_run: false,
        }
    }
}

/// Result of a successful packaging run
#[derive(Debug, Clone, PartialEq)]
pub struct PackageResult {
    /// Version read from the manifest
    pub version: Version,

    /// The bundle that was archived
    pub source: PathBuf,

    /// Absolute path of the archive
    pub destination: PathBuf,

    /// Name of the archiver used
    pub archiver: String,

    /// Whether a previous archive was removed
    pub replaced: bool,

    /// Whether this was a dry run
    pub dry_run: bool,

    pub notices: Vec<PackageNotice>,
}

/// Runs the packaging workflow.
///
/// 1. Resolve the project directory
/// 2. Read the version from the manifest
/// 3. Check the bundle and compute the destination (never inside the bundle)
/// 4. Remove an existing archive at the destination
/// 5. Create the archive, removing any partial output on failure
pub fn run_package(
    args: &PackageArgs,
    config: &Config,
    archiver: &dyn Archiver,
) -> Result<PackageResult> {
    let start_dir = absolutize(&args.start_dir)?;
    let mut notices = Vec::new();

    let mut layout = ProjectLayout::resolve(&start_dir, &config.project)?;
    if let Some(dir) = &config.archive.output_dir {
        layout = layout.with_output_dir(dir);
    }
    if layout.descended() {
        notices.push(PackageNotice::DescendedIntoProject {
            root: layout.root().to_path_buf(),
        });
    }

    let version = manifest::read_version(&layout.manifest_path(), config.version.source)?;

    let source = layout.source_path();
    let destination = layout.destination_path(&version, archiver.extension());
    let request = ArchiveRequest {
        source: source.clone(),
        destination: destination.clone(),
        volume_name: layout.archive_name(&version),
        filesystem: config.archive.filesystem.clone(),
    };
    // Checked before anything is removed or created.
    request.validate_source()?;
    let exists = fs::symlink_metadata(&destination).is_ok();

    if args.dry_run {
        notices.push(PackageNotice::DryRun {
            destination: destination.clone(),
            archiver: archiver.name().to_string(),
        });
        return Ok(PackageResult {
            version,
            source,
            destination,
            archiver: archiver.name().to_string(),
            replaced: exists,
            dry_run: true,
            notices,
        });
    }

    if exists {
        remove_existing(&destination)?;
        notices.push(PackageNotice::ReplacedExisting {
            path: destination.clone(),
        });
    }

    fs::create_dir_all(layout.output_dir())?;

    if let Err(e) = archiver.create(&request) {
        if fs::symlink_metadata(&destination).is_ok() {
            // Best effort; the archiver error is the one worth reporting.
            let _ = remove_existing(&destination);
        }
        return Err(e);
    }

    if !destination.exists() {
        return Err(PackageError::archive(format!(
            "{} reported success but '{}' was not created",
            archiver.name(),
            destination.display()
        )));
    }

    Ok(PackageResult {
        version,
        source,
        destination,
        archiver: archiver.name().to_string(),
        replaced: exists,
        dry_run: false,
        notices,
    })
}

/// Removes a file, symlink or directory tree at `path`.
fn remove_existing(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
