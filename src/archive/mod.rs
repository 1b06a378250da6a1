//! Archiver abstraction layer
//!
//! Turning an application bundle into a single distributable file is the one
//! platform-specific step of packaging. It sits behind the [Archiver] trait so
//! the workflow never shells out directly.
//!
//! - [hdiutil::HdiutilArchiver]: macOS disk image via `hdiutil`
//! - [zipfile::ZipArchiver]: portable ZIP archive, no external tools
//! - [mock::MockArchiver]: records requests, for testing
//!
//! ```no_run
//! # use festival_pkg::archive::{default_archiver, ArchiveRequest};
//! # fn example() -> festival_pkg::Result<()> {
//! let archiver = default_archiver();
//! archiver.create(&ArchiveRequest {
//!     source: "Festival.app".into(),
//!     destination: format!("Festival-1.0.0.{}", archiver.extension()).into(),
//!     volume_name: "Festival-1.0.0".into(),
//!     filesystem: "HFS+".into(),
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod hdiutil;
pub mod mock;
pub mod zipfile;

pub use hdiutil::HdiutilArchiver;
pub use mock::MockArchiver;
pub use zipfile::ZipArchiver;

use std::path::PathBuf;

use crate::config::ArchiverKind;
use crate::error::{PackageError, Result};

/// Everything an archiver needs to produce one archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    /// Directory to archive (the `.app` bundle)
    pub source: PathBuf,
    /// File to create; must not exist yet
    pub destination: PathBuf,
    /// Volume label for disk images, top-level folder for ZIP archives
    pub volume_name: String,
    /// Filesystem for disk images; ignored by formats without one
    pub filesystem: String,
}

impl ArchiveRequest {
    /// Checks that the source is an existing directory and that the
    /// destination does not lie inside it.
    pub fn validate_source(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(PackageError::missing_bundle(
                self.source.display().to_string(),
            ));
        }
        if !self.source.is_dir() {
            return Err(PackageError::archive(format!(
                "Source is not a directory: {}",
                self.source.display()
            )));
        }
        if self.destination.starts_with(&self.source) {
            return Err(PackageError::archive(format!(
                "Destination {} is inside the bundle {}",
                self.destination.display(),
                self.source.display()
            )));
        }
        Ok(())
    }
}

/// Converts a directory into a single distributable archive.
///
/// Implementors must be `Send + Sync`. On failure they return
/// [PackageError::Archive] (or [PackageError::MissingBundle] for an absent
/// source); cleanup of a partially written destination is the caller's job.
pub trait Archiver: Send + Sync {
    /// Short name shown to the user (e.g. "hdiutil")
    fn name(&self) -> &str;

    /// File extension of produced archives, without the dot
    fn extension(&self) -> &str;

    /// Produces `request.destination` from `request.source`.
    fn create(&self, request: &ArchiveRequest) -> Result<()>;
}

/// The archiver for the platform this binary was built for.
#[cfg(target_os = "macos")]
pub fn default_archiver() -> Box<dyn Archiver> {
    Box::new(HdiutilArchiver::new())
}

/// The archiver for the platform this binary was built for.
#[cfg(not(target_os = "macos"))]
pub fn default_archiver() -> Box<dyn Archiver> {
    Box::new(ZipArchiver::default())
}

/// Builds the archiver selected by configuration.
pub fn archiver_for(kind: ArchiverKind) -> Box<dyn Archiver> {
    match kind {
        ArchiverKind::Auto => default_archiver(),
        ArchiverKind::Hdiutil => Box::new(HdiutilArchiver::new()),
        ArchiverKind::Zip => Box::new(ZipArchiver::default()),
    }
}
