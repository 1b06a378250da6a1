//! Portable ZIP archives of an application bundle.
//!
//! The archive holds a single top-level folder named after the volume, with
//! the bundle inside it: `Festival-1.2.3/Festival.app/...`. Unix permissions
//! and symlinks are preserved so the bundle still launches after extraction.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::archive::{ArchiveRequest, Archiver};
use crate::error::{PackageError, Result};

/// Deflate level used by [ZipArchiver::default].
pub const DEFAULT_COMPRESSION: u32 = 6;

/// Writes ZIP archives without any external tool.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiver {
    compression: u32,
}

impl ZipArchiver {
    /// Creates an archiver with a compression level from 0-9.
    ///
    /// Level 0 stores entries uncompressed; values above 9 are clamped.
    pub fn new(compression: u32) -> Self {
        ZipArchiver {
            compression: compression.min(9),
        }
    }

    pub fn compression(&self) -> u32 {
        self.compression
    }

    fn options(&self) -> SimpleFileOptions {
        if self.compression == 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(self.compression as i64))
        }
    }
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION)
    }
}

/// Joins path components with `/` regardless of platform.
fn archive_path(prefix: &str, relative: &Path) -> String {
    let mut path = prefix.to_string();
    for component in relative.components() {
        path.push('/');
        path.push_str(&component.as_os_str().to_string_lossy());
    }
    path
}

impl Archiver for ZipArchiver {
    fn name(&self) -> &str {
        "zip"
    }

    fn extension(&self) -> &str {
        "zip"
    }

    fn create(&self, request: &ArchiveRequest) -> Result<()> {
        request.validate_source()?;

        let source = request.source.as_path();
        let bundle_name = source
            .file_name()
            .ok_or_else(|| {
                PackageError::archive(format!("Invalid bundle path: {}", source.display()))
            })?
            .to_string_lossy()
            .into_owned();
        let prefix = format!("{}/{}", request.volume_name, bundle_name);

        if let Some(parent) = request.destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&request.destination)?;
        let mut zip = ZipWriter::new(file);
        let options = self.options();

        zip.add_directory(format!("{}/", request.volume_name), options)?;

        // Sorted walk keeps the entry order stable between runs.
        for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(source).map_err(|_| {
                PackageError::archive(format!("Path outside bundle: {}", path.display()))
            })?;
            let name = archive_path(&prefix, relative);

            let metadata = fs::symlink_metadata(path)?;

            if metadata.is_dir() {
                zip.add_directory(format!("{}/", name), options)?;
            } else if metadata.file_type().is_symlink() {
                let target = fs::read_link(path)?;
                zip.add_symlink(name, target.to_string_lossy().into_owned(), options)?;
            } else {
                #[cfg(unix)]
                let options = {
                    use std::os::unix::fs::PermissionsExt;
                    options.unix_permissions(metadata.permissions().mode())
                };

                zip.start_file(name, options)?;
                let mut input = File::open(path)?;
                io::copy(&mut input, &mut zip)?;
            }
        }

        zip.finish()?;
        Ok(())
    }
}
