use std::ffi::OsString;
use std::process::Command;

use crate::archive::{ArchiveRequest, Archiver};
use crate::error::{PackageError, Result};

/// Creates macOS disk images with `hdiutil create`.
pub struct HdiutilArchiver {
    program: OsString,
}

impl HdiutilArchiver {
    pub fn new() -> Self {
        Self::with_program("hdiutil")
    }

    /// Uses a different executable in place of `hdiutil`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        HdiutilArchiver {
            program: program.into(),
        }
    }

    /// Arguments passed to the tool for `request`, in order.
    pub fn arguments(request: &ArchiveRequest) -> Vec<OsString> {
        vec![
            "create".into(),
            "-fs".into(),
            request.filesystem.clone().into(),
            "-volname".into(),
            request.volume_name.clone().into(),
            "-srcfolder".into(),
            request.source.clone().into_os_string(),
            request.destination.clone().into_os_string(),
        ]
    }
}

impl Default for HdiutilArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for HdiutilArchiver {
    fn name(&self) -> &str {
        "hdiutil"
    }

    fn extension(&self) -> &str {
        "dmg"
    }

    fn create(&self, request: &ArchiveRequest) -> Result<()> {
        request.validate_source()?;

        let output = Command::new(&self.program)
            .args(Self::arguments(request))
            .output()
            .map_err(|e| {
                PackageError::archive(format!(
                    "Failed to run {}: {}",
                    self.program.to_string_lossy(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(PackageError::archive(format!(
                "{} failed with exit code {}\nStdout: {}\nStderr: {}",
                self.program.to_string_lossy(),
                output.status.code().unwrap_or(-1),
                stdout.trim_end(),
                stderr.trim_end()
            )));
        }

        Ok(())
    }
}
