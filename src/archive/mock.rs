use std::fs;
use std::sync::Mutex;

use crate::archive::{ArchiveRequest, Archiver};
use crate::error::{PackageError, Result};

/// Mock archiver for testing without external tools
///
/// Records every request. On success it writes a small placeholder file at the
/// destination; when configured to fail it can leave a partial file behind.
pub struct MockArchiver {
    requests: Mutex<Vec<ArchiveRequest>>,
    failure: Option<String>,
    leave_partial: bool,
}

impl MockArchiver {
    /// Create a mock archiver that always succeeds
    pub fn new() -> Self {
        MockArchiver {
            requests: Mutex::new(Vec::new()),
            failure: None,
            leave_partial: false,
        }
    }

    /// Create a mock archiver that fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        MockArchiver {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Write a partial destination file before failing
    pub fn leaving_partial(mut self) -> Self {
        self.leave_partial = true;
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<ArchiveRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for MockArchiver {
    fn name(&self) -> &str {
        "mock"
    }

    fn extension(&self) -> &str {
        "dmg"
    }

    fn create(&self, request: &ArchiveRequest) -> Result<()> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        request.validate_source()?;

        if let Some(message) = &self.failure {
            if self.leave_partial {
                fs::write(&request.destination, b"partial")?;
            }
            return Err(PackageError::archive(message.clone()));
        }

        fs::write(
            &request.destination,
            format!("volume={}\n", request.volume_name),
        )?;
        Ok(())
    }
}
