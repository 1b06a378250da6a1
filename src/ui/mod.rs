//! User interface module - console reporting for a packaging run.
//!
//! - `formatter` - Pure formatting functions
//! - This module - The [Reporter] that honours `--quiet`

pub mod formatter;

pub use formatter::{display_error, display_notice, display_status, display_success};

use crate::notice::PackageNotice;
use crate::package::PackageResult;

/// Prints progress for a run. Status lines can be silenced; errors,
/// notices and the final path cannot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn status(&self, message: &str) {
        if !self.quiet {
            display_status(message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            display_success(message);
        }
    }

    pub fn notice(&self, notice: &PackageNotice) {
        display_notice(notice);
    }

    /// Reports a finished run. The destination path is always the last stdout line.
    pub fn finish(&self, result: &PackageResult) {
        for notice in &result.notices {
            self.notice(notice);
        }
        if !result.dry_run {
            self.success(&format!(
                "Packaged {} {} with {}",
                result.source.display(),
                result.version,
                result.archiver
            ));
        }
        println!("{}", result.destination.display());
    }
}
