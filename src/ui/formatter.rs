//! Pure formatting functions for UI output.
//!
//! Every `format_*` function only builds a string; the matching `display_*`
//! function prints it. Styling is dropped automatically when the stream is not
//! a terminal.

use console::style;

use crate::notice::PackageNotice;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_notice(notice: &PackageNotice) -> String {
    format!("{} {}", style("⚠ NOTICE:").yellow(), notice)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Display a package notice to the user.
pub fn display_notice(notice: &PackageNotice) {
    eprintln!("{}", format_notice(notice));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_formatters_keep_message() {
        assert!(format_error("bad manifest").contains("bad manifest"));
        assert!(format_error("x").contains("ERROR:"));
        assert!(format_success("done").ends_with("done"));
        assert!(format_status("reading").ends_with("reading"));
    }

    #[test]
    fn test_format_notice() {
        let notice = PackageNotice::ReplacedExisting {
            path: PathBuf::from("Festival-1.0.0.dmg"),
        };
        let line = format_notice(&notice);
        assert!(line.contains("NOTICE"));
        assert!(line.contains("Festival-1.0.0.dmg"));
    }
}
