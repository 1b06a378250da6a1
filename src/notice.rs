use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while packaging.
/// These never stop the run but are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageNotice {
    /// Started one level above the project directory and stepped into it
    DescendedIntoProject { root: PathBuf },
    /// An archive already existed at the destination and was removed
    ReplacedExisting { path: PathBuf },
    /// Dry run: the archive would have been written here
    DryRun { destination: PathBuf, archiver: String },
}

impl fmt::Display for PackageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageNotice::DescendedIntoProject { root } => {
                write!(f, "Using project directory '{}'", root.display())
            }
            PackageNotice::ReplacedExisting { path } => {
                write!(f, "Removed existing archive '{}'", path.display())
            }
            PackageNotice::DryRun {
                destination,
                archiver,
            } => {
                write!(
                    f,
                    "Dry run: {} would create '{}'",
                    archiver,
                    destination.display()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display() {
        let replaced = PackageNotice::ReplacedExisting {
            path: PathBuf::from("Festival-1.2.3.dmg"),
        };
        assert_eq!(
            replaced.to_string(),
            "Removed existing archive 'Festival-1.2.3.dmg'"
        );

        let dry = PackageNotice::DryRun {
            destination: PathBuf::from("Festival-1.2.3.zip"),
            archiver: "zip".to_string(),
        };
        assert!(dry.to_string().contains("zip would create"));

        let descended = PackageNotice::DescendedIntoProject {
            root: PathBuf::from("festival"),
        };
        assert!(descended.to_string().contains("'festival'"));
    }
}
