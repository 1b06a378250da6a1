//! Project directory resolution and the paths derived from it.

use semver::Version;
use std::path::{Component, Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{PackageError, Result};

/// Resolved project directory plus the names needed to derive every path.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLayout {
    root: PathBuf,
    app_name: String,
    manifest: PathBuf,
    output_dir: PathBuf,
    descended: bool,
}

impl ProjectLayout {
    /// Resolves the project directory from `start`.
    ///
    /// `start` is accepted when its last component is `dir_name`. When it is the
    /// parent of a `dir_name` directory, that child is used instead. Anything else
    /// is a layout error; nothing is read or written in that case.
    ///
    /// `.` and `..` components in `start` are folded first, so `festival/sub/..`
    /// resolves to `festival`.
    pub fn resolve(start: &Path, project: &ProjectConfig) -> Result<Self> {
        let dir_name = project.dir_name.as_str();
        if dir_name.is_empty() {
            return Err(PackageError::layout("project directory name is empty"));
        }
        let start = normalize(start);
        let start = start.as_path();

        let (root, descended) = if start.file_name().is_some_and(|n| n == dir_name) {
            (start.to_path_buf(), false)
        } else if start.join(dir_name).is_dir() {
            (start.join(dir_name), true)
        } else {
            return Err(PackageError::layout(format!(
                "'{}' is not the '{}' directory and does not contain it",
                start.display(),
                dir_name
            )));
        };

        if !root.is_dir() {
            return Err(PackageError::layout(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        Ok(ProjectLayout {
            output_dir: root.clone(),
            root,
            app_name: project.app_name.clone(),
            manifest: project.manifest.clone(),
            descended,
        })
    }

    /// Writes the archive somewhere other than the project directory.
    /// Relative paths are taken relative to the project directory.
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = normalize(&self.root.join(dir.as_ref()));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether resolution stepped down from the parent directory.
    pub fn descended(&self) -> bool {
        self.descended
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    /// `<root>/<app_name>.app`
    pub fn source_path(&self) -> PathBuf {
        self.root.join(format!("{}.app", self.app_name))
    }

    /// `<app_name>-<version>`, used as both file stem and volume name.
    pub fn archive_name(&self, version: &Version) -> String {
        format!("{}-{}", self.app_name, version)
    }

    /// `<output_dir>/<app_name>-<version>.<extension>`
    pub fn destination_path(&self, version: &Version, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.archive_name(version), extension))
    }
}

/// Folds `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root (or above the start of a relative
/// path) is kept as is.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> ProjectConfig {
        ProjectConfig::default()
    }

    #[test]
    fn test_resolve_inside_project_dir() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("festival");
        std::fs::create_dir(&root).unwrap();

        let layout = ProjectLayout::resolve(&root, &project()).unwrap();
        assert_eq!(layout.root(), root.as_path());
        assert!(!layout.descended());
    }

    #[test]
    fn test_resolve_descends_from_parent() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("festival")).unwrap();

        let layout = ProjectLayout::resolve(tmp.path(), &project()).unwrap();
        assert_eq!(layout.root(), tmp.path().join("festival").as_path());
        assert!(layout.descended());
    }

    #[test]
    fn test_resolve_rejects_unrelated_dir() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectLayout::resolve(tmp.path(), &project()).unwrap_err();
        assert!(matches!(err, PackageError::Layout(_)));
    }

    #[test]
    fn test_resolve_ignores_file_with_project_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("festival"), b"not a dir").unwrap();
        assert!(ProjectLayout::resolve(tmp.path(), &project()).is_err());
    }

    #[test]
    fn test_derived_paths() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("festival");
        std::fs::create_dir(&root).unwrap();

        let layout = ProjectLayout::resolve(&root, &project()).unwrap();
        let version = Version::new(1, 2, 3);

        assert_eq!(layout.source_path(), root.join("Festival.app"));
        assert_eq!(layout.archive_name(&version), "Festival-1.2.3");
        assert_eq!(
            layout.destination_path(&version, "dmg"),
            root.join("Festival-1.2.3.dmg")
        );
        assert_eq!(layout.manifest_path(), root.join("../../Cargo.toml"));
    }

    #[test]
    fn test_output_dir_override() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("festival");
        std::fs::create_dir(&root).unwrap();

        let layout = ProjectLayout::resolve(&root, &project()).unwrap().with_output_dir("dist");
        assert_eq!(
            layout.destination_path(&Version::new(0, 9, 1), "zip"),
            root.join("dist").join("Festival-0.9.1.zip")
        );
    }

    #[test]
    fn test_resolve_folds_parent_component() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("festival");
        std::fs::create_dir_all(root.join("sub")).unwrap();

        let layout = ProjectLayout::resolve(&root.join("sub").join(".."), &project()).unwrap();
        assert_eq!(layout.root(), root.as_path());
        assert!(!layout.descended());
    }

    #[test]
    fn test_resolve_folds_current_component() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("festival");
        std::fs::create_dir(&root).unwrap();

        let layout = ProjectLayout::resolve(&root.join("."), &project()).unwrap();
        // Compare the raw text: `Path` equality already ignores a `.` component.
        assert_eq!(
            layout
                .destination_path(&Version::new(1, 0, 0), "dmg")
                .as_os_str(),
            root.join("Festival-1.0.0.dmg").as_os_str()
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("/a/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../x/..")), PathBuf::from(".."));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }
}
