use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PackageError, Result};

/// File name searched for in the start directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "festival-pkg.toml";

/// Represents the complete configuration for festival-pkg.
///
/// Contains the project layout, how the version is read from the manifest,
/// and which archiver produces the distributable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,
}

fn default_dir_name() -> String {
    "festival".to_string()
}

fn default_app_name() -> String {
    "Festival".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from("../../Cargo.toml")
}

/// Where the project lives relative to the invocation directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Name of the directory the packager must run in (or one level above).
    #[serde(default = "default_dir_name")]
    pub dir_name: String,

    /// Bundle name without the `.app` suffix; also the archive name prefix.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Manifest path, relative to the project directory.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            dir_name: default_dir_name(),
            app_name: default_app_name(),
            manifest: default_manifest(),
        }
    }
}

/// How the version string is obtained from the manifest.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
    /// Parse the manifest as TOML and read `package.version`.
    #[default]
    Structured,
    /// Scan for the first line containing `version` and take its `N.N.N`.
    Pattern,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VersionConfig {
    #[serde(default)]
    pub source: VersionSource,
}

/// Archiver selection.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArchiverKind {
    /// Platform default chosen at build time.
    #[default]
    Auto,
    Hdiutil,
    Zip,
}

impl std::str::FromStr for ArchiverKind {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ArchiverKind::Auto),
            "hdiutil" | "dmg" => Ok(ArchiverKind::Hdiutil),
            "zip" => Ok(ArchiverKind::Zip),
            other => Err(PackageError::config(format!(
                "Unknown archiver '{}' (expected auto, hdiutil or zip)",
                other
            ))),
        }
    }
}

fn default_filesystem() -> String {
    "HFS+".to_string()
}

/// Configuration for the archive step.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub archiver: ArchiverKind,

    /// Filesystem passed to the disk image tool.
    #[serde(default = "default_filesystem")]
    pub filesystem: String,

    /// Directory the archive is written to; the project directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        ArchiveConfig {
            archiver: ArchiverKind::default(),
            filesystem: default_filesystem(),
            output_dir: None,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `festival-pkg.toml` in `start_dir`
/// 3. `festival-pkg/festival-pkg.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `start_dir` - Directory the packager was started from
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or a custom path is missing
pub fn load_config(config_path: Option<&Path>, start_dir: &Path) -> Result<Config> {
    let local = start_dir.join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.is_file() {
        local
    } else if let Some(user) = dirs::config_dir()
        .map(|dir| dir.join("festival-pkg").join(CONFIG_FILE_NAME))
        .filter(|p| p.is_file())
    {
        user
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        PackageError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str).map_err(|e| match e {
        PackageError::Config(msg) => {
            PackageError::config(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parses a configuration document, filling unset fields with defaults.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| PackageError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_script() {
        let config = Config::default();
        assert_eq!(config.project.app_name, "Festival");
        assert_eq!(config.project.dir_name, "festival");
        assert_eq!(config.project.manifest, PathBuf::from("../../Cargo.toml"));
        assert_eq!(config.version.source, VersionSource::Structured);
        assert_eq!(config.archive.archiver, ArchiverKind::Auto);
        assert_eq!(config.archive.filesystem, "HFS+");
        assert!(config.archive.output_dir.is_none());
    }

    #[test]
    fn test_parse_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_sections() {
        let config = parse_config(
            r#"
[version]
source = "pattern"

[archive]
archiver = "zip"
"#,
        )
        .unwrap();
        assert_eq!(config.version.source, VersionSource::Pattern);
        assert_eq!(config.archive.archiver, ArchiverKind::Zip);
        assert_eq!(config.archive.filesystem, "HFS+");
        assert_eq!(config.project, ProjectConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_archiver() {
        let err = parse_config("[archive]\narchiver = \"tar\"\n").unwrap_err();
        assert!(matches!(err, PackageError::Config(_)));
    }

    #[test]
    fn test_archiver_kind_from_str() {
        assert_eq!("zip".parse::<ArchiverKind>().unwrap(), ArchiverKind::Zip);
        assert_eq!("DMG".parse::<ArchiverKind>().unwrap(), ArchiverKind::Hdiutil);
        assert_eq!("auto".parse::<ArchiverKind>().unwrap(), ArchiverKind::Auto);
        assert!("rar".parse::<ArchiverKind>().is_err());
    }
}
