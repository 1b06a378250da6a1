use thiserror::Error;

/// Unified error type for festival-pkg operations
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project layout error: {0}")]
    Layout(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Application bundle not found: {0}")]
    MissingBundle(String),

    #[error("Archive creation failed: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in festival-pkg
pub type Result<T> = std::result::Result<T, PackageError>;

impl PackageError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PackageError::Config(msg.into())
    }

    /// Create a layout error with context
    pub fn layout(msg: impl Into<String>) -> Self {
        PackageError::Layout(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        PackageError::Manifest(msg.into())
    }

    /// Create a missing bundle error for the given path
    pub fn missing_bundle(path: impl Into<String>) -> Self {
        PackageError::MissingBundle(path.into())
    }

    /// Create an archive error with context
    pub fn archive(msg: impl Into<String>) -> Self {
        PackageError::Archive(msg.into())
    }
}

impl From<zip::result::ZipError> for PackageError {
    fn from(err: zip::result::ZipError) -> Self {
        PackageError::Archive(format!("zip: {}", err))
    }
}

impl From<walkdir::Error> for PackageError {
    fn from(err: walkdir::Error) -> Self {
        PackageError::Archive(format!("failed to walk directory: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PackageError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PackageError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (PackageError::config("x"), "Configuration error"),
            (PackageError::layout("x"), "Project layout error"),
            (PackageError::manifest("x"), "Manifest error"),
            (PackageError::missing_bundle("x"), "Application bundle not found"),
            (PackageError::archive("x"), "Archive creation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_empty_messages() {
        let errors = vec![
            PackageError::layout(""),
            PackageError::manifest(""),
            PackageError::archive(""),
        ];

        for err in errors {
            // Even with empty message, the error type prefix should be present
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_zip_error_maps_to_archive() {
        let err: PackageError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, PackageError::Archive(_)));
        assert!(err.to_string().contains("zip"));
    }
}
