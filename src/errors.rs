//! Shared error types for unitsplit.
//!
//! Only failures that stop a run live here: unreadable input, unwritable
//! output, broken configuration or removal plans. Per-definition problems
//! (an unbalanced body) and manifest anomalies are ordinary values reported
//! by the pipeline, see [`crate::extract::ExtractError`] and
//! [`crate::manifest::ManifestOutcome`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for unitsplit operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message} ({})", display_path(.path))]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Removal plan errors
    #[error("Removal plan error: {0}")]
    Plan(String),

    /// TOML decoding errors
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML encoding errors
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown path>".to_string())
}

impl Error {
    /// Wrap an I/O error, keeping the path that caused it
    pub fn io_at(message: impl Into<String>, path: &Path, source: std::io::Error) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// Whether the error came from the file system (missing input, unwritable output)
    pub fn is_file_system(&self) -> bool {
        matches!(self, Self::FileSystem { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_error_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_at("source file not found", Path::new("src/MB8ART.cpp"), io);
        let message = err.to_string();
        assert!(message.contains("source file not found"));
        assert!(message.contains("src/MB8ART.cpp"));
        assert!(err.is_file_system());
    }

    #[test]
    fn test_io_at_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_at("cannot write", Path::new("out.cpp"), io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_plan_error_is_not_file_system() {
        let err = Error::Plan("no methods listed".into());
        assert!(!err.is_file_system());
        assert_eq!(err.to_string(), "Removal plan error: no methods listed");
    }
}
