//! Unified error types for dependency-watch.
//!
//! Failures that are local to one unit of work (a single coordinate check, a
//! single notifier sink) are contained by their caller; everything else bubbles
//! up as a [`WatchError`].

use crate::config::ConfigError;
use crate::model::{Coordinate, CoordinateError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dependency-watch operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WatchError {
    /// A coordinate string could not be parsed
    #[error("Invalid coordinate: {0}")]
    Coordinate(#[from] CoordinateError),

    /// The repository config file could not be read or is malformed
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Querying a repository for one coordinate failed
    #[error("Repository query for {coordinate} failed: {source}")]
    Repository {
        coordinate: String,
        #[source]
        source: RepositoryErrorKind,
    },

    /// The seen-version store could not be written
    #[error("Seen store error at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid interval '{0}': expected format like 30s, 5m, 1h")]
    InvalidInterval(String),

    #[error("unknown repository '{0}': expected MavenCentral, GoogleMaven, or an http(s) URL")]
    UnknownRepository(String),
}

/// Specific repository error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RepositoryErrorKind {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for dependency-watch operations
pub type Result<T> = std::result::Result<T, WatchError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl WatchError {
    /// Create a repository error scoped to one coordinate
    pub fn repository(coordinate: &Coordinate, source: RepositoryErrorKind) -> Self {
        Self::Repository {
            coordinate: coordinate.to_string(),
            source,
        }
    }

    /// Create a store error for the given path
    pub fn store(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Store {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_names_coordinate() {
        let err = WatchError::repository(
            &Coordinate::new("com.example", "example"),
            RepositoryErrorKind::Status {
                status: 500,
                url: "https://repo.example/".to_string(),
            },
        );
        let message = err.to_string();
        assert!(message.contains("com.example:example"), "{message}");
        assert!(message.contains("HTTP 500"), "{message}");
    }

    #[test]
    fn test_config_error_message() {
        let err = WatchError::from(ConfigError::UnknownKey {
            table: "MavenCentral".to_string(),
            key: "foo".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: 'MavenCentral' table contains unknown 'foo' key"
        );
    }
}
