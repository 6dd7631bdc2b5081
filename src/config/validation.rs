//! Configuration errors.
//!
//! Every structural problem names the repository table and the key at fault so
//! that a broken edit of a running monitor's config is easy to locate.

use crate::model::CoordinateError;
use std::path::PathBuf;

/// Error type for loading and validating the repository config.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("'{table}' must be a table")]
    NotATable { table: String },

    #[error("'{table}' table missing required '{key}' key")]
    MissingKey { table: String, key: &'static str },

    #[error("'{table}' table must not define a '{key}' key")]
    ForbiddenKey { table: String, key: String },

    #[error("'{table}' table contains unknown '{key}' key")]
    UnknownKey { table: String, key: String },

    #[error("'{table}' table '{key}' key must be {expected}")]
    InvalidType {
        table: String,
        key: &'static str,
        expected: &'static str,
    },

    #[error("'{table}' table has unknown repository type '{value}'")]
    UnknownType { table: String, value: String },

    #[error("'{table}' table has invalid host '{value}': {reason}")]
    InvalidHost {
        table: String,
        value: String,
        reason: String,
    },

    #[error("'{table}' table has invalid coordinate: {source}")]
    InvalidCoordinate {
        table: String,
        #[source]
        source: CoordinateError,
    },
}

impl ConfigError {
    pub(crate) fn invalid_type(table: &str, key: &'static str, expected: &'static str) -> Self {
        Self::InvalidType {
            table: table.to_string(),
            key,
            expected,
        }
    }
}
