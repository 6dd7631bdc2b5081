//! Maven-style package coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors produced when parsing a `groupId:artifactId[:version]` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoordinateError {
    #[error("coordinate ':' must be present and after non-empty groupId: '{0}'")]
    MissingGroupId(String),

    #[error("coordinate artifactId must be non-empty: '{0}'")]
    EmptyArtifactId(String),

    #[error("coordinate version must be non-empty: '{0}'")]
    EmptyVersion(String),

    #[error("coordinate version must be present and non-empty: '{0}'")]
    MissingVersion(String),

    #[error("coordinate must not contain a version: '{0}'")]
    UnexpectedVersion(String),
}

/// Group + artifact identity of a package, independent of version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
}

impl Coordinate {
    /// Create a coordinate from its two segments.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Parse `groupId:artifactId` with an optional trailing `:version`.
    ///
    /// Everything after the second `:` is taken as the version.
    pub fn parse_with_version(value: &str) -> Result<(Self, Option<String>), CoordinateError> {
        let Some((group_id, rest)) = value.split_once(':') else {
            return Err(CoordinateError::MissingGroupId(value.to_string()));
        };
        if group_id.is_empty() {
            return Err(CoordinateError::MissingGroupId(value.to_string()));
        }

        let (artifact_id, version) = match rest.split_once(':') {
            Some((artifact_id, version)) => (artifact_id, Some(version)),
            None => (rest, None),
        };
        if artifact_id.is_empty() {
            return Err(CoordinateError::EmptyArtifactId(value.to_string()));
        }
        if version.is_some_and(str::is_empty) {
            return Err(CoordinateError::EmptyVersion(value.to_string()));
        }

        Ok((
            Self::new(group_id, artifact_id),
            version.map(ToString::to_string),
        ))
    }

    /// Parse a coordinate that must carry a version, as used by `await`.
    pub fn parse_versioned(value: &str) -> Result<(Self, String), CoordinateError> {
        match Self::parse_with_version(value)? {
            (coordinate, Some(version)) => Ok((coordinate, version)),
            (_, None) => Err(CoordinateError::MissingVersion(value.to_string())),
        }
    }
}

/// Parses a bare `groupId:artifactId`; a version segment is rejected.
impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_with_version(s)? {
            (coordinate, None) => Ok(coordinate),
            (_, Some(_)) => Err(CoordinateError::UnexpectedVersion(s.to_string())),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}
