//! Configuration file loading and change detection.

use super::types::{RepositoryConfig, parse_repositories};
use super::validation::ConfigError;
use std::path::Path;
use std::time::SystemTime;

/// Cheap fingerprint of the config file used to decide whether to re-parse.
///
/// Compares mtime and size, like a stat-based file poller; content is only
/// read once either changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigStamp {
    modified: SystemTime,
    len: u64,
}

impl ConfigStamp {
    /// Stat the file at `path`.
    pub fn of(path: &Path) -> Result<Self, ConfigError> {
        let meta = std::fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            len: meta.len(),
        })
    }
}

/// Read and parse the repository config file.
pub fn load_config_file(path: &Path) -> Result<Vec<RepositoryConfig>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_repositories(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EXAMPLE_CONFIG;

    #[test]
    fn test_load_example_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, EXAMPLE_CONFIG).expect("write config");

        let repos = load_config_file(&path).unwrap();
        assert_eq!(repos.len(), 3);
        assert_eq!(repos[2].name, "Custom Repo");
        assert_eq!(repos[2].coordinates.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_stamp_changes_with_content() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[MavenCentral]\ncoordinates = []\n").expect("write config");
        let first = ConfigStamp::of(&path).unwrap();
        assert_eq!(first, ConfigStamp::of(&path).unwrap());

        // Size changes even if the filesystem's mtime granularity is coarse
        std::fs::write(&path, "[MavenCentral]\ncoordinates = [\"com.example:a\"]\n")
            .expect("write config");
        assert_ne!(first, ConfigStamp::of(&path).unwrap());
    }
}
