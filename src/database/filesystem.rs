use super::SeenStore;
use crate::error::{Result, WatchError};
use crate::model::Coordinate;
use std::fs;
use std::path::{Path, PathBuf};

/// Marks a coordinate directory whose coordinate has at least one seen version.
const SEEN_SENTINEL: &str = ".seen";

/// Marker-file store rooted at a directory.
///
/// Layout: `<root>/<groupId with '.' as '/'>/<artifactId>/<version>.txt`, plus
/// a `.seen` sentinel in the artifact directory once any version is marked.
/// Path segments are percent-escaped, so distinct keys never share a file and
/// no encoded segment starts with `.`.
///
/// Each key maps to its own file, so concurrent writers never collide and a
/// repeated create is harmless. Lookups are a single stat.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// The root directory is created lazily on the first mark.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn coordinate_dir(&self, coordinate: &Coordinate) -> PathBuf {
        let mut path = self.root.clone();
        for segment in coordinate.group_id().split('.') {
            path.push(encode_segment(segment));
        }
        path.push(encode_segment(coordinate.artifact_id()));
        path
    }

    fn version_file(&self, coordinate: &Coordinate, version: &str) -> PathBuf {
        self.coordinate_dir(coordinate)
            .join(format!("{}.txt", encode_segment(version)))
    }
}

impl SeenStore for FileSystemStore {
    // A nested group (`com.example.a:b`) lives inside the directory of the
    // artifact `com.example:a`, so the directory alone proves nothing.
    fn coordinate_seen(&self, coordinate: &Coordinate) -> bool {
        self.coordinate_dir(coordinate)
            .join(SEEN_SENTINEL)
            .is_file()
    }

    fn version_seen(&self, coordinate: &Coordinate, version: &str) -> bool {
        self.version_file(coordinate, version).is_file()
    }

    // The version marker is written before the sentinel. An interrupted mark
    // leaves the coordinate unseen, which re-reports only its latest version.
    fn mark_seen(&self, coordinate: &Coordinate, version: &str) -> Result<()> {
        let path = self.version_file(coordinate, version);
        if path.is_file() {
            return Ok(());
        }
        let dir = self.coordinate_dir(coordinate);
        fs::create_dir_all(&dir).map_err(|e| WatchError::store(&dir, e))?;
        touch(&path)?;
        touch(&dir.join(SEEN_SENTINEL))
    }
}

fn touch(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|e| WatchError::store(path, e))?;
    Ok(())
}

/// Escape a path segment reversibly.
///
/// `%`, the path separators and `:` are percent-encoded, as is a leading `.`
/// (which also rules out `.` and `..`). The empty segment becomes a lone `%`,
/// which no other input produces.
fn encode_segment(segment: &str) -> String {
    if segment.is_empty() {
        return "%".to_string();
    }
    let mut encoded = String::with_capacity(segment.len());
    for (i, c) in segment.char_indices() {
        match c {
            '%' => encoded.push_str("%25"),
            '/' => encoded.push_str("%2F"),
            '\\' => encoded.push_str("%5C"),
            ':' => encoded.push_str("%3A"),
            '.' if i == 0 => encoded.push_str("%2E"),
            _ => encoded.push(c),
        }
    }
    encoded
}
