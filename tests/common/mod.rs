//! In-process fakes shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use dependency_watch::error::RepositoryErrorKind;
use dependency_watch::{
    Coordinate, RepositoryFactory, RepositoryType, VersionNotifier, VersionSource, Versions,
    WatchError,
};
use reqwest::Url;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Repository fakes
// ============================================================================

/// Repository whose version lists are edited by the test.
///
/// The latest version is always the most recently added one.
pub struct FakeRepository {
    name: String,
    artifacts: Mutex<HashMap<Coordinate, Vec<String>>>,
    failing: Mutex<HashSet<Coordinate>>,
    queries: AtomicUsize,
}

impl FakeRepository {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            artifacts: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            queries: AtomicUsize::new(0),
        })
    }

    pub fn add_artifact(&self, coordinate: &Coordinate, version: &str) {
        self.artifacts
            .lock()
            .unwrap()
            .entry(coordinate.clone())
            .or_default()
            .push(version.to_string());
    }

    /// Make every query for `coordinate` fail until [`FakeRepository::recover`].
    pub fn fail(&self, coordinate: &Coordinate) {
        self.failing.lock().unwrap().insert(coordinate.clone());
    }

    pub fn recover(&self, coordinate: &Coordinate) {
        self.failing.lock().unwrap().remove(coordinate);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionSource for FakeRepository {
    fn name(&self) -> &str {
        &self.name
    }

    async fn versions(
        &self,
        coordinate: &Coordinate,
    ) -> dependency_watch::Result<Option<Versions>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(coordinate) {
            return Err(WatchError::repository(
                coordinate,
                RepositoryErrorKind::Status {
                    status: 500,
                    url: format!("fake://{}", self.name),
                },
            ));
        }
        let artifacts = self.artifacts.lock().unwrap();
        Ok(artifacts.get(coordinate).and_then(|all| {
            all.last()
                .map(|latest| Versions::new(latest.clone(), all.iter().cloned()))
        }))
    }
}

/// Hands out one [`FakeRepository`] per host, created on first use.
#[derive(Default)]
pub struct FakeFactory {
    repositories: Mutex<HashMap<String, Arc<FakeRepository>>>,
}

impl FakeFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The repository for `host`, creating it with `name` if needed.
    pub fn repository(&self, host: &str, name: &str) -> Arc<FakeRepository> {
        Arc::clone(
            self.repositories
                .lock()
                .unwrap()
                .entry(host.to_string())
                .or_insert_with(|| FakeRepository::new(name)),
        )
    }

    pub fn existing(&self, host: &str) -> Option<Arc<FakeRepository>> {
        self.repositories.lock().unwrap().get(host).cloned()
    }
}

impl RepositoryFactory for FakeFactory {
    fn create(&self, name: &str, host: &Url, _: RepositoryType) -> Arc<dyn VersionSource> {
        self.repository(host.as_str(), name)
    }
}

// ============================================================================
// Notifier fakes
// ============================================================================

/// Records `"<repository> <groupId>:<artifactId>:<version>"` per event.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    /// Notifications sorted, for assertions on concurrently produced events.
    pub fn sorted(&self) -> Vec<String> {
        let mut notifications = self.notifications();
        notifications.sort();
        notifications
    }
}

#[async_trait]
impl VersionNotifier for RecordingNotifier {
    async fn notify(
        &self,
        repository_name: &str,
        coordinate: &Coordinate,
        version: &str,
    ) -> anyhow::Result<()> {
        self.notifications
            .lock()
            .unwrap()
            .push(format!("{repository_name} {coordinate}:{version}"));
        Ok(())
    }
}

/// Always fails, counting attempts.
#[derive(Default)]
pub struct FailingNotifier {
    attempts: AtomicUsize,
}

impl FailingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionNotifier for FailingNotifier {
    async fn notify(&self, _: &str, _: &Coordinate, _: &str) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("notifier is down")
    }
}

// ============================================================================
// Output capture
// ============================================================================

/// Cloneable writer whose contents can be drained by the test.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return everything written since the last call.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.lock().unwrap());
        String::from_utf8(bytes).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn coordinate(value: &str) -> Coordinate {
    value.parse().unwrap()
}
