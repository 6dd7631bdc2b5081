//! Config-driven check loop with hot reload.
//!
//! The config file is re-read only when its mtime or size changes, like a
//! stat-based file poller. The parsed repositories and their checkers live in a
//! [`LoadedConfig`] threaded through each tick.

use super::checker::Checker;
use super::progress::Progress;
use super::state::{SweepReport, TickSummary};
use crate::config::{ConfigStamp, RepositoryConfig, load_config_file};
use crate::database::SeenStore;
use crate::error::Result;
use crate::notify::VersionNotifier;
use crate::repository::RepositoryFactory;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// The parsed config file and the checkers built from it.
pub struct LoadedConfig {
    stamp: ConfigStamp,
    repositories: Vec<RepositoryConfig>,
    checkers: Vec<Arc<Checker>>,
}

impl LoadedConfig {
    #[must_use]
    pub fn repositories(&self) -> &[RepositoryConfig] {
        &self.repositories
    }
}

/// Runs checkers for every repository listed in a config file.
pub struct Monitor {
    config_path: PathBuf,
    factory: Arc<dyn RepositoryFactory>,
    store: Arc<dyn SeenStore>,
    notifier: Arc<dyn VersionNotifier>,
    progress: Option<Mutex<Progress>>,
}

impl Monitor {
    pub fn new(
        config_path: impl Into<PathBuf>,
        factory: Arc<dyn RepositoryFactory>,
        store: Arc<dyn SeenStore>,
        notifier: Arc<dyn VersionNotifier>,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            factory,
            store,
            notifier,
            progress: None,
        }
    }

    /// Show a "Last checked" line after every tick of [`Monitor::monitor`].
    #[must_use]
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(Mutex::new(progress));
        self
    }

    fn load(&self, stamp: ConfigStamp) -> Result<LoadedConfig> {
        let repositories = load_config_file(&self.config_path)?;
        let checkers = repositories
            .iter()
            .map(|repository| {
                Arc::new(Checker::new(
                    self.factory.for_config(repository),
                    repository.coordinates.clone(),
                    Arc::clone(&self.store),
                    Arc::clone(&self.notifier),
                ))
            })
            .collect();
        Ok(LoadedConfig {
            stamp,
            repositories,
            checkers,
        })
    }

    /// Reload the config if it changed, then sweep every repository once.
    ///
    /// Repositories are swept concurrently. A config that fails to parse fails
    /// the tick and leaves `loaded` untouched, so the next tick parses again.
    pub async fn tick(&self, loaded: &mut Option<LoadedConfig>) -> Result<TickSummary> {
        let stamp = ConfigStamp::of(&self.config_path)?;
        let reloaded = !matches!(loaded, Some(current) if current.stamp == stamp);
        if reloaded {
            let fresh = self.load(stamp)?;
            tracing::info!(
                "Loaded {} repositories from {}",
                fresh.repositories.len(),
                self.config_path.display()
            );
            for repository in &fresh.repositories {
                tracing::debug!(
                    "{} ({}): {} coordinate(s)",
                    repository.name,
                    repository.host,
                    repository.coordinates.len()
                );
            }
            *loaded = Some(fresh);
        }

        let checkers = loaded
            .as_ref()
            .map(|config| config.checkers.clone())
            .unwrap_or_default();

        let mut sweeps = JoinSet::new();
        let mut order = HashMap::with_capacity(checkers.len());
        for (index, checker) in checkers.iter().enumerate() {
            let checker = Arc::clone(checker);
            let handle = sweeps.spawn(async move { checker.check().await });
            order.insert(handle.id(), index);
        }

        let mut reports: Vec<Option<SweepReport>> = vec![None; checkers.len()];
        while let Some(joined) = sweeps.join_next_with_id().await {
            match joined {
                Ok((id, report)) => {
                    if let Some(&index) = order.get(&id) {
                        reports[index] = Some(report);
                    }
                }
                Err(e) => {
                    let name = order
                        .get(&e.id())
                        .map_or("unknown", |&index| checkers[index].repository_name());
                    tracing::error!("Sweep of {name} failed: {e}");
                }
            }
        }

        let summary = TickSummary {
            reloaded,
            reports: reports.into_iter().flatten().collect(),
        };
        tracing::debug!(
            "Checked {} repositories: {} new version(s), {} failure(s)",
            summary.reports.len(),
            summary.notified(),
            summary.failures()
        );
        Ok(summary)
    }

    /// Load the config and sweep once.
    pub async fn run_once(&self) -> Result<TickSummary> {
        let mut loaded = None;
        self.tick(&mut loaded).await
    }

    /// Tick every `interval` until `cancel` fires.
    ///
    /// A failed tick is logged and the loop keeps going. Cancellation
    /// interrupts both the sleep and an in-flight tick.
    pub async fn monitor(&self, interval: Duration, cancel: &CancellationToken) {
        let mut loaded = None;
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                result = self.tick(&mut loaded) => {
                    if let Err(e) = result {
                        tracing::error!("Check failed: {e}");
                    }
                }
            }
            self.show_progress();

            tracing::debug!("Sleeping {interval:?}...");
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
        tracing::debug!("Monitor stopped");
    }

    fn show_progress(&self) {
        if let Some(progress) = &self.progress {
            let mut progress = progress.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = progress.checked() {
                tracing::debug!("Progress output failed: {e}");
            }
        }
    }
}
