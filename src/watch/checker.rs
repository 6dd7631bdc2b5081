//! One sweep over the coordinates of one repository.

use super::state::{NewVersion, SweepReport};
use crate::database::SeenStore;
use crate::error::Result;
use crate::model::Coordinate;
use crate::notify::VersionNotifier;
use crate::repository::VersionSource;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Checks a fixed list of coordinates against one repository.
///
/// Every coordinate is checked in its own task. A failing or panicking check
/// is recorded in the [`SweepReport`] and never affects its siblings.
pub struct Checker {
    source: Arc<dyn VersionSource>,
    coordinates: Vec<Coordinate>,
    store: Arc<dyn SeenStore>,
    notifier: Arc<dyn VersionNotifier>,
}

impl Checker {
    pub fn new(
        source: Arc<dyn VersionSource>,
        coordinates: Vec<Coordinate>,
        store: Arc<dyn SeenStore>,
        notifier: Arc<dyn VersionNotifier>,
    ) -> Self {
        Self {
            source,
            coordinates,
            store,
            notifier,
        }
    }

    #[must_use]
    pub fn repository_name(&self) -> &str {
        self.source.name()
    }

    /// Run one sweep and wait for every coordinate to finish.
    ///
    /// Dropping the returned future aborts the in-flight checks.
    pub async fn check(&self) -> SweepReport {
        let mut report = SweepReport::new(self.repository_name());
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::with_capacity(self.coordinates.len());

        for coordinate in &self.coordinates {
            let source = Arc::clone(&self.source);
            let store = Arc::clone(&self.store);
            let notifier = Arc::clone(&self.notifier);
            let task_coordinate = coordinate.clone();
            let handle = tasks.spawn(async move {
                check_coordinate(&*source, &*store, &*notifier, &task_coordinate).await
            });
            pending.insert(handle.id(), coordinate.clone());
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    if let Some(coordinate) = pending.remove(&id) {
                        record(&mut report, coordinate, outcome);
                    }
                }
                Err(e) => {
                    let Some(coordinate) = pending.remove(&e.id()) else {
                        continue;
                    };
                    tracing::warn!(
                        "Check task for {coordinate} in {} failed: {e}",
                        report.repository
                    );
                    report.fail(coordinate, format!("check task failed: {e}"));
                }
            }
        }

        tracing::debug!(
            "{}: {} checked, {} not found, {} new, {} failed",
            report.repository,
            report.checked,
            report.not_found,
            report.notified.len(),
            report.failures.len()
        );
        report
    }
}

fn record(report: &mut SweepReport, coordinate: Coordinate, outcome: Result<CoordinateOutcome>) {
    match outcome {
        Ok(CoordinateOutcome::NotFound) => report.not_found += 1,
        Ok(CoordinateOutcome::Checked {
            notified,
            notify_failures,
        }) => {
            report.checked += 1;
            for version in notified {
                report.notified.push(NewVersion {
                    coordinate: coordinate.clone(),
                    version,
                });
            }
            for message in notify_failures {
                report.fail(coordinate.clone(), message);
            }
        }
        Err(e) => {
            let repository = &report.repository;
            tracing::warn!("Checking {coordinate} in {repository} failed: {e}");
            report.fail(coordinate, e.to_string());
        }
    }
}

enum CoordinateOutcome {
    NotFound,
    Checked {
        notified: Vec<String>,
        notify_failures: Vec<String>,
    },
}

async fn check_coordinate(
    source: &dyn VersionSource,
    store: &dyn SeenStore,
    notifier: &dyn VersionNotifier,
    coordinate: &Coordinate,
) -> Result<CoordinateOutcome> {
    tracing::debug!("Fetching metadata for {coordinate}...");
    let Some(versions) = source.versions(coordinate).await? else {
        tracing::debug!("{coordinate} not found in {}", source.name());
        return Ok(CoordinateOutcome::NotFound);
    };
    tracing::debug!("{coordinate} {versions:?}");

    // An unseen coordinate only reports its latest version.
    let new_versions: Vec<String> = if store.coordinate_seen(coordinate) {
        versions
            .all()
            .filter(|version| !store.version_seen(coordinate, version))
            .map(str::to_string)
            .collect()
    } else {
        vec![versions.latest().to_string()]
    };

    // Mark every version before notifying. Notifier failures are not retried.
    for version in versions.all() {
        store.mark_seen(coordinate, version)?;
    }

    let mut notify_failures = Vec::new();
    for version in &new_versions {
        if let Err(e) = notifier.notify(source.name(), coordinate, version).await {
            tracing::warn!("Notifying {coordinate}:{version} failed: {e:#}");
            notify_failures.push(format!("notify {version}: {e:#}"));
        }
    }

    Ok(CoordinateOutcome::Checked {
        notified: new_versions,
        notify_failures,
    })
}
