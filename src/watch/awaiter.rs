//! Wait for one specific version of one coordinate to be published.

use super::progress::Progress;
use crate::error::Result;
use crate::model::Coordinate;
use crate::notify::VersionNotifier;
use crate::repository::VersionSource;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How [`Awaiter::await_version`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitOutcome {
    /// The version appeared and the notifier was invoked
    Found,
    /// The token fired before the version appeared
    Cancelled,
}

/// Polls a repository until a target version is listed.
pub struct Awaiter {
    source: Arc<dyn VersionSource>,
    notifier: Arc<dyn VersionNotifier>,
    interval: Duration,
    progress: Option<Progress>,
}

impl Awaiter {
    pub fn new(
        source: Arc<dyn VersionSource>,
        notifier: Arc<dyn VersionNotifier>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            interval,
            progress: None,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Poll until `version` of `coordinate` is listed, then notify once.
    ///
    /// A missing artifact and failed queries both count as "not yet" and
    /// polling continues. Only cancellation ends the wait early.
    pub async fn await_version(
        &mut self,
        coordinate: &Coordinate,
        version: &str,
        cancel: &CancellationToken,
    ) -> Result<AwaitOutcome> {
        loop {
            tracing::debug!("Fetching metadata for {coordinate}...");
            let queried = tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(AwaitOutcome::Cancelled),
                queried = self.source.versions(coordinate) => queried,
            };

            match queried {
                Ok(Some(versions)) if versions.contains(version) => break,
                Ok(Some(versions)) => tracing::debug!("{coordinate} {versions:?}"),
                Ok(None) => tracing::debug!("{coordinate} not found in {}", self.source.name()),
                Err(e) => tracing::warn!("{e}"),
            }

            self.update_progress(Progress::checked);

            tracing::debug!("Sleeping {:?}...", self.interval);
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(AwaitOutcome::Cancelled),
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        self.update_progress(Progress::clear);

        if let Err(e) = self
            .notifier
            .notify(self.source.name(), coordinate, version)
            .await
        {
            tracing::warn!("Notifying {coordinate}:{version} failed: {e:#}");
        }
        Ok(AwaitOutcome::Found)
    }

    fn update_progress(&mut self, update: fn(&mut Progress) -> std::io::Result<()>) {
        if let Some(progress) = self.progress.as_mut() {
            if let Err(e) = update(progress) {
                tracing::debug!("Progress output failed: {e}");
            }
        }
    }
}
