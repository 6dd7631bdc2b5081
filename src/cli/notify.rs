//! CLI handler for the `notify` subcommand.

use super::{EXIT_INTERRUPTED, http_client, show_progress};
use crate::database::{FileSystemStore, InMemoryStore, SeenStore};
use crate::notify::build_notifier;
use crate::repository::HttpRepositoryFactory;
use crate::watch::{Monitor, NotifyConfig, Progress};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Check every configured repository once, or keep checking with `--watch`.
///
/// A single run exits with 1 when any coordinate failed to check.
pub async fn run_notify(config: NotifyConfig, cancel: CancellationToken) -> Result<i32> {
    let client = http_client(config.timeout).context("failed to build HTTP client")?;
    let notifier = build_notifier(&config.notifiers, &client)?;
    let store: Arc<dyn SeenStore> = match config.data_dir {
        Some(dir) => Arc::new(FileSystemStore::new(dir)),
        None => Arc::new(InMemoryStore::new()),
    };

    let mut monitor = Monitor::new(
        config.config_path,
        Arc::new(HttpRepositoryFactory::new(client)),
        store,
        notifier,
    );

    if config.watch {
        if show_progress(config.quiet) {
            monitor = monitor.with_progress(Progress::stdout());
        }
        monitor.monitor(config.interval, &cancel).await;
        return Ok(EXIT_INTERRUPTED);
    }

    let summary = tokio::select! {
        () = cancel.cancelled() => return Ok(EXIT_INTERRUPTED),
        summary = monitor.run_once() => summary?,
    };
    for report in &summary.reports {
        for failure in &report.failures {
            tracing::error!(
                "{}: {}: {}",
                report.repository,
                failure.coordinate,
                failure.message
            );
        }
    }
    Ok(i32::from(summary.failures() > 0))
}
