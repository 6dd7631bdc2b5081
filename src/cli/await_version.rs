//! CLI handler for the `await` subcommand.

use super::{EXIT_INTERRUPTED, http_client, show_progress};
use crate::config::{RepositoryType, resolve_repository};
use crate::model::Coordinate;
use crate::notify::build_notifier;
use crate::repository::{HttpRepositoryFactory, RepositoryFactory};
use crate::watch::{AwaitConfig, AwaitOutcome, Awaiter, Progress};
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Wait for the configured version to appear, notify, and exit.
pub async fn run_await(config: AwaitConfig, cancel: CancellationToken) -> Result<i32> {
    let (coordinate, version) = Coordinate::parse_versioned(&config.coordinates)?;
    let (name, host) = resolve_repository(&config.repository)?;

    let client = http_client(config.timeout).context("failed to build HTTP client")?;
    let notifier = build_notifier(&config.notifiers, &client)?;
    let source = HttpRepositoryFactory::new(client).create(&name, &host, RepositoryType::Maven2);

    let mut awaiter = Awaiter::new(source, notifier, config.interval);
    if show_progress(config.quiet) {
        awaiter = awaiter.with_progress(Progress::stdout());
    }

    tracing::info!("Waiting for {coordinate}:{version} in {name}");
    match awaiter.await_version(&coordinate, &version, &cancel).await? {
        AwaitOutcome::Found => Ok(0),
        AwaitOutcome::Cancelled => Ok(EXIT_INTERRUPTED),
    }
}
