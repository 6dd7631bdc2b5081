//! Notification sinks for newly observed versions.
//!
//! Provides trait-based extensible notification: console (one line per
//! version), NDJSON (machine-readable) and webhooks (IFTTT, Slack, Microsoft
//! Teams). Several sinks are combined with [`CompositeNotifier`], which invokes
//! each one in order and keeps going when one of them fails.

mod sinks;

pub use sinks::{ConsoleNotifier, NdjsonNotifier, WebhookFormat, WebhookNotifier};

use crate::model::Coordinate;
use async_trait::async_trait;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for receiving new-version events.
#[async_trait]
pub trait VersionNotifier: Send + Sync {
    /// Called once for every newly observed version.
    async fn notify(
        &self,
        repository_name: &str,
        coordinate: &Coordinate,
        version: &str,
    ) -> anyhow::Result<()>;
}

/// Notifier that drops every event. Used when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl VersionNotifier for NoOpNotifier {
    async fn notify(&self, _: &str, _: &Coordinate, _: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Composite fan-out
// ============================================================================

/// Invokes every sink sequentially, in order.
///
/// A failing sink does not stop the remaining ones. Failures are logged and
/// reported together once every sink has been called.
pub struct CompositeNotifier {
    sinks: Vec<Arc<dyn VersionNotifier>>,
}

impl CompositeNotifier {
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn VersionNotifier>>) -> Self {
        Self { sinks }
    }
}

#[async_trait]
impl VersionNotifier for CompositeNotifier {
    async fn notify(
        &self,
        repository_name: &str,
        coordinate: &Coordinate,
        version: &str,
    ) -> anyhow::Result<()> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if let Err(e) = sink.notify(repository_name, coordinate, version).await {
                tracing::warn!("Notifier sink error for {coordinate}:{version}: {e:#}");
                failures.push(format!("{e:#}"));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "{} of {} notifier sink(s) failed: {}",
                failures.len(),
                self.sinks.len(),
                failures.join("; ")
            )
        }
    }
}

/// Collapse a list of sinks into one notifier.
///
/// No sinks gives a [`NoOpNotifier`]; a single sink is returned as-is.
#[must_use]
pub fn flatten(mut sinks: Vec<Arc<dyn VersionNotifier>>) -> Arc<dyn VersionNotifier> {
    match sinks.len() {
        0 => Arc::new(NoOpNotifier),
        1 => sinks.remove(0),
        _ => Arc::new(CompositeNotifier::new(sinks)),
    }
}

// ============================================================================
// Sink builder
// ============================================================================

/// Which sinks to enable.
#[derive(Debug, Clone, Default)]
pub struct NotifierConfig {
    /// Print `groupId:artifactId:version` to stdout
    pub console: bool,
    /// Append NDJSON events to this file
    pub ndjson: Option<PathBuf>,
    /// IFTTT webhook URL
    pub ifttt: Option<Url>,
    /// Slack incoming webhook URL
    pub slack: Option<Url>,
    /// Microsoft Teams incoming webhook URL
    pub teams: Option<Url>,
}

/// Build the notifier from the enabled sinks, in a fixed order: console,
/// NDJSON, IFTTT, Slack, Teams.
pub fn build_notifier(
    config: &NotifierConfig,
    client: &reqwest::Client,
) -> anyhow::Result<Arc<dyn VersionNotifier>> {
    let mut sinks: Vec<Arc<dyn VersionNotifier>> = Vec::new();

    if config.console {
        sinks.push(Arc::new(ConsoleNotifier::new()));
    }
    if let Some(ref path) = config.ndjson {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        sinks.push(Arc::new(NdjsonNotifier::new(Box::new(file))));
    }

    let webhooks = [
        (WebhookFormat::Ifttt, &config.ifttt),
        (WebhookFormat::Slack, &config.slack),
        (WebhookFormat::Teams, &config.teams),
    ];
    for (format, url) in webhooks {
        if let Some(url) = url {
            sinks.push(Arc::new(WebhookNotifier::new(format, url.clone(), client.clone())));
        }
    }

    Ok(flatten(sinks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl VersionNotifier for Recording {
        async fn notify(
            &self,
            repo: &str,
            coordinate: &Coordinate,
            version: &str,
        ) -> anyhow::Result<()> {
            let mut seen = self.0.lock().unwrap();
            seen.push(format!("{repo} {coordinate}:{version}"));
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl VersionNotifier for Failing {
        async fn notify(&self, _: &str, _: &Coordinate, _: &str) -> anyhow::Result<()> {
            anyhow::bail!("sink is down")
        }
    }

    #[tokio::test]
    async fn test_composite_does_not_short_circuit() {
        let first = Arc::new(Recording(Mutex::new(Vec::new())));
        let last = Arc::new(Recording(Mutex::new(Vec::new())));
        let sinks: Vec<Arc<dyn VersionNotifier>> =
            vec![first.clone(), Arc::new(Failing), last.clone()];
        let composite = CompositeNotifier::new(sinks);

        let coordinate = Coordinate::new("com.example", "example");
        let err = composite
            .notify("Repo", &coordinate, "1.0")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("1 of 3"), "{err}");
        assert_eq!(*first.0.lock().unwrap(), ["Repo com.example:example:1.0"]);
        assert_eq!(*last.0.lock().unwrap(), ["Repo com.example:example:1.0"]);
    }

    #[tokio::test]
    async fn test_flatten_empty_is_noop() {
        let notifier = flatten(Vec::new());
        let coordinate = Coordinate::new("com.example", "example");
        notifier.notify("Repo", &coordinate, "1.0").await.unwrap();
    }

    #[test]
    fn test_flatten_single_is_unwrapped() {
        let sink: Arc<dyn VersionNotifier> = Arc::new(Recording(Mutex::new(Vec::new())));
        let flattened = flatten(vec![sink.clone()]);
        assert!(Arc::ptr_eq(&sink, &flattened));
    }

    #[test]
    fn test_build_notifier_without_sinks() {
        let notifier = build_notifier(&NotifierConfig::default(), &reqwest::Client::new());
        assert!(notifier.is_ok());
    }
}
