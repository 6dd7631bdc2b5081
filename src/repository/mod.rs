//! Repository clients that report the known versions of a coordinate.
//!
//! The engine only depends on the [`VersionSource`] trait: a listing of every
//! version plus the repository's notion of the latest one, or `None` when the
//! artifact does not exist there. How the listing is fetched stays behind the
//! trait.

mod maven2;

pub use maven2::{Maven2Repository, parse_metadata};

use crate::config::{RepositoryConfig, RepositoryType};
use crate::error::Result;
use crate::model::{Coordinate, Versions};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;

/// Capability that returns a repository's current version set for a coordinate.
///
/// Implement this trait to add a new repository layout.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Display name used as the repository name in notifications.
    fn name(&self) -> &str;

    /// Query the versions of `coordinate`.
    ///
    /// Returns `Ok(None)` when the repository has no such artifact. Every other
    /// failure is an error scoped to this one coordinate.
    async fn versions(&self, coordinate: &Coordinate) -> Result<Option<Versions>>;
}

/// Builds [`VersionSource`]s from repository settings.
///
/// The monitor rebuilds its sources from this factory every time the config
/// file changes.
pub trait RepositoryFactory: Send + Sync {
    fn create(&self, name: &str, host: &Url, kind: RepositoryType) -> Arc<dyn VersionSource>;

    /// Convenience for building the source of a parsed config block.
    fn for_config(&self, config: &RepositoryConfig) -> Arc<dyn VersionSource> {
        self.create(&config.name, &config.host, config.kind)
    }
}

/// Factory producing HTTP-backed repositories that share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpRepositoryFactory {
    client: reqwest::Client,
}

impl HttpRepositoryFactory {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RepositoryFactory for HttpRepositoryFactory {
    fn create(&self, name: &str, host: &Url, kind: RepositoryType) -> Arc<dyn VersionSource> {
        match kind {
            RepositoryType::Maven2 => Arc::new(Maven2Repository::new(
                name,
                host.clone(),
                self.client.clone(),
            )),
        }
    }
}
