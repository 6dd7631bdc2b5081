//! Maven 2 repository client (`maven-metadata.xml`).

use super::VersionSource;
use crate::error::{RepositoryErrorKind, Result, WatchError};
use crate::model::{Coordinate, Versions};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

/// Repository using the Maven 2 layout.
///
/// Metadata for `com.example:thing` lives at
/// `<host>/com/example/thing/maven-metadata.xml`.
#[derive(Debug, Clone)]
pub struct Maven2Repository {
    name: String,
    host: Url,
    client: reqwest::Client,
}

impl Maven2Repository {
    /// `host` must end in `/`; config parsing guarantees this.
    pub fn new(name: impl Into<String>, host: Url, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            host,
            client,
        }
    }

    fn metadata_url(&self, coordinate: &Coordinate) -> Result<Url> {
        let path = format!(
            "{}/{}/maven-metadata.xml",
            coordinate.group_id().replace('.', "/"),
            coordinate.artifact_id()
        );
        self.host.join(&path).map_err(|e| {
            WatchError::repository(coordinate, RepositoryErrorKind::InvalidUrl(e.to_string()))
        })
    }
}

#[async_trait]
impl VersionSource for Maven2Repository {
    fn name(&self) -> &str {
        &self.name
    }

    async fn versions(&self, coordinate: &Coordinate) -> Result<Option<Versions>> {
        let url = self.metadata_url(coordinate)?;
        tracing::debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            WatchError::repository(coordinate, RepositoryErrorKind::Network(e.to_string()))
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.text().await.map_err(|e| {
                    WatchError::repository(coordinate, RepositoryErrorKind::Network(e.to_string()))
                })?;
                parse_metadata(&body).map_err(|e| {
                    WatchError::repository(coordinate, RepositoryErrorKind::InvalidResponse(e))
                })
            }
            status => Err(WatchError::repository(
                coordinate,
                RepositoryErrorKind::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
            )),
        }
    }
}

// ============================================================================
// Metadata document
// ============================================================================

#[derive(Debug, Deserialize)]
struct ArtifactMetadata {
    #[serde(default)]
    versioning: Option<Versioning>,
}

#[derive(Debug, Deserialize)]
struct Versioning {
    #[serde(default)]
    latest: Option<String>,
    #[serde(default)]
    release: Option<String>,
    #[serde(default)]
    versions: VersionList,
}

#[derive(Debug, Default, Deserialize)]
struct VersionList {
    #[serde(default)]
    version: Vec<String>,
}

/// Parse a `maven-metadata.xml` document.
///
/// The latest version is `<release>`, then `<latest>`, then the last listed
/// version. A document without any version is reported as `None`, the same as
/// a missing artifact.
pub fn parse_metadata(xml: &str) -> std::result::Result<Option<Versions>, String> {
    let metadata: ArtifactMetadata = quick_xml::de::from_str(xml).map_err(|e| e.to_string())?;
    let Some(versioning) = metadata.versioning else {
        return Ok(None);
    };

    let all: Vec<String> = versioning
        .versions
        .version
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    let non_blank = |v: Option<String>| v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let latest = non_blank(versioning.release)
        .or_else(|| non_blank(versioning.latest))
        .or_else(|| all.last().cloned());

    Ok(latest.map(|latest| Versions::new(latest, all)))
}
