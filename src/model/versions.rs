//! Version listings reported by a repository.

use indexmap::IndexSet;

/// Result of a successful repository query for one coordinate.
///
/// `latest` is the repository's own idea of the newest release, which is not
/// necessarily the greatest version string. `all` keeps the repository's
/// listing order and always contains `latest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versions {
    latest: String,
    all: IndexSet<String>,
}

impl Versions {
    /// Build a listing. `latest` is appended to `all` if the repository omitted it.
    pub fn new<I, S>(latest: impl Into<String>, all: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let latest = latest.into();
        let mut all: IndexSet<String> = all.into_iter().map(Into::into).collect();
        if !all.contains(&latest) {
            all.insert(latest.clone());
        }
        Self { latest, all }
    }

    #[must_use]
    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// Every known version, in repository order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.all.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.all.contains(version)
    }
}
