//! Well-known repositories and default values.

use std::time::Duration;

// ============================================================================
// Well-known repositories
// ============================================================================

pub const MAVEN_CENTRAL_ID: &str = "MavenCentral";
pub const MAVEN_CENTRAL_NAME: &str = "Maven Central";
pub const MAVEN_CENTRAL_HOST: &str = "https://repo1.maven.org/maven2/";

pub const GOOGLE_MAVEN_ID: &str = "GoogleMaven";
pub const GOOGLE_MAVEN_NAME: &str = "Google Maven";
pub const GOOGLE_MAVEN_HOST: &str = "https://maven.google.com/";

/// A repository whose name and host are fixed and cannot be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownRepository {
    /// Identifier used as the config table key and on the command line
    pub id: &'static str,
    /// Display name used in notifications
    pub name: &'static str,
    /// Base URL, always ending in `/`
    pub host: &'static str,
}

const WELL_KNOWN: &[WellKnownRepository] = &[
    WellKnownRepository {
        id: MAVEN_CENTRAL_ID,
        name: MAVEN_CENTRAL_NAME,
        host: MAVEN_CENTRAL_HOST,
    },
    WellKnownRepository {
        id: GOOGLE_MAVEN_ID,
        name: GOOGLE_MAVEN_NAME,
        host: GOOGLE_MAVEN_HOST,
    },
];

impl WellKnownRepository {
    /// Look up a well-known repository by its identifier (case-sensitive).
    #[must_use]
    pub fn from_id(id: &str) -> Option<&'static Self> {
        WELL_KNOWN.iter().find(|repo| repo.id == id)
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Time between checks when `--interval` is not given.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Per-request HTTP timeout when `--timeout` is not given.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Example config file shown in `notify --help`.
pub const EXAMPLE_CONFIG: &str = r#"[MavenCentral]
coordinates = [
  "com.example.ping:pong",
  "com.example.fizz:buzz",
]

[GoogleMaven]
coordinates = [
  "com.google:example",
]

[CustomRepo]
name = "Custom Repo"  # Optional
host = "https://example.com/repo/"
coordinates = [
  "com.example:thing",
]
"#;
