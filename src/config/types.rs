//! Repository config types and TOML parsing.

use super::defaults::WellKnownRepository;
use super::validation::ConfigError;
use crate::error::{Result, WatchError};
use crate::model::Coordinate;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Wire protocol spoken by a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RepositoryType {
    /// Maven 2 layout with `maven-metadata.xml` per artifact
    #[default]
    Maven2,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Maven2" => Ok(Self::Maven2),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maven2 => write!(f, "Maven2"),
        }
    }
}

/// One repository block from the config file.
///
/// An empty `coordinates` list is legal and simply checks nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Display name used in notifications
    pub name: String,
    /// Base URL, always ending in `/`
    pub host: Url,
    pub kind: RepositoryType,
    pub coordinates: Vec<Coordinate>,
}

impl RepositoryConfig {
    /// Config for a well-known repository, whose name and host are fixed.
    pub fn well_known(
        repo: &WellKnownRepository,
        coordinates: Vec<Coordinate>,
    ) -> ConfigResult<Self> {
        Ok(Self {
            name: repo.name.to_string(),
            host: normalize_host(repo.id, repo.host)?,
            kind: RepositoryType::Maven2,
            coordinates,
        })
    }

    /// Build a config from one top-level `[table]` of the config file.
    fn from_table(table_name: &str, value: &toml::Value) -> ConfigResult<Self> {
        let toml::Value::Table(table) = value else {
            return Err(ConfigError::NotATable {
                table: table_name.to_string(),
            });
        };
        let well_known = WellKnownRepository::from_id(table_name);

        let mut name = None;
        let mut host = None;
        let mut kind = None;
        let mut coordinates = None;

        for (key, value) in table {
            match key.as_str() {
                "coordinates" => coordinates = Some(parse_coordinates(table_name, value)?),
                "name" | "host" | "type" if well_known.is_some() => {
                    return Err(ConfigError::ForbiddenKey {
                        table: table_name.to_string(),
                        key: key.clone(),
                    });
                }
                "name" => name = Some(expect_str(table_name, "name", value)?.to_string()),
                "host" => {
                    let raw = expect_str(table_name, "host", value)?;
                    host = Some(normalize_host(table_name, raw)?);
                }
                "type" => {
                    let raw = expect_str(table_name, "type", value)?;
                    kind = Some(parse_type(table_name, raw)?);
                }
                _ => {
                    return Err(ConfigError::UnknownKey {
                        table: table_name.to_string(),
                        key: key.clone(),
                    });
                }
            }
        }

        let coordinates = coordinates.ok_or_else(|| ConfigError::MissingKey {
            table: table_name.to_string(),
            key: "coordinates",
        })?;

        if let Some(repo) = well_known {
            return Self::well_known(repo, coordinates);
        }

        let host = host.ok_or_else(|| ConfigError::MissingKey {
            table: table_name.to_string(),
            key: "host",
        })?;

        Ok(Self {
            name: name.unwrap_or_else(|| table_name.to_string()),
            host,
            kind: kind.unwrap_or_default(),
            coordinates,
        })
    }
}

/// Parse the full config file contents, keeping repositories in file order.
pub fn parse_repositories(contents: &str) -> ConfigResult<Vec<RepositoryConfig>> {
    let document: toml::Table = toml::from_str(contents)?;
    document
        .iter()
        .map(|(table_name, value)| RepositoryConfig::from_table(table_name, value))
        .collect()
}

/// Resolve a `--repo` argument: a well-known id or an http(s) URL.
///
/// Returns the display name and the normalized host. URLs are their own name.
pub fn resolve_repository(value: &str) -> Result<(String, Url)> {
    if let Some(repo) = WellKnownRepository::from_id(value) {
        return Ok((repo.name.to_string(), normalize_host(repo.id, repo.host)?));
    }
    match normalize_host(value, value) {
        Ok(host) => Ok((value.to_string(), host)),
        Err(_) => Err(WatchError::UnknownRepository(value.to_string())),
    }
}

fn expect_str<'a>(table: &str, key: &'static str, v: &'a toml::Value) -> ConfigResult<&'a str> {
    v.as_str()
        .ok_or_else(|| ConfigError::invalid_type(table, key, "a string"))
}

fn parse_type(table: &str, raw: &str) -> ConfigResult<RepositoryType> {
    RepositoryType::from_str(raw).map_err(|value| ConfigError::UnknownType {
        table: table.to_string(),
        value,
    })
}

fn parse_coordinates(table: &str, value: &toml::Value) -> ConfigResult<Vec<Coordinate>> {
    let not_strings = || ConfigError::invalid_type(table, "coordinates", "an array of strings");
    let items = value.as_array().ok_or_else(not_strings)?;
    items
        .iter()
        .map(|item| {
            let raw = item.as_str().ok_or_else(not_strings)?;
            Coordinate::from_str(raw).map_err(|source| ConfigError::InvalidCoordinate {
                table: table.to_string(),
                source,
            })
        })
        .collect()
}

/// Parse an http(s) base URL and make sure its path ends in `/` so relative
/// artifact paths join underneath it instead of replacing the last segment.
fn normalize_host(table: &str, raw: &str) -> ConfigResult<Url> {
    let invalid = |reason: String| ConfigError::InvalidHost {
        table: table.to_string(),
        value: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GOOGLE_MAVEN_NAME, MAVEN_CENTRAL_HOST, MAVEN_CENTRAL_NAME};

    fn coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new("com.example", "example-a"),
            Coordinate::new("com.example", "example-b"),
        ]
    }

    fn parse_err(contents: &str) -> String {
        parse_repositories(contents).unwrap_err().to_string()
    }

    #[test]
    fn test_empty() {
        assert!(parse_repositories("").unwrap().is_empty());
    }

    #[test]
    fn test_maven_central() {
        let repos = parse_repositories(
            r#"
[MavenCentral]
coordinates = [
  "com.example:example-a",
  "com.example:example-b",
]
"#,
        )
        .unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, MAVEN_CENTRAL_NAME);
        assert_eq!(repos[0].host.as_str(), MAVEN_CENTRAL_HOST);
        assert_eq!(repos[0].kind, RepositoryType::Maven2);
        assert_eq!(repos[0].coordinates, coords());
    }

    #[test]
    fn test_google_maven_empty_coordinates() {
        let repos = parse_repositories("[GoogleMaven]\ncoordinates = []\n").unwrap();
        assert_eq!(repos[0].name, GOOGLE_MAVEN_NAME);
        assert!(repos[0].coordinates.is_empty());
    }

    #[test]
    fn test_well_known_non_table() {
        assert_eq!(
            parse_err("MavenCentral = \"foo\"\n"),
            "'MavenCentral' must be a table"
        );
    }

    #[test]
    fn test_well_known_missing_coordinates() {
        assert_eq!(
            parse_err("[MavenCentral]\n"),
            "'MavenCentral' table missing required 'coordinates' key"
        );
    }

    #[test]
    fn test_well_known_forbids_overrides() {
        for key in ["name", "host", "type"] {
            let contents = format!("[GoogleMaven]\n{key} = \"x\"\ncoordinates = []\n");
            assert_eq!(
                parse_err(&contents),
                format!("'GoogleMaven' table must not define a '{key}' key")
            );
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_err("[MavenCentral]\nfoo = \"bar\"\ncoordinates = []\n"),
            "'MavenCentral' table contains unknown 'foo' key"
        );
    }

    #[test]
    fn test_child_table_is_unknown_key() {
        assert_eq!(
            parse_err("[MavenCentral]\ncoordinates = []\n[MavenCentral.Foo]\n"),
            "'MavenCentral' table contains unknown 'Foo' key"
        );
    }

    #[test]
    fn test_non_array_coordinates() {
        assert_eq!(
            parse_err("[MavenCentral]\ncoordinates = \"foo\"\n"),
            "'MavenCentral' table 'coordinates' key must be an array of strings"
        );
    }

    #[test]
    fn test_non_string_coordinates() {
        assert_eq!(
            parse_err("[MavenCentral]\ncoordinates = [1, 2, 3]\n"),
            "'MavenCentral' table 'coordinates' key must be an array of strings"
        );
    }

    #[test]
    fn test_versioned_coordinate_rejected() {
        let err = parse_err("[MavenCentral]\ncoordinates = [\"com.example:a:1.0\"]\n");
        assert!(
            err.starts_with("'MavenCentral' table has invalid coordinate"),
            "{err}"
        );
    }

    #[test]
    fn test_custom_repo_defaults_name_to_table() {
        let repos = parse_repositories(
            r#"
[CustomRepo]
host = "https://example.com/"
coordinates = ["com.example:example-a", "com.example:example-b"]
"#,
        )
        .unwrap();
        assert_eq!(repos[0].name, "CustomRepo");
        assert_eq!(repos[0].host.as_str(), "https://example.com/");
        assert_eq!(repos[0].coordinates, coords());
    }

    #[test]
    fn test_custom_repo_with_name_and_type() {
        let repos = parse_repositories(
            r#"
[CustomRepo]
name = "Custom Repo"
host = "https://example.com/repo"
type = "Maven2"
coordinates = []
"#,
        )
        .unwrap();
        assert_eq!(repos[0].name, "Custom Repo");
        assert_eq!(repos[0].host.as_str(), "https://example.com/repo/");
    }

    #[test]
    fn test_custom_repo_missing_host() {
        assert_eq!(
            parse_err("[CustomRepo]\ncoordinates = []\n"),
            "'CustomRepo' table missing required 'host' key"
        );
    }

    #[test]
    fn test_custom_repo_non_string_fields() {
        let contents = "[CustomRepo]\nname = 1\nhost = \"https://x.example/\"\ncoordinates = []\n";
        assert_eq!(
            parse_err(contents),
            "'CustomRepo' table 'name' key must be a string"
        );
        assert_eq!(
            parse_err("[CustomRepo]\nhost = 1\ncoordinates = []\n"),
            "'CustomRepo' table 'host' key must be a string"
        );
    }

    #[test]
    fn test_custom_repo_unknown_type() {
        let contents = r#"
[CustomRepo]
host = "https://example.com/"
type = "MavenTwo"
coordinates = []
"#;
        assert_eq!(
            parse_err(contents),
            "'CustomRepo' table has unknown repository type 'MavenTwo'"
        );
    }

    #[test]
    fn test_custom_repo_invalid_host() {
        let err = parse_err("[CustomRepo]\nhost = \"ftp://example.com/\"\ncoordinates = []\n");
        assert!(err.contains("unsupported scheme 'ftp'"), "{err}");
    }

    #[test]
    fn test_repositories_keep_file_order() {
        let repos = parse_repositories(
            r#"
[Zed]
host = "https://z.example/"
coordinates = []

[MavenCentral]
coordinates = []

[Alpha]
host = "https://a.example/"
coordinates = []
"#,
        )
        .unwrap();
        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Zed", MAVEN_CENTRAL_NAME, "Alpha"]);
    }

    #[test]
    fn test_resolve_repository() {
        let (name, host) = resolve_repository("MavenCentral").unwrap();
        assert_eq!(name, MAVEN_CENTRAL_NAME);
        assert_eq!(host.as_str(), MAVEN_CENTRAL_HOST);

        let (name, host) = resolve_repository("https://example.com/maven").unwrap();
        assert_eq!(name, "https://example.com/maven");
        assert_eq!(host.as_str(), "https://example.com/maven/");

        assert!(matches!(
            resolve_repository("NotARepo"),
            Err(WatchError::UnknownRepository(_))
        ));
    }
}
