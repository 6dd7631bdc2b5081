//! Command configuration and duration parsing.

use crate::error::WatchError;
use crate::notify::NotifierConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the `await` command.
#[derive(Debug, Clone)]
pub struct AwaitConfig {
    /// `groupId:artifactId:version` to wait for
    pub coordinates: String,
    /// `MavenCentral`, `GoogleMaven` or a repository URL
    pub repository: String,
    /// Delay between repository queries
    pub interval: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Hide the "Last checked" progress line
    pub quiet: bool,
    /// Enabled notification sinks
    pub notifiers: NotifierConfig,
}

/// Configuration for the `notify` command.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// TOML file listing repositories and their coordinates
    pub config_path: PathBuf,
    /// Directory of the persistent seen store; in-memory when unset
    pub data_dir: Option<PathBuf>,
    /// Keep running and re-check every `interval`
    pub watch: bool,
    /// Delay between checks in watch mode
    pub interval: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Hide the "Last checked" progress line in watch mode
    pub quiet: bool,
    /// Enabled notification sinks
    pub notifiers: NotifierConfig,
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours), `d` (days). Zero is rejected, a poll loop needs a real delay.
///
/// # Examples
///
/// ```
/// use dependency_watch::watch::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, WatchError> {
    let s = s.trim();
    let invalid = || WatchError::InvalidInterval(s.to_string());

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with(['s', 'm', 'h', 'd']) {
        s.split_at(s.len() - 1)
    } else {
        return Err(invalid());
    };

    let value: u64 = num_str.parse().map_err(|_| invalid())?;
    if value == 0 {
        return Err(invalid());
    }

    let secs = |factor: u64| value.checked_mul(factor).map(Duration::from_secs);
    match unit {
        "ms" => Some(Duration::from_millis(value)),
        "s" => secs(1),
        "m" => secs(60),
        "h" => secs(3600),
        "d" => secs(86_400),
        _ => None,
    }
    .ok_or_else(invalid)
}
