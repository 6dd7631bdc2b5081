//! Repository configuration for the `notify` command.
//!
//! The config file is TOML with one table per repository:
//!
//! ```toml
//! [MavenCentral]
//! coordinates = [
//!   "com.example.ping:pong",
//!   "com.example.fizz:buzz",
//! ]
//!
//! [GoogleMaven]
//! coordinates = [
//!   "com.google:example",
//! ]
//!
//! [CustomRepo]
//! name = "Custom Repo"  # Optional
//! host = "https://example.com/repo/"
//! coordinates = [
//!   "com.example:thing",
//! ]
//! ```
//!
//! `MavenCentral` and `GoogleMaven` are well-known repositories which only take
//! a list of coordinates. Other tables also require a `host` and may set a
//! display `name` and a repository `type` (only `"Maven2"` today).

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CHECK_INTERVAL, DEFAULT_HTTP_TIMEOUT, EXAMPLE_CONFIG, GOOGLE_MAVEN_HOST,
    GOOGLE_MAVEN_ID, GOOGLE_MAVEN_NAME, MAVEN_CENTRAL_HOST, MAVEN_CENTRAL_ID, MAVEN_CENTRAL_NAME,
    WellKnownRepository,
};
pub use file::{ConfigStamp, load_config_file};
pub use types::{RepositoryConfig, RepositoryType, parse_repositories, resolve_repository};
pub use validation::ConfigError;
