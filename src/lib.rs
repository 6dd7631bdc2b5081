//! **Get notified when new artifact versions land in Maven repositories.**
//!
//! `dependency-watch` polls one or more Maven repositories for the coordinates you
//! care about and emits a notification exactly once for every newly observed version.
//! It powers both a command-line tool and a small library for embedding the same
//! detection engine elsewhere.
//!
//! ## Usage modes
//!
//! - **await**: block until one specific version of one coordinate appears, notify
//!   once, then exit. See [`watch::Awaiter`].
//! - **notify**: check every coordinate listed in a TOML config file, either once or
//!   forever on an interval. The config file is hot-reloaded between ticks. See
//!   [`watch::Monitor`].
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Coordinate`] (`groupId:artifactId`) and [`Versions`] (the
//!   repository's latest version plus every known version).
//! - **[`repository`]**: the [`VersionSource`] capability and its Maven2 HTTP
//!   implementation. A missing artifact is `Ok(None)`, never an error.
//! - **[`database`]**: the [`SeenStore`] dedup ledger, in memory or as marker files
//!   on disk so that state survives restarts.
//! - **[`notify`]**: the [`VersionNotifier`] sink contract, a failure-isolating
//!   composite, and console/NDJSON/webhook sinks.
//! - **[`watch`]**: the checker, the hot-reloading monitor loop and the awaiter.
//! - **[`config`]**: parsing of the repository config file.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dependency_watch::database::InMemoryStore;
//! use dependency_watch::notify::ConsoleNotifier;
//! use dependency_watch::repository::HttpRepositoryFactory;
//! use dependency_watch::watch::Monitor;
//!
//! # async fn run() -> dependency_watch::Result<()> {
//! let monitor = Monitor::new(
//!     "watch.toml",
//!     Arc::new(HttpRepositoryFactory::new(reqwest::Client::new())),
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(ConsoleNotifier::new()),
//! );
//! let summary = monitor.run_once().await?;
//! println!("{} new version(s)", summary.notified());
//! # Ok(())
//! # }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod model;
pub mod notify;
pub mod repository;
pub mod watch;

// Re-export main types for convenience
pub use config::{ConfigError, RepositoryConfig, RepositoryType};
pub use database::{FileSystemStore, InMemoryStore, SeenStore};
pub use error::{RepositoryErrorKind, Result, WatchError};
pub use model::{Coordinate, CoordinateError, Versions};
pub use notify::{CompositeNotifier, VersionNotifier};
pub use repository::{Maven2Repository, RepositoryFactory, VersionSource};
pub use watch::{Awaiter, Checker, Monitor, SweepReport};
