//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler takes a plain config struct plus a cancellation token and
//! returns the process exit code.

mod await_version;
mod notify;

pub use await_version::run_await;
pub use notify::run_notify;

// Re-export config types used by handlers
pub use crate::watch::{AwaitConfig, NotifyConfig};

use std::io::IsTerminal;
use std::time::Duration;

/// Exit code used when the user interrupts a running command.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Build the HTTP client shared by repositories and webhooks.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

/// The progress line is only useful when a person is watching stdout.
fn show_progress(quiet: bool) -> bool {
    !quiet && std::io::stdout().is_terminal()
}
