//! dependency-watch: get notified when new artifact versions appear
//!
//! Polls Maven repositories for the coordinates you care about and reports
//! every newly published version to the console, a file, or a webhook.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use dependency_watch::{
    cli,
    config::{DEFAULT_CHECK_INTERVAL, DEFAULT_HTTP_TIMEOUT, MAVEN_CENTRAL_ID},
    notify::NotifierConfig,
    watch::{AwaitConfig, NotifyConfig, parse_duration},
};
use reqwest::Url;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dependency-watch")]
#[command(version)]
#[command(about = "Get notified when new versions of your dependencies are published")]
#[command(long_about = None)]
#[command(after_help = "EXIT CODES:
    0    Success
    1    A coordinate could not be checked (single notify run)
    130  Interrupted

EXAMPLES:
    # Block until a release is published
    dependency-watch await com.example:library:1.2.0

    # Check the repositories in a config file every 5 minutes
    dependency-watch notify --watch --interval 5m --data ~/.dependency-watch watch.toml")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Options shared by `await` and `notify`
#[derive(Args)]
struct CommonArgs {
    /// Amount of time between checks, e.g. 30s, 5m, 1h [default: 1m]
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    interval: Option<Duration>,

    /// HTTP request timeout, e.g. 10s, 1m [default: 30s]
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Hide the 'Last checked' progress line
    #[arg(short, long)]
    quiet: bool,

    /// IFTTT webhook URL to trigger
    #[arg(long, value_name = "URL", env = "DEPENDENCY_WATCH_IFTTT")]
    ifttt: Option<Url>,

    /// Slack incoming webhook URL to post to
    #[arg(long, value_name = "URL", env = "DEPENDENCY_WATCH_SLACK")]
    slack: Option<Url>,

    /// Microsoft Teams incoming webhook URL to post to
    #[arg(long, value_name = "URL", env = "DEPENDENCY_WATCH_TEAMS")]
    teams: Option<Url>,

    /// Append one JSON object per new version to this file
    #[arg(long, value_name = "PATH")]
    ndjson: Option<PathBuf>,
}

impl CommonArgs {
    fn interval(&self) -> Duration {
        self.interval.unwrap_or(DEFAULT_CHECK_INTERVAL)
    }

    fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT)
    }

    fn notifiers(&self) -> NotifierConfig {
        NotifierConfig {
            console: true,
            ndjson: self.ndjson.clone(),
            ifttt: self.ifttt.clone(),
            slack: self.slack.clone(),
            teams: self.teams.clone(),
        }
    }
}

/// Arguments for the `await` subcommand
#[derive(Args)]
struct AwaitArgs {
    /// Coordinates in the form 'groupId:artifactId:version'
    #[arg(value_name = "COORDINATES")]
    coordinates: String,

    /// Repository to check: 'MavenCentral', 'GoogleMaven' or a URL
    #[arg(long, value_name = "REPO", default_value = MAVEN_CENTRAL_ID)]
    repo: String,

    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the `notify` subcommand
#[derive(Args)]
#[command(after_help = dependency_watch::config::EXAMPLE_CONFIG)]
struct NotifyArgs {
    /// TOML config file listing repositories and coordinates (see below)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Directory for storing already-seen versions (in-memory if omitted)
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Continually monitor for new versions every '--interval'
    #[arg(long)]
    watch: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait for an artifact version to be published to a repository
    Await(AwaitArgs),

    /// Notify about new versions of the coordinates listed in a config file
    Notify(NotifyArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for notifications and progress
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("Interrupted, shutting down");
                cancel.cancel();
            }
        });
    }

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::Await(args) => {
            let config = AwaitConfig {
                notifiers: args.common.notifiers(),
                coordinates: args.coordinates,
                repository: args.repo,
                interval: args.common.interval(),
                timeout: args.common.timeout(),
                quiet: args.common.quiet,
            };
            cli::run_await(config, cancel)
                .await
                .context("await failed")?
        }

        Commands::Notify(args) => {
            let config = NotifyConfig {
                notifiers: args.common.notifiers(),
                config_path: args.config,
                data_dir: args.data,
                watch: args.watch,
                interval: args.common.interval(),
                timeout: args.common.timeout(),
                quiet: args.common.quiet,
            };
            cli::run_notify(config, cancel)
                .await
                .context("notify failed")?
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "dependency-watch",
                &mut io::stdout(),
            );
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
