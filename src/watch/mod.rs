//! Polling engine.
//!
//! - [`Checker`]: one concurrent sweep over the coordinates of one repository.
//! - [`Monitor`]: re-reads the config file when it changes and sweeps every
//!   repository, once or on an interval.
//! - [`Awaiter`]: polls a single coordinate until a given version appears.

mod awaiter;
mod checker;
pub mod config;
mod monitor;
mod progress;
mod state;

pub use awaiter::{AwaitOutcome, Awaiter};
pub use checker::Checker;
pub use config::{AwaitConfig, NotifyConfig, parse_duration};
pub use monitor::{LoadedConfig, Monitor};
pub use progress::{CURSOR_UP_AND_CLEAR_LINE, Progress, TimestampSource};
pub use state::{CheckFailure, NewVersion, SweepReport, TickSummary};
