//! Terminal "Last checked" progress line.

use chrono::{DateTime, TimeDelta, Utc};
use std::io::{self, Write};
use tokio::time::Instant;

/// Moves the cursor to the start of the previous line and erases it.
pub const CURSOR_UP_AND_CLEAR_LINE: &str = "\u{1b}[F\u{1b}[K";

const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// Produces the human-readable timestamp shown in the progress line.
#[derive(Debug, Clone)]
pub enum TimestampSource {
    /// Wall clock in the local time zone
    System,
    /// UTC clock that starts at `start` and advances with the tokio clock,
    /// so paused-time tests see deterministic timestamps
    Fixed {
        start: DateTime<Utc>,
        origin: Instant,
    },
}

impl TimestampSource {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self::Fixed {
            start,
            origin: Instant::now(),
        }
    }

    #[must_use]
    pub fn now(&self) -> String {
        match self {
            Self::System => chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            Self::Fixed { start, origin } => {
                let elapsed = origin.elapsed();
                let elapsed = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::zero());
                (*start + elapsed).format(TIMESTAMP_FORMAT).to_string()
            }
        }
    }
}

/// Rewrites a single status line in place.
pub struct Progress {
    writer: Box<dyn Write + Send>,
    timestamps: TimestampSource,
    needs_clear: bool,
}

impl Progress {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, timestamps: TimestampSource) -> Self {
        Self {
            writer,
            timestamps,
            needs_clear: false,
        }
    }

    /// Progress on stdout with wall-clock timestamps.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()), TimestampSource::system())
    }

    /// Replace the previous line (if any) with `Last checked: <now>`.
    pub fn checked(&mut self) -> io::Result<()> {
        let mut line = String::new();
        if self.needs_clear {
            line.push_str(CURSOR_UP_AND_CLEAR_LINE);
        }
        line.push_str("Last checked: ");
        line.push_str(&self.timestamps.now());
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        self.needs_clear = true;
        Ok(())
    }

    /// Erase the last written line. Does nothing if no line is shown.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.needs_clear {
            self.writer.write_all(CURSOR_UP_AND_CLEAR_LINE.as_bytes())?;
            self.writer.flush()?;
            self.needs_clear = false;
        }
        Ok(())
    }
}
