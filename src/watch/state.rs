//! Sweep results.
//!
//! A sweep never fails as a whole: every per-coordinate problem is recorded in
//! the [`SweepReport`] and the remaining coordinates are still checked.

use crate::model::Coordinate;

/// A coordinate whose check did not complete cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub coordinate: Coordinate,
    pub message: String,
}

/// A version handed to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVersion {
    pub coordinate: Coordinate,
    pub version: String,
}

/// Outcome of one sweep over one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Repository display name
    pub repository: String,
    /// Coordinates whose query succeeded and returned versions
    pub checked: usize,
    /// Coordinates the repository does not have
    pub not_found: usize,
    /// Notified versions, in notification order per coordinate
    pub notified: Vec<NewVersion>,
    /// Query, store, notifier and task failures
    pub failures: Vec<CheckFailure>,
}

impl SweepReport {
    #[must_use]
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn fail(&mut self, coordinate: Coordinate, message: impl Into<String>) {
        self.failures.push(CheckFailure {
            coordinate,
            message: message.into(),
        });
    }
}

/// Outcome of one monitor tick.
#[derive(Debug, Clone, Default)]
pub struct TickSummary {
    /// The config file was (re)parsed during this tick
    pub reloaded: bool,
    /// One report per repository, in config file order
    pub reports: Vec<SweepReport>,
}

impl TickSummary {
    /// Total number of notified versions across all repositories.
    #[must_use]
    pub fn notified(&self) -> usize {
        self.reports.iter().map(|r| r.notified.len()).sum()
    }

    /// Total number of failures across all repositories.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.reports.iter().map(|r| r.failures.len()).sum()
    }
}
