//! Dedup ledger of `(coordinate, version)` pairs that were already notified.
//!
//! Two interchangeable backends:
//! - [`InMemoryStore`]: lives as long as the process.
//! - [`FileSystemStore`]: one marker file per version, survives restarts.
//!
//! Entries are never removed. Marking the same pair twice is a no-op.

mod filesystem;
mod memory;

pub use filesystem::FileSystemStore;
pub use memory::InMemoryStore;

use crate::error::Result;
use crate::model::Coordinate;

/// Trait for seen-version stores.
///
/// Shared by every concurrently running coordinate check, so implementations
/// must be safe to call from many tasks at once. Lookups are expected to cost
/// at most one stat, and marking a known version no more.
pub trait SeenStore: Send + Sync {
    /// True iff at least one version of `coordinate` was ever marked.
    fn coordinate_seen(&self, coordinate: &Coordinate) -> bool;

    fn version_seen(&self, coordinate: &Coordinate, version: &str) -> bool;

    /// Idempotently record `version` of `coordinate` as seen.
    fn mark_seen(&self, coordinate: &Coordinate, version: &str) -> Result<()>;
}
