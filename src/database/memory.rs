use super::SeenStore;
use crate::error::Result;
use crate::model::Coordinate;
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

/// Process-lifetime store backed by a map of sets.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    seen: RwLock<HashMap<Coordinate, HashSet<String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenStore for InMemoryStore {
    fn coordinate_seen(&self, coordinate: &Coordinate) -> bool {
        let seen = self.seen.read().unwrap_or_else(PoisonError::into_inner);
        seen.contains_key(coordinate)
    }

    fn version_seen(&self, coordinate: &Coordinate, version: &str) -> bool {
        let seen = self.seen.read().unwrap_or_else(PoisonError::into_inner);
        seen.get(coordinate)
            .is_some_and(|versions| versions.contains(version))
    }

    fn mark_seen(&self, coordinate: &Coordinate, version: &str) -> Result<()> {
        let mut seen = self.seen.write().unwrap_or_else(PoisonError::into_inner);
        seen.entry(coordinate.clone())
            .or_default()
            .insert(version.to_string());
        Ok(())
    }
}
