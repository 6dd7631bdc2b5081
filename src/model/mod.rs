//! Core domain types shared by every part of the engine.
//!
//! A [`Coordinate`] names a package independent of version; a [`Versions`]
//! listing is what a repository reports for one coordinate at a point in time.

mod coordinate;
mod versions;

pub use coordinate::{Coordinate, CoordinateError};
pub use versions::Versions;
