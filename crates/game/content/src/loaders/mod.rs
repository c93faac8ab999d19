//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format into `tactics-core` types. `parse` works
//! on in-memory text, `load` reads a file first.

pub mod config;
pub mod factory;
pub mod map;
pub mod scenario;
pub mod units;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, MatchContent};
pub use map::MapLoader;
pub use scenario::{PlayerSetup, Scenario, ScenarioLoader, UnitPlacement};
pub use units::UnitCatalogLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
