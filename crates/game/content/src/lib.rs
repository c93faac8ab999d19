//! Data-driven content definitions and loaders.
//!
//! Loads static match content from RON/TOML data files:
//! - Unit catalog (RON)
//! - Map layouts (RON)
//! - Scenarios: starting currency and unit placements (RON)
//! - Game configuration (TOML)
//!
//! [`ContentFactory::build_match`] assembles all of it into a ready-to-play
//! [`MatchContent`]. Content is read once at startup and never mutated.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, MapLoader, MatchContent, PlayerSetup, Scenario,
    ScenarioLoader, UnitCatalogLoader, UnitPlacement,
};
