//! Traits and data describing read-only match content.
//!
//! The unit catalog and the static map layout never change during a match.
//! [`Env`] bundles the catalog and tunables so the engine can read them
//! without owning them.
mod catalog;
mod map;

pub use catalog::{
    CatalogOracle, SpriteRefs, TemplateId, UnitCapabilities, UnitCatalog, UnitTemplate,
    UnitTemplateBuilder,
};
pub use map::{MapDimensions, MapLayout, Obstacle, TileFlags};

use crate::config::GameConfig;

/// Read-only inputs the engine consults on every command.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    catalog: &'a dyn CatalogOracle,
    config: &'a GameConfig,
}

impl<'a> Env<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, config: &'a GameConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a dyn CatalogOracle {
        self.catalog
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Looks up a template, logging when the reference dangles.
    pub fn template(&self, id: TemplateId) -> Option<&'a UnitTemplate> {
        let template = self.catalog.template(id);
        if template.is_none() {
            tracing::warn!("template {} is not in the catalog", id);
        }
        template
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
