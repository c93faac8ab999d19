//! Content factory for building matches from data files.

use std::path::{Path, PathBuf};

use tactics_core::{
    CatalogOracle, Env, GameConfig, GameEngine, GameError, GameState, MapLayout, PlayerState,
    UnitCatalog,
};

use crate::loaders::{
    ConfigLoader, LoadResult, MapLoader, Scenario, ScenarioLoader, UnitCatalogLoader,
};

/// Everything a host needs to run one match.
#[derive(Debug, Clone)]
pub struct MatchContent {
    pub state: GameState,
    pub catalog: UnitCatalog,
    pub config: GameConfig,
}

impl MatchContent {
    /// Borrows the content as an engine ready to take commands.
    pub fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.state, Env::new(&self.catalog, &self.config))
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── units.ron
/// ├── maps/
/// │   └── crossroads.ron
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the unit catalog from `units.ron`.
    pub fn load_catalog(&self) -> LoadResult<UnitCatalog> {
        UnitCatalogLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapLayout> {
        let path = self.data_dir.join("maps").join(format!("{map_name}.ron"));
        MapLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{scenario_name}.ron`.
    pub fn load_scenario(&self, scenario_name: &str) -> LoadResult<Scenario> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{scenario_name}.ron"));
        ScenarioLoader::load(&path)
    }

    /// Builds a match from a scenario and the map it names.
    ///
    /// File and parse failures abort with an error. Individual players or
    /// units that cannot be set up are logged and skipped, so a scenario with
    /// one bad placement still yields a playable board.
    pub fn build_match(&self, scenario_name: &str) -> LoadResult<MatchContent> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;
        let scenario = self.load_scenario(scenario_name)?;
        let layout = self.load_map(&scenario.map)?;

        let state = assemble(&layout, &catalog, &config, &scenario);
        tracing::info!(
            scenario = scenario_name,
            map = %scenario.map,
            units = state.units().count(),
            "match built"
        );

        Ok(MatchContent {
            state,
            catalog,
            config,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn assemble(
    layout: &MapLayout,
    catalog: &UnitCatalog,
    config: &GameConfig,
    scenario: &Scenario,
) -> GameState {
    let mut state = GameState::new(layout, config.starting_player);

    for setup in &scenario.players {
        if let Err(error) = state.register_player(PlayerState::new(setup.id, setup.currency, 0)) {
            tracing::error!(code = error.error_code(), %error, "skipping player");
        }
    }

    for placement in &scenario.units {
        let position = placement.position();
        let Some(template) = catalog.find_by_name(&placement.template) else {
            tracing::error!(
                template = %placement.template,
                %position,
                "skipping unit with unknown template"
            );
            continue;
        };
        if let Err(error) = state.spawn_unit(catalog, placement.owner, template, position) {
            tracing::error!(
                code = error.error_code(),
                %error,
                template = %placement.template,
                "skipping unit"
            );
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
