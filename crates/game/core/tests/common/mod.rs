//! Shared fixtures for the engine integration tests.
#![allow(dead_code)]

use tactics_core::{
    Env, GameConfig, GameEngine, GameState, MapLayout, PlayerId, PlayerState, Position,
    TemplateId, UnitCapabilities, UnitCatalog, UnitId, UnitTemplate,
};

pub const SOLDIER: TemplateId = TemplateId(0);
pub const ARCHER: TemplateId = TemplateId(1);
pub const KING: TemplateId = TemplateId(2);
pub const SAPPER: TemplateId = TemplateId(3);

/// Installs a test-writer subscriber once; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn catalog() -> UnitCatalog {
    let mut catalog = UnitCatalog::default();
    catalog.push(
        UnitTemplate::builder("Soldier")
            .price(10)
            .max_health(5)
            .travel(2, 0)
            .attack_range(1)
            .damage(3, 0, 1)
            .armor(1)
            .build(),
    ).unwrap();
    catalog.push(
        UnitTemplate::builder("Archer")
            .price(20)
            .max_health(4)
            .travel(1, 0)
            .attack_range(3)
            .damage(1, 4, 1)
            .build(),
    ).unwrap();
    catalog.push(
        UnitTemplate::builder("King")
            .boss()
            .max_health(3)
            .travel(1, 0)
            .damage(1, 0, 1)
            .capabilities(UnitCapabilities {
                income_per_turn: 5,
                spawn_radius: 2,
                ..UnitCapabilities::default()
            })
            .build(),
    ).unwrap();
    catalog.push(
        UnitTemplate::builder("Sapper")
            .price(15)
            .max_health(3)
            .travel(2, 0)
            .damage(1, 0, 1)
            .capabilities(UnitCapabilities {
                breaks_obstacles: true,
                collects_resources: true,
                ..UnitCapabilities::default()
            })
            .build(),
    ).unwrap();
    catalog
}

/// A match under construction plus the content it is played with.
pub struct Match {
    pub state: GameState,
    pub catalog: UnitCatalog,
    pub config: GameConfig,
}

impl Match {
    pub fn new(layout: MapLayout) -> Self {
        Self::with_catalog(layout, catalog())
    }

    pub fn with_catalog(layout: MapLayout, catalog: UnitCatalog) -> Self {
        init_tracing();
        let config = GameConfig::default();
        let mut state = GameState::new(&layout, config.starting_player);
        for player in [PlayerId::Player1, PlayerId::Player2] {
            state
                .register_player(PlayerState::new(player, 0, 0))
                .expect("fresh player");
        }
        Self {
            state,
            catalog,
            config,
        }
    }

    pub fn spawn(&mut self, owner: PlayerId, template: TemplateId, position: Position) -> UnitId {
        self.state
            .spawn_unit(&self.catalog, owner, template, position)
            .expect("spawn fixture unit")
    }

    pub fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.state, Env::new(&self.catalog, &self.config))
    }

    pub fn currency(&self, player: PlayerId) -> u32 {
        self.state.player(player).expect("registered").currency()
    }

    pub fn highlighted(&self) -> Vec<(Position, Option<u32>)> {
        self.state
            .grid
            .tiles()
            .filter(|tile| tile.is_highlighted())
            .map(|tile| (tile.position(), tile.travel_distance()))
            .collect()
    }
}
