//! Deterministic rules for a two-player, turn-based grid tactics game.
//!
//! `tactics-core` owns the canonical match state and every rule that changes
//! it: reachability, melee/ranged combat with counter-attacks and armor wear,
//! income and the unit store, and the turn/input state machine. It renders
//! nothing. All state mutation flows through [`engine::GameEngine`], which
//! reports what happened as [`GameEvent`]s for the host to present.
pub mod combat;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod movement;
pub mod state;

pub use combat::{AttackRole, ExchangeResult, absorbed_damage, damage_by_distance};
pub use config::GameConfig;
pub use economy::{StoreOffer, has_spawn_tile, income_for, is_spawn_eligible, store_offers};
pub use engine::{CommandError, GameEngine};
pub use env::{
    CatalogOracle, Env, MapDimensions, MapLayout, Obstacle, SpriteRefs, TemplateId, TileFlags,
    UnitCapabilities, UnitCatalog, UnitTemplate,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{GameEvent, Outcome, Presenter};
pub use movement::{GameOverSequence, MoveSequence, ReachableTile, reachable_tiles};
pub use state::{
    CardinalDirection, Focus, GameState, InputMode, InputSource, LayerFilter, Occupant,
    PlayerId, PlayerState, Position, SetupError, SpatialQuery, Tile, TurnState, Unit, UnitId,
};
