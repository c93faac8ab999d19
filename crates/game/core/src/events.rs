//! Presentation-facing notifications.
//!
//! Every engine command returns the events it produced, in order, inside an
//! [`Outcome`]. Hosts either inspect them directly or hand them to a
//! [`Presenter`], whose methods default to no-ops so an implementation only
//! overrides what it renders.

use crate::env::TemplateId;
use crate::state::{InputMode, PlayerId, Position, UnitId};

/// Something the presentation layer may want to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A unit died at `position` and has been removed from play.
    DeathEffect { unit: UnitId, position: Position },
    DamageNumber { amount: u32, position: Position },
    HealNumber { amount: u32, position: Position },
    HealthChanged { player: PlayerId, health: u32 },
    CurrencyChanged { player: PlayerId, currency: u32 },
    FocusChanged {
        tile: Option<Position>,
        unit: Option<UnitId>,
    },
    SelectionChanged {
        previous: Option<UnitId>,
        selected: Option<UnitId>,
    },
    /// A move was committed; the unit now occupies `to` in the grid while its
    /// display position slides there.
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    /// The slide finished.
    UnitArrived { unit: UnitId, position: Position },
    UnitSpawned {
        unit: UnitId,
        owner: PlayerId,
        template: TemplateId,
        position: Position,
    },
    ObstacleBroken { position: Position, rubble: u32 },
    ResourceCollected {
        unit: UnitId,
        position: Position,
        value: u32,
    },
    StoreCursorMoved { cursor: usize },
    TurnStarted { player: PlayerId, turn: u32 },
    ModeChanged { from: InputMode, to: InputMode },
    /// A boss fell. Input is frozen from here on.
    GameOver { winner: PlayerId },
    /// The delayed terminal presentation. Fires once per match.
    GameOverPresented { winner: PlayerId },
}

/// Sink for effect playback and UI value notifications.
#[allow(unused_variables)]
pub trait Presenter {
    fn play_death_effect(&mut self, position: Position) {}

    fn show_damage_number(&mut self, amount: u32, position: Position) {}

    fn show_heal_number(&mut self, amount: u32, position: Position) {}

    fn on_health_changed(&mut self, player: PlayerId, health: u32) {}

    fn on_currency_changed(&mut self, player: PlayerId, currency: u32) {}

    fn on_focus_changed(&mut self, tile: Option<Position>, unit: Option<UnitId>) {}

    fn on_selection_changed(&mut self, selected: Option<UnitId>) {}

    fn on_unit_moved(&mut self, unit: UnitId, from: Position, to: Position) {}

    fn on_unit_arrived(&mut self, unit: UnitId, position: Position) {}

    fn on_unit_spawned(&mut self, unit: UnitId, owner: PlayerId, position: Position) {}

    fn on_obstacle_broken(&mut self, position: Position) {}

    fn on_resource_collected(&mut self, position: Position, value: u32) {}

    fn on_store_cursor_moved(&mut self, cursor: usize) {}

    fn on_turn_started(&mut self, player: PlayerId, turn: u32) {}

    fn on_mode_changed(&mut self, mode: InputMode) {}

    fn on_game_over(&mut self, winner: PlayerId) {}

    fn present_game_over(&mut self, winner: PlayerId) {}
}

/// Events produced by one engine command, in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub events: Vec<GameEvent>,
}

impl Outcome {
    pub fn new(events: Vec<GameEvent>) -> Self {
        Self { events }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    /// Forwards every event to `presenter`, in order.
    pub fn dispatch(&self, presenter: &mut dyn Presenter) {
        for event in &self.events {
            match *event {
                GameEvent::DeathEffect { position, .. } => presenter.play_death_effect(position),
                GameEvent::DamageNumber { amount, position } => {
                    presenter.show_damage_number(amount, position)
                }
                GameEvent::HealNumber { amount, position } => {
                    presenter.show_heal_number(amount, position)
                }
                GameEvent::HealthChanged { player, health } => {
                    presenter.on_health_changed(player, health)
                }
                GameEvent::CurrencyChanged { player, currency } => {
                    presenter.on_currency_changed(player, currency)
                }
                GameEvent::FocusChanged { tile, unit } => presenter.on_focus_changed(tile, unit),
                GameEvent::SelectionChanged { selected, .. } => {
                    presenter.on_selection_changed(selected)
                }
                GameEvent::UnitMoved { unit, from, to } => presenter.on_unit_moved(unit, from, to),
                GameEvent::UnitArrived { unit, position } => {
                    presenter.on_unit_arrived(unit, position)
                }
                GameEvent::UnitSpawned {
                    unit,
                    owner,
                    position,
                    ..
                } => presenter.on_unit_spawned(unit, owner, position),
                GameEvent::ObstacleBroken { position, .. } => presenter.on_obstacle_broken(position),
                GameEvent::ResourceCollected {
                    position, value, ..
                } => presenter.on_resource_collected(position, value),
                GameEvent::StoreCursorMoved { cursor } => presenter.on_store_cursor_moved(cursor),
                GameEvent::TurnStarted { player, turn } => presenter.on_turn_started(player, turn),
                GameEvent::ModeChanged { to, .. } => presenter.on_mode_changed(to),
                GameEvent::GameOver { winner } => presenter.on_game_over(winner),
                GameEvent::GameOverPresented { winner } => presenter.present_game_over(winner),
            }
        }
    }
}
