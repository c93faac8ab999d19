//! Authoritative match state.
//!
//! This module owns the data structures for tiles, units, players and turn
//! bookkeeping, plus the spatial index that joins them by position. Hosts read
//! this state freely but mutate it only through [`crate::engine::GameEngine`].
mod common;
mod error;
mod grid;
mod player;
mod tile;
mod turn;
mod unit;

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::env::{CatalogOracle, MapLayout, Obstacle, TemplateId};

pub use common::{CardinalDirection, PlayerId, Position, UnitId};
pub use error::SetupError;
pub use grid::GridIndex;
pub use player::PlayerState;
pub use tile::Tile;
pub use turn::{Focus, InputMode, InputSource, StoreSession, TurnState};
pub use unit::{HitReport, Unit};

bitflags! {
    /// Which occupant layers a proximity query should return.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerFilter: u8 {
        const UNITS = 1 << 0;
        const OBSTACLES = 1 << 1;
        const RUBBLE = 1 << 2;
    }
}

/// Something found by [`SpatialQuery::occupants_near`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Unit { id: UnitId, position: Position },
    Obstacle { obstacle: Obstacle, position: Position },
    Rubble { value: u32, position: Position },
}

impl Occupant {
    pub fn position(&self) -> Position {
        match *self {
            Occupant::Unit { position, .. }
            | Occupant::Obstacle { position, .. }
            | Occupant::Rubble { position, .. } => position,
        }
    }
}

/// Position-keyed lookups used by reachability, combat and spawning.
pub trait SpatialQuery {
    fn unit_at(&self, position: Position) -> Option<&Unit>;

    fn tile_at(&self, position: Position) -> Option<&Tile>;

    /// Occupants within `radius` (Manhattan) of `position`, in position order.
    fn occupants_near(&self, position: Position, radius: u32, filter: LayerFilter)
    -> Vec<Occupant>;
}

/// Canonical snapshot of a match in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Monotonic unit id allocator; ids are never reused.
    next_unit_id: u32,
    pub turn: TurnState,
    players: BTreeMap<PlayerId, PlayerState>,
    pub grid: GridIndex,
}

impl GameState {
    /// Creates a state over `layout` with no players and no units.
    pub fn new(layout: &MapLayout, starting_player: PlayerId) -> Self {
        Self {
            next_unit_id: 1,
            turn: TurnState::new(starting_player),
            players: BTreeMap::new(),
            grid: GridIndex::from_layout(layout),
        }
    }

    /// Adds a side to the match. A second registration of the same id is refused.
    pub fn register_player(&mut self, player: PlayerState) -> Result<(), SetupError> {
        if self.players.contains_key(&player.id()) {
            return Err(SetupError::DuplicatePlayer(player.id()));
        }
        self.players.insert(player.id(), player);
        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.values()
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.players.values().find_map(|player| player.unit(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.players
            .values_mut()
            .find_map(|player| player.unit_mut(id))
    }

    /// Every living unit of both sides.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.players.values().flat_map(|player| player.units())
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.players
            .values_mut()
            .flat_map(|player| player.units_mut())
    }

    /// Units belonging to every side except `player`.
    pub fn enemies_of(&self, player: PlayerId) -> impl Iterator<Item = &Unit> {
        self.units().filter(move |unit| unit.owner != player)
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        self.turn.selected.and_then(|id| self.unit(id))
    }

    /// Creates a unit and records it in both its owner's roster and the grid.
    pub fn spawn_unit<C>(
        &mut self,
        catalog: &C,
        owner: PlayerId,
        template_id: TemplateId,
        position: Position,
    ) -> Result<UnitId, SetupError>
    where
        C: CatalogOracle + ?Sized,
    {
        let template = catalog
            .template(template_id)
            .ok_or(SetupError::UnknownTemplate(template_id))?;
        if !self.players.contains_key(&owner) {
            return Err(SetupError::UnknownPlayer(owner));
        }
        if self.grid.tile(position).is_none() {
            return Err(SetupError::NoTile(position));
        }
        if let Some(occupant) = self.grid.unit_id_at(position) {
            return Err(SetupError::PositionOccupied { position, occupant });
        }
        if self.grid.obstacle_at(position).is_some() {
            return Err(SetupError::PositionBlocked(position));
        }
        if template.is_boss && self.boss_of(catalog, owner).is_some() {
            return Err(SetupError::SecondBoss(owner));
        }

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;

        let unit = Unit::new(id, owner, template_id, template, position);
        self.grid.place_unit(position, id);
        if let Some(player) = self.players.get_mut(&owner) {
            player.adopt(unit);
        }
        Ok(id)
    }

    /// Takes a unit out of play. Returns the removed unit, if it existed.
    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self
            .players
            .values_mut()
            .find_map(|player| player.release(id))?;
        self.grid.remove_unit(unit.position, id);
        if self.turn.selected == Some(id) {
            self.turn.selected = None;
        }
        if self.turn.focus.unit == Some(id) {
            self.turn.focus.unit = None;
        }
        self.turn.attack_targets.retain(|target| *target != id);
        Some(unit)
    }

    /// The boss unit of `player`, if it has one.
    pub fn boss_of<C>(&self, catalog: &C, player: PlayerId) -> Option<&Unit>
    where
        C: CatalogOracle + ?Sized,
    {
        self.player(player)?.units().find(|unit| {
            catalog
                .template(unit.template)
                .is_some_and(|template| template.is_boss)
        })
    }
}

impl SpatialQuery for GameState {
    fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.grid.unit_id_at(position).and_then(|id| self.unit(id))
    }

    fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.grid.tile(position)
    }

    fn occupants_near(
        &self,
        position: Position,
        radius: u32,
        filter: LayerFilter,
    ) -> Vec<Occupant> {
        let mut found = Vec::new();
        if filter.contains(LayerFilter::UNITS) {
            found.extend(
                self.grid
                    .occupied_positions()
                    .filter(|(at, _)| at.manhattan(position) <= radius)
                    .map(|(position, id)| Occupant::Unit { id, position }),
            );
        }
        if filter.contains(LayerFilter::OBSTACLES) {
            found.extend(
                self.grid
                    .obstacles()
                    .filter(|(at, _)| at.manhattan(position) <= radius)
                    .map(|(position, obstacle)| Occupant::Obstacle { obstacle, position }),
            );
        }
        if filter.contains(LayerFilter::RUBBLE) {
            found.extend(
                self.grid
                    .rubble()
                    .filter(|(at, _)| at.manhattan(position) <= radius)
                    .map(|(position, value)| Occupant::Rubble { value, position }),
            );
        }
        found.sort_by_key(Occupant::position);
        found
    }
}
