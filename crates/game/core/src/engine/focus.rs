//! Focus tracking and primary-action dispatch.
//!
//! Focus marks what the next click acts on and is independent of selection.
//! The pointer claims it continuously while it owns focus; a directional step
//! takes ownership away until the pointer comes back to the focused tile, so
//! a stale pointer position never receives a click.

use crate::economy::is_spawn_eligible;
use crate::events::{GameEvent, Outcome};
use crate::state::{CardinalDirection, InputMode, InputSource, Position, UnitId};

use super::{CommandError, GameEngine};

impl GameEngine<'_> {
    /// The pointer is over `position`.
    pub fn pointer_moved(&mut self, position: Position) -> Result<Outcome, CommandError> {
        self.run("pointer_moved", |engine| {
            engine.require_input()?;
            let focus = engine.state.turn.focus;

            if !focus.pointer_owns {
                if focus.tile == Some(position) {
                    engine.state.turn.focus.pointer_owns = true;
                    tracing::debug!(%position, "pointer regained focus");
                }
                return Ok(());
            }
            if focus.tile == Some(position) || engine.state.grid.tile(position).is_none() {
                return Ok(());
            }

            let unit = engine.state.grid.unit_id_at(position);
            engine.change_focus(Some(position), unit);
            Ok(())
        })
    }

    /// Moves focus one tile along a cardinal direction.
    ///
    /// Diagonal and zero input is refused; a step off the board is ignored.
    /// With nothing focused yet, the first step lands on the centre tile.
    pub fn directional(&mut self, dx: i32, dy: i32) -> Result<Outcome, CommandError> {
        self.run("directional", |engine| {
            engine.require_input()?;
            let direction =
                CardinalDirection::from_delta(dx, dy).ok_or(CommandError::NotCardinal { dx, dy })?;
            let Some(from) = engine.state.turn.focus.tile else {
                engine.focus_centre().ok_or(CommandError::NothingFocused)?;
                engine.state.turn.focus.pointer_owns = false;
                return Ok(());
            };

            let (step_x, step_y) = direction.delta();
            let to = from.offset(step_x, step_y);
            if engine.state.grid.tile(to).is_none() {
                return Ok(());
            }

            engine.state.turn.focus.pointer_owns = false;
            let unit = engine.state.grid.unit_id_at(to);
            engine.change_focus(Some(to), unit);
            Ok(())
        })
    }

    /// Primary action. Acts on the focused unit if there is one, otherwise
    /// on the focused tile.
    pub fn fire(&mut self, source: InputSource) -> Result<Outcome, CommandError> {
        self.run("fire", |engine| {
            engine.require_input()?;
            let focus = engine.state.turn.focus;
            if source == InputSource::Pointer && !focus.pointer_owns {
                return Err(CommandError::PointerLacksFocus);
            }
            match (focus.unit, focus.tile) {
                (Some(unit), _) => engine.on_unit_activated(unit),
                (None, Some(tile)) => engine.on_tile_activated(tile),
                (None, None) => Err(CommandError::NothingFocused),
            }
        })
    }

    /// Clicks a unit directly, bypassing focus.
    pub fn activate_unit(&mut self, unit: UnitId) -> Result<Outcome, CommandError> {
        self.run("activate_unit", |engine| {
            engine.require_input()?;
            engine.on_unit_activated(unit)
        })
    }

    /// Clicks a tile directly, bypassing focus.
    pub fn activate_tile(&mut self, position: Position) -> Result<Outcome, CommandError> {
        self.run("activate_tile", |engine| {
            engine.require_input()?;
            engine.on_tile_activated(position)
        })
    }

    /// Friendly unit: toggle its selection. Enemy unit: attack it.
    fn on_unit_activated(&mut self, id: UnitId) -> Result<(), CommandError> {
        let mode = self.state.turn.mode;
        if mode == InputMode::Placing {
            return Err(CommandError::WrongMode {
                command: "activate_unit",
                mode,
            });
        }

        let owner = self.unit(id)?.owner;
        if owner != self.state.current_player() {
            return self.resolve_attack(id).map(|_| ());
        }
        if self.state.turn.is_moving(id) {
            return Err(CommandError::UnitInMotion(id));
        }
        if self.state.turn.selected == Some(id) {
            self.clear_selection();
            return Ok(());
        }
        self.check_selectable(id, "activate_unit")?;
        self.select_unit(id)
    }

    fn on_tile_activated(&mut self, position: Position) -> Result<(), CommandError> {
        let Some(tile) = self.state.grid.tile(position) else {
            return Err(CommandError::NoTile(position));
        };
        let highlighted = tile.is_highlighted();

        match self.state.turn.mode {
            InputMode::Placing => self.place_pending(position),
            InputMode::UnitActive if highlighted && self.state.turn.selected.is_some() => {
                self.commit_move(position)
            }
            InputMode::UnitActive => {
                self.clear_selection();
                Ok(())
            }
            InputMode::Idle => {
                let current = self.state.current_player();
                if !is_spawn_eligible(self.state, self.env.catalog(), position, current) {
                    return Err(CommandError::NotSpawnEligible(position));
                }
                self.open_store_at(Some(position))
            }
            mode => Err(CommandError::InputNotAccepted(mode)),
        }
    }

    /// LoseFocus on the old tile and unit, GainFocus on the new ones.
    ///
    /// The focused tile recomputes its spawn eligibility for the current
    /// player; losing focus clears it.
    pub(super) fn change_focus(&mut self, tile: Option<Position>, unit: Option<UnitId>) {
        let previous = self.state.turn.focus;

        if let Some(old) = previous.tile.and_then(|p| self.state.grid.tile_mut(p)) {
            old.lose_focus();
        }
        if let Some(old) = previous.unit.and_then(|id| self.state.unit_mut(id)) {
            old.set_focused(false);
        }

        if let Some(position) = tile {
            let current = self.state.current_player();
            let eligible = is_spawn_eligible(self.state, self.env.catalog(), position, current);
            if let Some(new) = self.state.grid.tile_mut(position) {
                new.gain_focus(eligible);
            }
        }
        if let Some(new) = unit.and_then(|id| self.state.unit_mut(id)) {
            new.set_focused(true);
        }

        self.state.turn.focus.tile = tile;
        self.state.turn.focus.unit = unit;
        if previous.tile != tile || previous.unit != unit {
            tracing::trace!(?tile, ?unit, "focus changed");
            self.emit(GameEvent::FocusChanged { tile, unit });
        }
    }

    /// Focuses the tile at the middle of the board, or the first tile when the
    /// middle cell is missing from the layout.
    pub(super) fn focus_centre(&mut self) -> Option<Position> {
        let dimensions = self.state.grid.dimensions();
        let middle = Position::new((dimensions.width / 2) as i32, (dimensions.height / 2) as i32);
        let centre = match self.state.grid.tile(middle) {
            Some(_) => middle,
            None => self.state.grid.tiles().next()?.position(),
        };

        let unit = self.state.grid.unit_id_at(centre);
        self.change_focus(Some(centre), unit);
        Some(centre)
    }

    /// Re-resolves focus after the board changed under it.
    pub(super) fn refresh_focus(&mut self) {
        let Some(tile) = self.state.turn.focus.tile else {
            return;
        };
        let unit = self.state.grid.unit_id_at(tile);
        self.change_focus(Some(tile), unit);
    }
}
