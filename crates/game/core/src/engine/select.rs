use crate::combat::enemies_in_range;
use crate::env::UnitTemplate;
use crate::events::{GameEvent, Outcome};
use crate::movement::reachable_tiles;
use crate::state::{InputMode, UnitId};

use super::{CommandError, GameEngine};

/// Selection commands and the highlighting that follows the active unit.
impl GameEngine<'_> {
    /// Makes one of the current player's units the active unit.
    pub fn select(&mut self, unit: UnitId) -> Result<Outcome, CommandError> {
        self.run("select", |engine| {
            engine.require_input()?;
            engine.check_selectable(unit, "select")?;
            engine.select_unit(unit)
        })
    }

    pub fn deselect(&mut self) -> Result<Outcome, CommandError> {
        self.run("deselect", |engine| {
            engine.require_input()?;
            engine
                .clear_selection()
                .map(|_| ())
                .ok_or(CommandError::NothingSelected)
        })
    }

    /// Cycles through the current player's units in id order. With nothing
    /// selected the first unit is taken, whatever the direction.
    pub fn select_next(&mut self, reverse: bool) -> Result<Outcome, CommandError> {
        self.run("select_next", |engine| {
            engine.require_input()?;
            let mode = engine.state.turn.mode;
            if !matches!(mode, InputMode::Idle | InputMode::UnitActive) {
                return Err(CommandError::WrongMode {
                    command: "select_next",
                    mode,
                });
            }

            let current = engine.state.current_player();
            let candidates: Vec<UnitId> = engine
                .state
                .player(current)
                .ok_or(CommandError::PlayerNotFound(current))?
                .units()
                .filter(|unit| !engine.state.turn.is_moving(unit.id))
                .map(|unit| unit.id)
                .collect();
            let Some(&first) = candidates.first() else {
                return Err(CommandError::NoUnits(current));
            };

            let index = engine
                .state
                .turn
                .selected
                .and_then(|selected| candidates.iter().position(|id| *id == selected));
            let next = match index {
                None => first,
                Some(index) => {
                    let len = candidates.len();
                    let step = if reverse { len - 1 } else { 1 };
                    candidates[(index + step) % len]
                }
            };

            if engine.state.turn.selected == Some(next) {
                return Ok(());
            }
            engine.select_unit(next)
        })
    }

    pub(super) fn check_selectable(
        &self,
        id: UnitId,
        command: &'static str,
    ) -> Result<(), CommandError> {
        let mode = self.state.turn.mode;
        if !matches!(mode, InputMode::Idle | InputMode::UnitActive) {
            return Err(CommandError::WrongMode { command, mode });
        }
        let unit = self.unit(id)?;
        if unit.owner != self.state.current_player() {
            return Err(CommandError::NotOwnUnit {
                unit: id,
                owner: unit.owner,
            });
        }
        if self.state.turn.is_moving(id) {
            return Err(CommandError::UnitInMotion(id));
        }
        Ok(())
    }

    /// Deselects whatever was active, then activates `id`: highlights its
    /// reach and flags the enemies it can hit.
    pub(super) fn select_unit(&mut self, id: UnitId) -> Result<(), CommandError> {
        let template = self.template_of(id)?;
        let previous = self.drop_selection();

        if let Some(unit) = self.state.unit_mut(id) {
            unit.set_selected(true);
        }
        self.state.turn.selected = Some(id);
        self.show_reach(id, template);
        self.refresh_attackability();
        self.set_mode(InputMode::UnitActive);

        tracing::debug!(unit = %id, "selected");
        self.emit(GameEvent::SelectionChanged {
            previous,
            selected: Some(id),
        });
        Ok(())
    }

    /// Full deselect: clears highlights and attackability and falls back to
    /// `Idle` if a unit was active. Returns the unit that was selected.
    pub(super) fn clear_selection(&mut self) -> Option<UnitId> {
        let previous = self.drop_selection()?;
        if self.state.turn.mode == InputMode::UnitActive {
            self.set_mode(InputMode::Idle);
        }
        self.emit(GameEvent::SelectionChanged {
            previous: Some(previous),
            selected: None,
        });
        Some(previous)
    }

    fn drop_selection(&mut self) -> Option<UnitId> {
        let previous = self.state.turn.selected.take()?;
        self.state.grid.clear_highlights();
        self.clear_attackability();
        if let Some(unit) = self.state.unit_mut(previous) {
            unit.set_selected(false);
        }
        tracing::debug!(unit = %previous, "deselected");
        Some(previous)
    }

    fn show_reach(&mut self, id: UnitId, template: &UnitTemplate) {
        let Some(unit) = self.state.unit(id) else {
            return;
        };
        let reach = reachable_tiles(self.state, unit, template);
        for tile in reach {
            if let Some(target) = self.state.grid.tile_mut(tile.position) {
                target.highlight(tile.distance);
            }
        }
    }

    /// Re-flags the enemies the selected unit can strike from where it stands.
    pub(super) fn refresh_attackability(&mut self) {
        self.clear_attackability();

        let Some(id) = self.state.turn.selected else {
            return;
        };
        if self.state.turn.is_moving(id) {
            return;
        }
        let Some(unit) = self.state.unit(id) else {
            return;
        };
        let Some(template) = self.env.template(unit.template) else {
            return;
        };

        let candidates = enemies_in_range(self.state, unit, template);
        for candidate in &candidates {
            if let Some(enemy) = self.state.unit_mut(candidate.target) {
                enemy.mark_attackable(candidate.distance);
            }
        }
        self.state.turn.attack_targets = candidates
            .into_iter()
            .map(|candidate| candidate.target)
            .collect();
    }

    /// Un-flags exactly the enemies flagged by the last scan.
    pub(super) fn clear_attackability(&mut self) {
        let marked = std::mem::take(&mut self.state.turn.attack_targets);
        for id in marked {
            if let Some(unit) = self.state.unit_mut(id) {
                unit.clear_attackable();
            }
        }
    }
}
