use crate::events::{GameEvent, Outcome};
use crate::movement::{MoveSequence, reachable_tiles};
use crate::state::{InputMode, Position, UnitId};

use super::{CommandError, GameEngine};

impl GameEngine<'_> {
    /// Sends the selected unit to `destination`.
    pub fn move_selected(&mut self, destination: Position) -> Result<Outcome, CommandError> {
        self.run("move_selected", |engine| {
            engine.require_input()?;
            let mode = engine.state.turn.mode;
            if mode != InputMode::UnitActive {
                return Err(CommandError::WrongMode {
                    command: "move_selected",
                    mode,
                });
            }
            engine.commit_move(destination)
        })
    }

    /// Steps the in-flight sequences by `dt` seconds.
    ///
    /// A finished slide marks the unit as moved, lets it break obstacles and
    /// collect rubble where it landed, and recomputes its targets. The
    /// game-over presentation fires once its delay has elapsed.
    pub fn advance(&mut self, dt: f32) -> Result<Outcome, CommandError> {
        self.run("advance", |engine| {
            engine.advance_motion(dt);
            engine.advance_game_over(dt);
            Ok(())
        })
    }

    /// Where the moving unit should be drawn, in tile units.
    pub fn display_position(&self, unit: UnitId) -> Option<(f32, f32)> {
        match &self.state.turn.motion {
            Some(motion) if motion.unit() == unit => Some(motion.display_position()),
            _ => self
                .state
                .unit(unit)
                .map(|unit| (unit.position.x as f32, unit.position.y as f32)),
        }
    }

    /// Moves the unit in the grid at once and starts its slide. Highlights
    /// and attackability are cleared first; `has_moved` waits for arrival.
    pub(super) fn commit_move(&mut self, destination: Position) -> Result<(), CommandError> {
        if self.state.turn.motion.is_some() {
            return Err(CommandError::MoveInFlight);
        }
        let id = self
            .state
            .turn
            .selected
            .ok_or(CommandError::NothingSelected)?;
        let unit = self.unit(id)?;
        if unit.has_moved {
            return Err(CommandError::AlreadyMoved(id));
        }
        let template = self.template(unit.template)?;
        let from = unit.position;
        let reachable = reachable_tiles(self.state, unit, template)
            .iter()
            .any(|tile| tile.position == destination);
        if !reachable || !self.state.grid.move_unit(from, destination, id) {
            return Err(CommandError::Unreachable(destination));
        }

        if let Some(unit) = self.state.unit_mut(id) {
            unit.position = destination;
        }
        self.state.grid.clear_highlights();
        self.clear_attackability();
        self.state.turn.motion = Some(MoveSequence::new(
            id,
            from,
            destination,
            self.env.config().move_speed,
        ));

        tracing::debug!(unit = %id, %from, to = %destination, "move committed");
        self.emit(GameEvent::UnitMoved {
            unit: id,
            from,
            to: destination,
        });
        self.refresh_focus();
        Ok(())
    }

    fn advance_motion(&mut self, dt: f32) {
        let Some(motion) = self.state.turn.motion.as_mut() else {
            return;
        };
        if !motion.advance(dt) {
            return;
        }
        let (id, position) = (motion.unit(), motion.to());
        self.state.turn.motion = None;
        self.finish_move(id, position);
    }

    fn finish_move(&mut self, id: UnitId, position: Position) {
        let Some(unit) = self.state.unit_mut(id) else {
            tracing::warn!(unit = %id, "moving unit vanished before arrival");
            return;
        };
        unit.has_moved = true;
        let (owner, template) = (unit.owner, unit.template);

        tracing::debug!(unit = %id, %position, "arrived");
        self.emit(GameEvent::UnitArrived { unit: id, position });

        if let Some(template) = self.env.template(template) {
            let capabilities = template.capabilities;
            if capabilities.breaks_obstacles
                && let Some(rubble) = self.state.grid.break_obstacle(position)
            {
                tracing::debug!(unit = %id, %position, rubble, "obstacle broken");
                self.emit(GameEvent::ObstacleBroken { position, rubble });
            }
            if capabilities.collects_resources
                && let Some(value) = self.state.grid.take_rubble(position)
            {
                tracing::debug!(unit = %id, %position, value, "rubble collected");
                self.emit(GameEvent::ResourceCollected {
                    unit: id,
                    position,
                    value,
                });
                self.credit(owner, value);
            }
        }

        if self.state.turn.selected == Some(id) {
            self.refresh_attackability();
        }
        self.refresh_focus();
    }

    fn advance_game_over(&mut self, dt: f32) {
        let Some(sequence) = self.state.turn.game_over.as_mut() else {
            return;
        };
        if sequence.advance(dt) {
            let winner = sequence.winner();
            tracing::info!(%winner, "presenting game over");
            self.emit(GameEvent::GameOverPresented { winner });
        }
    }
}
