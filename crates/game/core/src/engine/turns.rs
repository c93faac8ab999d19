use strum::IntoEnumIterator;

use crate::economy::income_for;
use crate::events::{GameEvent, Outcome};
use crate::state::PlayerId;

use super::{CommandError, GameEngine};

/// Turn rotation for GameEngine.
impl GameEngine<'_> {
    /// Opens the first turn: mirrors boss health onto both players, puts focus
    /// on the centre tile unless something is already focused, and grants the
    /// starting player its income.
    pub fn start_match(&mut self) -> Result<Outcome, CommandError> {
        self.run("start_match", |engine| {
            if engine.state.turn.started {
                return Err(CommandError::MatchAlreadyStarted);
            }
            let current = engine.state.current_player();
            if engine.state.player(current).is_none() {
                return Err(CommandError::PlayerNotFound(current));
            }

            engine.state.turn.started = true;
            for player in PlayerId::iter() {
                engine.sync_boss_health(player);
            }
            if engine.state.turn.focus.tile.is_none() {
                engine.focus_centre();
            }
            engine.begin_turn(current);
            Ok(())
        })
    }

    /// Hands the turn to the other player.
    ///
    /// Every unit gets its move and attack back, every tile loses its
    /// highlight and spawn markers, and the incoming player collects income.
    pub fn end_turn(&mut self) -> Result<Outcome, CommandError> {
        self.run("end_turn", |engine| {
            let mode = engine.state.turn.mode;
            if !mode.can_end_turn() {
                return Err(CommandError::WrongMode {
                    command: "end_turn",
                    mode,
                });
            }
            if engine.state.turn.motion.is_some() {
                return Err(CommandError::MoveInFlight);
            }
            let next = engine.state.current_player().opponent();
            if engine.state.player(next).is_none() {
                return Err(CommandError::PlayerNotFound(next));
            }

            engine.clear_selection();
            engine.clear_attackability();
            for unit in engine.state.units_mut() {
                unit.reset_turn();
            }
            engine.state.grid.reset_tiles();

            engine.state.turn.current_player = next;
            engine.state.turn.turn_number += 1;
            engine.refresh_focus();
            engine.begin_turn(next);
            Ok(())
        })
    }

    fn begin_turn(&mut self, player: PlayerId) {
        let income = income_for(self.state, self.env.catalog(), player);
        if income > 0 {
            self.credit(player, income);
        }

        let turn = self.state.turn.turn_number;
        tracing::info!(%player, turn, income, "turn started");
        self.emit(GameEvent::TurnStarted { player, turn });
    }
}
