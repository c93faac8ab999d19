//! Turn and input state machine.
//!
//! The [`GameEngine`] is the only writer of [`GameState`] during a match. It
//! borrows the state mutably for as long as the host holds it and reads
//! content through [`Env`]. Every command either succeeds and returns the
//! [`Outcome`] it produced, or fails with a [`CommandError`] and leaves the
//! state exactly as it was.
//!
//! Commands are grouped by concern:
//! - `focus`: pointer and directional focus, primary action dispatch
//! - `select`: selection, reach highlighting, attackability
//! - `combat`: attack and counter-attack exchange, deaths, healing
//! - `motion`: committed moves and the per-frame `advance`
//! - `store`: store session, purchase and placement
//! - `turns`: match start and end of turn

mod combat;
mod errors;
mod focus;
mod motion;
mod select;
mod store;
mod turns;

pub use errors::CommandError;

use crate::env::{Env, TemplateId, UnitTemplate};
use crate::events::{GameEvent, Outcome};
use crate::state::{GameState, InputMode, PlayerId, Unit, UnitId};

/// Orchestrates every rule of the match over a borrowed [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: Env<'a>,
    events: Vec<GameEvent>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, env: Env<'a>) -> Self {
        Self {
            state,
            env,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn env(&self) -> Env<'a> {
        self.env
    }

    pub fn mode(&self) -> InputMode {
        self.state.turn.mode
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.turn.winner
    }

    pub fn is_input_accepted(&self) -> bool {
        self.state.turn.is_input_accepted()
    }

    /// Overwrites a player's currency and notifies.
    pub fn set_currency(&mut self, player: PlayerId, currency: u32) -> Result<Outcome, CommandError> {
        self.run("set_currency", |engine| {
            let owner = engine
                .state
                .player_mut(player)
                .ok_or(CommandError::PlayerNotFound(player))?;
            owner.set_currency(currency);
            engine.emit(GameEvent::CurrencyChanged { player, currency });
            Ok(())
        })
    }

    /// Overwrites a player's displayed health and notifies.
    pub fn set_health(&mut self, player: PlayerId, health: u32) -> Result<Outcome, CommandError> {
        self.run("set_health", |engine| {
            let owner = engine
                .state
                .player_mut(player)
                .ok_or(CommandError::PlayerNotFound(player))?;
            owner.set_health(health);
            engine.emit(GameEvent::HealthChanged { player, health });
            Ok(())
        })
    }

    /// Runs one command against a fresh event buffer.
    ///
    /// Commands validate before they mutate, so an `Err` never leaves partial
    /// changes behind. Rejections are logged here, once.
    fn run<F>(&mut self, name: &'static str, command: F) -> Result<Outcome, CommandError>
    where
        F: FnOnce(&mut Self) -> Result<(), CommandError>,
    {
        self.events.clear();
        match command(self) {
            Ok(()) => Ok(Outcome::new(std::mem::take(&mut self.events))),
            Err(error) => {
                self.events.clear();
                error.log(name);
                Err(error)
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn set_mode(&mut self, to: InputMode) {
        let from = self.state.turn.mode;
        if from == to {
            return;
        }
        self.state.turn.mode = to;
        tracing::debug!(%from, %to, "input mode changed");
        self.emit(GameEvent::ModeChanged { from, to });
    }

    fn require_input(&self) -> Result<(), CommandError> {
        if self.state.turn.is_input_accepted() {
            Ok(())
        } else {
            Err(CommandError::InputNotAccepted(self.state.turn.mode))
        }
    }

    fn unit(&self, id: UnitId) -> Result<&Unit, CommandError> {
        self.state.unit(id).ok_or(CommandError::UnitNotFound(id))
    }

    fn template(&self, id: TemplateId) -> Result<&'a UnitTemplate, CommandError> {
        self.env
            .template(id)
            .ok_or(CommandError::TemplateNotFound(id))
    }

    fn template_of(&self, unit: UnitId) -> Result<&'a UnitTemplate, CommandError> {
        let template = self.unit(unit)?.template;
        self.template(template)
    }

    /// Adds `amount` to a player's currency.
    fn credit(&mut self, player: PlayerId, amount: u32) {
        let Some(owner) = self.state.player_mut(player) else {
            tracing::warn!(%player, "cannot credit an unregistered player");
            return;
        };
        let currency = owner.currency().saturating_add(amount);
        owner.set_currency(currency);
        self.emit(GameEvent::CurrencyChanged { player, currency });
    }

    /// Mirrors the health of `player`'s boss onto the player.
    fn sync_boss_health(&mut self, player: PlayerId) {
        let Some(health) = self
            .state
            .boss_of(self.env.catalog(), player)
            .map(Unit::health)
        else {
            return;
        };
        let Some(owner) = self.state.player_mut(player) else {
            return;
        };
        if owner.health() == health {
            return;
        }
        owner.set_health(health);
        self.emit(GameEvent::HealthChanged { player, health });
    }
}
