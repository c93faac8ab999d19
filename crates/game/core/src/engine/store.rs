//! Store session: browsing offers, buying, and placing the bought unit.

use crate::economy::{StoreOffer, has_spawn_tile, is_spawn_eligible, store_offers};
use crate::env::TemplateId;
use crate::events::{GameEvent, Outcome};
use crate::state::{InputMode, Position, StoreSession, UnitId};

use super::{CommandError, GameEngine};

impl GameEngine<'_> {
    /// Opens the store. With a `target` the bought unit appears there;
    /// without one the purchase is followed by a placing step.
    pub fn open_store(&mut self, target: Option<Position>) -> Result<Outcome, CommandError> {
        self.run("open_store", |engine| engine.open_store_at(target))
    }

    /// Offers priced against the current player's currency.
    pub fn store_offers(&self) -> Vec<StoreOffer> {
        let currency = self
            .state
            .player(self.state.current_player())
            .map_or(0, |player| player.currency());
        store_offers(self.env.catalog(), currency)
    }

    /// Moves the store cursor one offer forward or back, wrapping around.
    pub fn move_store_cursor(&mut self, reverse: bool) -> Result<Outcome, CommandError> {
        self.run("move_store_cursor", |engine| {
            let session = engine.store_session("move_store_cursor")?;
            let len = engine.store_offers().len();
            if len == 0 {
                return Err(CommandError::StoreEmpty);
            }
            let step = if reverse { len - 1 } else { 1 };
            let cursor = (session.cursor.min(len - 1) + step) % len;

            if let Some(store) = engine.state.turn.store.as_mut() {
                store.cursor = cursor;
            }
            engine.emit(GameEvent::StoreCursorMoved { cursor });
            Ok(())
        })
    }

    /// Buys one unit of `template` for the current player.
    pub fn purchase(&mut self, template: TemplateId) -> Result<Outcome, CommandError> {
        self.run("purchase", |engine| engine.buy(template))
    }

    /// Buys the offer under the store cursor.
    pub fn purchase_selected_offer(&mut self) -> Result<Outcome, CommandError> {
        self.run("purchase_selected_offer", |engine| {
            let session = engine.store_session("purchase_selected_offer")?;
            let offer = engine
                .store_offers()
                .into_iter()
                .nth(session.cursor)
                .ok_or(CommandError::StoreEmpty)?;
            engine.buy(offer.template)
        })
    }

    /// Places the unit bought without a target.
    pub fn place_unit(&mut self, position: Position) -> Result<Outcome, CommandError> {
        self.run("place_unit", |engine| {
            engine.require_input()?;
            engine.place_pending(position)
        })
    }

    /// Backs out of the current step: deselects an active unit or closes the
    /// store. Ignored while placing.
    pub fn cancel(&mut self) -> Result<Outcome, CommandError> {
        self.run("cancel", |engine| match engine.state.turn.mode {
            InputMode::UnitActive => {
                engine.clear_selection();
                Ok(())
            }
            InputMode::Buying => {
                engine.state.turn.store = None;
                engine.set_mode(InputMode::Idle);
                tracing::debug!("store closed");
                Ok(())
            }
            mode => Err(CommandError::WrongMode {
                command: "cancel",
                mode,
            }),
        })
    }

    pub(super) fn open_store_at(&mut self, target: Option<Position>) -> Result<(), CommandError> {
        let mode = self.state.turn.mode;
        if !matches!(mode, InputMode::Idle | InputMode::UnitActive) {
            return Err(CommandError::WrongMode {
                command: "open_store",
                mode,
            });
        }
        if self.state.turn.motion.is_some() {
            return Err(CommandError::MoveInFlight);
        }
        let current = self.state.current_player();
        if self.state.player(current).is_none() {
            return Err(CommandError::PlayerNotFound(current));
        }
        match target {
            Some(position) => {
                if self.state.grid.tile(position).is_none() {
                    return Err(CommandError::NoTile(position));
                }
                if !is_spawn_eligible(self.state, self.env.catalog(), position, current) {
                    return Err(CommandError::NotSpawnEligible(position));
                }
            }
            None if !has_spawn_tile(self.state, self.env.catalog(), current) => {
                return Err(CommandError::NoSpawnTile(current));
            }
            None => {}
        }
        if self.store_offers().is_empty() {
            return Err(CommandError::StoreEmpty);
        }

        self.clear_selection();
        self.state.turn.store = Some(StoreSession { target, cursor: 0 });
        self.set_mode(InputMode::Buying);
        tracing::debug!(?target, "store opened");
        Ok(())
    }

    fn store_session(&self, command: &'static str) -> Result<StoreSession, CommandError> {
        let mode = self.state.turn.mode;
        match self.state.turn.store {
            Some(session) if mode == InputMode::Buying => Ok(session),
            _ => Err(CommandError::WrongMode { command, mode }),
        }
    }

    /// Charges the buyer and either spawns the unit at the session target or
    /// hands it to the placing step.
    fn buy(&mut self, template_id: TemplateId) -> Result<(), CommandError> {
        let session = self.store_session("purchase")?;
        let template = self.template(template_id)?;
        if !template.purchasable {
            return Err(CommandError::NotPurchasable(template_id));
        }
        let buyer = self.state.current_player();
        let currency = self
            .state
            .player(buyer)
            .ok_or(CommandError::PlayerNotFound(buyer))?
            .currency();
        if template.price > currency {
            return Err(CommandError::InsufficientFunds {
                price: template.price,
                currency,
            });
        }

        let next_mode = match session.target {
            Some(position) => {
                if !is_spawn_eligible(self.state, self.env.catalog(), position, buyer) {
                    return Err(CommandError::NotSpawnEligible(position));
                }
                self.spawn_purchase(template_id, position)?;
                InputMode::Idle
            }
            None => {
                // Placing must always be able to finish.
                if !has_spawn_tile(self.state, self.env.catalog(), buyer) {
                    return Err(CommandError::NoSpawnTile(buyer));
                }
                self.state.turn.pending_placement = Some(template_id);
                InputMode::Placing
            }
        };

        let remaining = currency - template.price;
        if let Some(player) = self.state.player_mut(buyer) {
            player.set_currency(remaining);
        }
        self.emit(GameEvent::CurrencyChanged {
            player: buyer,
            currency: remaining,
        });
        tracing::debug!(player = %buyer, template = %template_id, price = template.price, "purchased");

        self.state.turn.store = None;
        self.set_mode(next_mode);
        Ok(())
    }

    pub(super) fn place_pending(&mut self, position: Position) -> Result<(), CommandError> {
        let mode = self.state.turn.mode;
        let Some(template) = self.state.turn.pending_placement else {
            return Err(CommandError::WrongMode {
                command: "place_unit",
                mode,
            });
        };
        if mode != InputMode::Placing {
            return Err(CommandError::WrongMode {
                command: "place_unit",
                mode,
            });
        }
        if self.state.grid.tile(position).is_none() {
            return Err(CommandError::NoTile(position));
        }
        let current = self.state.current_player();
        if !is_spawn_eligible(self.state, self.env.catalog(), position, current) {
            return Err(CommandError::NotSpawnEligible(position));
        }

        self.spawn_purchase(template, position)?;
        self.state.turn.pending_placement = None;
        self.set_mode(InputMode::Idle);
        Ok(())
    }

    fn spawn_purchase(
        &mut self,
        template: TemplateId,
        position: Position,
    ) -> Result<UnitId, CommandError> {
        let owner = self.state.current_player();
        let id = self
            .state
            .spawn_unit(self.env.catalog(), owner, template, position)?;
        if !self.env.config().purchased_units_ready
            && let Some(unit) = self.state.unit_mut(id)
        {
            unit.exhaust();
        }

        tracing::debug!(unit = %id, %owner, %position, "unit spawned");
        self.emit(GameEvent::UnitSpawned {
            unit: id,
            owner,
            template,
            position,
        });
        self.refresh_focus();
        Ok(id)
    }
}
