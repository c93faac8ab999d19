use crate::combat::{AttackRole, Casualty, ExchangeResult, StrikeResult, damage_by_distance};
use crate::env::UnitTemplate;
use crate::events::{GameEvent, Outcome};
use crate::movement::GameOverSequence;
use crate::state::{InputMode, PlayerId, UnitId};

use super::{CommandError, GameEngine};

impl GameEngine<'_> {
    /// The selected unit strikes `target`; a surviving target strikes back.
    pub fn attack(&mut self, target: UnitId) -> Result<Outcome, CommandError> {
        self.run("attack", |engine| {
            engine.require_input()?;
            engine.resolve_attack(target).map(|_| ())
        })
    }

    /// Restores up to `amount` health to `unit`, capped at its template maximum.
    pub fn heal_unit(&mut self, unit: UnitId, amount: u32) -> Result<Outcome, CommandError> {
        self.run("heal_unit", |engine| {
            let mode = engine.state.turn.mode;
            if mode == InputMode::GameOver {
                return Err(CommandError::WrongMode {
                    command: "heal_unit",
                    mode,
                });
            }
            let template = engine.template_of(unit)?;
            let target = engine
                .state
                .unit_mut(unit)
                .ok_or(CommandError::UnitNotFound(unit))?;
            let restored = target.heal(amount, template.max_health);
            let (position, owner) = (target.position, target.owner);

            tracing::debug!(%unit, restored, "healed");
            engine.emit(GameEvent::HealNumber {
                amount: restored,
                position,
            });
            engine.sync_boss_health(owner);
            Ok(())
        })
    }

    /// Runs a full exchange: strike, then counter if the target lives and the
    /// match is still on.
    pub(super) fn resolve_attack(&mut self, target: UnitId) -> Result<ExchangeResult, CommandError> {
        let mode = self.state.turn.mode;
        if mode != InputMode::UnitActive {
            return Err(CommandError::WrongMode {
                command: "attack",
                mode,
            });
        }
        if self.state.turn.motion.is_some() {
            return Err(CommandError::MoveInFlight);
        }
        let attacker_id = self
            .state
            .turn
            .selected
            .ok_or(CommandError::NothingSelected)?;

        let attacker = self.unit(attacker_id)?;
        if attacker.has_attacked {
            return Err(CommandError::AlreadyAttacked(attacker_id));
        }
        let defender = self.unit(target)?;
        if defender.owner == attacker.owner {
            return Err(CommandError::NotAttackable(target));
        }
        let Some(strike_distance) = defender.attackable_distance() else {
            return Err(CommandError::NotAttackable(target));
        };
        // Both distances are fixed here: attackability is cleared between
        // the strike and the counter.
        let counter_distance = defender.position.manhattan(attacker.position);
        let attacker_template = self.template(attacker.template)?;
        let defender_template = self.template(defender.template)?;

        let mut casualties = Vec::new();
        let strike = self.strike(
            attacker_id,
            target,
            attacker_template,
            strike_distance,
            AttackRole::Initiator,
            &mut casualties,
        );

        if let Some(unit) = self.state.unit_mut(attacker_id) {
            unit.has_attacked = true;
        }
        self.clear_attackability();

        let target_died = casualties.iter().any(|casualty| casualty.unit == target);
        let counter = if target_died || self.state.turn.winner.is_some() {
            None
        } else {
            self.strike(
                target,
                attacker_id,
                defender_template,
                counter_distance,
                AttackRole::Counter,
                &mut casualties,
            )
        };

        self.refresh_attackability();
        Ok(ExchangeResult {
            strike,
            counter,
            casualties,
        })
    }

    fn strike(
        &mut self,
        attacker: UnitId,
        target: UnitId,
        template: &UnitTemplate,
        distance: u32,
        role: AttackRole,
        casualties: &mut Vec<Casualty>,
    ) -> Option<StrikeResult> {
        let raw = damage_by_distance(template, distance, role);
        let unit = self.state.unit_mut(target)?;
        let report = unit.take_hit(raw);
        let (position, owner) = (unit.position, unit.owner);

        tracing::debug!(
            %attacker,
            %target,
            ?role,
            distance,
            raw,
            applied = report.applied,
            armor = report.armor_after,
            "hit"
        );
        self.emit(GameEvent::DamageNumber {
            amount: report.applied,
            position,
        });
        self.sync_boss_health(owner);

        if report.is_lethal() {
            casualties.extend(self.kill(target));
        }

        Some(StrikeResult {
            role,
            attacker,
            target,
            distance,
            raw,
            report,
        })
    }

    /// Removes a dead unit from play. A boss takes the match with it.
    fn kill(&mut self, id: UnitId) -> Option<Casualty> {
        let (owner, template) = {
            let unit = self.state.unit(id)?;
            (unit.owner, unit.template)
        };
        let was_boss = self
            .env
            .template(template)
            .is_some_and(|template| template.is_boss);

        if self.state.turn.selected == Some(id) {
            self.clear_selection();
        }
        if was_boss {
            self.declare_winner(owner.opponent());
        }

        let was_focused = self.state.turn.focus.unit == Some(id);
        let unit = self.state.remove_unit(id)?;
        tracing::debug!(unit = %id, position = %unit.position, "unit died");
        self.emit(GameEvent::DeathEffect {
            unit: id,
            position: unit.position,
        });
        if was_focused {
            self.emit(GameEvent::FocusChanged {
                tile: self.state.turn.focus.tile,
                unit: None,
            });
        }
        self.refresh_focus();

        Some(Casualty {
            unit: id,
            position: unit.position,
            was_boss,
        })
    }

    /// Freezes input and arms the delayed presentation. Only the first call
    /// has any effect.
    fn declare_winner(&mut self, winner: PlayerId) {
        if self.state.turn.winner.is_some() {
            return;
        }
        self.state.turn.winner = Some(winner);
        self.state.turn.store = None;
        self.state.turn.game_over = Some(GameOverSequence::new(
            winner,
            self.env.config().game_over_delay,
        ));
        self.set_mode(InputMode::GameOver);

        tracing::info!(%winner, "game over");
        self.emit(GameEvent::GameOver { winner });
    }
}
