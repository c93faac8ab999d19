use crate::env::{TemplateId, UnitTemplate};

use super::{PlayerId, Position, UnitId};

/// A living combatant.
///
/// Health and armor start from the template and only ever go down (healing
/// aside); health saturates at zero and a unit at zero health is removed from
/// play by the engine in the same command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub template: TemplateId,
    pub position: Position,
    health: u32,
    armor: u32,
    pub has_moved: bool,
    pub has_attacked: bool,
    selected: bool,
    focused: bool,
    attackable_distance: u32,
}

/// Result of a single hit landing on a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitReport {
    /// Damage actually subtracted from health.
    pub applied: u32,
    pub health_after: u32,
    pub armor_after: u32,
}

impl HitReport {
    pub fn is_lethal(&self) -> bool {
        self.health_after == 0
    }
}

impl Unit {
    pub fn new(
        id: UnitId,
        owner: PlayerId,
        template_id: TemplateId,
        template: &UnitTemplate,
        position: Position,
    ) -> Self {
        Self {
            id,
            owner,
            template: template_id,
            position,
            health: template.max_health,
            armor: template.armor,
            has_moved: false,
            has_attacked: false,
            selected: false,
            focused: false,
            attackable_distance: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn armor(&self) -> u32 {
        self.armor
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// `None` unless the active unit can currently attack this one.
    pub fn attackable_distance(&self) -> Option<u32> {
        (self.attackable_distance > 0).then_some(self.attackable_distance)
    }

    pub fn is_attackable(&self) -> bool {
        self.attackable_distance > 0
    }

    /// Lands a hit of `raw` damage: armor absorbs first, health floors at 0,
    /// and the hit wears one point of armor away whatever it dealt.
    pub fn take_hit(&mut self, raw: u32) -> HitReport {
        let applied = crate::combat::absorbed_damage(raw, self.armor).min(self.health);
        self.health -= applied;
        self.armor = self.armor.saturating_sub(1);

        HitReport {
            applied,
            health_after: self.health,
            armor_after: self.armor,
        }
    }

    /// Restores up to `amount` health without exceeding `max_health`.
    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: u32, max_health: u32) -> u32 {
        let restored = amount.min(max_health.saturating_sub(self.health));
        self.health += restored;
        restored
    }

    /// Clears per-turn flags, selection and attackability.
    pub fn reset_turn(&mut self) {
        self.has_moved = false;
        self.has_attacked = false;
        self.selected = false;
        self.attackable_distance = 0;
    }

    /// Marks the unit spent for the rest of the turn.
    pub fn exhaust(&mut self) {
        self.has_moved = true;
        self.has_attacked = true;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub(crate) fn mark_attackable(&mut self, distance: u32) {
        self.attackable_distance = distance;
    }

    pub(crate) fn clear_attackable(&mut self) {
        self.attackable_distance = 0;
    }
}
