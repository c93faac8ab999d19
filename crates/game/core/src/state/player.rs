use std::collections::BTreeMap;

use super::{PlayerId, Unit, UnitId};

/// One side of the match and the units it owns.
///
/// Currency and health are only written through the engine so that every
/// change produces a notification for the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    id: PlayerId,
    currency: u32,
    health: u32,
    units: BTreeMap<UnitId, Unit>,
}

impl PlayerState {
    pub fn new(id: PlayerId, currency: u32, health: u32) -> Self {
        Self {
            id,
            currency,
            health,
            units: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn currency(&self) -> u32 {
        self.currency
    }

    /// Mirrors the health of this side's boss unit, if it has one.
    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn can_afford(&self, price: u32) -> bool {
        price <= self.currency
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Owned units in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut()
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub(crate) fn set_currency(&mut self, currency: u32) {
        self.currency = currency;
    }

    pub(crate) fn set_health(&mut self, health: u32) {
        self.health = health;
    }

    pub(crate) fn adopt(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    pub(crate) fn release(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }
}
