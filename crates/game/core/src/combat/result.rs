//! Combat result types.

use crate::state::{HitReport, Position, UnitId};

use super::AttackRole;

/// One hit that landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeResult {
    pub role: AttackRole,
    pub attacker: UnitId,
    pub target: UnitId,
    pub distance: u32,
    /// Damage before armor.
    pub raw: u32,
    pub report: HitReport,
}

/// A unit that died during an exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Casualty {
    pub unit: UnitId,
    pub position: Position,
    pub was_boss: bool,
}

/// Full record of an attack and the counter-attack it provoked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeResult {
    pub strike: Option<StrikeResult>,
    pub counter: Option<StrikeResult>,
    pub casualties: Vec<Casualty>,
}

impl ExchangeResult {
    pub fn died(&self, unit: UnitId) -> bool {
        self.casualties.iter().any(|casualty| casualty.unit == unit)
    }
}
