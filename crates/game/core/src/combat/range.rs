//! Attack range resolution.

use crate::env::UnitTemplate;
use crate::state::{GameState, Unit, UnitId};

/// An enemy the active unit could strike, and from how far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackCandidate {
    pub target: UnitId,
    pub distance: u32,
}

/// Every enemy of `attacker` within its attack range, in unit id order.
///
/// A unit that already attacked this turn has no candidates.
pub fn enemies_in_range(
    state: &GameState,
    attacker: &Unit,
    template: &UnitTemplate,
) -> Vec<AttackCandidate> {
    if attacker.has_attacked {
        return Vec::new();
    }

    let mut candidates: Vec<_> = state
        .enemies_of(attacker.owner)
        .filter_map(|enemy| {
            let distance = attacker.position.manhattan(enemy.position);
            (distance > 0 && distance <= template.attack_range).then_some(AttackCandidate {
                target: enemy.id,
                distance,
            })
        })
        .collect();
    candidates.sort_by_key(|candidate| candidate.target);
    candidates
}
