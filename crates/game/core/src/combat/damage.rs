//! Damage calculation and application.

use crate::env::UnitTemplate;

// ============================================================================
// Attack Role
// ============================================================================

/// Whether a hit is the opening strike or the defender striking back.
///
/// Counter-attacks fall off faster with distance than initiated attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRole {
    Initiator,
    Counter,
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Raw damage a unit of `template` deals at `distance`.
///
/// # Formula
///
/// ```text
/// d == 1                         -> melee
/// d >  1, ranged == 0            -> 0
/// d >  1, initiator              -> ranged
/// d >  1, counter, d <= counter  -> ranged
/// d >  1, counter, d >  counter  -> max(round(ranged / 2), 1)
/// ```
///
/// Distance 0 never happens between two units and yields 0.
pub fn damage_by_distance(template: &UnitTemplate, distance: u32, role: AttackRole) -> u32 {
    match distance {
        0 => 0,
        1 => template.melee_damage,
        _ if template.ranged_damage == 0 => 0,
        _ => match role {
            AttackRole::Initiator => template.ranged_damage,
            AttackRole::Counter if distance > template.counter_range => {
                halved_rounded(template.ranged_damage).max(1)
            }
            AttackRole::Counter => template.ranged_damage,
        },
    }
}

/// `round(value * 0.5)` with halves rounded away from zero.
fn halved_rounded(value: u32) -> u32 {
    value / 2 + value % 2
}

/// Damage left after armor: `max(raw - armor, 0)`.
pub fn absorbed_damage(raw: u32, armor: u32) -> u32 {
    raw.saturating_sub(armor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archer() -> UnitTemplate {
        UnitTemplate::builder("Archer").damage(3, 5, 2).build()
    }

    #[test]
    fn melee_at_distance_one_for_both_roles() {
        let template = archer();
        assert_eq!(damage_by_distance(&template, 1, AttackRole::Initiator), 3);
        assert_eq!(damage_by_distance(&template, 1, AttackRole::Counter), 3);
    }

    #[test]
    fn initiator_keeps_full_ranged_damage_at_any_distance() {
        let template = archer();
        assert_eq!(damage_by_distance(&template, 2, AttackRole::Initiator), 5);
        assert_eq!(damage_by_distance(&template, 6, AttackRole::Initiator), 5);
    }

    #[test]
    fn counter_halves_beyond_counter_range() {
        let template = archer();
        assert_eq!(damage_by_distance(&template, 2, AttackRole::Counter), 5);
        // round(2.5) = 3
        assert_eq!(damage_by_distance(&template, 3, AttackRole::Counter), 3);
    }

    #[test]
    fn halved_counter_never_drops_below_one() {
        let template = UnitTemplate::builder("Slinger").damage(1, 1, 1).build();
        assert_eq!(damage_by_distance(&template, 2, AttackRole::Counter), 1);
    }

    #[test]
    fn no_ranged_damage_means_no_ranged_attack() {
        let template = UnitTemplate::builder("Brute").damage(4, 0, 1).build();
        assert_eq!(damage_by_distance(&template, 2, AttackRole::Initiator), 0);
        assert_eq!(damage_by_distance(&template, 2, AttackRole::Counter), 0);
    }

    #[test]
    fn armor_reduces_but_never_inverts_damage() {
        assert_eq!(absorbed_damage(3, 1), 2);
        assert_eq!(absorbed_damage(1, 4), 0);
    }
}
