//! Combat resolution system.
//!
//! Pure functions deciding who can be attacked and how much a hit deals.
//! The engine owns sequencing (strike, then counter) and applies the results
//! to state.
//!
//! # Core Functions
//!
//! - `enemies_in_range`: attackability scan for the active unit
//! - `damage_by_distance`: distance-tiered raw damage for a role
//! - `absorbed_damage`: armor reduction

pub mod damage;
pub mod range;
pub mod result;

pub use damage::{AttackRole, absorbed_damage, damage_by_distance};
pub use range::{AttackCandidate, enemies_in_range};
pub use result::{Casualty, ExchangeResult, StrikeResult};
