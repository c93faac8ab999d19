//! Unit movement: where a unit may go this turn, and the timed slide that
//! carries it there.

pub mod reach;
pub mod sequence;

pub use reach::{ReachableTile, is_free_destination, reachable_tiles};
pub use sequence::{GameOverSequence, MoveSequence};
