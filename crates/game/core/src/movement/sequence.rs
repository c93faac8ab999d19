//! Time-deferred sequences advanced by the host's frame loop.
//!
//! Each sequence is a small state object with an `advance(dt)` step. Once
//! started it always runs to completion; nothing cancels it.

use crate::state::{PlayerId, Position, UnitId};

/// A unit sliding to its destination, first along x, then along y.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveSequence {
    unit: UnitId,
    from: Position,
    to: Position,
    /// Tiles per second.
    speed: f32,
    travelled: f32,
}

impl MoveSequence {
    pub fn new(unit: UnitId, from: Position, to: Position, speed: f32) -> Self {
        Self {
            unit,
            from,
            to,
            speed,
            travelled: 0.0,
        }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    fn length(&self) -> f32 {
        self.from.manhattan(self.to) as f32
    }

    pub fn is_done(&self) -> bool {
        self.travelled >= self.length()
    }

    /// Moves the display position forward by `dt` seconds. Returns `true`
    /// once the destination is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        let length = self.length();
        if self.speed <= 0.0 || !self.speed.is_finite() || !dt.is_finite() {
            self.travelled = length;
        } else {
            self.travelled = (self.travelled + self.speed * dt.max(0.0)).min(length);
        }
        self.is_done()
    }

    /// Interpolated position for rendering, in tile units.
    pub fn display_position(&self) -> (f32, f32) {
        let dx = (self.to.x - self.from.x) as f32;
        let dy = (self.to.y - self.from.y) as f32;
        let along_x = self.travelled.min(dx.abs());
        let along_y = (self.travelled - along_x).clamp(0.0, dy.abs());

        (
            self.from.x as f32 + along_x * dx.signum(),
            self.from.y as f32 + along_y * dy.signum(),
        )
    }
}

/// Delay between the winning blow and the terminal presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct GameOverSequence {
    winner: PlayerId,
    delay: f32,
    elapsed: f32,
    fired: bool,
}

impl GameOverSequence {
    pub fn new(winner: PlayerId, delay: f32) -> Self {
        Self {
            winner,
            delay: delay.max(0.0),
            elapsed: 0.0,
            fired: false,
        }
    }

    pub fn winner(&self) -> PlayerId {
        self.winner
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` exactly once: on the step that crosses the delay.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.delay {
            self.fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_along_x_before_y() {
        let mut motion = MoveSequence::new(
            UnitId(1),
            Position::new(0, 0),
            Position::new(2, -1),
            1.0,
        );

        assert!(!motion.advance(1.5));
        assert_eq!(motion.display_position(), (1.5, 0.0));
        assert!(!motion.advance(1.0));
        assert_eq!(motion.display_position(), (2.0, -0.5));
        assert!(motion.advance(5.0));
        assert_eq!(motion.display_position(), (2.0, -1.0));
    }

    #[test]
    fn non_positive_speed_completes_immediately() {
        let mut motion =
            MoveSequence::new(UnitId(1), Position::ORIGIN, Position::new(0, 3), 0.0);
        assert!(motion.advance(0.0));
    }

    #[test]
    fn game_over_fires_once_after_delay() {
        let mut sequence = GameOverSequence::new(PlayerId::Player2, 1.0);
        assert!(!sequence.advance(0.6));
        assert!(sequence.advance(0.6));
        assert!(!sequence.advance(10.0));
        assert!(sequence.has_fired());
    }
}
