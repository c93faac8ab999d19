//! State setup errors.
//!
//! Raised while assembling a match: registering players and placing the
//! initial or purchased units.

use crate::env::TemplateId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PlayerId, Position, UnitId};

/// Errors that occur while registering players or placing units.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// A player with this id is already registered.
    #[error("player {0} is already registered")]
    DuplicatePlayer(PlayerId),

    /// The owning player was never registered.
    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerId),

    /// The template id does not resolve in the catalog.
    #[error("template {0} is not in the catalog")]
    UnknownTemplate(TemplateId),

    /// No tile exists at the requested position.
    #[error("no tile at {0}")]
    NoTile(Position),

    /// The position already holds a unit.
    #[error("position {position} is already occupied by unit {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: UnitId,
    },

    /// The position holds an obstacle.
    #[error("position {0} is blocked by an obstacle")]
    PositionBlocked(Position),

    /// A side was given a second boss unit.
    #[error("player {0} already has a boss unit")]
    SecondBoss(PlayerId),

    /// Template ids are 16-bit; the catalog cannot grow past that.
    #[error("a catalog holds at most {max} templates, got {len}")]
    CatalogFull { len: usize, max: usize },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        use SetupError::*;
        match self {
            DuplicatePlayer(_) | SecondBoss(_) => ErrorSeverity::Internal,
            CatalogFull { .. } => ErrorSeverity::Validation,
            UnknownPlayer(_) | UnknownTemplate(_) => ErrorSeverity::Validation,
            NoTile(_) | PositionOccupied { .. } | PositionBlocked(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            DuplicatePlayer(_) => "SETUP_DUPLICATE_PLAYER",
            UnknownPlayer(_) => "SETUP_UNKNOWN_PLAYER",
            UnknownTemplate(_) => "SETUP_UNKNOWN_TEMPLATE",
            NoTile(_) => "SETUP_NO_TILE",
            PositionOccupied { .. } => "SETUP_POSITION_OCCUPIED",
            PositionBlocked(_) => "SETUP_POSITION_BLOCKED",
            SecondBoss(_) => "SETUP_SECOND_BOSS",
            CatalogFull { .. } => "SETUP_CATALOG_FULL",
        }
    }
}
