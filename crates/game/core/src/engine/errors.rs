//! Errors surfaced by engine commands.

use crate::env::TemplateId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{InputMode, PlayerId, Position, SetupError, UnitId};

/// Why a command was refused. The state is untouched whenever one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    // ------------------------------------------------------------------
    // Illegal actions
    // ------------------------------------------------------------------
    /// Board input is suspended in this mode.
    #[error("input is not accepted in {0} mode")]
    InputNotAccepted(InputMode),

    /// The command has no meaning in this mode.
    #[error("{command} is not available in {mode} mode")]
    WrongMode {
        command: &'static str,
        mode: InputMode,
    },

    /// A pointer click arrived while directional input owns focus.
    #[error("pointer does not own focus")]
    PointerLacksFocus,

    /// Directional input must move along exactly one axis.
    #[error("direction ({dx}, {dy}) is not cardinal")]
    NotCardinal { dx: i32, dy: i32 },

    #[error("nothing is focused")]
    NothingFocused,

    #[error("no unit is selected")]
    NothingSelected,

    #[error("unit {unit} belongs to {owner}, not the current player")]
    NotOwnUnit { unit: UnitId, owner: PlayerId },

    #[error("unit {0} is still moving")]
    UnitInMotion(UnitId),

    #[error("a move is still in flight")]
    MoveInFlight,

    #[error("unit {0} has already attacked this turn")]
    AlreadyAttacked(UnitId),

    #[error("unit {0} has already moved this turn")]
    AlreadyMoved(UnitId),

    #[error("unit {0} is not attackable")]
    NotAttackable(UnitId),

    #[error("position {0} is not reachable")]
    Unreachable(Position),

    #[error("position {0} is not an eligible spawn tile")]
    NotSpawnEligible(Position),

    #[error("player {0} has no tile to place a unit on")]
    NoSpawnTile(PlayerId),

    #[error("price {price} exceeds currency {currency}")]
    InsufficientFunds { price: u32, currency: u32 },

    #[error("the store has nothing for sale")]
    StoreEmpty,

    #[error("template {0} is not for sale")]
    NotPurchasable(TemplateId),

    #[error("player {0} has no units")]
    NoUnits(PlayerId),

    #[error("the match has already started")]
    MatchAlreadyStarted,

    // ------------------------------------------------------------------
    // Invalid references
    // ------------------------------------------------------------------
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("template {0} not found")]
    TemplateNotFound(TemplateId),

    #[error("no tile at {0}")]
    NoTile(Position),

    // ------------------------------------------------------------------
    // Inconsistencies
    // ------------------------------------------------------------------
    /// Placing a unit failed after every precondition was checked.
    #[error("spawn failed: {0}")]
    Spawn(#[from] SetupError),
}

impl CommandError {
    /// Emits the diagnostic for a refused `command`.
    pub(crate) fn log(&self, command: &'static str) {
        match self.severity() {
            ErrorSeverity::Recoverable => {
                tracing::debug!(command, code = self.error_code(), "rejected: {}", self)
            }
            ErrorSeverity::Validation => {
                tracing::warn!(command, code = self.error_code(), "invalid reference: {}", self)
            }
            ErrorSeverity::Internal => {
                tracing::error!(command, code = self.error_code(), "{}", self)
            }
        }
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            UnitNotFound(_) | PlayerNotFound(_) | TemplateNotFound(_) | NoTile(_) => {
                ErrorSeverity::Validation
            }
            Spawn(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            InputNotAccepted(_) => "COMMAND_INPUT_NOT_ACCEPTED",
            WrongMode { .. } => "COMMAND_WRONG_MODE",
            PointerLacksFocus => "COMMAND_POINTER_LACKS_FOCUS",
            NotCardinal { .. } => "COMMAND_NOT_CARDINAL",
            NothingFocused => "COMMAND_NOTHING_FOCUSED",
            NothingSelected => "COMMAND_NOTHING_SELECTED",
            NotOwnUnit { .. } => "COMMAND_NOT_OWN_UNIT",
            UnitInMotion(_) => "COMMAND_UNIT_IN_MOTION",
            MoveInFlight => "COMMAND_MOVE_IN_FLIGHT",
            AlreadyAttacked(_) => "COMMAND_ALREADY_ATTACKED",
            AlreadyMoved(_) => "COMMAND_ALREADY_MOVED",
            NotAttackable(_) => "COMMAND_NOT_ATTACKABLE",
            Unreachable(_) => "COMMAND_UNREACHABLE",
            NotSpawnEligible(_) => "COMMAND_NOT_SPAWN_ELIGIBLE",
            NoSpawnTile(_) => "COMMAND_NO_SPAWN_TILE",
            InsufficientFunds { .. } => "COMMAND_INSUFFICIENT_FUNDS",
            StoreEmpty => "COMMAND_STORE_EMPTY",
            NotPurchasable(_) => "COMMAND_NOT_PURCHASABLE",
            NoUnits(_) => "COMMAND_NO_UNITS",
            MatchAlreadyStarted => "COMMAND_MATCH_ALREADY_STARTED",
            UnitNotFound(_) => "COMMAND_UNIT_NOT_FOUND",
            PlayerNotFound(_) => "COMMAND_PLAYER_NOT_FOUND",
            TemplateNotFound(_) => "COMMAND_TEMPLATE_NOT_FOUND",
            NoTile(_) => "COMMAND_NO_TILE",
            Spawn(_) => "COMMAND_SPAWN_FAILED",
        }
    }
}
