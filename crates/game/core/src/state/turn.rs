use crate::env::TemplateId;
use crate::movement::{GameOverSequence, MoveSequence};

use super::{PlayerId, Position, UnitId};

/// What the player is currently allowed to do.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputMode {
    /// Select a unit, open the store, or end the turn.
    #[default]
    Idle,
    /// A friendly unit is selected: move it, attack, reselect, or end the turn.
    UnitActive,
    /// Store dialog open; board input is suspended.
    Buying,
    /// A bought unit must be placed before anything else happens.
    Placing,
    /// Terminal.
    GameOver,
}

impl InputMode {
    /// Whether pointer/directional focus and clicks are processed.
    pub fn accepts_input(self) -> bool {
        matches!(
            self,
            InputMode::Idle | InputMode::UnitActive | InputMode::Placing
        )
    }

    pub fn can_end_turn(self) -> bool {
        matches!(self, InputMode::Idle | InputMode::UnitActive)
    }
}

/// Which device last moved focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputSource {
    #[default]
    Pointer,
    Directional,
}

/// The tile and unit a click would act upon. Independent of selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Focus {
    pub tile: Option<Position>,
    pub unit: Option<UnitId>,
    /// Pointer movement only claims focus while this is set; directional input
    /// clears it until the pointer re-enters the focused tile.
    pub pointer_owns: bool,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            tile: None,
            unit: None,
            pointer_owns: true,
        }
    }
}

/// An open store dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreSession {
    /// Spawn position chosen when the store was opened; `None` defers the
    /// choice to the placing step.
    pub target: Option<Position>,
    /// Index into the offer list currently shown.
    pub cursor: usize,
}

/// Authoritative turn bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnState {
    pub current_player: PlayerId,
    /// Set once the opening income has been granted.
    pub started: bool,
    /// Starts at 1 and increments on every end of turn.
    pub turn_number: u32,
    pub mode: InputMode,
    pub selected: Option<UnitId>,
    /// Enemies currently flagged attackable by the active unit.
    pub attack_targets: Vec<UnitId>,
    pub focus: Focus,
    pub store: Option<StoreSession>,
    pub pending_placement: Option<TemplateId>,
    pub motion: Option<MoveSequence>,
    pub game_over: Option<GameOverSequence>,
    pub winner: Option<PlayerId>,
}

impl TurnState {
    pub fn new(current_player: PlayerId) -> Self {
        Self {
            current_player,
            started: false,
            turn_number: 1,
            mode: InputMode::Idle,
            selected: None,
            attack_targets: Vec::new(),
            focus: Focus::default(),
            store: None,
            pending_placement: None,
            motion: None,
            game_over: None,
            winner: None,
        }
    }

    pub fn is_input_accepted(&self) -> bool {
        self.mode.accepts_input()
    }

    pub fn is_moving(&self, unit: UnitId) -> bool {
        self.motion.as_ref().is_some_and(|motion| motion.unit() == unit)
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(PlayerId::Player1)
    }
}
