use crate::state::PlayerId;

/// Tunable parameters of a match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side that takes the first turn.
    pub starting_player: PlayerId,
    /// Display speed of a sliding unit, in tiles per second.
    pub move_speed: f32,
    /// Seconds between a boss dying and the terminal presentation event.
    pub game_over_delay: f32,
    /// Whether a freshly bought unit may move and attack on the turn it was bought.
    pub purchased_units_ready: bool,
}

impl GameConfig {
    pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
    pub const DEFAULT_GAME_OVER_DELAY: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            starting_player: PlayerId::Player1,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            game_over_delay: Self::DEFAULT_GAME_OVER_DELAY,
            purchased_units_ready: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
