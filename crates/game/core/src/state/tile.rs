use crate::env::TileFlags;

use super::Position;

/// One cell of the battlefield.
///
/// Terrain flags are fixed at load time; the remaining fields are interaction
/// state owned by the engine and reset on every selection change and at the
/// end of each turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    position: Position,
    flags: TileFlags,
    highlighted: bool,
    travel_distance: Option<u32>,
    focused: bool,
    spawn_eligible: bool,
}

impl Tile {
    pub fn new(position: Position, flags: TileFlags) -> Self {
        Self {
            position,
            flags,
            highlighted: false,
            travel_distance: None,
            focused: false,
            spawn_eligible: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    pub fn has_road(&self) -> bool {
        self.flags.contains(TileFlags::ROAD)
    }

    pub fn is_edge(&self) -> bool {
        self.flags.contains(TileFlags::EDGE)
    }

    /// Reachable by the selected unit this turn.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Distance shown on a highlighted tile.
    pub fn travel_distance(&self) -> Option<u32> {
        self.travel_distance
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_spawn_eligible(&self) -> bool {
        self.spawn_eligible
    }

    pub(crate) fn highlight(&mut self, distance: u32) {
        self.highlighted = true;
        self.travel_distance = Some(distance);
    }

    pub(crate) fn clear_highlight(&mut self) {
        self.highlighted = false;
        self.travel_distance = None;
    }

    /// Clears reachability and spawn markers. Focus is left alone.
    pub(crate) fn reset(&mut self) {
        self.highlighted = false;
        self.travel_distance = None;
        self.spawn_eligible = false;
    }

    pub(crate) fn gain_focus(&mut self, spawn_eligible: bool) {
        self.focused = true;
        self.spawn_eligible = spawn_eligible;
    }

    pub(crate) fn lose_focus(&mut self) {
        self.focused = false;
        self.spawn_eligible = false;
    }
}
