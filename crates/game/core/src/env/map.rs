use bitflags::bitflags;

use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// True for positions on the outermost ring of the map.
    pub fn is_border(&self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.y == 0
                || position.x == self.width as i32 - 1
                || position.y == self.height as i32 - 1)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}

bitflags! {
    /// Static terrain classification of a tile.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// Part of the road network; enables a unit's road bonus.
        const ROAD = 1 << 0;
        /// Designated map-edge tile where new units may always be spawned.
        const EDGE = 1 << 1;
    }
}

/// Obstacle sitting on a tile. Obstacles are never valid destinations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub breakable: bool,
    /// Value of the rubble left behind when the obstacle is broken.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rubble_value: u32,
}

impl Obstacle {
    pub const fn solid() -> Self {
        Self {
            breakable: false,
            rubble_value: 0,
        }
    }

    pub const fn breakable(rubble_value: u32) -> Self {
        Self {
            breakable: true,
            rubble_value,
        }
    }
}

/// Static layout of the battlefield: which cells exist and what is on them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    pub dimensions: MapDimensions,
    /// Terrain flags for every cell of the map, keyed by position.
    pub tiles: Vec<(Position, TileFlags)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<(Position, Obstacle)>,
}

impl MapLayout {
    /// Rectangular map whose border ring is flagged as edge tiles.
    pub fn rectangle(dimensions: MapDimensions) -> Self {
        let tiles = dimensions
            .positions()
            .map(|position| {
                let flags = if dimensions.is_border(position) {
                    TileFlags::EDGE
                } else {
                    TileFlags::empty()
                };
                (position, flags)
            })
            .collect();

        Self {
            dimensions,
            tiles,
            obstacles: Vec::new(),
        }
    }

    /// Rectangular map without any edge designation.
    pub fn open(dimensions: MapDimensions) -> Self {
        let tiles = dimensions
            .positions()
            .map(|position| (position, TileFlags::empty()))
            .collect();

        Self {
            dimensions,
            tiles,
            obstacles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_road(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        for position in positions {
            if let Some((_, flags)) = self.tiles.iter_mut().find(|(p, _)| *p == position) {
                flags.insert(TileFlags::ROAD);
            }
        }
        self
    }

    #[must_use]
    pub fn with_obstacle(mut self, position: Position, obstacle: Obstacle) -> Self {
        self.obstacles.push((position, obstacle));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_flags_only_the_border() {
        let layout = MapLayout::rectangle(MapDimensions::new(3, 3));
        let edges = layout
            .tiles
            .iter()
            .filter(|(_, flags)| flags.contains(TileFlags::EDGE))
            .count();
        assert_eq!(layout.tiles.len(), 9);
        assert_eq!(edges, 8);
    }

    #[test]
    fn roads_are_added_to_existing_cells_only() {
        let layout = MapLayout::open(MapDimensions::new(2, 1))
            .with_road([Position::new(1, 0), Position::new(5, 5)]);
        let roads: Vec<_> = layout
            .tiles
            .iter()
            .filter(|(_, flags)| flags.contains(TileFlags::ROAD))
            .map(|(p, _)| *p)
            .collect();
        assert_eq!(roads, vec![Position::new(1, 0)]);
    }
}
