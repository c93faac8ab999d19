use std::collections::BTreeMap;

use crate::env::{MapDimensions, MapLayout, Obstacle};

use super::{Position, Tile, UnitId};

/// Spatial index from grid position to whatever occupies it.
///
/// Unit entries are non-owning: the unit values live in their owner's roster
/// and the index only records which id stands where. At most one unit and one
/// obstacle can occupy a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridIndex {
    dimensions: MapDimensions,
    tiles: BTreeMap<Position, Tile>,
    units: BTreeMap<Position, UnitId>,
    obstacles: BTreeMap<Position, Obstacle>,
    rubble: BTreeMap<Position, u32>,
}

impl GridIndex {
    pub fn from_layout(layout: &MapLayout) -> Self {
        let tiles = layout
            .tiles
            .iter()
            .map(|&(position, flags)| (position, Tile::new(position, flags)))
            .collect::<BTreeMap<_, _>>();

        let mut obstacles = BTreeMap::new();
        for &(position, obstacle) in &layout.obstacles {
            if tiles.contains_key(&position) {
                obstacles.insert(position, obstacle);
            } else {
                tracing::warn!("obstacle at {} has no tile under it; skipped", position);
            }
        }

        Self {
            dimensions: layout.dimensions,
            tiles,
            units: BTreeMap::new(),
            obstacles,
            rubble: BTreeMap::new(),
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    /// Tiles in position order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.values_mut()
    }

    pub fn unit_id_at(&self, position: Position) -> Option<UnitId> {
        self.units.get(&position).copied()
    }

    pub fn obstacle_at(&self, position: Position) -> Option<Obstacle> {
        self.obstacles.get(&position).copied()
    }

    pub fn rubble_at(&self, position: Position) -> Option<u32> {
        self.rubble.get(&position).copied()
    }

    /// True when a tile exists and nothing stands on it.
    pub fn is_clear(&self, position: Position) -> bool {
        self.tiles.contains_key(&position)
            && !self.units.contains_key(&position)
            && !self.obstacles.contains_key(&position)
    }

    pub fn occupied_positions(&self) -> impl Iterator<Item = (Position, UnitId)> + '_ {
        self.units.iter().map(|(position, id)| (*position, *id))
    }

    pub fn obstacles(&self) -> impl Iterator<Item = (Position, Obstacle)> + '_ {
        self.obstacles.iter().map(|(position, obstacle)| (*position, *obstacle))
    }

    pub fn rubble(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.rubble.iter().map(|(position, value)| (*position, *value))
    }

    /// Records `unit` at `position`. Fails if the cell is missing or taken by
    /// another unit.
    pub(crate) fn place_unit(&mut self, position: Position, unit: UnitId) -> bool {
        if !self.tiles.contains_key(&position) {
            return false;
        }
        match self.units.get(&position) {
            Some(existing) => *existing == unit,
            None => {
                self.units.insert(position, unit);
                true
            }
        }
    }

    pub(crate) fn remove_unit(&mut self, position: Position, unit: UnitId) -> bool {
        if self.units.get(&position) == Some(&unit) {
            self.units.remove(&position);
            true
        } else {
            false
        }
    }

    pub(crate) fn move_unit(&mut self, from: Position, to: Position, unit: UnitId) -> bool {
        if !self.remove_unit(from, unit) {
            return false;
        }
        if self.place_unit(to, unit) {
            true
        } else {
            // Rollback on failure
            self.units.insert(from, unit);
            false
        }
    }

    /// Replaces a breakable obstacle with its rubble. Returns the rubble value.
    pub(crate) fn break_obstacle(&mut self, position: Position) -> Option<u32> {
        let obstacle = self.obstacles.get(&position).copied()?;
        if !obstacle.breakable {
            return None;
        }
        self.obstacles.remove(&position);
        if obstacle.rubble_value > 0 {
            *self.rubble.entry(position).or_default() += obstacle.rubble_value;
        }
        Some(obstacle.rubble_value)
    }

    pub(crate) fn take_rubble(&mut self, position: Position) -> Option<u32> {
        self.rubble.remove(&position)
    }

    pub(crate) fn clear_highlights(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.clear_highlight();
        }
    }

    pub(crate) fn reset_tiles(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.reset();
        }
    }
}
