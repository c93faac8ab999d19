//! Map data loader.
//!
//! Loads terrain and obstacles from map RON files. Unit placement is handled
//! separately via scenario files.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tactics_core::{MapDimensions, MapLayout, Obstacle, Position, TileFlags};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    /// Flag the whole border ring as edge tiles.
    #[serde(default)]
    border_edges: bool,
    #[serde(default)]
    edges: Vec<(i32, i32)>,
    #[serde(default)]
    roads: Vec<(i32, i32)>,
    #[serde(default)]
    obstacles: Vec<(i32, i32, Obstacle)>, // (x, y, obstacle)
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses a map. Every listed position must lie inside the dimensions.
    pub fn parse(content: &str) -> LoadResult<MapLayout> {
        let data: MapDataRon = ron::from_str(content).context("Failed to parse map RON")?;

        let (width, height) = data.dimensions;
        if width == 0 || height == 0 {
            anyhow::bail!("map dimensions must be non-zero, got {width}x{height}");
        }
        let dimensions = MapDimensions::new(width, height);
        let inside = |(x, y): (i32, i32), what: &str| -> LoadResult<Position> {
            let position = Position::new(x, y);
            if !dimensions.contains(position) {
                anyhow::bail!("{what} at {position} lies outside the {width}x{height} map");
            }
            Ok(position)
        };

        let mut layout = if data.border_edges {
            MapLayout::rectangle(dimensions)
        } else {
            MapLayout::open(dimensions)
        };

        for edge in data.edges {
            let position = inside(edge, "edge")?;
            if let Some((_, flags)) = layout.tiles.iter_mut().find(|(p, _)| *p == position) {
                flags.insert(TileFlags::EDGE);
            }
        }

        let roads = data
            .roads
            .into_iter()
            .map(|road| inside(road, "road"))
            .collect::<LoadResult<Vec<_>>>()?;
        layout = layout.with_road(roads);

        for (x, y, obstacle) in data.obstacles {
            let position = inside((x, y), "obstacle")?;
            if layout.obstacles.iter().any(|(p, _)| *p == position) {
                anyhow::bail!("two obstacles at {position}");
            }
            layout = layout.with_obstacle(position, obstacle);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_at(layout: &MapLayout, x: i32, y: i32) -> TileFlags {
        layout
            .tiles
            .iter()
            .find(|(p, _)| *p == Position::new(x, y))
            .map(|(_, flags)| *flags)
            .unwrap()
    }

    #[test]
    fn parses_terrain_and_obstacles() {
        let layout = MapLoader::parse(
            r#"(
                dimensions: (4, 3),
                edges: [(0, 1)],
                roads: [(1, 1), (2, 1)],
                obstacles: [
                    (3, 2, (breakable: true, rubble_value: 5)),
                    (0, 0, (breakable: false)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(layout.dimensions, MapDimensions::new(4, 3));
        assert_eq!(layout.tiles.len(), 12);
        assert_eq!(flags_at(&layout, 0, 1), TileFlags::EDGE);
        assert_eq!(flags_at(&layout, 1, 1), TileFlags::ROAD);
        assert_eq!(flags_at(&layout, 3, 0), TileFlags::empty());
        assert_eq!(
            layout.obstacles,
            vec![
                (Position::new(3, 2), Obstacle::breakable(5)),
                (Position::new(0, 0), Obstacle::solid()),
            ]
        );
    }

    #[test]
    fn border_edges_flag_the_ring() {
        let layout = MapLoader::parse("(dimensions: (3, 3), border_edges: true)").unwrap();
        assert_eq!(flags_at(&layout, 0, 0), TileFlags::EDGE);
        assert_eq!(flags_at(&layout, 1, 1), TileFlags::empty());
    }

    #[test]
    fn rejects_positions_outside_the_map() {
        let error = MapLoader::parse("(dimensions: (2, 2), roads: [(2, 0)])").unwrap_err();
        assert!(error.to_string().contains("outside"));
    }
}
