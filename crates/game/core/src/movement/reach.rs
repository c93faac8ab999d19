//! Tile reachability for a single turn of movement.
//!
//! Reachability is range-under-Manhattan-distance, not a path search: an
//! obstacle only disqualifies its own tile and never shadows the tiles
//! behind it.

use crate::env::UnitTemplate;
use crate::state::{GameState, Position, Unit};

/// A destination the unit may move to this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReachableTile {
    pub position: Position,
    /// Manhattan distance from the unit, shown on the highlighted tile.
    pub distance: u32,
}

/// Computes every tile `unit` can move to this turn, in tile order.
///
/// A tile qualifies when it is a free destination and either
/// - `d <= travel_range`, or
/// - `d <= travel_range + road_bonus`, the unit stands on a road, and the tile
///   is a road.
///
/// A unit that already moved gets nothing. O(tiles).
pub fn reachable_tiles(
    state: &GameState,
    unit: &Unit,
    template: &UnitTemplate,
) -> Vec<ReachableTile> {
    if unit.has_moved {
        return Vec::new();
    }

    let origin = unit.position;
    let on_road = state
        .grid
        .tile(origin)
        .is_some_and(|tile| tile.has_road());
    let base = template.travel_range;
    let extended = base.saturating_add(template.road_bonus);

    state
        .grid
        .tiles()
        .filter_map(|tile| {
            let position = tile.position();
            let distance = origin.manhattan(position);
            if distance > extended || !is_free_destination(state, position, template) {
                return None;
            }

            let within_base = distance <= base;
            let by_road = template.road_bonus > 0 && on_road && tile.has_road();
            (within_base || by_road).then_some(ReachableTile { position, distance })
        })
        .collect()
}

/// No unit on the tile and no obstacle, except that obstacle breakers treat
/// breakable obstacles as open ground.
pub fn is_free_destination(
    state: &GameState,
    position: Position,
    template: &UnitTemplate,
) -> bool {
    if state.grid.tile(position).is_none() || state.grid.unit_id_at(position).is_some() {
        return false;
    }
    match state.grid.obstacle_at(position) {
        None => true,
        Some(obstacle) => obstacle.breakable && template.capabilities.breaks_obstacles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        CatalogOracle, MapDimensions, MapLayout, Obstacle, TemplateId, UnitCapabilities,
        UnitCatalog,
    };
    use crate::state::{PlayerId, PlayerState, SpatialQuery};

    fn setup(
        layout: MapLayout,
        template: UnitTemplate,
        at: Position,
    ) -> (GameState, UnitCatalog) {
        let mut catalog = UnitCatalog::default();
        catalog.push(template).unwrap();
        let mut state = GameState::new(&layout, PlayerId::Player1);
        state
            .register_player(PlayerState::new(PlayerId::Player1, 0, 0))
            .unwrap();
        state
            .spawn_unit(&catalog, PlayerId::Player1, TemplateId(0), at)
            .unwrap();
        (state, catalog)
    }

    fn reach_of(state: &GameState, catalog: &UnitCatalog, at: Position) -> Vec<ReachableTile> {
        let unit = state.unit_at(at).unwrap();
        let template = catalog.template(unit.template).unwrap();
        reachable_tiles(state, unit, template)
    }

    #[test]
    fn extreme_ranges_reach_the_whole_board() {
        let layout = MapLayout::open(MapDimensions::new(3, 1)).with_road([
            Position::ORIGIN,
            Position::new(1, 0),
        ]);
        let template = UnitTemplate::builder("Comet").travel(u32::MAX, u32::MAX).build();
        let (state, catalog) = setup(layout, template, Position::ORIGIN);

        let reach = reach_of(&state, &catalog, Position::ORIGIN);
        assert_eq!(reach.len(), 2);
    }

    #[test]
    fn obstacles_do_not_shadow_tiles_behind_them() {
        let layout = MapLayout::open(MapDimensions::new(4, 1))
            .with_obstacle(Position::new(1, 0), Obstacle::solid());
        let template = UnitTemplate::builder("Scout").travel(2, 0).build();
        let (state, catalog) = setup(layout, template, Position::ORIGIN);

        let reach: Vec<_> = reach_of(&state, &catalog, Position::ORIGIN)
            .into_iter()
            .map(|tile| tile.position)
            .collect();
        assert_eq!(reach, vec![Position::new(2, 0)]);
    }

    #[test]
    fn road_bonus_needs_road_at_both_ends() {
        let road = [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(3, 0),
        ];
        let layout = MapLayout::open(MapDimensions::new(4, 2)).with_road(road);
        let template = UnitTemplate::builder("Cart").travel(1, 2).build();
        let (state, catalog) = setup(layout, template, Position::ORIGIN);

        let reach = reach_of(&state, &catalog, Position::ORIGIN);
        let far_road = reach
            .iter()
            .find(|tile| tile.position == Position::new(3, 0))
            .copied();
        assert_eq!(
            far_road,
            Some(ReachableTile {
                position: Position::new(3, 0),
                distance: 3
            })
        );
        // Off-road tiles are limited to the base range.
        assert!(
            reach
                .iter()
                .all(|tile| tile.position.y == 0 || tile.distance <= 1)
        );
    }

    #[test]
    fn road_bonus_is_void_when_starting_off_road() {
        let layout = MapLayout::open(MapDimensions::new(4, 2))
            .with_road([Position::new(2, 0), Position::new(3, 0)]);
        let template = UnitTemplate::builder("Cart").travel(1, 2).build();
        let (state, catalog) = setup(layout, template, Position::ORIGIN);

        assert!(
            reach_of(&state, &catalog, Position::ORIGIN)
                .iter()
                .all(|tile| tile.distance <= 1)
        );
    }

    #[test]
    fn breakers_may_target_breakable_obstacles() {
        let layout = MapLayout::open(MapDimensions::new(3, 1))
            .with_obstacle(Position::new(1, 0), Obstacle::breakable(2))
            .with_obstacle(Position::new(2, 0), Obstacle::solid());
        let template = UnitTemplate::builder("Sapper")
            .travel(2, 0)
            .capabilities(UnitCapabilities {
                breaks_obstacles: true,
                ..UnitCapabilities::default()
            })
            .build();
        let (state, catalog) = setup(layout, template, Position::ORIGIN);

        let reach: Vec<_> = reach_of(&state, &catalog, Position::ORIGIN)
            .into_iter()
            .map(|tile| tile.position)
            .collect();
        assert_eq!(reach, vec![Position::new(1, 0)]);
    }

    #[test]
    fn moved_units_reach_nothing() {
        let layout = MapLayout::open(MapDimensions::new(3, 3));
        let template = UnitTemplate::builder("Scout").travel(2, 0).build();
        let (mut state, catalog) = setup(layout, template, Position::ORIGIN);
        let id = state.units().next().unwrap().id;
        state.unit_mut(id).unwrap().has_moved = true;

        assert!(reach_of(&state, &catalog, Position::ORIGIN).is_empty());
    }
}
