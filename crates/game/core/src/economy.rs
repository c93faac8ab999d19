//! Currency rules: per-turn income, store offers, and where bought units may
//! be placed.

use crate::env::{CatalogOracle, TemplateId};
use crate::state::{GameState, LayerFilter, Occupant, PlayerId, Position, SpatialQuery};

/// Currency `player` earns at the start of their turn: the sum of every owned
/// unit's income capability.
pub fn income_for<C>(state: &GameState, catalog: &C, player: PlayerId) -> u32
where
    C: CatalogOracle + ?Sized,
{
    let Some(owner) = state.player(player) else {
        return 0;
    };
    owner
        .units()
        .filter_map(|unit| catalog.template(unit.template))
        .map(|template| template.capabilities.income_per_turn)
        .sum()
}

/// Whether `player` may place a new unit at `position`.
///
/// The tile must exist and be free of obstacles and units, and be either a
/// map-edge tile or within the spawn radius of one of the player's units.
pub fn is_spawn_eligible<C>(
    state: &GameState,
    catalog: &C,
    position: Position,
    player: PlayerId,
) -> bool
where
    C: CatalogOracle + ?Sized,
{
    let Some(tile) = state.grid.tile(position) else {
        return false;
    };
    if !state.grid.is_clear(position) {
        return false;
    }
    if tile.is_edge() {
        return true;
    }

    let widest = catalog
        .templates()
        .map(|(_, template)| template.capabilities.spawn_radius)
        .max()
        .unwrap_or(0);
    if widest == 0 {
        return false;
    }

    state
        .occupants_near(position, widest, LayerFilter::UNITS)
        .into_iter()
        .filter_map(|occupant| match occupant {
            Occupant::Unit { id, .. } => state.unit(id),
            _ => None,
        })
        .filter(|unit| unit.owner == player)
        .any(|unit| {
            catalog.template(unit.template).is_some_and(|template| {
                let radius = template.capabilities.spawn_radius;
                radius > 0 && unit.position.manhattan(position) <= radius
            })
        })
}

/// Whether `player` has at least one tile a bought unit could be placed on.
pub fn has_spawn_tile<C>(state: &GameState, catalog: &C, player: PlayerId) -> bool
where
    C: CatalogOracle + ?Sized,
{
    state
        .grid
        .tiles()
        .any(|tile| is_spawn_eligible(state, catalog, tile.position(), player))
}

/// One entry of the store as shown to a buyer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOffer {
    pub template: TemplateId,
    pub name: String,
    pub description: String,
    pub price: u32,
    /// Whether the buyer can currently afford it.
    pub enabled: bool,
}

/// The store catalog priced against `currency`, in catalog order.
pub fn store_offers<C>(catalog: &C, currency: u32) -> Vec<StoreOffer>
where
    C: CatalogOracle + ?Sized,
{
    catalog
        .templates()
        .filter(|(_, template)| template.purchasable)
        .map(|(id, template)| StoreOffer {
            template: id,
            name: template.name.clone(),
            description: template.description.clone(),
            price: template.price,
            enabled: template.price <= currency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        MapDimensions, MapLayout, Obstacle, UnitCapabilities, UnitCatalog, UnitTemplate,
    };
    use crate::state::PlayerState;

    fn catalog() -> UnitCatalog {
        let mut catalog = UnitCatalog::default();
        catalog.push(
            UnitTemplate::builder("Farm")
                .price(30)
                .capabilities(UnitCapabilities {
                    income_per_turn: 5,
                    spawn_radius: 1,
                    ..UnitCapabilities::default()
                })
                .build(),
        ).unwrap();
        catalog.push(UnitTemplate::builder("Soldier").price(10).build()).unwrap();
        catalog.push(UnitTemplate::builder("King").boss().build()).unwrap();
        catalog
    }

    fn state(catalog: &UnitCatalog) -> GameState {
        let layout = MapLayout::rectangle(MapDimensions::new(7, 7))
            .with_obstacle(Position::new(0, 3), Obstacle::solid());
        let mut state = GameState::new(&layout, PlayerId::Player1);
        state
            .register_player(PlayerState::new(PlayerId::Player1, 20, 0))
            .unwrap();
        state
            .register_player(PlayerState::new(PlayerId::Player2, 0, 0))
            .unwrap();
        state
            .spawn_unit(catalog, PlayerId::Player1, TemplateId(0), Position::new(3, 3))
            .unwrap();
        state
            .spawn_unit(catalog, PlayerId::Player1, TemplateId(0), Position::new(2, 3))
            .unwrap();
        state
            .spawn_unit(catalog, PlayerId::Player1, TemplateId(1), Position::new(4, 4))
            .unwrap();
        state
    }

    #[test]
    fn income_sums_generating_units() {
        let catalog = catalog();
        let state = state(&catalog);
        assert_eq!(income_for(&state, &catalog, PlayerId::Player1), 10);
        assert_eq!(income_for(&state, &catalog, PlayerId::Player2), 0);
    }

    #[test]
    fn spawn_eligibility_edges_and_radius() {
        let catalog = catalog();
        let state = state(&catalog);

        // Edge tile.
        assert!(is_spawn_eligible(&state, &catalog, Position::new(0, 0), PlayerId::Player2));
        // Edge tile with an obstacle.
        assert!(!is_spawn_eligible(&state, &catalog, Position::new(0, 3), PlayerId::Player1));
        // Inner tile next to a farm.
        assert!(is_spawn_eligible(&state, &catalog, Position::new(3, 2), PlayerId::Player1));
        // Same tile for the other side.
        assert!(!is_spawn_eligible(&state, &catalog, Position::new(3, 2), PlayerId::Player2));
        // Occupied tile inside the radius.
        assert!(!is_spawn_eligible(&state, &catalog, Position::new(2, 3), PlayerId::Player1));
        // Inner tile only near a soldier, which has no spawn radius.
        assert!(!is_spawn_eligible(&state, &catalog, Position::new(5, 4), PlayerId::Player1));
    }

    #[test]
    fn offers_are_enabled_by_price() {
        let catalog = catalog();
        let offers = store_offers(&catalog, 20);
        let summary: Vec<_> = offers.iter().map(|o| (o.name.as_str(), o.enabled)).collect();
        assert_eq!(summary, vec![("Farm", false), ("Soldier", true)]);
    }
}
