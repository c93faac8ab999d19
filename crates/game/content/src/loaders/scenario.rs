//! Scenario loader.
//!
//! A scenario names the map to play on, the starting purse of each side, and
//! the units already on the board. Units refer to templates by name so the
//! file survives catalog reordering.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tactics_core::{PlayerId, Position};

use crate::loaders::{LoadResult, read_file};

/// Starting resources of one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub id: PlayerId,
    #[serde(default)]
    pub currency: u32,
}

/// A unit present when the match starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub owner: PlayerId,
    /// Template name as written in the unit catalog.
    pub template: String,
    pub at: (i32, i32),
}

impl UnitPlacement {
    pub fn position(&self) -> Position {
        Position::new(self.at.0, self.at.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// File stem of the map under `maps/`.
    pub map: String,
    pub players: Vec<PlayerSetup>,
    #[serde(default)]
    pub units: Vec<UnitPlacement>,
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses a scenario without resolving it against a catalog or map;
    /// that happens when the match is built.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content).context("Failed to parse scenario RON")?;
        if scenario.map.is_empty() {
            anyhow::bail!("scenario does not name a map");
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_players_and_placements() {
        let scenario = ScenarioLoader::parse(
            r#"(
                map: "duel",
                players: [
                    (id: Player1, currency: 20),
                    (id: Player2),
                ],
                units: [
                    (owner: Player2, template: "King", at: (3, 0)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(scenario.map, "duel");
        assert_eq!(
            scenario.players,
            vec![
                PlayerSetup {
                    id: PlayerId::Player1,
                    currency: 20
                },
                PlayerSetup {
                    id: PlayerId::Player2,
                    currency: 0
                },
            ]
        );
        assert_eq!(scenario.units[0].position(), Position::new(3, 0));
        assert_eq!(scenario.units[0].template, "King");
    }

    #[test]
    fn requires_a_map() {
        assert!(ScenarioLoader::parse("(map: \"\", players: [])").is_err());
    }
}
