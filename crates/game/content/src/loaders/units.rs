//! Unit catalog loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use tactics_core::{UnitCatalog, UnitTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loader for the unit catalog from RON files.
///
/// The file is a list of templates; a template's id is its index in the list.
pub struct UnitCatalogLoader;

impl UnitCatalogLoader {
    pub fn load(path: &Path) -> LoadResult<UnitCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<UnitCatalog> {
        let templates: Vec<UnitTemplate> =
            ron::from_str(content).context("Failed to parse unit catalog RON")?;

        let mut names = HashSet::new();
        for template in &templates {
            if !names.insert(template.name.as_str()) {
                anyhow::bail!("duplicate unit template name '{}'", template.name);
            }
            if template.max_health == 0 {
                anyhow::bail!("unit template '{}' has zero max_health", template.name);
            }
            if template.is_boss && template.purchasable {
                anyhow::bail!("boss template '{}' cannot be purchasable", template.name);
            }
        }

        UnitCatalog::new(templates).context("Unit catalog is too large")
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{CatalogOracle, TemplateId};

    use super::*;

    const CATALOG: &str = r#"[
        (
            name: "Knight",
            price: 30,
            max_health: 6,
            travel_range: 2,
            attack_range: 1,
            melee_damage: 3,
            counter_range: 1,
            armor: 2,
        ),
        (
            name: "Queen",
            purchasable: false,
            price: 0,
            max_health: 5,
            travel_range: 1,
            attack_range: 1,
            melee_damage: 1,
            counter_range: 1,
            is_boss: true,
            capabilities: (income_per_turn: 10, spawn_radius: 2),
        ),
    ]"#;

    #[test]
    fn parses_templates_in_file_order() {
        let catalog = UnitCatalogLoader::parse(CATALOG).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_name("Queen"), Some(TemplateId(1)));
        let knight = catalog.template(TemplateId(0)).unwrap();
        assert!(knight.purchasable);
        assert_eq!(knight.ranged_damage, 0);
        assert_eq!(knight.armor, 2);
        assert_eq!(catalog.purchasable(), vec![TemplateId(0)]);

        let queen = catalog.template(TemplateId(1)).unwrap();
        assert_eq!(queen.capabilities.income_per_turn, 10);
        assert!(!queen.capabilities.breaks_obstacles);
    }

    #[test]
    fn rejects_duplicate_names() {
        let twice = r#"[
            (name: "Pawn", price: 5, max_health: 2, travel_range: 1, attack_range: 1, melee_damage: 1, counter_range: 1),
            (name: "Pawn", price: 5, max_health: 2, travel_range: 1, attack_range: 1, melee_damage: 1, counter_range: 1),
        ]"#;
        let error = UnitCatalogLoader::parse(twice).unwrap_err();
        assert!(error.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(UnitCatalogLoader::parse("[ (name: ").is_err());
    }
}
