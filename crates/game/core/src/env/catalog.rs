//! Unit stats catalog.
//!
//! Templates are authored as static data, loaded once, and shared by every
//! unit instance of that type. Nothing in the rules engine mutates them.

use std::fmt;

use crate::state::SetupError;

/// Index of a template inside the catalog it was loaded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u16);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template:{}", self.0)
    }
}

/// Sprite handles per owner. Opaque to the rules; presentation resolves them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpriteRefs {
    pub icon: String,
    pub player1: String,
    pub player2: String,
}

/// Optional abilities a unit type may carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitCapabilities {
    /// Currency added to the owner at the start of each of their turns.
    pub income_per_turn: u32,
    /// Manhattan radius around the unit in which its owner may spawn new units.
    pub spawn_radius: u32,
    /// Smashes breakable obstacles on the tile it arrives at.
    pub breaks_obstacles: bool,
    /// Picks up rubble on the tile it arrives at.
    pub collects_resources: bool,
}

impl UnitCapabilities {
    pub fn generates_income(&self) -> bool {
        self.income_per_turn > 0
    }

    pub fn enables_spawning(&self) -> bool {
        self.spawn_radius > 0
    }
}

/// Immutable stats shared by every unit of one type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default = "default_purchasable"))]
    pub purchasable: bool,
    pub price: u32,
    pub max_health: u32,
    /// Tiles per turn.
    pub travel_range: u32,
    /// Extra tiles available while travelling from one road tile to another.
    #[cfg_attr(feature = "serde", serde(default))]
    pub road_bonus: u32,
    pub attack_range: u32,
    /// Damage dealt at distance 1.
    pub melee_damage: u32,
    /// Damage dealt at distance 2+. Zero means no ranged attacks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranged_damage: u32,
    /// Counter-attacks beyond this distance deal half ranged damage.
    pub counter_range: u32,
    /// Damage reduction when defending; degrades by one per hit taken.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_boss: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capabilities: UnitCapabilities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sprites: SpriteRefs,
}

#[cfg(feature = "serde")]
fn default_purchasable() -> bool {
    true
}

impl UnitTemplate {
    pub fn builder(name: impl Into<String>) -> UnitTemplateBuilder {
        UnitTemplateBuilder::new(name)
    }
}

/// Builder for [`UnitTemplate`], mostly useful for scenarios built in code.
#[derive(Clone, Debug)]
pub struct UnitTemplateBuilder {
    template: UnitTemplate,
}

impl UnitTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            template: UnitTemplate {
                name: name.into(),
                description: String::new(),
                purchasable: true,
                price: 10,
                max_health: 5,
                travel_range: 1,
                road_bonus: 0,
                attack_range: 1,
                melee_damage: 1,
                ranged_damage: 1,
                counter_range: 1,
                armor: 0,
                is_boss: false,
                capabilities: UnitCapabilities::default(),
                sprites: SpriteRefs::default(),
            },
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.template.description = description.into();
        self
    }

    #[must_use]
    pub fn price(mut self, price: u32) -> Self {
        self.template.price = price;
        self
    }

    #[must_use]
    pub fn purchasable(mut self, purchasable: bool) -> Self {
        self.template.purchasable = purchasable;
        self
    }

    #[must_use]
    pub fn max_health(mut self, max_health: u32) -> Self {
        self.template.max_health = max_health;
        self
    }

    #[must_use]
    pub fn travel(mut self, range: u32, road_bonus: u32) -> Self {
        self.template.travel_range = range;
        self.template.road_bonus = road_bonus;
        self
    }

    #[must_use]
    pub fn attack_range(mut self, range: u32) -> Self {
        self.template.attack_range = range;
        self
    }

    #[must_use]
    pub fn damage(mut self, melee: u32, ranged: u32, counter_range: u32) -> Self {
        self.template.melee_damage = melee;
        self.template.ranged_damage = ranged;
        self.template.counter_range = counter_range;
        self
    }

    #[must_use]
    pub fn armor(mut self, armor: u32) -> Self {
        self.template.armor = armor;
        self
    }

    #[must_use]
    pub fn boss(mut self) -> Self {
        self.template.is_boss = true;
        self.template.purchasable = false;
        self
    }

    #[must_use]
    pub fn capabilities(mut self, capabilities: UnitCapabilities) -> Self {
        self.template.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn sprites(mut self, sprites: SpriteRefs) -> Self {
        self.template.sprites = sprites;
        self
    }

    pub fn build(self) -> UnitTemplate {
        self.template
    }
}

/// Read-only access to unit templates.
pub trait CatalogOracle: Send + Sync {
    fn template(&self, id: TemplateId) -> Option<&UnitTemplate>;

    /// Iterates templates in catalog order.
    fn templates(&self) -> Box<dyn Iterator<Item = (TemplateId, &UnitTemplate)> + '_>;

    fn find_by_name(&self, name: &str) -> Option<TemplateId> {
        self.templates()
            .find(|(_, template)| template.name == name)
            .map(|(id, _)| id)
    }

    /// Templates offered by the store, in catalog order.
    fn purchasable(&self) -> Vec<TemplateId> {
        self.templates()
            .filter(|(_, template)| template.purchasable)
            .map(|(id, _)| id)
            .collect()
    }
}

/// Vec-backed catalog; template ids are insertion indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitCatalog {
    templates: Vec<UnitTemplate>,
}

impl UnitCatalog {
    /// Largest number of templates addressable by a [`TemplateId`].
    pub const MAX_TEMPLATES: usize = u16::MAX as usize + 1;

    pub fn new(templates: Vec<UnitTemplate>) -> Result<Self, SetupError> {
        if templates.len() > Self::MAX_TEMPLATES {
            return Err(SetupError::CatalogFull {
                len: templates.len(),
                max: Self::MAX_TEMPLATES,
            });
        }
        Ok(Self { templates })
    }

    pub fn push(&mut self, template: UnitTemplate) -> Result<TemplateId, SetupError> {
        let len = self.templates.len();
        let index = u16::try_from(len).map_err(|_| SetupError::CatalogFull {
            len: len + 1,
            max: Self::MAX_TEMPLATES,
        })?;
        self.templates.push(template);
        Ok(TemplateId(index))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl CatalogOracle for UnitCatalog {
    fn template(&self, id: TemplateId) -> Option<&UnitTemplate> {
        self.templates.get(usize::from(id.0))
    }

    fn templates(&self) -> Box<dyn Iterator<Item = (TemplateId, &UnitTemplate)> + '_> {
        Box::new(
            self.templates
                .iter()
                .enumerate()
                .map_while(|(index, template)| {
                    u16::try_from(index)
                        .ok()
                        .map(|index| (TemplateId(index), template))
                }),
        )
    }
}
