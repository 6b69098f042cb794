use crate::combat::types::AttackType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Ring,
    Usable,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Ring => "ring",
            ItemKind::Usable => "usable",
        }
    }

    /// Weapons, armor and rings each occupy one equipment slot.
    pub fn is_equippable(&self) -> bool {
        !matches!(self, ItemKind::Usable)
    }

    /// Only weapons and armor can roll an ego affix.
    pub fn can_be_ego(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-category within a kind, used for descriptor lookup and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    // Weapons
    Blade,
    Axe,
    Blunt,
    Polearm,
    // Armor
    Cloth,
    Leather,
    Mail,
    Plate,
    // Rings
    Band,
    // Usables
    Potion,
    Scroll,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Blade => "blade",
            ItemType::Axe => "axe",
            ItemType::Blunt => "blunt",
            ItemType::Polearm => "polearm",
            ItemType::Cloth => "cloth",
            ItemType::Leather => "leather",
            ItemType::Mail => "mail",
            ItemType::Plate => "plate",
            ItemType::Band => "band",
            ItemType::Potion => "potion",
            ItemType::Scroll => "scroll",
        }
    }
}

/// Passive abilities granted by equipped items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Traveling,
    Running,
    Regeneration,
    ResistFire,
    ResistCold,
    ResistAcid,
    ResistElectric,
}

impl Ability {
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Traveling => "traveling",
            Ability::Running => "running",
            Ability::Regeneration => "regeneration",
            Ability::ResistFire => "resist_fire",
            Ability::ResistCold => "resist_cold",
            Ability::ResistAcid => "resist_acid",
            Ability::ResistElectric => "resist_electric",
        }
    }

    /// Short label for the inventory table.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Traveling => "traveling",
            Ability::Running => "running",
            Ability::Regeneration => "regen",
            Ability::ResistFire => "res. fire",
            Ability::ResistCold => "res. cold",
            Ability::ResistAcid => "res. acid",
            Ability::ResistElectric => "res. electric",
        }
    }

    /// The elemental attack type this ability protects against.
    pub fn resisted_type(&self) -> Option<AttackType> {
        match self {
            Ability::ResistFire => Some(AttackType::Fire),
            Ability::ResistCold => Some(AttackType::Cold),
            Ability::ResistAcid => Some(AttackType::Acid),
            Ability::ResistElectric => Some(AttackType::Electric),
            _ => None,
        }
    }

    pub fn is_resistance(&self) -> bool {
        self.resisted_type().is_some()
    }

    pub fn resisting(attack_type: AttackType) -> Option<Ability> {
        match attack_type {
            AttackType::Fire => Some(Ability::ResistFire),
            AttackType::Cold => Some(Ability::ResistCold),
            AttackType::Acid => Some(Ability::ResistAcid),
            AttackType::Electric => Some(Ability::ResistElectric),
            _ => None,
        }
    }
}

/// What a usable item does when consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Healing,
    Mapping,
}

impl Effect {
    pub fn key(&self) -> &'static str {
        match self {
            Effect::Healing => "healing",
            Effect::Mapping => "mapping",
        }
    }
}

/// Turns `resist_fire` into `Resist Fire`.
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub kind: ItemKind,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    pub display_name: String,
    pub level: u32,
    #[serde(default)]
    pub effect: Option<Effect>,
    #[serde(default)]
    pub ability: Option<Ability>,
    #[serde(default)]
    pub atk: Option<u32>,
    #[serde(default)]
    pub ac: Option<u32>,
    #[serde(default)]
    pub damage_die: Option<u32>,
    #[serde(default)]
    pub attack_type: Option<AttackType>,
    #[serde(default)]
    pub is_ego: bool,
    #[serde(default)]
    pub equipped: bool,
}

impl Item {
    /// Level at which this item's ability works: `(level + 1) / 2`, or 0
    /// when the item has no ability.
    pub fn ability_level(&self) -> u32 {
        if self.ability.is_some() {
            (self.level + 1) / 2
        } else {
            0
        }
    }

    pub fn atk_bonus(&self) -> u32 {
        self.atk.unwrap_or(0)
    }

    pub fn ac_bonus(&self) -> u32 {
        self.ac.unwrap_or(0)
    }
}
