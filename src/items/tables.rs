//! Static loot data: item templates, upgrade descriptors and ego affixes.

use super::types::{Ability, Effect, Item, ItemKind, ItemType};
use crate::combat::types::AttackType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub kind: ItemKind,
    pub item_type: ItemType,
    pub level: u32,
    pub effect: Option<Effect>,
    pub ability: Option<Ability>,
    pub atk: Option<u32>,
    pub ac: Option<u32>,
    pub damage_die: Option<u32>,
    pub attack_type: Option<AttackType>,
}

impl ItemTemplate {
    /// Plain item at template level, named after the template.
    pub fn to_item(&self) -> Item {
        Item {
            kind: self.kind,
            item_type: self.item_type,
            name: self.name.to_string(),
            display_name: self.name.to_string(),
            level: self.level,
            effect: self.effect,
            ability: self.ability,
            atk: self.atk,
            ac: self.ac,
            damage_die: self.damage_die,
            attack_type: self.attack_type,
            is_ego: false,
            equipped: false,
        }
    }
}

const fn weapon(
    name: &'static str,
    item_type: ItemType,
    level: u32,
    atk: u32,
    damage_die: u32,
    attack_type: AttackType,
) -> ItemTemplate {
    ItemTemplate {
        name,
        kind: ItemKind::Weapon,
        item_type,
        level,
        effect: None,
        ability: None,
        atk: Some(atk),
        ac: None,
        damage_die: Some(damage_die),
        attack_type: Some(attack_type),
    }
}

const fn armor(
    name: &'static str,
    item_type: ItemType,
    level: u32,
    ac: u32,
    ability: Option<Ability>,
) -> ItemTemplate {
    ItemTemplate {
        name,
        kind: ItemKind::Armor,
        item_type,
        level,
        effect: None,
        ability,
        atk: None,
        ac: Some(ac),
        damage_die: None,
        attack_type: None,
    }
}

const fn ring(
    name: &'static str,
    level: u32,
    ability: Option<Ability>,
    atk: Option<u32>,
    ac: Option<u32>,
) -> ItemTemplate {
    ItemTemplate {
        name,
        kind: ItemKind::Ring,
        item_type: ItemType::Band,
        level,
        effect: None,
        ability,
        atk,
        ac,
        damage_die: None,
        attack_type: None,
    }
}

const fn usable(
    name: &'static str,
    item_type: ItemType,
    level: u32,
    effect: Effect,
) -> ItemTemplate {
    ItemTemplate {
        name,
        kind: ItemKind::Usable,
        item_type,
        level,
        effect: Some(effect),
        ability: None,
        atk: None,
        ac: None,
        damage_die: None,
        attack_type: None,
    }
}

pub static ITEM_TEMPLATES: &[ItemTemplate] = &[
    // Weapons
    weapon("Dagger", ItemType::Blade, 1, 1, 4, AttackType::Pierce),
    weapon("Club", ItemType::Blunt, 1, 0, 6, AttackType::Blunt),
    weapon("Short Sword", ItemType::Blade, 2, 1, 6, AttackType::Slash),
    weapon("Hand Axe", ItemType::Axe, 3, 1, 6, AttackType::Slash),
    weapon("Mace", ItemType::Blunt, 4, 1, 8, AttackType::Blunt),
    weapon("Spear", ItemType::Polearm, 5, 2, 8, AttackType::Pierce),
    weapon("Longsword", ItemType::Blade, 6, 2, 8, AttackType::Slash),
    weapon("Battle Axe", ItemType::Axe, 8, 2, 10, AttackType::Slash),
    weapon("Warhammer", ItemType::Blunt, 10, 3, 10, AttackType::Blunt),
    weapon("Halberd", ItemType::Polearm, 12, 3, 12, AttackType::Slash),
    weapon("Greatsword", ItemType::Blade, 14, 4, 12, AttackType::Slash),
    weapon("Morningstar", ItemType::Blunt, 16, 4, 12, AttackType::Blunt),
    weapon("Greataxe", ItemType::Axe, 18, 5, 14, AttackType::Slash),
    weapon("Glaive", ItemType::Polearm, 21, 6, 16, AttackType::Pierce),
    weapon("Runeblade", ItemType::Blade, 24, 7, 20, AttackType::Slash),
    // Armor
    armor("Cloth Tunic", ItemType::Cloth, 1, 1, None),
    armor("Leather Jerkin", ItemType::Leather, 2, 2, None),
    armor("Padded Robe", ItemType::Cloth, 3, 2, None),
    armor("Studded Leather", ItemType::Leather, 5, 3, None),
    armor("Robe", ItemType::Cloth, 6, 2, Some(Ability::Regeneration)),
    armor("Chain Shirt", ItemType::Mail, 7, 4, None),
    armor("Scale Mail", ItemType::Mail, 9, 5, None),
    armor("Chain Mail", ItemType::Mail, 11, 6, None),
    armor("Splint Mail", ItemType::Plate, 13, 7, None),
    armor("Half Plate", ItemType::Plate, 16, 8, None),
    armor("Full Plate", ItemType::Plate, 19, 9, None),
    armor("Mithril Plate", ItemType::Plate, 23, 11, None),
    // Rings
    ring("Ring", 1, Some(Ability::Traveling), None, None),
    ring("Ring", 2, Some(Ability::Running), None, None),
    ring("Ring", 3, Some(Ability::ResistFire), None, None),
    ring("Ring", 3, Some(Ability::ResistCold), None, None),
    ring("Ring", 4, Some(Ability::Regeneration), None, None),
    ring("Ring", 5, Some(Ability::ResistAcid), None, None),
    ring("Ring", 5, Some(Ability::ResistElectric), None, None),
    ring("Ring of Protection", 6, None, None, Some(1)),
    ring("Ring of Accuracy", 6, None, Some(1), None),
    // Usables
    usable("Potion", ItemType::Potion, 1, Effect::Healing),
    usable("Scroll", ItemType::Scroll, 2, Effect::Mapping),
    usable("Draught", ItemType::Potion, 5, Effect::Healing),
    usable("Elixir", ItemType::Potion, 10, Effect::Healing),
];

/// Finds a template by name (first match).
pub fn find_template(name: &str) -> Option<&'static ItemTemplate> {
    ITEM_TEMPLATES.iter().find(|t| t.name == name)
}

/// Equipment every new character starts with.
pub const STARTING_KIT: [&str; 2] = ["Dagger", "Cloth Tunic"];

static WEAPON_DESCRIPTORS: &[&str] = &[
    "Fine", "Keen", "Masterwork", "Superior", "Exquisite", "Mythic",
];
static BLUNT_DESCRIPTORS: &[&str] = &[
    "Sturdy", "Heavy", "Crushing", "Brutal", "Devastating", "Titanic",
];
static CLOTH_DESCRIPTORS: &[&str] = &[
    "Padded", "Quilted", "Embroidered", "Silken", "Enchanted", "Celestial",
];
static LEATHER_DESCRIPTORS: &[&str] = &[
    "Supple", "Hardened", "Boiled", "Reinforced", "Wyrmhide", "Dragonhide",
];
static MAIL_DESCRIPTORS: &[&str] = &[
    "Riveted", "Doubled", "Tempered", "Blued", "Gilded", "Adamant",
];
static PLATE_DESCRIPTORS: &[&str] = &[
    "Polished", "Fluted", "Tempered", "Engraved", "Gilded", "Adamant",
];
static RING_DESCRIPTORS: &[&str] = &[
    "Polished", "Gleaming", "Radiant", "Brilliant",
    "Resplendent", "Glorious", "Celestial", "Divine",
];

fn kind_descriptors(kind: ItemKind) -> Option<&'static [&'static str]> {
    match kind {
        ItemKind::Weapon => Some(WEAPON_DESCRIPTORS),
        ItemKind::Ring => Some(RING_DESCRIPTORS),
        ItemKind::Armor | ItemKind::Usable => None,
    }
}

fn type_descriptors(kind: ItemKind, item_type: ItemType) -> Option<&'static [&'static str]> {
    match (kind, item_type) {
        (ItemKind::Weapon, ItemType::Blunt) => Some(BLUNT_DESCRIPTORS),
        (ItemKind::Armor, ItemType::Cloth) => Some(CLOTH_DESCRIPTORS),
        (ItemKind::Armor, ItemType::Leather) => Some(LEATHER_DESCRIPTORS),
        (ItemKind::Armor, ItemType::Mail) => Some(MAIL_DESCRIPTORS),
        (ItemKind::Armor, ItemType::Plate) => Some(PLATE_DESCRIPTORS),
        _ => None,
    }
}

/// Descriptor for an upgrade tier. A kind+type entry overrides the kind entry;
/// a tier past the end of both tables has no descriptor.
pub fn descriptor(kind: ItemKind, item_type: ItemType, tier: u32) -> Option<&'static str> {
    let tier = tier as usize;
    let by_type = type_descriptors(kind, item_type).and_then(|table| table.get(tier).copied());
    by_type.or_else(|| kind_descriptors(kind).and_then(|table| table.get(tier).copied()))
}

/// Extra attribute an ego affix splices onto an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EgoAttribute {
    AttackType(AttackType),
    Ability(Ability),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EgoTemplate {
    pub name: &'static str,
    pub bonus: u32,
    pub attributes: &'static [EgoAttribute],
}

#[rustfmt::skip]
pub static WEAPON_EGOS: &[EgoTemplate] = &[
    EgoTemplate { name: "Flame", bonus: 1, attributes: &[EgoAttribute::AttackType(AttackType::Fire)] },
    EgoTemplate { name: "Frost", bonus: 1, attributes: &[EgoAttribute::AttackType(AttackType::Cold)] },
    EgoTemplate { name: "Venom", bonus: 1, attributes: &[EgoAttribute::AttackType(AttackType::Acid)] },
    EgoTemplate { name: "Storms", bonus: 1, attributes: &[EgoAttribute::AttackType(AttackType::Electric)] },
    EgoTemplate { name: "Slaying", bonus: 3, attributes: &[] },
    EgoTemplate { name: "Swiftness", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::Running)] },
    EgoTemplate { name: "the Wayfarer", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::Traveling)] },
];

#[rustfmt::skip]
pub static ARMOR_EGOS: &[EgoTemplate] = &[
    EgoTemplate { name: "Fire Resistance", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::ResistFire)] },
    EgoTemplate { name: "Cold Resistance", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::ResistCold)] },
    EgoTemplate { name: "Acid Resistance", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::ResistAcid)] },
    EgoTemplate { name: "Lightning Resistance", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::ResistElectric)] },
    EgoTemplate { name: "Protection", bonus: 3, attributes: &[] },
    EgoTemplate { name: "Regeneration", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::Regeneration)] },
    EgoTemplate { name: "Fleetness", bonus: 1, attributes: &[EgoAttribute::Ability(Ability::Running)] },
];

/// Ego pool for a kind; only weapons and armor have one.
pub fn ego_pool(kind: ItemKind) -> &'static [EgoTemplate] {
    match kind {
        ItemKind::Weapon => WEAPON_EGOS,
        ItemKind::Armor => ARMOR_EGOS,
        ItemKind::Ring | ItemKind::Usable => &[],
    }
}
