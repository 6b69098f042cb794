//! The player: a combatant that also carries gold, gear and run history.

use super::history::{History, HistoryKey};
use crate::combat::types::{AttackType, Combatant};
use crate::core::constants::{
    HP_PER_LEVEL, PLAYER_BASE_AC, PLAYER_BASE_HP, REGENERATION_REST_REDUCTION, UNARMED_DAMAGE_DIE,
    XP_PER_PLAYER_LEVEL,
};
use crate::items::tables::{find_template, STARTING_KIT};
use crate::items::types::{Ability, Item, ItemKind};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why an inventory action was refused. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Please enter an integer")]
    NotANumber(String),
    #[error("Invalid item number")]
    OutOfRange { index: usize, len: usize },
    #[error("That item cannot be equipped")]
    NotEquippable,
    #[error("That item cannot be used")]
    NotUsable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub gold: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub items: Vec<Item>,
    pub history: History,
    pub epitaph: Option<String>,
}

impl Player {
    /// A level-1 adventurer holding the starting kit, all of it equipped.
    pub fn new(name: impl Into<String>) -> Self {
        let items = STARTING_KIT
            .iter()
            .filter_map(|name| find_template(name))
            .map(|template| {
                let mut item = template.to_item();
                item.equipped = true;
                item
            })
            .collect();

        Self {
            name: name.into(),
            level: 1,
            xp: 0,
            gold: 0,
            hp: PLAYER_BASE_HP,
            max_hp: PLAYER_BASE_HP,
            items,
            history: History::default(),
            epitaph: None,
        }
    }

    pub fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.equipped)
    }

    pub fn equipped(&self, kind: ItemKind) -> Option<&Item> {
        self.equipped_items().find(|item| item.kind == kind)
    }

    /// Ability levels granted by equipped items; the best item wins.
    pub fn abilities(&self) -> BTreeMap<Ability, u32> {
        let mut abilities = BTreeMap::new();
        for item in self.equipped_items() {
            if let Some(ability) = item.ability {
                let level = abilities.entry(ability).or_insert(0);
                *level = (*level).max(item.ability_level());
            }
        }
        abilities
    }

    pub fn ability_level(&self, ability: Ability) -> u32 {
        self.equipped_items()
            .filter(|item| item.ability == Some(ability))
            .map(Item::ability_level)
            .max()
            .unwrap_or(0)
    }

    pub fn increment_history(&mut self, key: HistoryKey, amount: u64) {
        self.history.increment(key, amount);
    }

    /// Consumes XP for each level gained. Returns whether any level was gained.
    pub fn check_level_up(&mut self) -> bool {
        let mut leveled = false;
        while self.xp >= XP_PER_PLAYER_LEVEL * self.level as u64 {
            self.xp -= XP_PER_PLAYER_LEVEL * self.level as u64;
            self.level += 1;
            self.max_hp += HP_PER_LEVEL;
            self.hp += HP_PER_LEVEL;
            leveled = true;
            tracing::info!(level = self.level, max_hp = self.max_hp, "player level up");
        }
        leveled
    }

    /// Restores full health.
    pub fn heal(&mut self) {
        self.hp = self.max_hp;
    }

    /// Restores up to `amount` HP; returns what was actually restored.
    pub fn heal_by(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Turns needed to rest back to full health.
    pub fn rest_turns(&self) -> u64 {
        let factor = (self.level as f64).sqrt()
            - REGENERATION_REST_REDUCTION * self.ability_level(Ability::Regeneration) as f64;
        let missing = (self.max_hp - self.hp) as f64;
        (missing * factor).floor().max(0.0) as u64
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, index: usize) -> Result<Item, InventoryError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Equips the item at `index`, unequipping anything else in its slot.
    pub fn equip_item(&mut self, index: usize) -> Result<&Item, InventoryError> {
        self.check_index(index)?;
        let kind = self.items[index].kind;
        if !kind.is_equippable() {
            return Err(InventoryError::NotEquippable);
        }
        for item in self.items.iter_mut().filter(|item| item.kind == kind) {
            item.equipped = false;
        }
        self.items[index].equipped = true;
        Ok(&self.items[index])
    }

    /// Takes a usable item out of the inventory so its effect can be applied.
    pub fn take_usable(&mut self, index: usize) -> Result<Item, InventoryError> {
        self.check_index(index)?;
        if self.items[index].kind != ItemKind::Usable {
            return Err(InventoryError::NotUsable);
        }
        Ok(self.items.remove(index))
    }

    pub fn killed_by(&mut self, monster_name: &str, dungeon_level: u32) {
        self.set_epitaph(format!(
            "Killed by a {monster_name} on dungeon level {dungeon_level}"
        ));
    }

    pub fn set_epitaph(&mut self, text: impl Into<String>) {
        self.epitaph = Some(text.into());
    }

    fn check_index(&self, index: usize) -> Result<(), InventoryError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(InventoryError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hit_points(&self) -> u32 {
        self.hp
    }

    fn max_hit_points(&self) -> u32 {
        self.max_hp
    }

    fn armor_class(&self) -> u32 {
        PLAYER_BASE_AC + self.equipped_items().map(Item::ac_bonus).sum::<u32>()
    }

    fn attack_bonus(&self) -> u32 {
        self.level + self.equipped_items().map(Item::atk_bonus).sum::<u32>()
    }

    fn damage_die(&self) -> u32 {
        self.equipped(ItemKind::Weapon)
            .and_then(|weapon| weapon.damage_die)
            .unwrap_or(UNARMED_DAMAGE_DIE)
    }

    fn attack_type(&self) -> AttackType {
        self.equipped(ItemKind::Weapon)
            .and_then(|weapon| weapon.attack_type)
            .unwrap_or(AttackType::Blunt)
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn take_damage(&mut self, amount: u32, attack_type: AttackType) -> u32 {
        let resisted = Ability::resisting(attack_type)
            .is_some_and(|ability| self.ability_level(ability) > 0);
        let effective = if resisted {
            (amount / 2).max(1)
        } else {
            amount
        };
        self.hp = self.hp.saturating_sub(effective);
        effective
    }
}
