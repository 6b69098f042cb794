//! Procedural loot: rolls a template for a danger level, then upgrades it.
//!
//! The pipeline is roll kind → pick template → compose name → descriptor
//! upgrade → ego affix. Every random choice goes through the caller's dice.

use super::tables::{descriptor, ego_pool, EgoAttribute, ItemTemplate, ITEM_TEMPLATES};
use super::types::{title_case, Item, ItemKind};
use crate::core::constants::{
    EGO_DIE, FORCED_KIND_MAX_ATTEMPTS, GEAR_LEVEL_BAND, LOOT_ARMOR_MIN, LOOT_RING_MIN,
    LOOT_ROLL_MAX, LOOT_USABLE_MIN, LOOT_WEAPON_MIN,
};
use crate::core::dice::RandomSource;

/// Rolls loot for `danger_level`. Most rolls yield nothing.
pub fn generate_item(danger_level: u32, dice: &mut impl RandomSource) -> Option<Item> {
    generate_with_kinds(danger_level, &[], dice)
}

/// Rolls loot restricted to `forced_kinds` (any kind when empty).
///
/// A roll that misses the forced kinds is retried at half the danger level.
/// The search ends with `None` once no template of a forced kind exists at
/// that level, or after a bounded number of attempts.
pub fn generate_with_kinds(
    danger_level: u32,
    forced_kinds: &[ItemKind],
    dice: &mut impl RandomSource,
) -> Option<Item> {
    let mut template = roll_template(danger_level, dice);

    if !forced_kinds.is_empty() {
        let relaxed_level = danger_level / 2;
        let mut attempts = 0;
        while !template.is_some_and(|t| forced_kinds.contains(&t.kind)) {
            let exhausted = attempts >= FORCED_KIND_MAX_ATTEMPTS;
            if exhausted || !has_candidates(relaxed_level, forced_kinds) {
                tracing::warn!(
                    danger_level,
                    relaxed_level,
                    attempts,
                    ?forced_kinds,
                    "forced-kind loot search exhausted"
                );
                return None;
            }
            template = roll_template(relaxed_level, dice);
            attempts += 1;
        }
    }

    template.map(|t| build_item(t, danger_level, dice))
}

/// Kind bucket for a loot roll, or `None` below the drop threshold.
pub fn kind_for_roll(roll: u32) -> Option<ItemKind> {
    match roll {
        r if r < LOOT_USABLE_MIN => None,
        r if r < LOOT_WEAPON_MIN => Some(ItemKind::Usable),
        r if r < LOOT_ARMOR_MIN => Some(ItemKind::Weapon),
        r if r < LOOT_RING_MIN => Some(ItemKind::Armor),
        _ => Some(ItemKind::Ring),
    }
}

/// Level a ring is rebased to before upgrading: half the danger, rounded up.
pub fn ring_base_level(danger_level: u32) -> u32 {
    (danger_level + 1) / 2
}

/// Whether `template` may drop at `level`. Weapons and armor are limited
/// to a band just below the level so low-level gear stops dropping deep down.
fn in_level_band(template: &ItemTemplate, level: u32) -> bool {
    if template.level > level {
        return false;
    }
    match template.kind {
        ItemKind::Weapon | ItemKind::Armor => template.level + GEAR_LEVEL_BAND > level,
        ItemKind::Ring | ItemKind::Usable => true,
    }
}

fn candidates(kind: ItemKind, level: u32) -> Vec<&'static ItemTemplate> {
    ITEM_TEMPLATES
        .iter()
        .filter(|t| t.kind == kind && in_level_band(t, level))
        .collect()
}

fn has_candidates(level: u32, kinds: &[ItemKind]) -> bool {
    kinds.iter().any(|&kind| !candidates(kind, level).is_empty())
}

fn roll_template(level: u32, dice: &mut impl RandomSource) -> Option<&'static ItemTemplate> {
    let roll = dice.roll_range(level.min(LOOT_ROLL_MAX), LOOT_ROLL_MAX);
    let kind = kind_for_roll(roll);
    tracing::debug!(level, roll, ?kind, "loot roll");

    let pool = candidates(kind?, level);
    let index = dice.pick_index(pool.len())?;
    Some(pool[index])
}

fn compose_display_name(item: &Item) -> String {
    if let Some(effect) = item.effect {
        format!("{} of {}", item.name, title_case(effect.key()))
    } else if let Some(ability) = item.ability {
        format!("{} of {}", item.name, title_case(ability.key()))
    } else {
        item.name.clone()
    }
}

fn build_item(template: &ItemTemplate, danger_level: u32, dice: &mut impl RandomSource) -> Item {
    let mut item = template.to_item();
    item.display_name = compose_display_name(&item);

    if item.kind != ItemKind::Usable {
        if item.kind == ItemKind::Ring {
            item.level = ring_base_level(danger_level);
        }
        upgrade(&mut item, danger_level);
    }

    if item.kind.can_be_ego() && dice.roll_die(EGO_DIE) <= danger_level {
        apply_ego(&mut item, dice);
    }

    item
}

/// Raises an item found above its own level up to the danger level.
fn upgrade(item: &mut Item, danger_level: u32) {
    let level_diff = danger_level.saturating_sub(item.level);
    if level_diff == 0 {
        return;
    }

    let tier = level_diff / 2;
    match descriptor(item.kind, item.item_type, tier) {
        Some(prefix) => item.display_name = format!("{} {}", prefix, item.display_name),
        None => tracing::warn!(kind = %item.kind, tier, "no descriptor for upgrade tier"),
    }

    item.level += level_diff;
    if let Some(atk) = item.atk.as_mut() {
        *atk += level_diff / 2;
    }
    if let Some(ac) = item.ac.as_mut() {
        *ac += level_diff / 2;
    }
}

fn apply_ego(item: &mut Item, dice: &mut impl RandomSource) {
    let pool = ego_pool(item.kind);
    let Some(index) = dice.pick_index(pool.len()) else {
        return;
    };
    let ego = &pool[index];

    item.is_ego = true;
    match item.kind {
        ItemKind::Weapon => item.atk = Some(item.atk_bonus() + ego.bonus),
        _ => item.ac = Some(item.ac_bonus() + ego.bonus),
    }
    item.display_name = format!("{} of {}", item.display_name, ego.name);

    for attribute in ego.attributes {
        match *attribute {
            EgoAttribute::AttackType(attack_type) => item.attack_type = Some(attack_type),
            EgoAttribute::Ability(ability) => item.ability = Some(ability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::AttackType;
    use crate::core::dice::{ScriptedDice, SeededDice};
    use crate::items::types::{Ability, Effect};

    // Loot roll at danger L uses a d(101 - L); a scripted face f maps to L + f - 1.
    fn face_for(danger: u32, roll: u32) -> u32 {
        roll - danger + 1
    }

    #[test]
    fn test_kind_buckets() {
        assert_eq!(kind_for_roll(0), None);
        assert_eq!(kind_for_roll(79), None);
        assert_eq!(kind_for_roll(80), Some(ItemKind::Usable));
        assert_eq!(kind_for_roll(87), Some(ItemKind::Usable));
        assert_eq!(kind_for_roll(88), Some(ItemKind::Weapon));
        assert_eq!(kind_for_roll(92), Some(ItemKind::Weapon));
        assert_eq!(kind_for_roll(93), Some(ItemKind::Armor));
        assert_eq!(kind_for_roll(97), Some(ItemKind::Armor));
        assert_eq!(kind_for_roll(98), Some(ItemKind::Ring));
        assert_eq!(kind_for_roll(100), Some(ItemKind::Ring));
    }

    #[test]
    fn test_low_roll_yields_nothing_and_consumes_one_roll() {
        let mut dice = ScriptedDice::new([1]);
        assert!(generate_item(5, &mut dice).is_none());
        assert_eq!(dice.consumed(), 1);
    }

    #[test]
    fn test_weapon_at_template_level_is_plain() {
        // Weapons at danger 5: Dagger, Club, Short Sword, Hand Axe, Mace, Spear
        let mut dice = ScriptedDice::new([face_for(5, 90), 6, 100]);
        let item = generate_item(5, &mut dice).expect("weapon roll");
        assert_eq!(item.name, "Spear");
        assert_eq!(item.display_name, "Spear");
        assert_eq!(item.level, 5);
        assert_eq!(item.atk, Some(2));
        assert!(!item.is_ego);
    }

    #[test]
    fn test_weapon_below_level_gets_descriptor() {
        let mut dice = ScriptedDice::new([face_for(5, 90), 1, 100]);
        let item = generate_item(5, &mut dice).expect("weapon roll");
        assert_eq!(item.name, "Dagger");
        // level diff 4 -> tier 2
        assert_eq!(item.display_name, "Masterwork Dagger");
        assert_eq!(item.level, 5);
        assert_eq!(item.atk, Some(3));
    }

    #[test]
    fn test_ego_weapon() {
        let mut dice = ScriptedDice::new([face_for(5, 90), 1, 1, 1]);
        let item = generate_item(5, &mut dice).expect("weapon roll");
        assert!(item.is_ego);
        assert_eq!(item.display_name, "Masterwork Dagger of Flame");
        assert_eq!(item.atk, Some(4));
        assert_eq!(item.attack_type, Some(AttackType::Fire));
    }

    #[test]
    fn test_ego_armor_splices_ability() {
        // Armor at danger 5: Cloth Tunic, Leather Jerkin, Padded Robe, Studded Leather
        let mut dice = ScriptedDice::new([face_for(5, 95), 4, 1, 1]);
        let item = generate_item(5, &mut dice).expect("armor roll");
        assert_eq!(item.name, "Studded Leather");
        assert!(item.is_ego);
        assert_eq!(item.ac, Some(4));
        assert_eq!(item.ability, Some(Ability::ResistFire));
        assert_eq!(item.display_name, "Studded Leather of Fire Resistance");
    }

    #[test]
    fn test_ring_rebased_then_upgraded() {
        let mut dice = ScriptedDice::new([face_for(10, 99), 1]);
        let item = generate_item(10, &mut dice).expect("ring roll");
        assert_eq!(item.kind, ItemKind::Ring);
        assert_eq!(item.ability, Some(Ability::Traveling));
        // base 5, diff 5 -> tier 2
        assert_eq!(item.display_name, "Radiant Ring of Traveling");
        assert_eq!(item.level, 10);
        assert!(!item.is_ego);
        assert_eq!(dice.consumed(), 2);
    }

    #[test]
    fn test_usable_is_never_upgraded() {
        let mut dice = ScriptedDice::new([face_for(1, 80), 1]);
        let item = generate_item(1, &mut dice).expect("usable roll");
        assert_eq!(item.display_name, "Potion of Healing");
        assert_eq!(item.effect, Some(Effect::Healing));
        assert_eq!(item.level, 1);
    }

    #[test]
    fn test_missing_descriptor_still_raises_level() {
        // Rings have eight tiers; danger 70 rebases to 35, diff 35 -> tier 17
        let mut dice = ScriptedDice::new([face_for(70, 99), 1]);
        let item = generate_item(70, &mut dice).expect("ring roll");
        assert_eq!(item.display_name, "Ring of Traveling");
        assert_eq!(item.level, 70);
    }

    #[test]
    fn test_gear_stays_in_level_band() {
        let mut dice = SeededDice::new(99);
        for danger in [1, 5, 10, 15, 20, 25, 30] {
            for _ in 0..300 {
                if let Some(item) = generate_item(danger, &mut dice) {
                    if matches!(item.kind, ItemKind::Weapon | ItemKind::Armor) {
                        let template = crate::items::tables::find_template(&item.name)
                            .expect("generated from a template");
                        assert!(template.level <= danger);
                        assert!(template.level + GEAR_LEVEL_BAND > danger);
                    }
                    assert!(item.level >= 1);
                }
            }
        }
    }

    #[test]
    fn test_same_stream_same_item() {
        let a: Vec<Option<Item>> = {
            let mut dice = SeededDice::new(2024);
            (0..200).map(|_| generate_item(12, &mut dice)).collect()
        };
        let b: Vec<Option<Item>> = {
            let mut dice = SeededDice::new(2024);
            (0..200).map(|_| generate_item(12, &mut dice)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_higher_danger_drops_more() {
        let count = |danger: u32| {
            let mut dice = SeededDice::new(5);
            (0..4000)
                .filter(|_| generate_item(danger, &mut dice).is_some())
                .count()
        };
        let shallow = count(1);
        let deep = count(60);
        assert!(deep > shallow, "danger 60 ({deep}) should beat danger 1 ({shallow})");
    }

    #[test]
    fn test_forced_kind_found_by_relaxing() {
        let mut dice = SeededDice::new(11);
        let item = generate_with_kinds(8, &[ItemKind::Ring], &mut dice).expect("ring eventually");
        assert_eq!(item.kind, ItemKind::Ring);
    }

    #[test]
    fn test_forced_kind_without_candidates_terminates() {
        // Danger 1 relaxes to 0, where no template exists
        let mut dice = ScriptedDice::new([1]);
        assert!(generate_with_kinds(1, &[ItemKind::Weapon], &mut dice).is_none());
        assert_eq!(dice.consumed(), 1);
    }

    #[test]
    fn test_ring_base_level() {
        assert_eq!(ring_base_level(1), 1);
        assert_eq!(ring_base_level(2), 1);
        assert_eq!(ring_base_level(9), 5);
        assert_eq!(ring_base_level(10), 5);
    }
}
