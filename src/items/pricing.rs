//! Item value and the short labels shown in inventory tables.

use super::types::{Item, ItemKind};
use crate::core::constants::{EGO_PRICE_MULTIPLIER, USABLE_PRICE_MULTIPLIER};

/// `level × value_factor`, doubled for usables, then tripled for egos.
pub fn item_price(item: &Item, value_factor: u64) -> u64 {
    let mut price = item.level as u64 * value_factor;
    if item.kind == ItemKind::Usable {
        price *= USABLE_PRICE_MULTIPLIER;
    }
    if item.is_ego {
        price *= EGO_PRICE_MULTIPLIER;
    }
    price
}

/// Bonus column: attack, armor, then ability level in parentheses when
/// another bonus is already shown. Resistances carry no level.
pub fn bonus_label(item: &Item) -> String {
    let mut out = String::new();
    if let Some(atk) = item.atk.filter(|&a| a > 0) {
        out.push_str(&format!("+{atk}"));
    }
    if let Some(ac) = item.ac.filter(|&a| a > 0) {
        out.push_str(&format!("[{ac}]"));
    }
    if let Some(ability) = item.ability {
        if !ability.is_resistance() {
            let level = item.ability_level();
            if out.is_empty() {
                out.push_str(&level.to_string());
            } else {
                out.push_str(&format!("({level})"));
            }
        }
    }
    out
}

/// Ability column, abbreviated.
pub fn ability_label(item: &Item) -> &'static str {
    item.ability.map_or("", |a| a.abbreviation())
}
