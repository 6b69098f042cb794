use crate::core::constants::MONSTER_LEVEL_BAND;
use crate::core::dice::RandomSource;
use serde::{Deserialize, Serialize};
use AttackType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackType {
    Slash,
    Pierce,
    Blunt,
    Fire,
    Cold,
    Acid,
    Electric,
}

impl AttackType {
    pub fn name(&self) -> &'static str {
        match self {
            AttackType::Slash => "slash",
            AttackType::Pierce => "pierce",
            AttackType::Blunt => "blunt",
            AttackType::Fire => "fire",
            AttackType::Cold => "cold",
            AttackType::Acid => "acid",
            AttackType::Electric => "electric",
        }
    }

    /// Second-person verb: "You slash the goblin".
    pub fn verb(&self) -> &'static str {
        match self {
            AttackType::Slash => "slash",
            AttackType::Pierce => "stab",
            AttackType::Blunt => "hit",
            AttackType::Fire => "burn",
            AttackType::Cold => "freeze",
            AttackType::Acid => "corrode",
            AttackType::Electric => "shock",
        }
    }

    /// Third-person verb: "The goblin slashes you".
    pub fn verb_third_person(&self) -> &'static str {
        match self {
            AttackType::Slash => "slashes",
            AttackType::Pierce => "stabs",
            AttackType::Blunt => "hits",
            AttackType::Fire => "burns",
            AttackType::Cold => "freezes",
            AttackType::Acid => "corrodes",
            AttackType::Electric => "shocks",
        }
    }

    pub fn is_elemental(&self) -> bool {
        matches!(
            self,
            AttackType::Fire | AttackType::Cold | AttackType::Acid | AttackType::Electric
        )
    }
}

/// Anything that can attack or be attacked.
pub trait Combatant {
    fn name(&self) -> &str;
    fn hit_points(&self) -> u32;
    fn max_hit_points(&self) -> u32;
    fn armor_class(&self) -> u32;
    fn attack_bonus(&self) -> u32;
    fn damage_die(&self) -> u32;
    fn attack_type(&self) -> AttackType;
    fn level(&self) -> u32;

    /// Applies `amount` raw damage of `attack_type` after weaknesses and
    /// resistances. Returns the effective damage; hit points stop at 0.
    fn take_damage(&mut self, amount: u32, attack_type: AttackType) -> u32;

    fn is_dead(&self) -> bool {
        self.hit_points() == 0
    }
}

/// Result of one attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hit: bool,
    /// Natural d20 roll.
    pub roll: u32,
    /// Roll plus attack bonus.
    pub attack_total: u32,
    /// Defense the total was compared against.
    pub target: u32,
    /// Damage die result before effectiveness (0 on a miss).
    pub raw_damage: u32,
    /// Damage after weaknesses and resistances (0 on a miss).
    pub damage: u32,
}

impl AttackOutcome {
    pub fn miss(roll: u32, attack_total: u32, target: u32) -> Self {
        Self {
            hit: false,
            roll,
            attack_total,
            target,
            raw_damage: 0,
            damage: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub ac: u32,
    pub atk: u32,
    pub damage_die: u32,
    pub attack_type: AttackType,
    #[serde(default)]
    pub weak: Vec<AttackType>,
    #[serde(default)]
    pub resist: Vec<AttackType>,
}

impl Monster {
    pub fn is_weak_to(&self, attack_type: AttackType) -> bool {
        self.weak.contains(&attack_type)
    }

    pub fn resists(&self, attack_type: AttackType) -> bool {
        self.resist.contains(&attack_type)
    }
}

impl Combatant for Monster {
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
        self.ac
    }

    fn attack_bonus(&self) -> u32 {
        self.atk
    }

    fn damage_die(&self) -> u32 {
        self.damage_die
    }

    fn attack_type(&self) -> AttackType {
        self.attack_type
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn take_damage(&mut self, amount: u32, attack_type: AttackType) -> u32 {
        let effective = if self.is_weak_to(attack_type) {
            amount * 2
        } else if self.resists(attack_type) {
            (amount / 2).max(1)
        } else {
            amount
        };
        self.hp = self.hp.saturating_sub(effective);
        effective
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub level: u32,
    pub hp: u32,
    pub ac: u32,
    pub atk: u32,
    pub damage_die: u32,
    pub attack_type: AttackType,
    pub weak: &'static [AttackType],
    pub resist: &'static [AttackType],
}

#[rustfmt::skip]
pub static BESTIARY: &[MonsterTemplate] = &[
    MonsterTemplate { name: "Giant Rat", level: 1, hp: 4, ac: 10, atk: 0, damage_die: 3, attack_type: Pierce, weak: &[], resist: &[] },
    MonsterTemplate { name: "Kobold", level: 1, hp: 5, ac: 11, atk: 1, damage_die: 4, attack_type: Slash, weak: &[], resist: &[] },
    MonsterTemplate { name: "Goblin", level: 2, hp: 7, ac: 12, atk: 1, damage_die: 6, attack_type: Slash, weak: &[], resist: &[] },
    MonsterTemplate { name: "Skeleton", level: 3, hp: 10, ac: 12, atk: 2, damage_die: 6, attack_type: Slash, weak: &[Blunt], resist: &[Pierce, Cold] },
    MonsterTemplate { name: "Giant Spider", level: 3, hp: 9, ac: 13, atk: 2, damage_die: 6, attack_type: Acid, weak: &[Fire], resist: &[] },
    MonsterTemplate { name: "Orc", level: 4, hp: 14, ac: 13, atk: 3, damage_die: 8, attack_type: Slash, weak: &[], resist: &[] },
    MonsterTemplate { name: "Zombie", level: 4, hp: 18, ac: 10, atk: 2, damage_die: 8, attack_type: Blunt, weak: &[Fire, Slash], resist: &[Cold, Pierce] },
    MonsterTemplate { name: "Fire Beetle", level: 5, hp: 14, ac: 15, atk: 3, damage_die: 8, attack_type: Fire, weak: &[Cold], resist: &[Fire] },
    MonsterTemplate { name: "Ogre", level: 6, hp: 26, ac: 12, atk: 4, damage_die: 10, attack_type: Blunt, weak: &[], resist: &[] },
    MonsterTemplate { name: "Ice Wraith", level: 7, hp: 20, ac: 15, atk: 5, damage_die: 8, attack_type: Cold, weak: &[Fire], resist: &[Cold, Slash, Pierce] },
    MonsterTemplate { name: "Troll", level: 8, hp: 34, ac: 14, atk: 5, damage_die: 10, attack_type: Slash, weak: &[Fire, Acid], resist: &[] },
    MonsterTemplate { name: "Gelatinous Cube", level: 9, hp: 40, ac: 8, atk: 4, damage_die: 12, attack_type: Acid, weak: &[Electric], resist: &[Acid, Blunt] },
    MonsterTemplate { name: "Wyvern", level: 10, hp: 38, ac: 16, atk: 6, damage_die: 12, attack_type: Pierce, weak: &[], resist: &[] },
    MonsterTemplate { name: "Storm Giant", level: 13, hp: 60, ac: 17, atk: 8, damage_die: 12, attack_type: Electric, weak: &[], resist: &[Electric] },
    MonsterTemplate { name: "Vampire", level: 15, hp: 55, ac: 18, atk: 9, damage_die: 10, attack_type: Slash, weak: &[Fire], resist: &[Cold] },
    MonsterTemplate { name: "Young Dragon", level: 18, hp: 80, ac: 19, atk: 10, damage_die: 16, attack_type: Fire, weak: &[], resist: &[Fire] },
    MonsterTemplate { name: "Lich", level: 21, hp: 70, ac: 20, atk: 12, damage_die: 14, attack_type: Cold, weak: &[Blunt], resist: &[Cold, Electric] },
    MonsterTemplate { name: "Ancient Dragon", level: 25, hp: 120, ac: 22, atk: 14, damage_die: 20, attack_type: Fire, weak: &[], resist: &[Fire] },
];

/// Creates a monster scaled to `danger`.
///
/// Picks uniformly among templates in the level band just below `danger`;
/// past the top of the bestiary the strongest templates are scaled up.
pub fn spawn_monster(danger: u32, dice: &mut impl RandomSource) -> Option<Monster> {
    let danger = danger.max(1);
    let mut pool: Vec<&MonsterTemplate> = BESTIARY
        .iter()
        .filter(|t| t.level <= danger && t.level + MONSTER_LEVEL_BAND > danger)
        .collect();
    if pool.is_empty() {
        let top = BESTIARY.iter().filter(|t| t.level <= danger).map(|t| t.level).max()?;
        pool = BESTIARY.iter().filter(|t| t.level == top).collect();
    }

    let template = pool[dice.pick_index(pool.len())?];
    let level_diff = danger - template.level;
    let max_hp = template.hp + dice.roll_die(template.level * 2) + level_diff * 5;

    Some(Monster {
        name: template.name.to_string(),
        level: danger,
        hp: max_hp,
        max_hp,
        ac: template.ac + level_diff / 3,
        atk: template.atk + level_diff / 2,
        damage_die: template.damage_die,
        attack_type: template.attack_type,
        weak: template.weak.to_vec(),
        resist: template.resist.to_vec(),
    })
}
