//! Attack resolution, death checks and kill rewards.

use super::types::{AttackOutcome, Combatant, Monster};
use crate::character::{HistoryKey, Player};
use crate::core::constants::{
    ATTACK_DIE, DEFEND_MULTIPLIER, GOLD_DIE, RISKY_WIN_HP_FRACTION, XP_PER_MONSTER_LEVEL,
};
use crate::core::dice::RandomSource;
use crate::core::narrative::{Narrative, Tone};
use crate::core::progression::TurnState;
use crate::items::generation::generate_item;

/// One attack: d20 + attack bonus against armor class (doubled while the
/// defender is defending). On a hit the damage die is rolled and handed to
/// the defender, which applies its own weaknesses and resistances.
pub fn resolve_attack<A, D>(
    attacker: &A,
    defender: &mut D,
    defender_defending: bool,
    dice: &mut impl RandomSource,
) -> AttackOutcome
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let roll = dice.roll_die(ATTACK_DIE);
    let attack_total = roll + attacker.attack_bonus();
    let target = if defender_defending {
        defender.armor_class() * DEFEND_MULTIPLIER
    } else {
        defender.armor_class()
    };

    if attack_total < target {
        tracing::debug!(attacker = attacker.name(), roll, attack_total, target, "attack missed");
        return AttackOutcome::miss(roll, attack_total, target);
    }

    let raw_damage = dice.roll_die(attacker.damage_die());
    let damage = defender.take_damage(raw_damage, attacker.attack_type());
    tracing::debug!(
        attacker = attacker.name(),
        roll,
        attack_total,
        target,
        raw_damage,
        damage,
        "attack hit"
    );

    AttackOutcome {
        hit: true,
        roll,
        attack_total,
        target,
        raw_damage,
        damage,
    }
}

fn note_effectiveness(outcome: &AttackOutcome, narrative: &mut Narrative) {
    if outcome.damage < outcome.raw_damage {
        narrative.push(Tone::Notice, "It's not very effective...");
    } else if outcome.damage > outcome.raw_damage {
        narrative.push(Tone::Effective, "It's very effective!");
    }
}

/// The player swings at the monster.
pub fn player_attack(
    player: &mut Player,
    monster: &mut Monster,
    dice: &mut impl RandomSource,
    narrative: &mut Narrative,
) -> AttackOutcome {
    let outcome = resolve_attack(&*player, monster, false, dice);
    if outcome.hit {
        narrative.push(
            Tone::Good,
            format!(
                "You {} the {} for {} damage!",
                player.attack_type().verb(),
                monster.name,
                outcome.damage
            ),
        );
        note_effectiveness(&outcome, narrative);
    } else {
        narrative.push(Tone::Muted, format!("You miss the {}.", monster.name));
    }
    player.increment_history(HistoryKey::DmgDone, outcome.damage as u64);
    outcome
}

/// The monster strikes back; `defending` doubles the player's armor class.
pub fn monster_attack(
    monster: &Monster,
    player: &mut Player,
    defending: bool,
    dice: &mut impl RandomSource,
    narrative: &mut Narrative,
) -> AttackOutcome {
    let outcome = resolve_attack(monster, player, defending, dice);
    if outcome.hit {
        narrative.push(
            Tone::Bad,
            format!(
                "The {} {} you for {} damage!",
                monster.name,
                monster.attack_type.verb_third_person(),
                outcome.damage
            ),
        );
        note_effectiveness(&outcome, narrative);
    } else {
        narrative.push(Tone::Muted, format!("The {} misses you.", monster.name));
    }
    player.increment_history(HistoryKey::DmgTaken, outcome.damage as u64);
    outcome
}

/// Records the cause of death when the player has fallen.
pub fn check_player_death(
    player: &mut Player,
    monster: &Monster,
    dungeon_level: u32,
    narrative: &mut Narrative,
) -> bool {
    if !player.is_dead() {
        return false;
    }
    narrative.push(Tone::Danger, "You die!");
    player.killed_by(&monster.name, dungeon_level);
    tracing::info!(monster = %monster.name, dungeon_level, "player died");
    true
}

/// Whether a kill right now counts as a narrow escape.
pub fn is_risky_win(player: &Player) -> bool {
    player.hp as f64 <= player.max_hp as f64 * RISKY_WIN_HP_FRACTION
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reward {
    pub xp: u64,
    pub gold: u64,
    pub leveled_up: bool,
    /// Set when the player's level dragged the dungeon level up with it.
    pub new_dungeon_level: Option<u32>,
    pub item_name: Option<String>,
}

/// XP, gold, level-up and loot for killing a monster of `monster_level`.
pub fn grant_rewards(
    player: &mut Player,
    monster_level: u32,
    clock: &mut TurnState,
    dice: &mut impl RandomSource,
    narrative: &mut Narrative,
) -> Reward {
    let xp = monster_level as u64 * XP_PER_MONSTER_LEVEL;
    let gold = monster_level as u64 * dice.roll_die(GOLD_DIE) as u64;
    player.xp += xp;
    player.gold += gold;
    narrative.push(
        Tone::Loot,
        format!("You gain {xp} experience and {gold} gold."),
    );

    let mut reward = Reward {
        xp,
        gold,
        ..Reward::default()
    };

    if player.check_level_up() {
        reward.leveled_up = true;
        narrative.push(Tone::Good, format!("You are now level {}!", player.level));
        if clock.dungeon_level < player.level {
            while clock.dungeon_level < player.level {
                clock.increment_dungeon_level();
            }
            reward.new_dungeon_level = Some(clock.dungeon_level);
            narrative.push(Tone::Notice, "The dungeon seems more dangerous...");
            tracing::info!(
                dungeon_level = clock.dungeon_level,
                player_level = player.level,
                "dungeon level raised to follow player"
            );
        }
    }

    if let Some(item) = generate_item(monster_level, dice) {
        narrative.push(Tone::Loot, format!("You find a {}!", item.display_name));
        reward.item_name = Some(item.display_name.clone());
        player.add_item(item);
    }

    reward
}
