//! Header, stat blocks and the room description.

use crate::character::Player;
use crate::combat::Combatant;
use crate::core::constants::XP_PER_PLAYER_LEVEL;
use crate::core::progression::TurnState;
use crate::dungeon::Map;

pub fn header(clock: &TurnState) -> String {
    format!("Dungeon level {} | Turn {}", clock.dungeon_level, clock.turn)
}

/// One line for anything that fights.
pub fn combatant_line(combatant: &impl Combatant) -> String {
    format!(
        "{} (level {})  HP {}/{}  AC {}  ATK +{}  d{} {}",
        combatant.name(),
        combatant.level(),
        combatant.hit_points(),
        combatant.max_hit_points(),
        combatant.armor_class(),
        combatant.attack_bonus(),
        combatant.damage_die(),
        combatant.attack_type().name(),
    )
}

/// Combat line plus progression and abilities.
pub fn player_stats(player: &Player) -> String {
    let mut lines = vec![
        combatant_line(player),
        format!(
            "XP {}/{}  Gold {}",
            player.xp,
            XP_PER_PLAYER_LEVEL * player.level as u64,
            player.gold
        ),
    ];
    let abilities: Vec<String> = player
        .abilities()
        .into_iter()
        .map(|(ability, level)| format!("{} {}", ability.abbreviation(), level))
        .collect();
    if !abilities.is_empty() {
        lines.push(format!("Abilities: {}", abilities.join(", ")));
    }
    lines.join("\n")
}

/// Where the player stands and which ways lead out.
pub fn room_description(map: &Map) -> String {
    let pos = map.player;
    let mut text = format!(
        "You are in room {}-{} on floor {}.",
        pos.row + 1,
        pos.col + 1,
        pos.floor + 1
    );
    let doors: Vec<String> = map
        .current_doors()
        .into_iter()
        .map(|(dir, door)| {
            let mut label = dir.name().to_string();
            if map.is_exit(pos, dir) {
                label.push_str(" (exit)");
            } else if door.used {
                label.push_str(" (used)");
            }
            label
        })
        .collect();
    if doors.is_empty() {
        text.push_str("\nThere are no doors.");
    } else {
        text.push_str(&format!("\nDoors: {}", doors.join(", ")));
    }
    text
}
