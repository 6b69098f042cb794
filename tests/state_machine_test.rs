//! Integration test: the mode state machine driven through `handle_input`
//!
//! Covers the full transition table: start, load and save, map travel and
//! the dungeon exit, the three combat actions, inventory prompts, and the
//! game-over screen. Every random decision is scripted or seeded.

use std::fs;
use thousand_rooms::character::HistoryKey;
use thousand_rooms::combat::{AttackType, Monster};
use thousand_rooms::core::{
    handle_input, Game, GameConfig, ItemCommand, Mode, Prompt, ScriptedDice, TurnState,
};
use thousand_rooms::dungeon::Direction;
use thousand_rooms::items::tables::find_template;
use thousand_rooms::items::{Ability, Item};
use thousand_rooms::save::SaveManager;
use tempfile::TempDir;

fn new_game(dir: &TempDir) -> Game<ScriptedDice> {
    let config = GameConfig::default().with_seed(5);
    let saves = SaveManager::with_path(dir.path().join("save.json"));
    Game::new(config, ScriptedDice::new([]).with_fallback_seed(5), saves)
}

/// A game already past the name prompt, standing at the entrance.
fn started_game(dir: &TempDir) -> Game<ScriptedDice> {
    let mut game = new_game(dir);
    assert!(handle_input(&mut game, "n"));
    assert_eq!(game.prompt, Some(Prompt::PlayerName));
    assert!(handle_input(&mut game, "Morgan"));
    assert_eq!(game.mode, Mode::Peace);
    game
}

fn goblin(hp: u32) -> Monster {
    Monster {
        name: "Goblin".to_string(),
        level: 3,
        hp,
        max_hp: hp,
        ac: 12,
        atk: 1,
        damage_die: 6,
        attack_type: AttackType::Slash,
        weak: Vec::new(),
        resist: Vec::new(),
    }
}

fn template(name: &str) -> Item {
    find_template(name).expect("template exists").to_item()
}

/// Equips a ring whose ability level is `(level + 1) / 2`.
fn equip_ring(game: &mut Game<ScriptedDice>, ability: Ability, level: u32) {
    let mut ring = template("Ring");
    ring.ability = Some(ability);
    ring.level = level;
    game.player.add_item(ring);
    let index = game.player.items.len() - 1;
    game.player.equip_item(index).expect("rings are equippable");
}

/// Map mode, plus a door out of the entrance room that is not the exit.
fn inner_door(game: &mut Game<ScriptedDice>) -> Direction {
    handle_input(game, "c");
    let here = game.map.player;
    let (dir, _) = game
        .map
        .current_doors()
        .into_iter()
        .find(|(dir, _)| !game.map.is_exit(here, *dir))
        .expect("the entrance room has an inner door");
    dir
}

fn enter_combat(game: &mut Game<ScriptedDice>, monster: Monster) {
    game.encounter = Some(monster);
    game.set_mode(Mode::Combat);
}

// =============================================================================
// Start, save and load
// =============================================================================

#[test]
fn test_new_game_names_player() {
    let dir = TempDir::new().unwrap();
    let game = started_game(&dir);
    assert_eq!(game.player.name, "Morgan");
    assert!(game.narrative.contains("Welcome, Morgan"));
    assert_eq!(game.clock, TurnState::new());
}

#[test]
fn test_blank_name_gets_default() {
    let dir = TempDir::new().unwrap();
    let mut game = new_game(&dir);
    handle_input(&mut game, "N");
    handle_input(&mut game, "   ");
    assert_eq!(game.player.name, "Adventurer");
}

#[test]
fn test_load_restores_clock_exactly() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    game.clock = TurnState::restore(250, 300, 2);
    game.player.gold = 77;

    handle_input(&mut game, "s");
    assert!(game.narrative.contains("Game saved."));
    assert_eq!(game.prompt, Some(Prompt::AfterSave));
    handle_input(&mut game, "c");
    assert_eq!(game.prompt, None);
    assert_eq!(game.mode, Mode::Peace);

    let mut loaded = new_game(&dir);
    assert!(handle_input(&mut loaded, "l"));
    assert_eq!(loaded.mode, Mode::Peace);
    assert_eq!(loaded.clock.turn, 250);
    assert_eq!(loaded.clock.dungeon_level, 2);
    assert_eq!(loaded.clock.next_level_threshold, 300);
    assert_eq!(loaded.player, game.player);
    assert_eq!(loaded.map.player, game.map.player);
    assert_eq!(loaded.run_id, game.run_id);
}

#[test]
fn test_save_then_quit() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "s");
    handle_input(&mut game, "x");
    assert_eq!(game.prompt, Some(Prompt::AfterSave));
    handle_input(&mut game, "q");
    assert!(!game.is_running());
}

#[test]
fn test_load_without_save_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut game = new_game(&dir);
    let clock = game.clock;
    let player = game.player.clone();

    assert!(handle_input(&mut game, "l"));
    assert_eq!(game.mode, Mode::Start);
    assert_eq!(game.clock, clock);
    assert_eq!(game.player, player);
    assert!(game.narrative.contains("Could not load game"));
}

#[test]
fn test_load_corrupt_file_changes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("save.json"), "{ not json").unwrap();
    let mut game = new_game(&dir);

    handle_input(&mut game, "l");
    assert_eq!(game.mode, Mode::Start);
    assert!(game.narrative.contains("Could not load game"));
}

#[test]
fn test_load_tampered_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "s");
    handle_input(&mut game, "c");

    let path = dir.path().join("save.json");
    let mut envelope: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    envelope["data"]["player"]["gold"] = serde_json::json!(999_999);
    fs::write(&path, serde_json::to_string(&envelope).unwrap()).unwrap();

    let mut loaded = new_game(&dir);
    let map_before = loaded.map.clone();
    handle_input(&mut loaded, "l");
    assert_eq!(loaded.mode, Mode::Start);
    assert_eq!(loaded.player.gold, 0);
    assert_eq!(loaded.map, map_before);
    assert!(loaded.narrative.contains("checksum"));
}

// =============================================================================
// Unknown input
// =============================================================================

#[test]
fn test_unknown_action_in_every_mode() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    enter_combat(&mut game, goblin(10));

    let modes = [
        Mode::Start,
        Mode::Peace,
        Mode::Map,
        Mode::Combat,
        Mode::Inventory,
        Mode::GameOver,
    ];
    for mode in modes {
        game.set_mode(mode);
        let clock = game.clock;
        let hp = game.player.hp;
        assert!(!handle_input(&mut game, "z"), "{mode} accepted z");
        assert_eq!(game.mode, mode);
        assert_eq!(game.clock, clock);
        assert_eq!(game.player.hp, hp);
        assert!(game.narrative.is_empty());
    }
}

#[test]
fn test_empty_line_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    assert!(!handle_input(&mut game, ""));
    assert_eq!(game.mode, Mode::Peace);
}

// =============================================================================
// Map and the dungeon exit
// =============================================================================

#[test]
fn test_exit_dungeon_confirmed() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "c");
    assert_eq!(game.mode, Mode::Map);

    handle_input(&mut game, "u");
    assert_eq!(game.prompt, Some(Prompt::ExitDungeon));
    handle_input(&mut game, "y");
    assert_eq!(game.mode, Mode::GameOver);
    assert_eq!(game.player.epitaph.as_deref(), Some("Escaped the dungeon!"));
}

#[test]
fn test_exit_dungeon_declined() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "c");
    handle_input(&mut game, "u");
    handle_input(&mut game, "n");
    assert_eq!(game.prompt, None);
    assert_eq!(game.mode, Mode::Map);
    assert!(game.player.epitaph.is_none());
}

#[test]
fn test_move_through_missing_door() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "c");
    let here = game.map.player;
    let blocked = Direction::ALL
        .into_iter()
        .find(|&dir| !game.map.door(here, dir).exists)
        .expect("the entrance room is not open on all six sides");

    handle_input(&mut game, &blocked.key().to_string());
    assert_eq!(game.map.player, here);
    assert_eq!(game.mode, Mode::Map);
    assert!(game.narrative.contains("There is no door"));
}

#[test]
fn test_move_spends_a_turn_and_marks_door() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "c");
    let here = game.map.player;
    let (dir, _) = game
        .map
        .current_doors()
        .into_iter()
        .find(|(dir, _)| !game.map.is_exit(here, *dir))
        .expect("the entrance room has an inner door");

    handle_input(&mut game, &dir.key().to_string());
    assert_ne!(game.map.player, here);
    assert!(game.map.door(here, dir).used);
    assert_eq!(game.clock.turn, 2);
    assert!(matches!(game.mode, Mode::Peace | Mode::Combat));
    assert_eq!(game.mode == Mode::Combat, game.encounter.is_some());
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_attack_kills_and_rewards() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    enter_combat(&mut game, goblin(1));
    // d20 hit, d4 damage, d10 gold, loot face 1 (no drop)
    for roll in [20, 4, 4, 1] {
        game.dice.push(roll);
    }

    handle_input(&mut game, "a");
    assert_eq!(game.mode, Mode::Peace);
    assert!(game.encounter.is_none());
    assert_eq!(game.player.xp, 300);
    assert_eq!(game.player.gold, 12);
    assert_eq!(game.player.history.get(HistoryKey::Kills), 1);
    assert_eq!(game.player.history.get(HistoryKey::DmgDone), 4);
    assert_eq!(game.player.items.len(), 2);
    assert_eq!(game.clock.turn, 2);
    assert!(game.narrative.contains("You defeat the Goblin!"));
}

#[test]
fn test_attack_miss_gets_counter_attack() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    enter_combat(&mut game, goblin(10));
    // player d20 misses (1 + 2 < 12), monster d20 1 misses (1 + 1 < 11)
    game.dice.push(1);
    game.dice.push(1);

    handle_input(&mut game, "a");
    assert_eq!(game.mode, Mode::Combat);
    assert_eq!(game.encounter.as_ref().map(|m| m.hp), Some(10));
    assert!(game.narrative.contains("You miss the Goblin."));
    assert!(game.narrative.contains("The Goblin misses you."));
    assert_eq!(game.clock.turn, 2);
}

#[test]
fn test_defend_doubles_armor_class() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    enter_combat(&mut game, goblin(10));
    // 15 + 1 hits AC 11 but not the doubled 22
    game.dice.push(15);

    handle_input(&mut game, "d");
    assert_eq!(game.mode, Mode::Combat);
    assert_eq!(game.player.hp, game.player.max_hp);
    assert!(game.narrative.contains("You defend yourself!"));
    assert_eq!(game.clock.turn, 2);
}

#[test]
fn test_death_ends_the_run() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    game.player.hp = 1;
    enter_combat(&mut game, goblin(10));
    // player misses, monster hits for 6
    for roll in [1, 20, 6] {
        game.dice.push(roll);
    }

    handle_input(&mut game, "a");
    assert_eq!(game.mode, Mode::GameOver);
    assert_eq!(game.player.hp, 0);
    assert_eq!(
        game.player.epitaph.as_deref(),
        Some("Killed by a Goblin on dungeon level 1")
    );
    assert!(game.narrative.contains("You die!"));

    handle_input(&mut game, "r");
    assert_eq!(game.mode, Mode::Start);
    assert!(game.player.epitaph.is_none());
}

#[test]
fn test_run_away_always_reaches_peace() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    let origin = game.map.player;
    enter_combat(&mut game, goblin(10));

    handle_input(&mut game, "r");
    assert_eq!(game.mode, Mode::Peace);
    assert!(game.encounter.is_none());
    assert_eq!(game.clock.turn, 11);
    assert_eq!(game.player.history.get(HistoryKey::RunAway), 1);

    let fled = Direction::ALL
        .into_iter()
        .find(|&dir| game.map.neighbor(origin, dir) == Some(game.map.player))
        .expect("player fled to a neighbouring room");
    assert!(game.map.door(origin, fled).used);
    let left_behind = game.map.room(origin).and_then(|room| room.monster.as_ref());
    assert_eq!(left_behind.map(|m| m.name.as_str()), Some("Goblin"));
}

#[test]
fn test_running_shortens_the_escape() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    equip_ring(&mut game, Ability::Running, 5);
    assert_eq!(game.player.ability_level(Ability::Running), 3);
    enter_combat(&mut game, goblin(10));

    handle_input(&mut game, "r");
    assert_eq!(game.mode, Mode::Peace);
    assert_eq!(game.clock.turn, 1 + 7);
    assert!(game.narrative.contains("You run away very quickly!"));
}

#[test]
fn test_high_running_escapes_for_free() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    equip_ring(&mut game, Ability::Running, 21);
    assert_eq!(game.player.ability_level(Ability::Running), 11);
    enter_combat(&mut game, goblin(10));

    handle_input(&mut game, "r");
    assert_eq!(game.mode, Mode::Peace);
    assert_eq!(game.clock.turn, 1);
}

#[test]
fn test_traveling_roll_saves_the_turn() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    equip_ring(&mut game, Ability::Traveling, 3);
    let door = inner_door(&mut game);
    // d10 of 2 is within traveling level 2
    game.dice.push(2);

    handle_input(&mut game, &door.key().to_string());
    assert_eq!(game.clock.turn, 1);
    assert!(game.narrative.contains("You travel swiftly."));
}

#[test]
fn test_failed_traveling_roll_spends_the_turn() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    equip_ring(&mut game, Ability::Traveling, 3);
    let door = inner_door(&mut game);
    game.dice.push(3);

    handle_input(&mut game, &door.key().to_string());
    assert_eq!(game.clock.turn, 2);
    assert!(!game.narrative.contains("You travel swiftly."));
}

// =============================================================================
// Inventory
// =============================================================================

#[test]
fn test_equip_non_number_reprompts() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "i");
    assert_eq!(game.mode, Mode::Inventory);
    let before: Vec<bool> = game.player.items.iter().map(|item| item.equipped).collect();

    handle_input(&mut game, "e");
    handle_input(&mut game, "abc");
    assert_eq!(game.prompt, Some(Prompt::ItemNumber(ItemCommand::Equip)));
    assert!(game.narrative.contains("Please enter an integer"));
    let after: Vec<bool> = game.player.items.iter().map(|item| item.equipped).collect();
    assert_eq!(before, after);
}

#[test]
fn test_inventory_paging_and_close() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    handle_input(&mut game, "i");
    handle_input(&mut game, "p");
    assert!(game.narrative.contains("Already on the first page."));
    handle_input(&mut game, "f");
    assert!(game.narrative.contains("Showing weapon items."));
    handle_input(&mut game, "c");
    assert_eq!(game.mode, Mode::Peace);
}

#[test]
fn test_mapping_scroll_reveals_the_floor() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    let floor = game.map.player.floor;
    let revealed = |game: &Game<ScriptedDice>| {
        game.map
            .floor_positions(floor)
            .filter(|&pos| game.map.room(pos).is_some_and(|room| room.revealed))
            .count()
    };
    assert_eq!(revealed(&game), 1);
    game.player.add_item(template("Scroll"));

    handle_input(&mut game, "i");
    handle_input(&mut game, "u");
    handle_input(&mut game, "3");
    assert_eq!(revealed(&game), game.map.width * game.map.width);
    assert_eq!(game.player.items.len(), 2);
    assert!(game.narrative.contains("The layout of this floor is revealed."));
}

#[test]
fn test_using_last_item_on_last_page_returns_to_a_real_page() {
    let dir = TempDir::new().unwrap();
    let mut game = started_game(&dir);
    for _ in 0..9 {
        game.player.add_item(template("Potion"));
    }
    game.player.hp = 5;
    handle_input(&mut game, "i");
    handle_input(&mut game, "n");
    assert_eq!(game.inventory_view.page, 1);

    handle_input(&mut game, "u");
    handle_input(&mut game, "11");
    assert_eq!(game.player.items.len(), 10);
    assert_eq!(game.inventory_view.page, 0);
    assert!(!game.inventory_view.page_entries(&game.player.items).is_empty());
}
