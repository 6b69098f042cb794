//! Per-mode action handlers. One input line in, narrative and a new mode out.

use super::constants::{HEALING_DIE, HEALING_PER_ITEM_LEVEL, RUN_AWAY_TURNS, TRAVEL_DIE};
use super::dice::RandomSource;
use super::game_state::Game;
use super::mode::{
    Action, CombatAction, GameOverAction, InventoryAction, ItemCommand, MapAction, Mode,
    PeaceAction, Prompt, StartAction,
};
use super::narrative::{Narrative, Tone};
use crate::character::{HistoryKey, InventoryError};
use crate::combat::logic::{
    check_player_death, grant_rewards, is_risky_win, monster_attack, player_attack,
};
use crate::combat::types::{Combatant, Monster};
use crate::dungeon::{escape_routes, populate_current_room, Direction};
use crate::items::types::{Ability, Effect};

/// Resolves one line of input. Returns `false` when the line was not a
/// legal action for the current mode; nothing changes in that case.
pub fn handle_input<D: RandomSource>(game: &mut Game<D>, input: &str) -> bool {
    game.narrative = Narrative::new();

    if let Some(prompt) = game.prompt {
        answer_prompt(game, prompt, input);
        return true;
    }

    let Some(action) = game.mode.parse(input) else {
        return false;
    };

    match action {
        Action::Start(action) => resolve_start(game, action),
        Action::Peace(action) => resolve_peace(game, action),
        Action::Map(action) => resolve_map(game, action),
        Action::Combat(action) => resolve_combat(game, action),
        Action::Inventory(action) => resolve_inventory(game, action),
        Action::GameOver(action) => resolve_game_over(game, action),
    }
    true
}

fn ask<D: RandomSource>(game: &mut Game<D>, prompt: Prompt) {
    game.prompt = Some(prompt);
    game.narrative.push(Tone::Notice, prompt.question());
}

fn first_key(input: &str) -> Option<char> {
    input.trim().chars().next().map(|c| c.to_ascii_uppercase())
}

fn answer_prompt<D: RandomSource>(game: &mut Game<D>, prompt: Prompt, input: &str) {
    match prompt {
        Prompt::PlayerName => {
            game.prompt = None;
            game.start_new_game(input);
            let name = game.player.name.clone();
            game.narrative.push(
                Tone::Good,
                format!("Welcome, {name}. The dungeon entrance yawns before you."),
            );
        }
        Prompt::ExitDungeon => {
            game.prompt = None;
            if first_key(input) == Some('Y') {
                game.player.set_epitaph("Escaped the dungeon!");
                game.narrative.push(Tone::Good, "You climb out into the daylight.");
                game.set_mode(Mode::GameOver);
            } else {
                game.narrative.plain("You stay in the dungeon.");
            }
        }
        Prompt::AfterSave => match first_key(input) {
            Some('Q') => {
                game.prompt = None;
                game.narrative.plain("Goodbye!");
                game.quit();
            }
            Some('C') => {
                game.prompt = None;
            }
            _ => game.narrative.push(Tone::Notice, prompt.question()),
        },
        Prompt::ItemNumber(command) => answer_item_number(game, command, input),
    }
}

fn resolve_start<D: RandomSource>(game: &mut Game<D>, action: StartAction) {
    match action {
        StartAction::NewGame => ask(game, Prompt::PlayerName),
        StartAction::Load => load_game(game),
    }
}

/// Restores the saved run. On any failure the current state is untouched.
pub fn load_game<D: RandomSource>(game: &mut Game<D>) {
    let loaded = game
        .saves
        .load()
        .and_then(|envelope| Ok((envelope.data.restore()?, envelope.run_id)));

    match loaded {
        Ok((snapshot, run_id)) => {
            game.apply_snapshot(snapshot, run_id);
            game.narrative.push(
                Tone::Good,
                format!("Welcome back, {}.", game.player.name),
            );
        }
        Err(err) => {
            tracing::warn!(error = %err, path = %game.saves.save_path().display(), "load failed");
            game.narrative.push(Tone::Bad, format!("Could not load game: {err}"));
        }
    }
}

/// Writes the run to the save slot, then asks whether to keep playing.
pub fn save_game<D: RandomSource>(game: &mut Game<D>) {
    let data = game.snapshot();
    match game.saves.save(&data, game.run_id) {
        Ok(()) => {
            game.narrative.push(Tone::Good, "Game saved.");
            ask(game, Prompt::AfterSave);
        }
        Err(err) => {
            tracing::warn!(error = %err, path = %game.saves.save_path().display(), "save failed");
            game.narrative.push(Tone::Bad, format!("Could not save game: {err}"));
        }
    }
}

fn resolve_peace<D: RandomSource>(game: &mut Game<D>, action: PeaceAction) {
    match action {
        PeaceAction::Continue => game.set_mode(Mode::Map),
        PeaceAction::Rest => rest(game),
        PeaceAction::Inventory => {
            game.inventory_view = Default::default();
            game.set_mode(Mode::Inventory);
        }
        PeaceAction::Save => save_game(game),
    }
}

fn rest<D: RandomSource>(game: &mut Game<D>) {
    let turns = game.player.rest_turns();
    game.narrative.plain(format!("You rest for {turns} turns."));
    game.spend_turns(turns);
    game.player.heal();
    game.player.increment_history(HistoryKey::Rest, 1);
    game.narrative.push(Tone::Good, "You feel fully rested.");
}

fn resolve_map<D: RandomSource>(game: &mut Game<D>, action: MapAction) {
    match action {
        MapAction::Back => game.set_mode(Mode::Peace),
        MapAction::Move(dir) => travel(game, dir),
    }
}

fn travel<D: RandomSource>(game: &mut Game<D>, dir: Direction) {
    let here = game.map.player;
    if !game.map.door(here, dir).exists {
        game.narrative.push(Tone::Bad, format!("There is no door {dir}."));
        return;
    }
    if game.map.is_exit(here, dir) {
        ask(game, Prompt::ExitDungeon);
        return;
    }
    if game.map.move_player(dir).is_none() {
        return;
    }
    game.narrative.plain(format!("You go {dir}."));

    let traveling = game.player.ability_level(Ability::Traveling);
    if traveling == 0 || game.dice.roll_die(TRAVEL_DIE) > traveling {
        game.spend_turns(1);
    } else {
        game.narrative.push(Tone::Good, "You travel swiftly.");
    }

    let dungeon_level = game.clock.dungeon_level;
    let found = populate_current_room(&mut game.map, dungeon_level, &mut game.dice).is_some();
    let monster = if found {
        game.map.current_room_mut().and_then(|room| room.monster.take())
    } else {
        None
    };

    match monster {
        Some(monster) => {
            game.narrative.push(
                Tone::Danger,
                format!("A level {} {} attacks!", monster.level, monster.name),
            );
            game.encounter = Some(monster);
            game.set_mode(Mode::Combat);
        }
        None => game.set_mode(Mode::Peace),
    }
}

fn resolve_combat<D: RandomSource>(game: &mut Game<D>, action: CombatAction) {
    let Some(mut monster) = game.encounter.take() else {
        game.set_mode(Mode::Peace);
        return;
    };

    match action {
        CombatAction::Attack => {
            player_attack(&mut game.player, &mut monster, &mut game.dice, &mut game.narrative);
            if monster.is_dead() {
                game.narrative
                    .push(Tone::Good, format!("You defeat the {}!", monster.name));
                game.player.increment_history(HistoryKey::Kills, 1);
                if is_risky_win(&game.player) {
                    game.player.increment_history(HistoryKey::RiskyWin, 1);
                }
                grant_rewards(
                    &mut game.player,
                    monster.level,
                    &mut game.clock,
                    &mut game.dice,
                    &mut game.narrative,
                );
                game.set_mode(Mode::Peace);
            } else {
                counter_attack(game, monster, false);
            }
            game.spend_turns(1);
        }
        CombatAction::Defend => {
            game.narrative.plain("You defend yourself!");
            counter_attack(game, monster, true);
            game.spend_turns(1);
        }
        CombatAction::Run => run_away(game, monster),
    }
}

/// The monster's turn, then the death check. A surviving player stays in
/// the fight.
fn counter_attack<D: RandomSource>(game: &mut Game<D>, monster: Monster, defending: bool) {
    monster_attack(
        &monster,
        &mut game.player,
        defending,
        &mut game.dice,
        &mut game.narrative,
    );
    let dungeon_level = game.clock.dungeon_level;
    if check_player_death(&mut game.player, &monster, dungeon_level, &mut game.narrative) {
        game.set_mode(Mode::GameOver);
    } else {
        game.encounter = Some(monster);
    }
}

/// Always succeeds. The monster stays behind in its room.
fn run_away<D: RandomSource>(game: &mut Game<D>, monster: Monster) {
    game.player.increment_history(HistoryKey::RunAway, 1);
    let origin = game.map.player;
    if let Some(room) = game.map.room_mut(origin) {
        room.monster = Some(monster);
    }

    let routes = escape_routes(&game.map);
    match game.dice.pick_index(routes.len()).map(|i| routes[i]) {
        Some(dir) => {
            game.map.move_player(dir);
            game.narrative.plain(format!("You flee {dir}!"));
        }
        None => game.narrative.plain("You back into a corner and the fight breaks off."),
    }

    let running = game.player.ability_level(Ability::Running);
    let turns = RUN_AWAY_TURNS.saturating_sub(running);
    if running > 0 {
        game.narrative.push(Tone::Good, "You run away very quickly!");
    }
    game.spend_turns(turns as u64);
    game.set_mode(Mode::Peace);
}

fn resolve_inventory<D: RandomSource>(game: &mut Game<D>, action: InventoryAction) {
    match action {
        InventoryAction::Equip => ask(game, Prompt::ItemNumber(ItemCommand::Equip)),
        InventoryAction::Use => ask(game, Prompt::ItemNumber(ItemCommand::Use)),
        InventoryAction::Previous => {
            if !game.inventory_view.previous_page() {
                game.narrative.push(Tone::Muted, "Already on the first page.");
            }
        }
        InventoryAction::Next => {
            if !game.inventory_view.next_page(&game.player.items) {
                game.narrative.push(Tone::Muted, "Already on the last page.");
            }
        }
        InventoryAction::Filter => {
            game.inventory_view.cycle_filter();
            let label = game.inventory_view.filter_label();
            game.narrative.plain(format!("Showing {label} items."));
        }
        InventoryAction::Close => game.set_mode(Mode::Peace),
    }
}

/// Turns a typed item number into an index into the player's items.
fn parse_item_number<D: RandomSource>(
    game: &Game<D>,
    input: &str,
) -> Result<usize, InventoryError> {
    let number: usize = input
        .parse()
        .map_err(|_| InventoryError::NotANumber(input.to_string()))?;
    game.inventory_view
        .resolve_number(&game.player.items, number)
        .ok_or(InventoryError::OutOfRange {
            index: number,
            len: game.inventory_view.filtered_indices(&game.player.items).len(),
        })
}

fn answer_item_number<D: RandomSource>(game: &mut Game<D>, command: ItemCommand, input: &str) {
    let input = input.trim();
    if input.is_empty() {
        game.prompt = None;
        game.narrative.push(Tone::Muted, "Never mind.");
        return;
    }

    let index = match parse_item_number(game, input) {
        Ok(index) => index,
        Err(err) => {
            // Prompt stays open
            game.narrative.push(Tone::Bad, err.to_string());
            game.narrative.push(Tone::Notice, Prompt::ItemNumber(command).question());
            return;
        }
    };

    game.prompt = None;
    match command {
        ItemCommand::Equip => match game.player.equip_item(index) {
            Ok(item) => {
                let text = format!("You equip the {}.", item.display_name);
                game.narrative.push(Tone::Good, text);
            }
            Err(err) => game.narrative.push(Tone::Bad, err.to_string()),
        },
        ItemCommand::Use => use_item(game, index),
    }
}

fn use_item<D: RandomSource>(game: &mut Game<D>, index: usize) {
    let item = match game.player.take_usable(index) {
        Ok(item) => item,
        Err(err) => {
            game.narrative.push(Tone::Bad, err.to_string());
            return;
        }
    };
    game.inventory_view.clamp_page(&game.player.items);

    match item.effect {
        Some(Effect::Healing) => {
            let amount = HEALING_PER_ITEM_LEVEL * item.level + game.dice.roll_die(HEALING_DIE);
            let healed = game.player.heal_by(amount);
            game.narrative.push(
                Tone::Good,
                format!("You use the {} and recover {healed} HP.", item.display_name),
            );
        }
        Some(Effect::Mapping) => {
            let floor = game.map.player.floor;
            game.map.reveal_floor(floor);
            game.narrative.push(
                Tone::Good,
                format!(
                    "You read the {}. The layout of this floor is revealed.",
                    item.display_name
                ),
            );
        }
        None => game
            .narrative
            .plain(format!("The {} crumbles to dust.", item.display_name)),
    }
}

fn resolve_game_over<D: RandomSource>(game: &mut Game<D>, action: GameOverAction) {
    match action {
        GameOverAction::Restart => {
            game.reset();
            game.narrative.plain("Another adventurer approaches the dungeon...");
        }
        GameOverAction::Quit => game.quit(),
    }
}
