//! Text rendering for every mode. Everything here returns plain strings;
//! coloring is left to the binary.

mod dungeon_map;
mod inventory_table;
mod stats_panel;

pub use dungeon_map::floor_map;
pub use inventory_table::inventory_table;
pub use stats_panel::{combatant_line, header, player_stats, room_description};

use crate::character::Player;
use crate::core::dice::RandomSource;
use crate::core::game_state::Game;
use crate::core::mode::Mode;
use crate::items::InventoryOwner;

const TITLE: &str = "A THOUSAND ROOMS";
const HISTORY_LABEL_WIDTH: usize = 16;

/// Run statistics and, once the run is over, the epitaph.
pub fn history_page(player: &Player) -> String {
    let mut lines = Vec::new();
    if let Some(epitaph) = &player.epitaph {
        lines.push(format!("Here lies {}. {}.", player.name, epitaph.trim_end_matches('.')));
    }
    lines.push(format!(
        "Reached level {} with {} gold and {} items.",
        player.level,
        player.gold,
        player.items.len()
    ));
    let width = HISTORY_LABEL_WIDTH;
    for (key, count) in player.history.iter() {
        lines.push(format!("  {:<width$} {count}", key.label()));
    }
    lines.join("\n")
}

/// Everything above the input line for the current mode.
pub fn render_screen<D: RandomSource>(game: &Game<D>) -> String {
    let mut sections = Vec::new();
    if game.mode != Mode::Start {
        sections.push(header(&game.clock));
    }
    match game.mode {
        Mode::Start => sections.push(TITLE.to_string()),
        Mode::Peace => {
            sections.push(player_stats(&game.player));
            sections.push(room_description(&game.map));
        }
        Mode::Combat => {
            sections.push(player_stats(&game.player));
            if let Some(monster) = &game.encounter {
                sections.push(format!("Fighting: {}", combatant_line(monster)));
            }
        }
        Mode::Inventory => {
            sections.push(inventory_table(
                &game.player.items,
                &game.inventory_view,
                InventoryOwner::Player,
            ));
        }
        Mode::Map => {
            sections.push(floor_map(&game.map, game.map.player.floor));
            sections.push(room_description(&game.map));
        }
        Mode::GameOver => sections.push(history_page(&game.player)),
    }
    sections.join("\n\n")
}

/// The pending question, or the mode's legal actions.
pub fn options_line<D: RandomSource>(game: &Game<D>) -> String {
    match game.prompt {
        Some(prompt) => prompt.question().to_string(),
        None if game.mode == Mode::Inventory => InventoryOwner::Player.options().to_string(),
        None => game.mode.options().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HistoryKey;
    use crate::core::config::GameConfig;
    use crate::core::dice::SeededDice;
    use crate::core::mode::Prompt;
    use crate::save::SaveManager;
    use tempfile::TempDir;

    fn game(dir: &TempDir) -> Game {
        let config = GameConfig::default().with_seed(11);
        let saves = SaveManager::with_path(dir.path().join("save.json"));
        Game::new(config, SeededDice::new(11), saves)
    }

    #[test]
    fn test_title_screen() {
        let dir = TempDir::new().expect("temp dir");
        let game = game(&dir);
        assert_eq!(render_screen(&game), TITLE);
        assert_eq!(options_line(&game), "(N)ew game, (L)oad game");
    }

    #[test]
    fn test_peace_screen_has_header_and_room() {
        let dir = TempDir::new().expect("temp dir");
        let mut game = game(&dir);
        game.start_new_game("Ayla");
        let screen = render_screen(&game);
        assert!(screen.starts_with("Dungeon level 1 | Turn 1"));
        assert!(screen.contains("Ayla (level 1)"));
        assert!(screen.contains("Doors:"));
    }

    #[test]
    fn test_prompt_replaces_options() {
        let dir = TempDir::new().expect("temp dir");
        let mut game = game(&dir);
        game.prompt = Some(Prompt::PlayerName);
        assert_eq!(options_line(&game), "What is your name?");
    }

    #[test]
    fn test_history_page_with_epitaph() {
        let mut player = Player::new("Ayla");
        player.increment_history(HistoryKey::Kills, 3);
        player.killed_by("Goblin", 2);
        let page = history_page(&player);
        assert!(page.starts_with("Here lies Ayla. Killed by a Goblin on dungeon level 2."));
        assert!(page.contains("Monsters killed"));
        assert!(page.contains(" 3"));
    }
}
