//! The context object that owns one run.

use super::config::GameConfig;
use super::dice::{RandomSource, SeededDice};
use super::mode::{Mode, Prompt};
use super::narrative::{Narrative, Tone};
use super::progression::TurnState;
use crate::character::Player;
use crate::combat::types::Monster;
use crate::dungeon::{generate_map, Map};
use crate::items::inventory::InventoryView;
use crate::save::{SaveData, SaveError, SaveManager, Snapshot};
use uuid::Uuid;

const DEFAULT_PLAYER_NAME: &str = "Adventurer";

/// Everything about a run: player, dungeon, clock, current encounter, and
/// the dice every random decision goes through.
#[derive(Debug)]
pub struct Game<D: RandomSource = SeededDice> {
    pub mode: Mode,
    /// Pending question; the next input line answers it.
    pub prompt: Option<Prompt>,
    pub player: Player,
    pub map: Map,
    pub clock: TurnState,
    /// The monster being fought, taken out of its room for the fight.
    pub encounter: Option<Monster>,
    pub inventory_view: InventoryView,
    /// Output of the most recent input line.
    pub narrative: Narrative,
    pub dice: D,
    pub config: GameConfig,
    pub saves: SaveManager,
    pub run_id: Uuid,
    running: bool,
}

impl Game<SeededDice> {
    /// Seeded from the config when a seed is given, from entropy otherwise.
    pub fn from_config(config: GameConfig) -> Result<Self, SaveError> {
        let saves = SaveManager::from_config(&config)?;
        let dice = match config.seed {
            Some(seed) => SeededDice::new(seed),
            None => SeededDice::from_entropy(),
        };
        Ok(Self::new(config, dice, saves))
    }
}

impl<D: RandomSource> Game<D> {
    pub fn new(config: GameConfig, dice: D, saves: SaveManager) -> Self {
        Self {
            mode: Mode::Start,
            prompt: None,
            player: Player::new(DEFAULT_PLAYER_NAME),
            map: Map::empty(1, 1),
            clock: TurnState::new(),
            encounter: None,
            inventory_view: InventoryView::new(),
            narrative: Narrative::new(),
            dice,
            config,
            saves,
            run_id: Uuid::new_v4(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        tracing::info!(run_id = %self.run_id, "quitting");
        self.running = false;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::info!(from = %self.mode, to = %mode, turn = self.clock.turn, "mode change");
        }
        self.mode = mode;
    }

    /// Creates the player and dungeon and drops the player at the entrance.
    pub fn start_new_game(&mut self, name: &str) {
        let name = match name.trim() {
            "" => DEFAULT_PLAYER_NAME,
            trimmed => trimmed,
        };
        self.player = Player::new(name);
        self.map = generate_map(self.config.num_floors, self.config.width, &mut self.dice);
        self.clock = TurnState::new();
        self.encounter = None;
        self.inventory_view = InventoryView::new();
        self.run_id = Uuid::new_v4();
        tracing::info!(run_id = %self.run_id, player = %self.player.name, "new game");
        self.set_mode(Mode::Peace);
    }

    /// Back to the title screen with a fresh run id and an empty dungeon.
    pub fn reset(&mut self) {
        self.prompt = None;
        self.player = Player::new(DEFAULT_PLAYER_NAME);
        self.map = Map::empty(1, 1);
        self.clock = TurnState::new();
        self.encounter = None;
        self.inventory_view = InventoryView::new();
        self.run_id = Uuid::new_v4();
        self.set_mode(Mode::Start);
    }

    pub fn snapshot(&self) -> SaveData {
        SaveData::capture(&self.player, &self.map, &self.clock)
    }

    /// Swaps in a fully restored run in one step.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot, run_id: Uuid) {
        self.player = snapshot.player;
        self.map = snapshot.map;
        self.clock = snapshot.clock;
        self.encounter = None;
        self.inventory_view = InventoryView::new();
        self.run_id = run_id;
        self.set_mode(Mode::Peace);
    }

    /// Advances the clock and announces a danger increase if one happens.
    pub fn spend_turns(&mut self, turns: u64) {
        let result = self.clock.advance(turns);
        if result.new_dungeon_level.is_some() {
            self.narrative.push(Tone::Notice, "The dungeon seems more dangerous...");
        }
    }
}
