//! Turn counter and dungeon-level scaling.
//!
//! The dungeon grows more dangerous as turns pass, independent of player
//! choices: every time the turn counter reaches the threshold the dungeon
//! level rises and the next threshold moves `100 × level` turns further out.

use super::constants::{STARTING_DUNGEON_LEVEL, STARTING_TURN, TURNS_PER_LEVEL_STEP};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub turn: u64,
    pub dungeon_level: u32,
    pub next_level_threshold: u64,
}

/// What happened during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceResult {
    pub turns_spent: u64,
    /// Set when the threshold was crossed and danger increased.
    pub new_dungeon_level: Option<u32>,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            turn: STARTING_TURN,
            dungeon_level: STARTING_DUNGEON_LEVEL,
            next_level_threshold: threshold_for_level(STARTING_DUNGEON_LEVEL),
        }
    }

    /// Restores a clock exactly as saved, without recomputing anything.
    pub fn restore(turn: u64, next_level_threshold: u64, dungeon_level: u32) -> Self {
        Self {
            turn,
            dungeon_level,
            next_level_threshold,
        }
    }

    /// Spends `turns` turns. At most one dungeon level is gained per call,
    /// even when a long rest jumps past several thresholds.
    pub fn advance(&mut self, turns: u64) -> AdvanceResult {
        self.turn += turns;
        let mut result = AdvanceResult {
            turns_spent: turns,
            new_dungeon_level: None,
        };
        if self.turn >= self.next_level_threshold {
            self.increment_dungeon_level();
            result.new_dungeon_level = Some(self.dungeon_level);
            tracing::info!(
                turn = self.turn,
                dungeon_level = self.dungeon_level,
                next_threshold = self.next_level_threshold,
                "dungeon level increased by time"
            );
        }
        result
    }

    /// Raises danger by one level and pushes the threshold out by
    /// `100 × new level`.
    pub fn increment_dungeon_level(&mut self) {
        self.dungeon_level += 1;
        self.next_level_threshold += TURNS_PER_LEVEL_STEP * self.dungeon_level as u64;
    }

    /// Turns left before the dungeon gets more dangerous.
    pub fn turns_until_next_level(&self) -> u64 {
        self.next_level_threshold.saturating_sub(self.turn)
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Threshold reached after climbing to `level` from level 1: `100 × (1 + … + level)`.
pub fn threshold_for_level(level: u32) -> u64 {
    let level = level as u64;
    TURNS_PER_LEVEL_STEP * level * (level + 1) / 2
}
