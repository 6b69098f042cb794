//! Runtime options chosen on the command line.

use super::constants::{DEFAULT_FLOOR_WIDTH, DEFAULT_NUM_FLOORS};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed seed for a reproducible run; fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Save file location; the platform data directory when `None`.
    pub save_path: Option<PathBuf>,
    pub num_floors: usize,
    pub width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: None,
            num_floors: DEFAULT_NUM_FLOORS,
            width: DEFAULT_FLOOR_WIDTH,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    pub fn with_map_size(mut self, num_floors: usize, width: usize) -> Self {
        self.num_floors = num_floors;
        self.width = width;
        self
    }
}
