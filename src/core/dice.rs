//! Die-roll primitive shared by every random decision in the engine.
//!
//! Attack rolls, damage, loot, ego selection, map layout and escape routes
//! all go through [`RandomSource::roll_die`], so a seeded source replays a
//! whole run exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Uniform integer die roller.
pub trait RandomSource {
    /// Rolls a die with `size` faces, returning a value in `[1, size]`.
    /// A zero-sized die is treated as a one-sided die.
    fn roll_die(&mut self, size: u32) -> u32;

    /// Uniform value in `[low, high]`, expressed as a single die roll.
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.roll_die(high - low + 1) - 1
    }

    /// Uniform index into a collection of `len` elements.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.roll_die(len as u32) as usize - 1)
    }

    /// True with `percent` in 100 chance.
    fn percent_chance(&mut self, percent: u32) -> bool {
        self.roll_die(100) <= percent
    }
}

/// ChaCha-backed dice. Same seed, same run.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededDice {
    fn roll_die(&mut self, size: u32) -> u32 {
        self.rng.gen_range(1..=size.max(1))
    }
}

/// Replays queued rolls in order, then falls back to a seeded stream.
///
/// Queued values are clamped into `[1, size]` of whichever die consumes them.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    queued: VecDeque<u32>,
    fallback: SeededDice,
    consumed: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queued: rolls.into_iter().collect(),
            fallback: SeededDice::new(0),
            consumed: 0,
        }
    }

    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = SeededDice::new(seed);
        self
    }

    pub fn push(&mut self, roll: u32) {
        self.queued.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.queued.len()
    }

    /// Total rolls made so far, scripted or not.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedDice {
    fn roll_die(&mut self, size: u32) -> u32 {
        self.consumed += 1;
        match self.queued.pop_front() {
            Some(roll) => roll.clamp(1, size.max(1)),
            None => self.fallback.roll_die(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_die_stays_in_range() {
        let mut dice = SeededDice::new(7);
        for size in [1, 2, 6, 20, 100] {
            for _ in 0..500 {
                let roll = dice.roll_die(size);
                assert!((1..=size).contains(&roll), "d{size} rolled {roll}");
            }
        }
    }

    #[test]
    fn test_zero_sided_die_rolls_one() {
        let mut dice = SeededDice::new(1);
        assert_eq!(dice.roll_die(0), 1);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededDice::new(12345);
        let mut b = SeededDice::new(12345);
        let rolls_a: Vec<u32> = (0..50).map(|_| a.roll_die(20)).collect();
        let rolls_b: Vec<u32> = (0..50).map(|_| b.roll_die(20)).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_roll_range_bounds() {
        let mut dice = SeededDice::new(3);
        for _ in 0..1000 {
            let r = dice.roll_range(80, 100);
            assert!((80..=100).contains(&r));
        }
        assert_eq!(dice.roll_range(100, 100), 100);
        assert_eq!(dice.roll_range(120, 100), 120);
    }

    #[test]
    fn test_pick_index_empty() {
        let mut dice = SeededDice::new(3);
        assert_eq!(dice.pick_index(0), None);
        assert_eq!(dice.pick_index(1), Some(0));
    }

    #[test]
    fn test_scripted_dice_replays_then_falls_back() {
        let mut dice = ScriptedDice::new([15, 3]);
        assert_eq!(dice.roll_die(20), 15);
        assert_eq!(dice.roll_die(6), 3);
        assert_eq!(dice.remaining(), 0);
        let roll = dice.roll_die(6);
        assert!((1..=6).contains(&roll));
        assert_eq!(dice.consumed(), 3);
    }

    #[test]
    fn test_scripted_dice_clamps_to_die() {
        let mut dice = ScriptedDice::new([50, 0]);
        assert_eq!(dice.roll_die(20), 20);
        assert_eq!(dice.roll_die(20), 1);
    }

    #[test]
    fn test_scripted_roll_range_maps_directly() {
        // roll_range(80, 100) uses a d21; a scripted 1 maps to 80
        let mut dice = ScriptedDice::new([1, 21]);
        assert_eq!(dice.roll_range(80, 100), 80);
        assert_eq!(dice.roll_range(80, 100), 100);
    }
}
