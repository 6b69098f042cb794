//! Combatants, attack resolution and rewards.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
