//! Floors, rooms and doors the player walks through.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
