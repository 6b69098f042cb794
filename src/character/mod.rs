//! The player character and its run history.

pub mod history;
pub mod player;

pub use history::*;
pub use player::*;
