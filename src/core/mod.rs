//! Core engine: dice, clock, modes and the state machine.

pub mod config;
pub mod constants;
pub mod dice;
pub mod game_logic;
pub mod game_state;
pub mod mode;
pub mod narrative;
pub mod progression;

pub use config::*;
pub use dice::*;
pub use game_logic::*;
pub use game_state::*;
pub use mode::*;
pub use narrative::*;
pub use progression::*;
