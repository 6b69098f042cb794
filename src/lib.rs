//! Thousand Rooms - turn-based dungeon crawl rules engine
//!
//! The library holds the whole game; the binary is a thin console loop
//! around [`core::handle_input`] and [`ui::render_screen`].

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod items;
pub mod logging;
pub mod save;
pub mod ui;
