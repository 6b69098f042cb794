//! ASCII floor map with fog of war.
//!
//! ```text
//! @-.
//! | .
//! .-<
//! ```
//!
//! Unrevealed rooms stay blank. A door shows once either room beside it
//! is revealed.

use crate::dungeon::{Direction, Map, Position};

mod symbols {
    pub const PLAYER: char = '@';
    pub const ENTRANCE: char = 'E';
    pub const STAIRS_UP: char = '<';
    pub const STAIRS_DOWN: char = '>';
    pub const STAIRS_BOTH: char = '%';
    pub const VISITED: char = '.';
    pub const REVEALED: char = '?';
    pub const HIDDEN: char = ' ';
    pub const H_DOOR: char = '-';
    pub const V_DOOR: char = '|';
}

fn is_shown(map: &Map, pos: Position) -> bool {
    map.room(pos).is_some_and(|room| room.revealed)
}

fn room_symbol(map: &Map, pos: Position) -> char {
    if pos == map.player {
        return symbols::PLAYER;
    }
    let Some(room) = map.room(pos).filter(|room| room.revealed) else {
        return symbols::HIDDEN;
    };
    let up = map.door(pos, Direction::Up).exists;
    let down = map.door(pos, Direction::Down).exists;
    match (pos == map.entrance, up, down) {
        (true, _, false) => symbols::ENTRANCE,
        (_, true, true) => symbols::STAIRS_BOTH,
        (_, true, false) => symbols::STAIRS_UP,
        (_, false, true) => symbols::STAIRS_DOWN,
        _ if room.visited => symbols::VISITED,
        _ => symbols::REVEALED,
    }
}

/// Door between `pos` and its neighbour in `dir`, drawn only when one side
/// is revealed.
fn door_symbol(map: &Map, pos: Position, dir: Direction, symbol: char) -> char {
    let Some(next) = map.neighbor(pos, dir) else {
        return symbols::HIDDEN;
    };
    let visible = is_shown(map, pos) || is_shown(map, next);
    if visible && map.door(pos, dir).exists {
        symbol
    } else {
        symbols::HIDDEN
    }
}

/// Draws `floor`, one text row per room row plus one per row of N/S doors.
pub fn floor_map(map: &Map, floor: usize) -> String {
    let mut lines = Vec::with_capacity(map.width * 2);
    for row in 0..map.width {
        let mut rooms = String::new();
        let mut doors = String::new();
        for col in 0..map.width {
            let pos = Position::new(floor, row, col);
            rooms.push(room_symbol(map, pos));
            rooms.push(door_symbol(map, pos, Direction::East, symbols::H_DOOR));
            doors.push(door_symbol(map, pos, Direction::South, symbols::V_DOOR));
            doors.push(' ');
        }
        lines.push(rooms.trim_end().to_string());
        if row + 1 < map.width {
            lines.push(doors.trim_end().to_string());
        }
    }
    format!("Floor {}\n{}", floor + 1, lines.join("\n"))
}
