//! Map generation, lazy monster placement and escape routes.

use super::types::{Direction, Map, Position};
use crate::combat::types::{spawn_monster, Monster};
use crate::core::constants::{EXTRA_DOOR_CHANCE_PERCENT, MONSTER_SPAWN_CHANCE_PERCENT};
use crate::core::dice::RandomSource;

const FLAT_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Builds `num_floors` floors of `width × width` rooms.
///
/// Each floor is a randomized depth-first spanning tree with extra doors
/// sprinkled in, so every room on a floor is reachable. One staircase joins
/// each pair of adjacent floors. The player starts at the entrance on floor 0.
pub fn generate_map(num_floors: usize, width: usize, dice: &mut impl RandomSource) -> Map {
    let num_floors = num_floors.max(1);
    let width = width.max(1);
    let mut map = Map::empty(num_floors, width);

    for floor in 0..num_floors {
        carve_floor(&mut map, floor, dice);
        add_extra_doors(&mut map, floor, dice);
    }

    for floor in 0..num_floors - 1 {
        let row = random_coord(width, dice);
        let col = random_coord(width, dice);
        map.open_door(Position::new(floor, row, col), Direction::Down);
    }

    let entrance = Position::new(0, random_coord(width, dice), random_coord(width, dice));
    map.entrance = entrance;
    map.player = entrance;
    if let Some(room) = map.room_mut(entrance) {
        room.visited = true;
        room.revealed = true;
        room.populated = true;
    }

    tracing::debug!(
        num_floors,
        width,
        ns_doors = map.ns_doors.len(),
        ew_doors = map.ew_doors.len(),
        "map generated"
    );
    map
}

fn random_coord(width: usize, dice: &mut impl RandomSource) -> usize {
    dice.pick_index(width).unwrap_or(0)
}

/// Recursive backtracker over one floor's grid.
fn carve_floor(map: &mut Map, floor: usize, dice: &mut impl RandomSource) {
    let width = map.width;
    let mut visited = vec![vec![false; width]; width];
    let start = Position::new(floor, random_coord(width, dice), random_coord(width, dice));
    visited[start.row][start.col] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited: Vec<(Direction, Position)> = FLAT_DIRECTIONS
            .into_iter()
            .filter_map(|dir| map.neighbor(current, dir).map(|next| (dir, next)))
            .filter(|(_, next)| !visited[next.row][next.col])
            .collect();

        match dice.pick_index(unvisited.len()) {
            Some(choice) => {
                let (dir, next) = unvisited[choice];
                map.open_door(current, dir);
                visited[next.row][next.col] = true;
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn add_extra_doors(map: &mut Map, floor: usize, dice: &mut impl RandomSource) {
    let positions: Vec<Position> = map.floor_positions(floor).collect();
    for pos in positions {
        for dir in [Direction::South, Direction::East] {
            if map.neighbor(pos, dir).is_none() || map.door(pos, dir).exists {
                continue;
            }
            if dice.percent_chance(EXTRA_DOOR_CHANCE_PERCENT) {
                map.open_door(pos, dir);
            }
        }
    }
}

/// Danger of a room: deeper floors are harder.
pub fn room_danger(dungeon_level: u32, pos: Position) -> u32 {
    dungeon_level + pos.floor as u32
}

/// Makes the one-time monster roll for the player's room the first time it
/// is entered, then returns whatever monster lives there.
pub fn populate_current_room<'a>(
    map: &'a mut Map,
    dungeon_level: u32,
    dice: &mut impl RandomSource,
) -> Option<&'a Monster> {
    let pos = map.player;
    let room = map.room_mut(pos)?;
    if !room.populated {
        room.populated = true;
        if dice.percent_chance(MONSTER_SPAWN_CHANCE_PERCENT) {
            room.monster = spawn_monster(room_danger(dungeon_level, pos), dice);
            if let Some(monster) = &room.monster {
                tracing::debug!(
                    room = %pos,
                    monster = %monster.name,
                    level = monster.level,
                    "monster spawned"
                );
            }
        }
    }
    room.monster.as_ref()
}

/// Directions the player can flee through: doors already used, or any
/// door at all when none has been used yet. Never the dungeon exit.
pub fn escape_routes(map: &Map) -> Vec<Direction> {
    let doors: Vec<(Direction, bool)> = map
        .current_doors()
        .into_iter()
        .filter(|(dir, _)| !map.is_exit(map.player, *dir))
        .map(|(dir, door)| (dir, door.used))
        .collect();

    let used: Vec<Direction> = doors.iter().filter(|(_, used)| *used).map(|(d, _)| *d).collect();
    if used.is_empty() {
        doors.into_iter().map(|(dir, _)| dir).collect()
    } else {
        used
    }
}
