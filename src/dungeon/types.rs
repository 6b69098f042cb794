//! Dungeon topology: floors of square room grids joined by doors and stairs.
//!
//! Floor 0 is the top floor; "down" increases the floor number. A door is
//! shared by the two rooms it joins, so using it from either side marks it.

use crate::combat::types::Monster;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    pub fn key(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.key() == key.to_ascii_uppercase())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Door {
    pub exists: bool,
    pub used: bool,
}

impl Door {
    pub fn open() -> Self {
        Self {
            exists: true,
            used: false,
        }
    }

    pub fn use_door(&mut self) {
        self.used = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub floor: usize,
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(floor: usize, row: usize, col: usize) -> Self {
        Self { floor, row, col }
    }

    /// Save-file key, `"{floor}-{row}-{col}"`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.floor, self.row, self.col)
    }

    pub fn parse_key(key: &str) -> Option<Self> {
        let mut parts = key.split('-').map(|part| part.parse::<usize>().ok());
        let position = Self::new(parts.next()??, parts.next()??, parts.next()??);
        if parts.next().is_some() {
            return None;
        }
        Some(position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Room {
    /// Shown on the floor map.
    pub revealed: bool,
    pub visited: bool,
    /// The monster roll has been made for this room.
    pub populated: bool,
    #[serde(skip)]
    pub monster: Option<Monster>,
}

/// The whole dungeon. Doors are stored once, keyed by the room on their
/// north, west or upper side.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub num_floors: usize,
    pub width: usize,
    pub rooms: Vec<Room>,
    /// Door between a room and the room south of it.
    pub ns_doors: BTreeMap<Position, Door>,
    /// Door between a room and the room east of it.
    pub ew_doors: BTreeMap<Position, Door>,
    /// Staircase between a room and the same cell one floor down.
    pub stairs: BTreeMap<Position, Door>,
    /// The way out, in a room on floor 0.
    pub entrance: Position,
    pub entrance_door: Door,
    pub player: Position,
}

impl Map {
    /// A map with every room closed off; generation opens the doors.
    pub fn empty(num_floors: usize, width: usize) -> Self {
        let start = Position::new(0, 0, 0);
        Self {
            num_floors,
            width,
            rooms: vec![Room::default(); num_floors * width * width],
            ns_doors: BTreeMap::new(),
            ew_doors: BTreeMap::new(),
            stairs: BTreeMap::new(),
            entrance: start,
            entrance_door: Door::open(),
            player: start,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.floor < self.num_floors && pos.row < self.width && pos.col < self.width
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.floor * self.width + pos.row) * self.width + pos.col)
    }

    pub fn room(&self, pos: Position) -> Option<&Room> {
        self.index(pos).and_then(|i| self.rooms.get(i))
    }

    pub fn room_mut(&mut self, pos: Position) -> Option<&mut Room> {
        self.index(pos).and_then(move |i| self.rooms.get_mut(i))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.num_floors).flat_map(move |floor| self.floor_positions(floor))
    }

    pub fn floor_positions(&self, floor: usize) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..width).flat_map(move |row| (0..width).map(move |col| Position::new(floor, row, col)))
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.room(self.player)
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.room_mut(self.player)
    }

    /// Neighbouring cell in `dir`, if it is on the map.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = match dir {
            Direction::North => Position::new(pos.floor, pos.row.checked_sub(1)?, pos.col),
            Direction::South => Position::new(pos.floor, pos.row + 1, pos.col),
            Direction::West => Position::new(pos.floor, pos.row, pos.col.checked_sub(1)?),
            Direction::East => Position::new(pos.floor, pos.row, pos.col + 1),
            Direction::Up => Position::new(pos.floor.checked_sub(1)?, pos.row, pos.col),
            Direction::Down => Position::new(pos.floor + 1, pos.row, pos.col),
        };
        self.contains(next).then_some(next)
    }

    /// Where the door leaving `pos` in `dir` is stored.
    fn door_slot(&self, pos: Position, dir: Direction) -> Option<(DoorSet, Position)> {
        match dir {
            Direction::North => Some((DoorSet::NorthSouth, self.neighbor(pos, dir)?)),
            Direction::South => self.neighbor(pos, dir).map(|_| (DoorSet::NorthSouth, pos)),
            Direction::West => Some((DoorSet::EastWest, self.neighbor(pos, dir)?)),
            Direction::East => self.neighbor(pos, dir).map(|_| (DoorSet::EastWest, pos)),
            Direction::Up => Some((DoorSet::Stairs, self.neighbor(pos, dir)?)),
            Direction::Down => self.neighbor(pos, dir).map(|_| (DoorSet::Stairs, pos)),
        }
    }

    fn door_set(&self, set: DoorSet) -> &BTreeMap<Position, Door> {
        match set {
            DoorSet::NorthSouth => &self.ns_doors,
            DoorSet::EastWest => &self.ew_doors,
            DoorSet::Stairs => &self.stairs,
        }
    }

    fn door_set_mut(&mut self, set: DoorSet) -> &mut BTreeMap<Position, Door> {
        match set {
            DoorSet::NorthSouth => &mut self.ns_doors,
            DoorSet::EastWest => &mut self.ew_doors,
            DoorSet::Stairs => &mut self.stairs,
        }
    }

    /// Whether `pos`/`dir` is the way out of the dungeon.
    pub fn is_exit(&self, pos: Position, dir: Direction) -> bool {
        dir == Direction::Up && pos == self.entrance
    }

    /// The door leaving `pos` in `dir`. Absent doors read as closed.
    pub fn door(&self, pos: Position, dir: Direction) -> Door {
        if self.is_exit(pos, dir) {
            return self.entrance_door;
        }
        self.door_slot(pos, dir)
            .and_then(|(set, key)| self.door_set(set).get(&key).copied())
            .unwrap_or_default()
    }

    pub fn door_mut(&mut self, pos: Position, dir: Direction) -> Option<&mut Door> {
        if self.is_exit(pos, dir) {
            return Some(&mut self.entrance_door);
        }
        let (set, key) = self.door_slot(pos, dir)?;
        self.door_set_mut(set).get_mut(&key)
    }

    /// Opens a door between `pos` and its neighbour in `dir`.
    pub fn open_door(&mut self, pos: Position, dir: Direction) -> bool {
        match self.door_slot(pos, dir) {
            Some((set, key)) => {
                self.door_set_mut(set).insert(key, Door::open());
                true
            }
            None => false,
        }
    }

    /// Existing doors out of the player's room, in N, S, E, W, U, D order.
    pub fn current_doors(&self) -> Vec<(Direction, Door)> {
        Direction::ALL
            .into_iter()
            .map(|dir| (dir, self.door(self.player, dir)))
            .filter(|(_, door)| door.exists)
            .collect()
    }

    /// Moves the player through the door in `dir`, marking it used.
    /// Returns the new position, or `None` when there is no door.
    pub fn move_player(&mut self, dir: Direction) -> Option<Position> {
        if self.is_exit(self.player, dir) {
            return None;
        }
        let target = self.neighbor(self.player, dir)?;
        let door = self.door_mut(self.player, dir).filter(|door| door.exists)?;
        door.use_door();
        self.player = target;
        if let Some(room) = self.room_mut(target) {
            room.visited = true;
            room.revealed = true;
        }
        Some(target)
    }

    /// Marks every room on `floor` as shown on the map.
    pub fn reveal_floor(&mut self, floor: usize) {
        let positions: Vec<Position> = self.floor_positions(floor).collect();
        for pos in positions {
            if let Some(room) = self.room_mut(pos) {
                room.revealed = true;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DoorSet {
    NorthSouth,
    EastWest,
    Stairs,
}
