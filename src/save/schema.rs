//! Versioned on-disk save format.
//!
//! The run is flattened into keyed maps: items apart from the player, and
//! rooms, monsters, doors and stairs keyed by `"{floor}-{row}-{col}"`. The
//! clock is stored as `game: {turn, nextLevel, level}` and restored as-is.

use super::manager::SaveError;
use crate::character::{History, Player};
use crate::combat::types::Monster;
use crate::core::constants::MAX_SAVED_ROOMS;
use crate::core::progression::TurnState;
use crate::dungeon::{Door, Map, Position, Room};
use crate::items::types::Item;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

/// File wrapper: metadata plus a checksum over the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    pub version: u32,
    pub saved_at: String,
    pub run_id: Uuid,
    pub checksum: String,
    pub data: SaveData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: PlayerRecord,
    pub items: Vec<Item>,
    pub map: MapRecord,
    pub game: GameRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub gold: u64,
    pub hp: u32,
    pub max_hp: u32,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub epitaph: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DoorRecord {
    pub ns: BTreeMap<String, Door>,
    pub ew: BTreeMap<String, Door>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRecord {
    pub num_floors: usize,
    pub width: usize,
    pub player: String,
    pub entrance: String,
    pub entrance_door: Door,
    pub rooms: BTreeMap<String, Room>,
    pub monsters: BTreeMap<String, Monster>,
    pub doors: DoorRecord,
    pub stairs: BTreeMap<String, Door>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub turn: u64,
    pub next_level: u64,
    pub level: u32,
}

/// Everything a load puts back in play.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub player: Player,
    pub map: Map,
    pub clock: TurnState,
}

fn keyed<V: Clone>(entries: &BTreeMap<Position, V>) -> BTreeMap<String, V> {
    entries.iter().map(|(pos, value)| (pos.key(), value.clone())).collect()
}

fn parse_position(map: &Map, key: &str) -> Result<Position, SaveError> {
    Position::parse_key(key)
        .filter(|pos| map.contains(*pos))
        .ok_or_else(|| SaveError::InvalidKey(key.to_string()))
}

/// Rejects sizes that are empty or too large to allocate.
fn checked_room_count(num_floors: usize, width: usize) -> Result<usize, SaveError> {
    num_floors
        .checked_mul(width)
        .and_then(|rooms| rooms.checked_mul(width))
        .filter(|rooms| (1..=MAX_SAVED_ROOMS).contains(rooms))
        .ok_or(SaveError::InvalidMapSize { num_floors, width })
}

fn unkeyed<V: Clone>(
    map: &Map,
    entries: &BTreeMap<String, V>,
) -> Result<BTreeMap<Position, V>, SaveError> {
    entries
        .iter()
        .map(|(key, value)| Ok((parse_position(map, key)?, value.clone())))
        .collect()
}

impl SaveData {
    pub fn capture(player: &Player, map: &Map, clock: &TurnState) -> Self {
        let player_record = PlayerRecord {
            name: player.name.clone(),
            level: player.level,
            xp: player.xp,
            gold: player.gold,
            hp: player.hp,
            max_hp: player.max_hp,
            history: player.history.clone(),
            epitaph: player.epitaph.clone(),
        };

        let mut rooms = BTreeMap::new();
        let mut monsters = BTreeMap::new();
        for pos in map.positions() {
            if let Some(room) = map.room(pos) {
                rooms.insert(pos.key(), room.clone());
                if let Some(monster) = &room.monster {
                    monsters.insert(pos.key(), monster.clone());
                }
            }
        }

        let map_record = MapRecord {
            num_floors: map.num_floors,
            width: map.width,
            player: map.player.key(),
            entrance: map.entrance.key(),
            entrance_door: map.entrance_door,
            rooms,
            monsters,
            doors: DoorRecord {
                ns: keyed(&map.ns_doors),
                ew: keyed(&map.ew_doors),
            },
            stairs: keyed(&map.stairs),
        };

        Self {
            player: player_record,
            items: player.items.clone(),
            map: map_record,
            game: GameRecord {
                turn: clock.turn,
                next_level: clock.next_level_threshold,
                level: clock.dungeon_level,
            },
        }
    }

    /// Rebuilds the run. Fails on the first malformed key without
    /// producing anything partial.
    pub fn restore(&self) -> Result<Snapshot, SaveError> {
        let record = &self.map;
        checked_room_count(record.num_floors, record.width)?;
        let mut map = Map::empty(record.num_floors, record.width);
        map.player = parse_position(&map, &record.player)?;
        map.entrance = parse_position(&map, &record.entrance)?;
        map.entrance_door = record.entrance_door;
        map.ns_doors = unkeyed(&map, &record.doors.ns)?;
        map.ew_doors = unkeyed(&map, &record.doors.ew)?;
        map.stairs = unkeyed(&map, &record.stairs)?;

        for (pos, room) in unkeyed(&map, &record.rooms)? {
            if let Some(slot) = map.room_mut(pos) {
                *slot = room;
            }
        }
        for (pos, monster) in unkeyed(&map, &record.monsters)? {
            if let Some(slot) = map.room_mut(pos) {
                slot.monster = Some(monster);
            }
        }

        let player = Player {
            name: self.player.name.clone(),
            level: self.player.level,
            xp: self.player.xp,
            gold: self.player.gold,
            hp: self.player.hp.min(self.player.max_hp),
            max_hp: self.player.max_hp,
            items: self.items.clone(),
            history: self.player.history.clone(),
            epitaph: self.player.epitaph.clone(),
        };

        let clock = TurnState::restore(self.game.turn, self.game.next_level, self.game.level);

        Ok(Snapshot { player, map, clock })
    }

    /// SHA-256 hex digest of the compact JSON of this payload.
    pub fn checksum(&self) -> Result<String, SaveError> {
        let json = serde_json::to_string(self)?;
        let digest = Sha256::digest(json.as_bytes());
        Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }
}
