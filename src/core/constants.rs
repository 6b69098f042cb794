// Turn and dungeon-level progression
pub const STARTING_TURN: u64 = 1;
pub const STARTING_DUNGEON_LEVEL: u32 = 1;
pub const TURNS_PER_LEVEL_STEP: u64 = 100;

// Combat
pub const ATTACK_DIE: u32 = 20;
pub const DEFEND_MULTIPLIER: u32 = 2;
pub const RISKY_WIN_HP_FRACTION: f64 = 0.25;
pub const UNARMED_DAMAGE_DIE: u32 = 3;

// Rewards
pub const XP_PER_MONSTER_LEVEL: u64 = 100;
pub const GOLD_DIE: u32 = 10;

// Player
pub const PLAYER_BASE_HP: u32 = 20;
pub const PLAYER_BASE_AC: u32 = 10;
pub const HP_PER_LEVEL: u32 = 8;
pub const XP_PER_PLAYER_LEVEL: u64 = 1000;

// Resting, running, travelling
pub const REGENERATION_REST_REDUCTION: f64 = 0.2;
pub const RUN_AWAY_TURNS: u32 = 10;
pub const TRAVEL_DIE: u32 = 10;

// Loot rolls: roll in [danger, LOOT_ROLL_MAX], bucketed by these lower bounds
pub const LOOT_ROLL_MAX: u32 = 100;
pub const LOOT_USABLE_MIN: u32 = 80;
pub const LOOT_WEAPON_MIN: u32 = 88;
pub const LOOT_ARMOR_MIN: u32 = 93;
pub const LOOT_RING_MIN: u32 = 98;
/// Weapons and armor must have template level > danger - this band
pub const GEAR_LEVEL_BAND: u32 = 8;
pub const EGO_DIE: u32 = 100;
/// Retries for a forced-kind search before giving up
pub const FORCED_KIND_MAX_ATTEMPTS: u32 = 1000;

// Usables
pub const HEALING_PER_ITEM_LEVEL: u32 = 4;
pub const HEALING_DIE: u32 = 8;

// Pricing
pub const SELL_VALUE_FACTOR: u64 = 10;
pub const BUY_VALUE_FACTOR: u64 = 25;
pub const USABLE_PRICE_MULTIPLIER: u64 = 2;
pub const EGO_PRICE_MULTIPLIER: u64 = 3;

// Inventory display
pub const INVENTORY_PAGE_SIZE: usize = 10;

// Map generation
pub const DEFAULT_NUM_FLOORS: usize = 10;
pub const DEFAULT_FLOOR_WIDTH: usize = 5;
pub const EXTRA_DOOR_CHANCE_PERCENT: u32 = 15;
pub const MONSTER_SPAWN_CHANCE_PERCENT: u32 = 40;
/// Monster templates must have level > danger - this band
pub const MONSTER_LEVEL_BAND: u32 = 5;

// Persistence
pub const SAVE_FILE_NAME: &str = "save.json";
pub const SAVE_VERSION: u32 = 1;
/// Largest dungeon a save file may describe, in rooms
pub const MAX_SAVED_ROOMS: usize = 100_000;
