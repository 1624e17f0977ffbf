// Combat resolution
/// Damage multiplier when an ability's backing concept is the defender's weakness (2.0x).
pub const WEAKNESS_MULTIPLIER: u32 = 2;
/// Effect magnitude multiplier when an ability counters the defender's kind.
pub const COUNTER_EFFECT_MULTIPLIER: u32 = 2;
pub const MAX_WEAKEN_PERCENT: u32 = 100;

// Victory rewards: per defeated enemy, BASE + max_health / DIVISOR
pub const VICTORY_XP_BASE: u64 = 50;
pub const VICTORY_XP_HEALTH_DIVISOR: u32 = 10;

// XP and leveling
// Cumulative XP for level L = sum over k in 1..L of (BASE + GROWTH * (k - 1))
pub const LEVEL_XP_BASE: u64 = 100;
pub const LEVEL_XP_GROWTH: u64 = 0;
pub const MAX_LEVEL: u32 = 99;
/// Highest `max_level` a balance file may configure.
pub const MAX_LEVEL_CAP: u32 = 1_000;

// Player
pub const STARTING_HEALTH: u32 = 100;
pub const STARTING_LEVEL_ID: u32 = 1;

// Encounters
pub const MIN_ENCOUNTER_SIZE: u32 = 1;
pub const MAX_ENCOUNTER_SIZE: u32 = 2;

// Lessons
pub const LESSON_PASS_PERCENT: u32 = 70;
pub const LESSON_BASE_XP: u64 = 100;
pub const LESSON_PRACTICAL_BONUS_XP: u64 = 50;

// Achievement thresholds
pub const CONCEPT_MASTER_COUNT: usize = 5;
pub const ENEMY_HUNTER_COUNT: u64 = 10;
pub const ABILITY_MASTER_COUNT: usize = 5;
pub const COMEBACK_HEALTH_PERCENT: u32 = 10;
pub const SEASONED_ARCHITECT_LEVEL: u32 = 5;

// Save format
pub const SAVE_VERSION_MAGIC: u64 = 0x434C_4F55_4451_5531; // "CLOUDQU1"
pub const SAVE_SCHEMA_VERSION: u32 = 1;
pub const SAVE_FILE_NAME: &str = "save.dat";
