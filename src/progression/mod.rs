//! Player progression: experience and levels, learned concepts, battle
//! statistics, achievements and world level unlocks.

pub mod ledger;
pub mod levels;
pub mod stats;

pub use ledger::{
    unlocked_abilities_for, LessonResult, ProgressionEvent, ProgressionLedger, ProgressionState,
};
pub use levels::{get_level, LevelDef, LevelRequirement, LevelUnlocks, ALL_LEVELS};
pub use stats::BattleStats;
