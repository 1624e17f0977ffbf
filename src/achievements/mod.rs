//! Achievement system module.
//!
//! Achievements are earned through learning, combat and leveling, and are
//! stored with the rest of the save. Once earned they are never removed.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, get_achievements_by_category, ALL_ACHIEVEMENTS};
pub use types::{AchievementCategory, AchievementDef, Achievements, EarnedAchievement};
