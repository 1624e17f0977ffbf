//! Static achievement definitions.

use super::types::{AchievementCategory, AchievementDef};

pub const FIRST_CONCEPT: &str = "first_concept";
pub const CONCEPT_MASTER: &str = "concept_master";
pub const CLOUD_EXPERT: &str = "cloud_expert";
pub const PERFECT_SCORE: &str = "perfect_score";
pub const FIRST_VICTORY: &str = "first_victory";
pub const ENEMY_HUNTER: &str = "enemy_hunter";
pub const FLAWLESS_VICTORY: &str = "flawless_victory";
pub const COMEBACK_KID: &str = "comeback_kid";
pub const ABILITY_MASTER: &str = "ability_master";
pub const SEASONED_ARCHITECT: &str = "seasoned_architect";

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // LEARNING ACHIEVEMENTS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: FIRST_CONCEPT,
        name: "First Steps",
        description: "Learn your first cloud concept",
        category: AchievementCategory::Learning,
    },
    AchievementDef {
        id: CONCEPT_MASTER,
        name: "Concept Master",
        description: "Learn 5 cloud concepts",
        category: AchievementCategory::Learning,
    },
    AchievementDef {
        id: CLOUD_EXPERT,
        name: "Cloud Expert",
        description: "Learn every available concept",
        category: AchievementCategory::Learning,
    },
    AchievementDef {
        id: PERFECT_SCORE,
        name: "Perfect Score",
        description: "Score 100% on a lesson quiz",
        category: AchievementCategory::Learning,
    },
    // ═══════════════════════════════════════════════════════════════
    // COMBAT ACHIEVEMENTS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: FIRST_VICTORY,
        name: "First Victory",
        description: "Win your first battle",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: ENEMY_HUNTER,
        name: "Enemy Hunter",
        description: "Defeat 10 enemies",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: FLAWLESS_VICTORY,
        name: "Flawless Victory",
        description: "Win a battle without taking damage",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: COMEBACK_KID,
        name: "Comeback Kid",
        description: "Win a battle with less than 10% health",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: ABILITY_MASTER,
        name: "Ability Master",
        description: "Use 5 different abilities in combat",
        category: AchievementCategory::Combat,
    },
    // ═══════════════════════════════════════════════════════════════
    // LEVEL ACHIEVEMENTS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: SEASONED_ARCHITECT,
        name: "Seasoned Architect",
        description: "Reach level 5",
        category: AchievementCategory::Level,
    },
];

/// Look up an achievement definition by id.
pub fn get_achievement_def(id: &str) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// All achievements in a category, in display order.
pub fn get_achievements_by_category(
    category: AchievementCategory,
) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}
