//! Achievement system types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Achievement categories for organization in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Learning,
    Combat,
    Level,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 3] = [
        AchievementCategory::Learning,
        AchievementCategory::Combat,
        AchievementCategory::Level,
    ];

    /// Display name for the category.
    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Learning => "Learning",
            AchievementCategory::Combat => "Combat",
            AchievementCategory::Level => "Level",
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Human-readable unlock predicate.
    pub description: &'static str,
    pub category: AchievementCategory,
}

/// Record of an earned achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedAchievement {
    /// Unix timestamp (seconds, UTC).
    pub earned_at: i64,
}

/// Earned achievements. Entries are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Achievements {
    earned: BTreeMap<String, EarnedAchievement>,
}

impl Achievements {
    /// Check if an achievement is earned.
    pub fn is_earned(&self, id: &str) -> bool {
        self.earned.contains_key(id)
    }

    /// Earn an achievement at `earned_at`. Returns true if newly earned;
    /// an already earned achievement keeps its original timestamp.
    pub fn earn(&mut self, id: &str, earned_at: i64) -> bool {
        if self.is_earned(id) {
            return false;
        }
        self.earned
            .insert(id.to_string(), EarnedAchievement { earned_at });
        true
    }

    pub fn get(&self, id: &str) -> Option<&EarnedAchievement> {
        self.earned.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EarnedAchievement)> {
        self.earned.iter().map(|(id, e)| (id.as_str(), e))
    }

    /// Get the total number of achievements.
    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    /// Get the number of earned achievements.
    pub fn earned_count(&self) -> usize {
        self.earned.len()
    }

    /// Get earn percentage (0.0 - 100.0).
    pub fn earned_percentage(&self) -> f32 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        (self.earned_count() as f32 / total as f32) * 100.0
    }

    /// Get count of earned/total by category.
    pub fn count_by_category(&self, category: AchievementCategory) -> (usize, usize) {
        use super::data::ALL_ACHIEVEMENTS;

        let in_category: Vec<_> = ALL_ACHIEVEMENTS
            .iter()
            .filter(|a| a.category == category)
            .collect();

        let earned = in_category.iter().filter(|a| self.is_earned(a.id)).count();

        (earned, in_category.len())
    }
}
