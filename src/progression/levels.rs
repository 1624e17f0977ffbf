//! World levels and their unlock requirements.

use super::ledger::ProgressionState;
use crate::achievements::data::CLOUD_EXPERT;
use crate::combat::EnemyKind;
use crate::core::constants::STARTING_LEVEL_ID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One condition a level needs before it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRequirement {
    Concept(&'static str),
    MinLevel(u32),
    Defeats { kind: EnemyKind, count: u64 },
    Achievement(&'static str),
}

impl LevelRequirement {
    pub fn is_met(&self, state: &ProgressionState) -> bool {
        match *self {
            LevelRequirement::Concept(id) => state.learned_concepts.contains(id),
            LevelRequirement::MinLevel(level) => state.level >= level,
            LevelRequirement::Defeats { kind, count } => state.stats.defeats_of(kind) >= count,
            LevelRequirement::Achievement(id) => state.achievements.is_earned(id),
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            LevelRequirement::Concept(id) => format!("Learn {id}"),
            LevelRequirement::MinLevel(level) => format!("Reach level {level}"),
            LevelRequirement::Defeats { kind, count } => {
                format!("Defeat {count} {}", kind.template().name)
            }
            LevelRequirement::Achievement(id) => format!("Earn {id}"),
        }
    }
}

/// A world level the player explores.
#[derive(Debug, Clone)]
pub struct LevelDef {
    pub id: u32,
    pub name: &'static str,
    pub requirements: &'static [LevelRequirement],
    /// Enemy kinds that appear in this level's encounters.
    pub spawn_table: &'static [EnemyKind],
}

impl LevelDef {
    pub fn requirements_met(&self, state: &ProgressionState) -> bool {
        self.requirements.iter().all(|r| r.is_met(state))
    }
}

pub const ALL_LEVELS: &[LevelDef] = &[
    LevelDef {
        id: 1,
        name: "Compute Valley",
        requirements: &[],
        spawn_table: &[EnemyKind::LatencyMonster, EnemyKind::DataLossDemon],
    },
    LevelDef {
        id: 2,
        name: "Storage Caverns",
        requirements: &[
            LevelRequirement::Concept("ec2_basics"),
            LevelRequirement::MinLevel(3),
        ],
        spawn_table: &[EnemyKind::SecurityBreach, EnemyKind::CostOverrun],
    },
    LevelDef {
        id: 3,
        name: "Network Nexus",
        requirements: &[
            LevelRequirement::Concept("s3_storage"),
            LevelRequirement::Concept("ec2_basics"),
            LevelRequirement::MinLevel(5),
        ],
        spawn_table: &[EnemyKind::LatencyMonster, EnemyKind::SecurityBreach],
    },
    LevelDef {
        id: 4,
        name: "Security Citadel",
        requirements: &[
            LevelRequirement::Concept("vpc_networking"),
            LevelRequirement::MinLevel(7),
            LevelRequirement::Defeats {
                kind: EnemyKind::SecurityBreach,
                count: 3,
            },
        ],
        spawn_table: &[EnemyKind::SecurityBreach, EnemyKind::CloudBug],
    },
    LevelDef {
        id: 5,
        name: "DevOps Domain",
        requirements: &[
            LevelRequirement::Concept("iam_security"),
            LevelRequirement::MinLevel(10),
            LevelRequirement::Achievement(CLOUD_EXPERT),
        ],
        spawn_table: &[
            EnemyKind::CostOverrun,
            EnemyKind::DataLossDemon,
            EnemyKind::CloudBug,
        ],
    },
];

pub fn get_level(id: u32) -> Option<&'static LevelDef> {
    ALL_LEVELS.iter().find(|l| l.id == id)
}

/// Level ids the player may enter. Only ever grows outside a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelUnlocks(BTreeSet<u32>);

impl Default for LevelUnlocks {
    fn default() -> Self {
        Self(BTreeSet::from([STARTING_LEVEL_ID]))
    }
}

impl LevelUnlocks {
    pub fn is_unlocked(&self, level_id: u32) -> bool {
        self.0.contains(&level_id)
    }

    /// Returns true if the level was newly unlocked.
    pub fn unlock(&mut self, level_id: u32) -> bool {
        self.0.insert(level_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest unlocked level id.
    pub fn highest(&self) -> u32 {
        self.0.iter().next_back().copied().unwrap_or(STARTING_LEVEL_ID)
    }
}

impl FromIterator<u32> for LevelUnlocks {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
