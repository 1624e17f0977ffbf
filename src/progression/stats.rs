use crate::combat::{CombatOutcome, CombatSummary, EnemyKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Lifetime battle statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleStats {
    pub battles_won: u64,
    pub battles_lost: u64,
    pub battles_fled: u64,
    pub total_damage_taken: u64,
    pub enemies_defeated: BTreeMap<EnemyKind, u64>,
    /// Distinct abilities ever used in combat.
    pub abilities_used: BTreeSet<String>,
}

impl BattleStats {
    pub fn battles_fought(&self) -> u64 {
        self.battles_won + self.battles_lost + self.battles_fled
    }

    pub fn total_defeats(&self) -> u64 {
        self.enemies_defeated.values().sum()
    }

    pub fn defeats_of(&self, kind: EnemyKind) -> u64 {
        self.enemies_defeated.get(&kind).copied().unwrap_or(0)
    }

    pub fn record_defeat(&mut self, kind: EnemyKind) {
        *self.enemies_defeated.entry(kind).or_insert(0) += 1;
    }

    pub fn record(&mut self, summary: &CombatSummary) {
        match summary.outcome {
            CombatOutcome::Victory => self.battles_won += 1,
            CombatOutcome::Defeat => self.battles_lost += 1,
            CombatOutcome::Fled => self.battles_fled += 1,
        }
        self.total_damage_taken += summary.damage_taken as u64;
        for defeat in &summary.enemies_defeated {
            self.record_defeat(defeat.kind);
        }
        self.abilities_used
            .extend(summary.abilities_used.iter().cloned());
    }
}
