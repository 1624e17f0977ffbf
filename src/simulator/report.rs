//! Simulation report generation.

use crate::combat::CombatOutcome;
use crate::core::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of one simulated battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleRun {
    pub outcome: CombatOutcome,
    /// Fled because the turn limit ran out.
    pub timed_out: bool,
    pub enemy_count: usize,
    pub turns: u32,
    pub damage_taken: u32,
    pub experience: u64,
    pub abilities_used: usize,
}

/// Aggregated results from multiple simulated battles.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub timeouts: u32,

    pub victory_rate: f64,
    pub avg_turns: f64,
    pub avg_damage_taken: f64,
    pub avg_experience: f64,

    /// Victory rate keyed by encounter size.
    pub victory_rate_by_size: BTreeMap<usize, f64>,

    #[serde(skip)]
    pub runs: Vec<BattleRun>,
}

impl SimReport {
    /// Create a new report from finished battles.
    pub fn from_runs(runs: Vec<BattleRun>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: CombatOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;
        let victories = count(CombatOutcome::Victory);
        let defeats = count(CombatOutcome::Defeat);
        let timeouts = runs.iter().filter(|r| r.timed_out).count() as u32;

        let divisor = num_runs.max(1) as f64;
        let avg = |f: fn(&BattleRun) -> f64| runs.iter().map(f).sum::<f64>() / divisor;

        let mut by_size: BTreeMap<usize, (u32, u32)> = BTreeMap::new();
        for run in &runs {
            let entry = by_size.entry(run.enemy_count).or_insert((0, 0));
            entry.1 += 1;
            if run.outcome == CombatOutcome::Victory {
                entry.0 += 1;
            }
        }
        let victory_rate_by_size = by_size
            .into_iter()
            .map(|(size, (won, total))| (size, won as f64 / total as f64))
            .collect();

        Self {
            num_runs,
            victories,
            defeats,
            timeouts,
            victory_rate: victories as f64 / divisor,
            avg_turns: avg(|r| r.turns as f64),
            avg_damage_taken: avg(|r| r.damage_taken as f64),
            avg_experience: avg(|r| r.experience as f64),
            victory_rate_by_size,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {} total, {} won, {} lost, {} timed out\n\n",
            self.num_runs, self.victories, self.defeats, self.timeouts
        ));

        report.push_str("── BATTLES ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Victory Rate:        {:.1}%\n",
            self.victory_rate * 100.0
        ));
        report.push_str(&format!("  Avg Turns:           {:.1}\n", self.avg_turns));
        report.push_str(&format!(
            "  Avg Damage Taken:    {:.1}\n",
            self.avg_damage_taken
        ));
        report.push_str(&format!(
            "  Avg Experience:      {:.1}\n\n",
            self.avg_experience
        ));

        report.push_str("── BY ENCOUNTER SIZE ────────────────────────────────────────────\n");
        for (size, rate) in &self.victory_rate_by_size {
            let pct = rate * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {} enemies: {:>5.1}% {}\n", size, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.victory_rate > 0.95 {
            "TOO EASY - Players almost never lose"
        } else if self.victory_rate > 0.6 {
            "GOOD - Challenging but fair"
        } else if self.victory_rate > 0.3 {
            "HARD - Learn more concepts first"
        } else {
            "TOO HARD - Most battles are lost"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.timeouts > 0 {
            report.push_str(&format!(
                "  ⚠️  {} battles hit the turn limit - enemies too tanky?\n",
                self.timeouts
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(outcome: CombatOutcome, enemy_count: usize, turns: u32) -> BattleRun {
        BattleRun {
            outcome,
            timed_out: false,
            enemy_count,
            turns,
            damage_taken: 20,
            experience: if outcome == CombatOutcome::Victory { 60 } else { 0 },
            abilities_used: 1,
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![
            run(CombatOutcome::Victory, 1, 4),
            run(CombatOutcome::Victory, 2, 8),
            run(CombatOutcome::Defeat, 2, 6),
        ];

        let report = SimReport::from_runs(runs);
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.victories, 2);
        assert_eq!(report.defeats, 1);
        assert!((report.avg_turns - 6.0).abs() < 1e-9);
        assert!((report.avg_experience - 40.0).abs() < 1e-9);
        assert_eq!(report.victory_rate_by_size[&1], 1.0);
        assert_eq!(report.victory_rate_by_size[&2], 0.5);
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.victory_rate, 0.0);
        assert!(report.to_json().unwrap().contains("\"num_runs\": 0"));
    }
}
