//! Simulation configuration.

use crate::concepts::ALL_CONCEPTS;
use crate::core::config::BalanceConfig;
use crate::core::constants::STARTING_LEVEL_ID;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// World level whose spawn table supplies the enemies
    pub level_id: u32,

    /// Concepts the scripted player has learned
    pub learned_concepts: Vec<String>,

    /// Turns before the scripted player gives up and flees
    pub max_turns: u32,

    pub balance: BalanceConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            level_id: STARTING_LEVEL_ID,
            learned_concepts: Vec::new(),
            max_turns: 50,
            balance: BalanceConfig::default(),
            verbosity: 1,
        }
    }
}

/// Battles played by a quick run.
const QUICK_RUNS: u32 = 100;

impl SimConfig {
    /// Quick config for checking one level with no concepts learned
    pub fn level_balance_test(level_id: u32) -> Self {
        Self {
            level_id,
            ..Default::default()
        }
        .quick()
    }

    /// Same settings with the battle count cut to a quick run.
    pub fn quick(self) -> Self {
        Self {
            num_runs: QUICK_RUNS,
            ..self
        }
    }

    /// A player who has learned every concept
    pub fn fully_trained(level_id: u32) -> Self {
        Self {
            level_id,
            learned_concepts: ALL_CONCEPTS.iter().map(|c| c.id.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_keeps_other_settings() {
        let config = SimConfig {
            seed: Some(9),
            learned_concepts: vec!["s3_storage".to_string()],
            ..SimConfig::fully_trained(3)
        }
        .quick();
        assert_eq!(config.num_runs, QUICK_RUNS);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.level_id, 3);
        assert_eq!(config.learned_concepts, vec!["s3_storage".to_string()]);
    }

    #[test]
    fn test_level_balance_test_is_untrained() {
        let config = SimConfig::level_balance_test(2);
        assert_eq!(config.num_runs, QUICK_RUNS);
        assert!(config.learned_concepts.is_empty());
    }
}
