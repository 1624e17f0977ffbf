//! Tunable balance settings.
//!
//! Fixed rules (the weakness multiplier, save format) live in `constants`;
//! everything a designer may want to retune is grouped here.

use super::constants::*;
use super::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Experience-to-level curve.
///
/// The XP needed to go from level `k` to `k + 1` is `base + growth * (k - 1)`,
/// so with the default `growth = 0` the cumulative thresholds are
/// 100, 200, 300, ...
///
/// Thresholds must strictly increase, so `base` is positive and `max_level`
/// stays within `1..=MAX_LEVEL_CAP`. Every constructor, deserialization
/// included, enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelCurveParams")]
pub struct LevelCurve {
    base: u64,
    growth: u64,
    max_level: u32,
}

/// Unchecked curve fields as they appear in a balance file.
#[derive(Deserialize)]
#[serde(default)]
struct LevelCurveParams {
    base: u64,
    growth: u64,
    max_level: u32,
}

impl Default for LevelCurveParams {
    fn default() -> Self {
        Self {
            base: LEVEL_XP_BASE,
            growth: LEVEL_XP_GROWTH,
            max_level: MAX_LEVEL,
        }
    }
}

impl TryFrom<LevelCurveParams> for LevelCurve {
    type Error = EngineError;

    fn try_from(params: LevelCurveParams) -> Result<Self> {
        LevelCurve::new(params.base, params.growth, params.max_level)
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base: LEVEL_XP_BASE,
            growth: LEVEL_XP_GROWTH,
            max_level: MAX_LEVEL,
        }
    }
}

impl LevelCurve {
    pub fn new(base: u64, growth: u64, max_level: u32) -> Result<Self> {
        if base == 0 {
            return Err(EngineError::InvalidConfig(
                "level curve base must be positive".to_string(),
            ));
        }
        if !(1..=MAX_LEVEL_CAP).contains(&max_level) {
            return Err(EngineError::InvalidConfig(format!(
                "max level {max_level} outside 1..={MAX_LEVEL_CAP}"
            )));
        }
        Ok(Self {
            base,
            growth,
            max_level,
        })
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn growth(&self) -> u64 {
        self.growth
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Cumulative experience required to reach `level`.
    pub fn xp_for_level(&self, level: u32) -> u64 {
        let steps = level.saturating_sub(1) as u64;
        let linear = steps.saturating_mul(self.base);
        let triangular = steps.saturating_mul(steps.saturating_sub(1)) / 2;
        linear.saturating_add(triangular.saturating_mul(self.growth))
    }

    /// The level a character with `experience` cumulative XP is at.
    pub fn level_for_experience(&self, experience: u64) -> u32 {
        let mut level = 1;
        while level < self.max_level && self.xp_for_level(level + 1) <= experience {
            level += 1;
        }
        level
    }

    /// XP still missing for the next level, `None` at the level cap.
    pub fn xp_to_next_level(&self, experience: u64) -> Option<u64> {
        let level = self.level_for_experience(experience);
        if level >= self.max_level {
            return None;
        }
        Some(self.xp_for_level(level + 1).saturating_sub(experience))
    }
}

/// Balance settings shared by the game and the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub level_curve: LevelCurve,
    pub victory_xp_base: u64,
    pub victory_xp_health_divisor: u32,
    pub starting_health: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            level_curve: LevelCurve::default(),
            victory_xp_base: VICTORY_XP_BASE,
            victory_xp_health_divisor: VICTORY_XP_HEALTH_DIVISOR,
            starting_health: STARTING_HEALTH,
        }
    }
}

impl BalanceConfig {
    /// Parses a JSON balance file; omitted keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Experience granted for defeating an enemy with `max_health`.
    pub fn victory_xp(&self, max_health: u32) -> u64 {
        let divisor = self.victory_xp_health_divisor.max(1);
        self.victory_xp_base + (max_health / divisor) as u64
    }
}
