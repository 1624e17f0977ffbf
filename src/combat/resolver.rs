//! Ability resolution: damage, weakness bonus, effect choice and cooldown.
//!
//! The resolver is pure. It never mutates the defender or the cooldown table;
//! the combat session applies the returned [`Resolution`].

use super::types::{CooldownTable, Enemy, EnemyKind, PlayerState};
use crate::concepts::{Ability, AbilityEffect};
use crate::core::constants::{COUNTER_EFFECT_MULTIPLIER, MAX_WEAKEN_PERCENT, WEAKNESS_MULTIPLIER};
use crate::core::error::{EngineError, Result};
use std::collections::BTreeSet;

/// Anything an ability can be aimed at.
pub trait Defender {
    /// Concept whose ability deals bonus damage to this defender.
    fn weakness(&self) -> Option<&str>;

    /// Enemy kind tag, used for counter checks.
    fn kind(&self) -> Option<EnemyKind>;
}

impl Defender for Enemy {
    fn weakness(&self) -> Option<&str> {
        self.weakness
    }

    fn kind(&self) -> Option<EnemyKind> {
        Some(self.kind)
    }
}

impl Defender for PlayerState {
    fn weakness(&self) -> Option<&str> {
        None
    }

    fn kind(&self) -> Option<EnemyKind> {
        None
    }
}

/// Outcome of invoking an ability against a defender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub ability_id: &'static str,
    pub damage: u32,
    pub weakness_hit: bool,
    /// The ability counters the defender's kind; its effect is amplified.
    pub countered: bool,
    pub effect: AbilityEffect,
    /// Cooldown to store for the ability once the use is committed.
    pub new_cooldown: u32,
}

/// Resolves `ability` against `defender`.
///
/// Fails with [`EngineError::AbilityUnavailable`] when the ability is still
/// cooling down, or when its backing concept is not among `attacker_learned`
/// (reported with zero turns remaining).
pub fn resolve<D: Defender + ?Sized>(
    ability: &Ability,
    attacker_learned: &BTreeSet<String>,
    defender: &D,
    cooldowns: &CooldownTable,
) -> Result<Resolution> {
    let remaining = cooldowns.remaining(ability.id);
    if remaining > 0 {
        return Err(EngineError::AbilityUnavailable {
            ability_id: ability.id.to_string(),
            remaining,
        });
    }
    if let Some(concept_id) = ability.concept_id {
        if !attacker_learned.contains(concept_id) {
            return Err(EngineError::AbilityUnavailable {
                ability_id: ability.id.to_string(),
                remaining: 0,
            });
        }
    }

    let weakness_hit = match (ability.concept_id, defender.weakness()) {
        (Some(concept), Some(weakness)) => concept == weakness,
        _ => false,
    };
    let damage = if weakness_hit {
        ability.base_power.saturating_mul(WEAKNESS_MULTIPLIER)
    } else {
        ability.base_power
    };

    let countered = defender.kind().is_some_and(|k| ability.counters_kind(k));
    let effect = if countered {
        ability
            .effect
            .amplified(COUNTER_EFFECT_MULTIPLIER, MAX_WEAKEN_PERCENT)
    } else {
        ability.effect
    };

    Ok(Resolution {
        ability_id: ability.id,
        damage,
        weakness_hit,
        countered,
        effect,
        new_cooldown: ability.cooldown,
    })
}
