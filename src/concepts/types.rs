//! Concept and ability definitions.

use crate::combat::types::EnemyKind;
use serde::{Deserialize, Serialize};

/// Concept categories, in the order lessons present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptCategory {
    Compute,
    Storage,
    Networking,
    Security,
    DevOps,
}

impl ConceptCategory {
    pub const ALL: [ConceptCategory; 5] = [
        ConceptCategory::Compute,
        ConceptCategory::Storage,
        ConceptCategory::Networking,
        ConceptCategory::Security,
        ConceptCategory::DevOps,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConceptCategory::Compute => "Compute",
            ConceptCategory::Storage => "Storage",
            ConceptCategory::Networking => "Networking",
            ConceptCategory::Security => "Security",
            ConceptCategory::DevOps => "DevOps",
        }
    }
}

/// A unit of cloud knowledge the player can learn at a learning station.
#[derive(Debug, Clone)]
pub struct Concept {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ConceptCategory,
    pub description: &'static str,
    /// Concepts that must be learned before this one is offered.
    pub prerequisites: &'static [&'static str],
    /// Ability unlocked by learning this concept.
    pub ability_id: &'static str,
}

/// Secondary effect of an ability, applied by the combat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    None,
    /// Restores player health, clamped at max health.
    Heal(u32),
    /// Absorbs up to this much incoming damage during the next enemy phase.
    Shield(u32),
    /// Reduces the target's next strike by this percentage.
    Weaken { percent: u32 },
}

impl AbilityEffect {
    /// Effect with its magnitude multiplied, as when the ability counters its target.
    pub fn amplified(self, multiplier: u32, max_weaken_percent: u32) -> Self {
        match self {
            AbilityEffect::None => AbilityEffect::None,
            AbilityEffect::Heal(amount) => AbilityEffect::Heal(amount.saturating_mul(multiplier)),
            AbilityEffect::Shield(amount) => {
                AbilityEffect::Shield(amount.saturating_mul(multiplier))
            }
            AbilityEffect::Weaken { percent } => AbilityEffect::Weaken {
                percent: percent.saturating_mul(multiplier).min(max_weaken_percent),
            },
        }
    }

    /// True when the effect acts on the targeted enemy rather than the player.
    pub fn targets_enemy(&self) -> bool {
        matches!(self, AbilityEffect::Weaken { .. })
    }
}

/// A combat action. Owned by the registry and referenced everywhere else by id.
#[derive(Debug, Clone)]
pub struct Ability {
    pub id: &'static str,
    pub name: &'static str,
    /// Concept that backs this ability; `None` for innate abilities.
    pub concept_id: Option<&'static str>,
    pub base_power: u32,
    /// Turns the ability stays unusable after being invoked.
    pub cooldown: u32,
    /// Enemy kinds this ability is strong against.
    pub counters: &'static [EnemyKind],
    pub effect: AbilityEffect,
}

impl Ability {
    pub fn counters_kind(&self, kind: EnemyKind) -> bool {
        self.counters.contains(&kind)
    }

    pub fn is_innate(&self) -> bool {
        self.concept_id.is_none()
    }
}
