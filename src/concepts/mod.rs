//! Concept registry.
//!
//! Read-only catalog of learnable concepts and the abilities they unlock.
//! Lookups on unknown ids return [`EngineError::NotFound`]; callers treat that
//! as a content-data bug rather than something to recover from.

pub mod data;
pub mod types;

pub use data::{ALL_ABILITIES, ALL_CONCEPTS, BASIC_ATTACK_ID};
pub use types::{Ability, AbilityEffect, Concept, ConceptCategory};

use crate::core::error::{ContentKind, EngineError, Result};
use std::collections::BTreeSet;
use tracing::warn;

/// Looks up a concept by id.
pub fn get_concept(id: &str) -> Result<&'static Concept> {
    ALL_CONCEPTS.iter().find(|c| c.id == id).ok_or_else(|| {
        warn!(concept_id = id, "lookup of unknown concept");
        EngineError::not_found(ContentKind::Concept, id)
    })
}

/// All concepts in catalog order.
pub fn all_concepts() -> &'static [Concept] {
    ALL_CONCEPTS
}

/// Looks up an ability by id.
pub fn get_ability(id: &str) -> Result<&'static Ability> {
    ALL_ABILITIES.iter().find(|a| a.id == id).ok_or_else(|| {
        warn!(ability_id = id, "lookup of unknown ability");
        EngineError::not_found(ContentKind::Ability, id)
    })
}

pub fn all_abilities() -> &'static [Ability] {
    ALL_ABILITIES
}

/// The ability a concept unlocks.
pub fn ability_for_concept(concept_id: &str) -> Result<&'static Ability> {
    let concept = get_concept(concept_id)?;
    get_ability(concept.ability_id)
}

pub fn concepts_in_category(category: ConceptCategory) -> Vec<&'static Concept> {
    ALL_CONCEPTS
        .iter()
        .filter(|c| c.category == category)
        .collect()
}

/// Concepts not yet learned whose prerequisites are all learned.
pub fn learnable_concepts(learned: &BTreeSet<String>) -> Vec<&'static Concept> {
    ALL_CONCEPTS
        .iter()
        .filter(|c| !learned.contains(c.id))
        .filter(|c| c.prerequisites.iter().all(|p| learned.contains(*p)))
        .collect()
}
