//! Progression ledger: experience, levels, concepts, achievements and
//! level unlocks.
//!
//! Every mutator validates its input first and only then touches state, so a
//! rejected update leaves the ledger exactly as it was.

use super::levels::{get_level, LevelUnlocks, ALL_LEVELS};
use super::stats::BattleStats;
use crate::achievements::data::*;
use crate::achievements::{get_achievement_def, Achievements};
use crate::combat::CombatSummary;
use crate::concepts::{
    ability_for_concept, get_ability, get_concept, Ability, ALL_ABILITIES, ALL_CONCEPTS,
    BASIC_ATTACK_ID,
};
use crate::core::config::BalanceConfig;
use crate::core::constants::*;
use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Persistent progression of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub experience: u64,
    pub level: u32,
    pub learned_concepts: BTreeSet<String>,
    /// Always the abilities of `learned_concepts`.
    pub unlocked_abilities: BTreeSet<String>,
    pub achievements: Achievements,
    pub stats: BattleStats,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            learned_concepts: BTreeSet::new(),
            unlocked_abilities: BTreeSet::new(),
            achievements: Achievements::default(),
            stats: BattleStats::default(),
        }
    }
}

/// Something the ledger changed, for the UI to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionEvent {
    ExperienceGained { amount: u64, total: u64 },
    LevelUp { level: u32 },
    ConceptLearned { concept_id: &'static str },
    AbilityUnlocked { ability_id: &'static str },
    AchievementEarned { achievement_id: &'static str },
    LevelUnlocked { level_id: u32 },
    LessonFailed { concept_id: &'static str, quiz_percent: u32 },
}

/// Outcome of a lesson the player worked through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonResult {
    pub concept_id: String,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub practical_completed: bool,
}

impl LessonResult {
    pub fn quiz_percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        ((self.correct_answers as u64 * 100) / self.total_questions as u64) as u32
    }

    pub fn passed(&self) -> bool {
        self.quiz_percent() >= LESSON_PASS_PERCENT
    }

    /// Experience a passing lesson is worth.
    pub fn experience(&self) -> u64 {
        let bonus = if self.practical_completed {
            LESSON_PRACTICAL_BONUS_XP
        } else {
            0
        };
        LESSON_BASE_XP + (self.quiz_percent() / 2) as u64 + bonus
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressionLedger {
    state: ProgressionState,
    levels: LevelUnlocks,
    config: BalanceConfig,
}

impl ProgressionLedger {
    pub fn new(config: BalanceConfig) -> Self {
        Self {
            state: ProgressionState::default(),
            levels: LevelUnlocks::default(),
            config,
        }
    }

    /// Rebuilds a ledger from restored parts, checking its invariants.
    pub fn from_parts(
        state: ProgressionState,
        levels: LevelUnlocks,
        config: BalanceConfig,
    ) -> Result<Self> {
        let expected = config.level_curve.level_for_experience(state.experience);
        if state.level != expected {
            return Err(EngineError::InvariantViolation(format!(
                "level {} does not match {} experience (expected {expected})",
                state.level, state.experience
            )));
        }
        let derived = unlocked_abilities_for(&state.learned_concepts)?;
        if derived != state.unlocked_abilities {
            return Err(EngineError::InvariantViolation(
                "unlocked abilities do not match learned concepts".to_string(),
            ));
        }
        Ok(Self {
            state,
            levels,
            config,
        })
    }

    pub fn into_parts(self) -> (ProgressionState, LevelUnlocks) {
        (self.state, self.levels)
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn levels(&self) -> &LevelUnlocks {
        &self.levels
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn experience(&self) -> u64 {
        self.state.experience
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    /// XP still missing for the next level, `None` at the level cap.
    pub fn xp_to_next_level(&self) -> Option<u64> {
        self.config
            .level_curve
            .xp_to_next_level(self.state.experience)
    }

    pub fn learned_concepts(&self) -> &BTreeSet<String> {
        &self.state.learned_concepts
    }

    pub fn has_learned(&self, concept_id: &str) -> bool {
        self.state.learned_concepts.contains(concept_id)
    }

    pub fn achievements(&self) -> &Achievements {
        &self.state.achievements
    }

    pub fn stats(&self) -> &BattleStats {
        &self.state.stats
    }

    /// The innate attack followed by every unlocked ability, in catalog order.
    pub fn available_abilities(&self) -> Vec<&'static Ability> {
        ALL_ABILITIES
            .iter()
            .filter(|a| a.id == BASIC_ATTACK_ID || self.state.unlocked_abilities.contains(a.id))
            .collect()
    }

    /// Adds experience. Negative amounts are rejected.
    pub fn award_experience(&mut self, amount: i64) -> Result<Vec<ProgressionEvent>> {
        let amount = u64::try_from(amount).map_err(|_| {
            EngineError::InvalidProgressionUpdate(format!(
                "experience award must not be negative, got {amount}"
            ))
        })?;
        let mut events = Vec::new();
        self.add_experience(amount, &mut events)?;
        self.evaluate_milestones(&mut events);
        Ok(events)
    }

    /// Marks a concept learned and unlocks its ability. Learning a concept
    /// twice changes nothing.
    pub fn learn_concept(&mut self, concept_id: &str) -> Result<Vec<ProgressionEvent>> {
        let concept = get_concept(concept_id).map_err(|_| {
            EngineError::InvalidProgressionUpdate(format!("unknown concept {concept_id}"))
        })?;
        let ability = get_ability(concept.ability_id)?;
        let mut events = Vec::new();
        if self.has_learned(concept.id) {
            return Ok(events);
        }

        self.state.learned_concepts.insert(concept.id.to_string());
        self.state.unlocked_abilities.insert(ability.id.to_string());
        info!(concept = concept.id, ability = ability.id, "concept learned");
        events.push(ProgressionEvent::ConceptLearned {
            concept_id: concept.id,
        });
        events.push(ProgressionEvent::AbilityUnlocked {
            ability_id: ability.id,
        });
        self.evaluate_milestones(&mut events);
        Ok(events)
    }

    /// Records an achievement with the current time. Idempotent.
    pub fn record_achievement(&mut self, achievement_id: &str) -> Result<Vec<ProgressionEvent>> {
        let def = get_achievement_def(achievement_id).ok_or_else(|| {
            EngineError::InvalidProgressionUpdate(format!("unknown achievement {achievement_id}"))
        })?;
        let mut events = Vec::new();
        self.earn(def.id, &mut events);
        self.evaluate_milestones(&mut events);
        Ok(events)
    }

    /// Opens a level regardless of its requirements. Idempotent.
    pub fn unlock_level(&mut self, level_id: u32) -> Result<Vec<ProgressionEvent>> {
        if get_level(level_id).is_none() {
            return Err(EngineError::InvalidProgressionUpdate(format!(
                "unknown level {level_id}"
            )));
        }
        let mut events = Vec::new();
        if self.levels.unlock(level_id) {
            info!(level_id, "level unlocked");
            events.push(ProgressionEvent::LevelUnlocked { level_id });
        }
        Ok(events)
    }

    /// Applies a finished lesson. A failing score is reported, not an error.
    /// Lessons for concepts already learned award nothing.
    pub fn complete_lesson(&mut self, lesson: &LessonResult) -> Result<Vec<ProgressionEvent>> {
        let concept = get_concept(&lesson.concept_id).map_err(|_| {
            EngineError::InvalidProgressionUpdate(format!("unknown concept {}", lesson.concept_id))
        })?;
        if lesson.total_questions == 0 || lesson.correct_answers > lesson.total_questions {
            return Err(EngineError::InvalidProgressionUpdate(format!(
                "invalid quiz score {}/{}",
                lesson.correct_answers, lesson.total_questions
            )));
        }

        if self.has_learned(concept.id) {
            debug!(concept = concept.id, "lesson replayed, nothing awarded");
            return Ok(Vec::new());
        }

        let quiz_percent = lesson.quiz_percent();
        if !lesson.passed() {
            debug!(concept = concept.id, quiz_percent, "lesson failed");
            return Ok(vec![ProgressionEvent::LessonFailed {
                concept_id: concept.id,
                quiz_percent,
            }]);
        }

        let experience = lesson.experience();
        self.check_experience(experience)?;

        let mut events = self.learn_concept(concept.id)?;
        self.add_experience(experience, &mut events)?;
        if quiz_percent == 100 {
            self.earn(PERFECT_SCORE, &mut events);
        }
        self.evaluate_milestones(&mut events);
        Ok(events)
    }

    /// Folds a finished battle into statistics and experience.
    pub fn record_battle(&mut self, summary: &CombatSummary) -> Result<Vec<ProgressionEvent>> {
        self.check_experience(summary.experience_awarded)?;

        let mut events = Vec::new();
        self.state.stats.record(summary);
        self.add_experience(summary.experience_awarded, &mut events)?;
        if summary.is_victory() {
            if summary.damage_taken == 0 {
                self.earn(FLAWLESS_VICTORY, &mut events);
            }
            if summary.health_percent() < COMEBACK_HEALTH_PERCENT {
                self.earn(COMEBACK_KID, &mut events);
            }
        }
        self.evaluate_milestones(&mut events);
        Ok(events)
    }

    /// Starts over. The only operation that lowers experience.
    pub fn reset(&mut self) {
        info!("progression reset");
        self.state = ProgressionState::default();
        self.levels = LevelUnlocks::default();
    }

    fn check_experience(&self, amount: u64) -> Result<()> {
        match self.state.experience.checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(EngineError::InvalidProgressionUpdate(
                "experience total would overflow".to_string(),
            )),
        }
    }

    fn add_experience(&mut self, amount: u64, events: &mut Vec<ProgressionEvent>) -> Result<()> {
        let total = self.state.experience.checked_add(amount).ok_or_else(|| {
            EngineError::InvalidProgressionUpdate("experience total would overflow".to_string())
        })?;
        if amount == 0 {
            return Ok(());
        }
        self.state.experience = total;
        events.push(ProgressionEvent::ExperienceGained { amount, total });

        let new_level = self.config.level_curve.level_for_experience(total);
        while self.state.level < new_level {
            self.state.level += 1;
            info!(level = self.state.level, experience = total, "level up");
            events.push(ProgressionEvent::LevelUp {
                level: self.state.level,
            });
        }
        Ok(())
    }

    fn earn(&mut self, achievement_id: &'static str, events: &mut Vec<ProgressionEvent>) {
        let now = chrono::Utc::now().timestamp();
        if self.state.achievements.earn(achievement_id, now) {
            info!(achievement = achievement_id, "achievement earned");
            events.push(ProgressionEvent::AchievementEarned { achievement_id });
        }
    }

    /// Earns automatic achievements, then opens every level whose
    /// requirements are now met.
    fn evaluate_milestones(&mut self, events: &mut Vec<ProgressionEvent>) {
        let learned = self.state.learned_concepts.len();
        let stats = &self.state.stats;
        let checks = [
            (FIRST_CONCEPT, learned >= 1),
            (CONCEPT_MASTER, learned >= CONCEPT_MASTER_COUNT),
            (
                CLOUD_EXPERT,
                ALL_CONCEPTS
                    .iter()
                    .all(|c| self.state.learned_concepts.contains(c.id)),
            ),
            (FIRST_VICTORY, stats.battles_won >= 1),
            (ENEMY_HUNTER, stats.total_defeats() >= ENEMY_HUNTER_COUNT),
            (
                ABILITY_MASTER,
                stats.abilities_used.len() >= ABILITY_MASTER_COUNT,
            ),
            (
                SEASONED_ARCHITECT,
                self.state.level >= SEASONED_ARCHITECT_LEVEL,
            ),
        ];
        for (id, met) in checks {
            if met {
                self.earn(id, events);
            }
        }

        for level in ALL_LEVELS {
            if !self.levels.is_unlocked(level.id) && level.requirements_met(&self.state) {
                self.levels.unlock(level.id);
                info!(level_id = level.id, name = level.name, "level unlocked");
                events.push(ProgressionEvent::LevelUnlocked { level_id: level.id });
            }
        }
    }
}

/// Abilities unlocked by a set of learned concepts.
pub fn unlocked_abilities_for(learned: &BTreeSet<String>) -> Result<BTreeSet<String>> {
    learned
        .iter()
        .map(|id| {
            ability_for_concept(id).map(|a| a.id.to_string()).map_err(|e| {
                warn!(concept = id.as_str(), "learned concept missing from catalog");
                e
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatOutcome, EnemyDefeat, EnemyKind};
    use uuid::Uuid;

    fn victory(damage_taken: u32, health: u32, experience: u64) -> CombatSummary {
        CombatSummary {
            session_id: Uuid::new_v4(),
            outcome: CombatOutcome::Victory,
            experience_awarded: experience,
            enemies_defeated: vec![EnemyDefeat {
                enemy_id: 1,
                kind: EnemyKind::SecurityBreach,
                max_health: 120,
            }],
            turns: 4,
            damage_taken,
            abilities_used: BTreeSet::from(["basic_attack".to_string()]),
            player_health: health,
            player_max_health: 100,
        }
    }

    fn level_ups(events: &[ProgressionEvent]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                ProgressionEvent::LevelUp { level } => Some(*level),
                _ => None,
            })
            .collect()
    }

    fn earned(events: &[ProgressionEvent]) -> Vec<&'static str> {
        events
            .iter()
            .filter_map(|e| match e {
                ProgressionEvent::AchievementEarned { achievement_id } => Some(*achievement_id),
                _ => None,
            })
            .collect()
    }

    // =========================================================================
    // Experience
    // =========================================================================

    #[test]
    fn test_award_crosses_two_levels() {
        let mut ledger = ProgressionLedger::default();
        let events = ledger.award_experience(250).unwrap();
        assert_eq!(level_ups(&events), vec![2, 3]);
        assert_eq!(ledger.level(), 3);
        assert_eq!(ledger.experience(), 250);
        assert_eq!(ledger.xp_to_next_level(), Some(50));
    }

    #[test]
    fn test_negative_award_rejected_without_change() {
        let mut ledger = ProgressionLedger::default();
        ledger.award_experience(40).unwrap();
        let result = ledger.award_experience(-10);
        assert!(matches!(
            result,
            Err(EngineError::InvalidProgressionUpdate(_))
        ));
        assert_eq!(ledger.experience(), 40);
    }

    #[test]
    fn test_zero_award_emits_nothing() {
        let mut ledger = ProgressionLedger::default();
        assert!(ledger.award_experience(0).unwrap().is_empty());
    }

    #[test]
    fn test_reaching_level_five_earns_seasoned_architect() {
        let mut ledger = ProgressionLedger::default();
        let events = ledger.award_experience(400).unwrap();
        assert_eq!(ledger.level(), 5);
        assert!(earned(&events).contains(&SEASONED_ARCHITECT));
    }

    // =========================================================================
    // Concepts
    // =========================================================================

    #[test]
    fn test_learn_concept_unlocks_ability() {
        let mut ledger = ProgressionLedger::default();
        let events = ledger.learn_concept("ec2_basics").unwrap();
        assert_eq!(
            &events[..2],
            &[
                ProgressionEvent::ConceptLearned {
                    concept_id: "ec2_basics"
                },
                ProgressionEvent::AbilityUnlocked {
                    ability_id: "auto_scaling"
                }
            ]
        );
        assert!(earned(&events).contains(&FIRST_CONCEPT));
        let ids: Vec<_> = ledger.available_abilities().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["basic_attack", "auto_scaling"]);
    }

    #[test]
    fn test_learn_concept_twice_is_noop() {
        let mut ledger = ProgressionLedger::default();
        ledger.learn_concept("s3_storage").unwrap();
        let snapshot = ledger.clone();
        assert!(ledger.learn_concept("s3_storage").unwrap().is_empty());
        assert_eq!(ledger, snapshot);
    }

    #[test]
    fn test_learn_unknown_concept_rejected() {
        let mut ledger = ProgressionLedger::default();
        assert!(matches!(
            ledger.learn_concept("mainframe"),
            Err(EngineError::InvalidProgressionUpdate(_))
        ));
        assert!(ledger.learned_concepts().is_empty());
    }

    #[test]
    fn test_all_concepts_earn_cloud_expert() {
        let mut ledger = ProgressionLedger::default();
        let mut all_events = Vec::new();
        for concept in ALL_CONCEPTS {
            all_events.extend(ledger.learn_concept(concept.id).unwrap());
        }
        let ids = earned(&all_events);
        assert!(ids.contains(&CONCEPT_MASTER));
        assert!(ids.contains(&CLOUD_EXPERT));
    }

    // =========================================================================
    // Achievements and levels
    // =========================================================================

    #[test]
    fn test_record_achievement_keeps_first_timestamp() {
        let mut ledger = ProgressionLedger::default();
        let events = ledger.record_achievement(FIRST_VICTORY).unwrap();
        assert_eq!(earned(&events), vec![FIRST_VICTORY]);
        let first = *ledger.achievements().get(FIRST_VICTORY).unwrap();

        assert!(ledger.record_achievement(FIRST_VICTORY).unwrap().is_empty());
        assert_eq!(*ledger.achievements().get(FIRST_VICTORY).unwrap(), first);
    }

    #[test]
    fn test_record_unknown_achievement_rejected() {
        let mut ledger = ProgressionLedger::default();
        assert!(matches!(
            ledger.record_achievement("speed_runner"),
            Err(EngineError::InvalidProgressionUpdate(_))
        ));
    }

    #[test]
    fn test_unlock_level_idempotent() {
        let mut ledger = ProgressionLedger::default();
        assert_eq!(
            ledger.unlock_level(4).unwrap(),
            vec![ProgressionEvent::LevelUnlocked { level_id: 4 }]
        );
        assert!(ledger.unlock_level(4).unwrap().is_empty());
        assert!(matches!(
            ledger.unlock_level(42),
            Err(EngineError::InvalidProgressionUpdate(_))
        ));
    }

    #[test]
    fn test_requirements_unlock_level_automatically() {
        let mut ledger = ProgressionLedger::default();
        ledger.learn_concept("ec2_basics").unwrap();
        assert!(!ledger.levels().is_unlocked(2));

        let events = ledger.award_experience(200).unwrap();
        assert!(events.contains(&ProgressionEvent::LevelUnlocked { level_id: 2 }));
        assert!(ledger.levels().is_unlocked(2));
    }

    // =========================================================================
    // Lessons
    // =========================================================================

    #[test]
    fn test_passing_lesson_learns_and_awards() {
        let mut ledger = ProgressionLedger::default();
        let lesson = LessonResult {
            concept_id: "vpc_networking".to_string(),
            correct_answers: 4,
            total_questions: 5,
            practical_completed: true,
        };
        let events = ledger.complete_lesson(&lesson).unwrap();
        assert!(ledger.has_learned("vpc_networking"));
        // 100 + 80 / 2 + 50
        assert_eq!(ledger.experience(), 190);
        assert!(!earned(&events).contains(&PERFECT_SCORE));
    }

    #[test]
    fn test_replayed_lesson_awards_nothing() {
        let mut ledger = ProgressionLedger::default();
        let lesson = LessonResult {
            concept_id: "ec2_basics".to_string(),
            correct_answers: 10,
            total_questions: 10,
            practical_completed: true,
        };
        ledger.complete_lesson(&lesson).unwrap();
        assert_eq!(ledger.experience(), 200);
        let after_first = ledger.clone();

        for _ in 0..5 {
            assert!(ledger.complete_lesson(&lesson).unwrap().is_empty());
        }
        assert_eq!(ledger.experience(), 200);
        assert_eq!(ledger.level(), 3);
        assert_eq!(ledger, after_first);
    }

    #[test]
    fn test_replayed_lesson_with_bad_score_still_rejected() {
        let mut ledger = ProgressionLedger::default();
        ledger.learn_concept("s3_storage").unwrap();
        let lesson = LessonResult {
            concept_id: "s3_storage".to_string(),
            correct_answers: 6,
            total_questions: 5,
            practical_completed: false,
        };
        assert!(matches!(
            ledger.complete_lesson(&lesson),
            Err(EngineError::InvalidProgressionUpdate(_))
        ));
    }

    #[test]
    fn test_perfect_lesson_earns_perfect_score() {
        let mut ledger = ProgressionLedger::default();
        let lesson = LessonResult {
            concept_id: "ec2_basics".to_string(),
            correct_answers: 3,
            total_questions: 3,
            practical_completed: false,
        };
        let events = ledger.complete_lesson(&lesson).unwrap();
        assert!(earned(&events).contains(&PERFECT_SCORE));
        assert_eq!(ledger.experience(), 150);
    }

    #[test]
    fn test_failing_lesson_changes_nothing() {
        let mut ledger = ProgressionLedger::default();
        let lesson = LessonResult {
            concept_id: "iam_security".to_string(),
            correct_answers: 1,
            total_questions: 3,
            practical_completed: true,
        };
        let events = ledger.complete_lesson(&lesson).unwrap();
        assert_eq!(
            events,
            vec![ProgressionEvent::LessonFailed {
                concept_id: "iam_security",
                quiz_percent: 33
            }]
        );
        assert_eq!(ledger, ProgressionLedger::default());
    }

    #[test]
    fn test_lesson_with_bad_score_rejected() {
        let mut ledger = ProgressionLedger::default();
        let lesson = LessonResult {
            concept_id: "ec2_basics".to_string(),
            correct_answers: 4,
            total_questions: 3,
            practical_completed: false,
        };
        assert!(matches!(
            ledger.complete_lesson(&lesson),
            Err(EngineError::InvalidProgressionUpdate(_))
        ));
    }

    // =========================================================================
    // Battles
    // =========================================================================

    #[test]
    fn test_flawless_victory() {
        let mut ledger = ProgressionLedger::default();
        let events = ledger.record_battle(&victory(0, 100, 62)).unwrap();
        let ids = earned(&events);
        assert!(ids.contains(&FIRST_VICTORY));
        assert!(ids.contains(&FLAWLESS_VICTORY));
        assert!(!ids.contains(&COMEBACK_KID));
        assert_eq!(ledger.experience(), 62);
        assert_eq!(ledger.stats().defeats_of(EnemyKind::SecurityBreach), 1);
    }

    #[test]
    fn test_comeback_kid() {
        let mut ledger = ProgressionLedger::default();
        let events = ledger.record_battle(&victory(95, 5, 62)).unwrap();
        let ids = earned(&events);
        assert!(ids.contains(&COMEBACK_KID));
        assert!(!ids.contains(&FLAWLESS_VICTORY));
    }

    #[test]
    fn test_defeat_records_loss_only() {
        let mut ledger = ProgressionLedger::default();
        let mut summary = victory(100, 0, 0);
        summary.outcome = CombatOutcome::Defeat;
        summary.enemies_defeated.clear();
        let events = ledger.record_battle(&summary).unwrap();
        assert!(earned(&events).is_empty());
        assert_eq!(ledger.stats().battles_lost, 1);
        assert_eq!(ledger.experience(), 0);
    }

    #[test]
    fn test_three_breaches_and_level_seven_open_citadel() {
        let mut ledger = ProgressionLedger::default();
        ledger.learn_concept("vpc_networking").unwrap();
        ledger.award_experience(600).unwrap();
        for _ in 0..2 {
            ledger.record_battle(&victory(10, 90, 0)).unwrap();
        }
        assert!(!ledger.levels().is_unlocked(4));
        let events = ledger.record_battle(&victory(10, 90, 0)).unwrap();
        assert!(events.contains(&ProgressionEvent::LevelUnlocked { level_id: 4 }));
    }

    #[test]
    fn test_reset_starts_over() {
        let mut ledger = ProgressionLedger::default();
        ledger.learn_concept("ec2_basics").unwrap();
        ledger.award_experience(500).unwrap();
        ledger.reset();
        assert_eq!(ledger, ProgressionLedger::default());
    }

    #[test]
    fn test_from_parts_rejects_wrong_level() {
        let state = ProgressionState {
            experience: 250,
            level: 1,
            ..ProgressionState::default()
        };
        let result =
            ProgressionLedger::from_parts(state, LevelUnlocks::default(), BalanceConfig::default());
        assert!(matches!(result, Err(EngineError::InvariantViolation(_))));
    }
}
