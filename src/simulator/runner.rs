//! Main simulation runner.
//!
//! Every battle is played through the real [`CombatSession`], so simulated
//! results follow the same rules as the game.

use super::config::SimConfig;
use super::report::{BattleRun, SimReport};
use crate::combat::{resolve, CombatSession, PlayerAction, PlayerState};
use crate::concepts::Ability;
use crate::core::error::Result;
use crate::encounters::roll_encounter;
use crate::progression::ProgressionLedger;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let mut ledger = ProgressionLedger::new(config.balance.clone());
    for concept_id in &config.learned_concepts {
        ledger.learn_concept(concept_id)?;
    }

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_battle(config, &ledger, &mut rng)?;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} vs {} enemies in {} turns, {} damage taken",
                run_idx + 1,
                config.num_runs,
                run.outcome,
                run.enemy_count,
                run.turns,
                run.damage_taken
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(all_runs);
    info!(
        runs = report.num_runs,
        victory_rate = report.victory_rate,
        "simulation finished"
    );
    Ok(report)
}

/// Plays one battle with a fresh player.
fn simulate_battle<R: Rng + ?Sized>(
    config: &SimConfig,
    ledger: &ProgressionLedger,
    rng: &mut R,
) -> Result<BattleRun> {
    let mut player = PlayerState::new(config.balance.starting_health);
    let enemies = roll_encounter(config.level_id, rng)?;
    let enemy_count = enemies.len();

    let mut session = CombatSession::new(&mut player, ledger, enemies)?;
    let mut timed_out = false;
    while !session.is_over() {
        if session.turn() > config.max_turns {
            debug!(session = %session.id(), "turn limit reached, fleeing");
            timed_out = true;
            session.submit(PlayerAction::Flee)?;
            break;
        }
        let action = choose_action(&session, ledger, rng);
        session.submit(action)?;
    }

    let summary = session.finish()?;
    Ok(BattleRun {
        outcome: summary.outcome,
        timed_out,
        enemy_count,
        turns: summary.turns,
        damage_taken: summary.damage_taken,
        experience: summary.experience_awarded,
        abilities_used: summary.abilities_used.len(),
    })
}

/// Highest-damage ready ability against the weakest enemy. Ties between
/// abilities are broken at random.
fn choose_action<R: Rng + ?Sized>(
    session: &CombatSession<'_>,
    ledger: &ProgressionLedger,
    rng: &mut R,
) -> PlayerAction {
    let Some(target) = session
        .enemies()
        .iter()
        .min_by_key(|e| (e.health, e.id))
    else {
        return PlayerAction::Flee;
    };

    let cooldowns = &session.player().cooldowns;
    let scored: Vec<(&'static Ability, u32)> = session
        .available_abilities()
        .into_iter()
        .filter_map(|ability| {
            resolve(ability, ledger.learned_concepts(), target, cooldowns)
                .ok()
                .map(|r| (ability, r.damage))
        })
        .collect();

    let Some(best) = scored.iter().map(|(_, damage)| *damage).max() else {
        return PlayerAction::Flee;
    };
    let candidates: Vec<&'static Ability> = scored
        .iter()
        .filter(|(_, damage)| *damage == best)
        .map(|(ability, _)| *ability)
        .collect();

    match candidates.choose(rng) {
        Some(ability) => PlayerAction::use_ability(ability.id, target.id),
        None => PlayerAction::Flee,
    }
}
