//! Random encounters drawn from a level's spawn table.

use crate::combat::Enemy;
use crate::core::constants::{MAX_ENCOUNTER_SIZE, MIN_ENCOUNTER_SIZE};
use crate::core::error::{ContentKind, EngineError, Result};
use crate::progression::get_level;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Rolls the enemies of one encounter in `level_id`. Instance ids run 1..=n
/// in encounter order.
pub fn roll_encounter<R: Rng + ?Sized>(level_id: u32, rng: &mut R) -> Result<Vec<Enemy>> {
    let level = get_level(level_id)
        .ok_or_else(|| EngineError::not_found(ContentKind::Level, level_id.to_string()))?;

    let count = rng.gen_range(MIN_ENCOUNTER_SIZE..=MAX_ENCOUNTER_SIZE);
    let mut enemies = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let kind = level.spawn_table.choose(rng).ok_or_else(|| {
            EngineError::InvariantViolation(format!("level {level_id} has an empty spawn table"))
        })?;
        enemies.push(Enemy::spawn(*kind, id));
    }

    debug!(
        level_id,
        kinds = ?enemies.iter().map(|e| e.kind).collect::<Vec<_>>(),
        "encounter rolled"
    );
    Ok(enemies)
}
