//! Explicit game context handed between exploration, lessons and combat.

use crate::combat::{CombatSession, CombatSummary, Enemy, PlayerState};
use crate::core::config::BalanceConfig;
use crate::core::error::Result;
use crate::persistence::{self, SaveRecord};
use crate::progression::{ProgressionEvent, ProgressionLedger};
use tracing::debug;

/// Everything one player owns. Combat borrows `player` mutably while the
/// ledger is only read; results flow back through [`GameState::record_battle`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: PlayerState,
    pub ledger: ProgressionLedger,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game(BalanceConfig::default())
    }
}

impl GameState {
    pub fn new_game(config: BalanceConfig) -> Self {
        Self {
            player: PlayerState::new(config.starting_health),
            ledger: ProgressionLedger::new(config),
        }
    }

    /// Starts a battle against `enemies` with the current loadout.
    pub fn start_battle(&mut self, enemies: Vec<Enemy>) -> Result<CombatSession<'_>> {
        CombatSession::new(&mut self.player, &self.ledger, enemies)
    }

    pub fn record_battle(&mut self, summary: &CombatSummary) -> Result<Vec<ProgressionEvent>> {
        self.ledger.record_battle(summary)
    }

    /// Restores full health between battles. Cooldowns are kept.
    pub fn rest(&mut self) {
        debug!(
            health = self.player.health,
            max_health = self.player.max_health,
            "player rested"
        );
        self.player.heal_full();
    }

    /// Wipes progress for a new game, keeping the balance settings.
    pub fn reset(&mut self) {
        let config = self.ledger.config().clone();
        *self = Self::new_game(config);
    }

    pub fn save_record(&self) -> SaveRecord {
        persistence::serialize(&self.player, self.ledger.state(), self.ledger.levels())
    }

    pub fn from_record(record: SaveRecord, config: BalanceConfig) -> Result<Self> {
        let (player, state, levels) =
            persistence::deserialize_with_curve(record, &config.level_curve)?;
        let ledger = ProgressionLedger::from_parts(state, levels, config)?;
        Ok(Self { player, ledger })
    }
}
