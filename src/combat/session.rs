//! Turn-based combat session.
//!
//! A session owns the enemies of one encounter and mutably borrows the
//! player's vitals for the whole battle. Each [`PlayerAction`] drives the
//! state machine synchronously until it rests in `PlayerTurn` again or in a
//! terminal phase; the returned [`TurnReport`] lists everything that happened.

use super::resolver::resolve;
use super::types::{AttackStep, Enemy, EnemyKind, PlayerState};
use crate::concepts::{get_ability, Ability, AbilityEffect};
use crate::core::config::BalanceConfig;
use crate::core::error::{EngineError, Result};
use crate::progression::ProgressionLedger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    PlayerTurn,
    ResolvingPlayerAction,
    EnemyTurn,
    ResolvingEnemyAction,
    Victory,
    Defeat,
    Fled,
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CombatPhase::Victory | CombatPhase::Defeat | CombatPhase::Fled
        )
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self {
            CombatPhase::Victory => Some(CombatOutcome::Victory),
            CombatPhase::Defeat => Some(CombatOutcome::Defeat),
            CombatPhase::Fled => Some(CombatOutcome::Fled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// What the player chose to do this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    UseAbility { ability_id: String, target_id: u32 },
    Flee,
}

impl PlayerAction {
    pub fn use_ability(ability_id: impl Into<String>, target_id: u32) -> Self {
        PlayerAction::UseAbility {
            ability_id: ability_id.into(),
            target_id,
        }
    }
}

/// Events emitted while a turn resolves, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PhaseChanged {
        from: CombatPhase,
        to: CombatPhase,
    },
    AbilityUsed {
        ability_id: &'static str,
        target_id: u32,
        damage: u32,
        weakness_hit: bool,
        countered: bool,
    },
    EnemyDefeated {
        enemy_id: u32,
        kind: EnemyKind,
    },
    PlayerHealed {
        amount: u32,
    },
    ShieldRaised {
        amount: u32,
    },
    EnemyWeakened {
        enemy_id: u32,
        percent: u32,
    },
    /// A targeted effect whose target fell to the same blow.
    EffectDiscarded {
        enemy_id: u32,
    },
    EnemyAttacked {
        enemy_id: u32,
        damage: u32,
        absorbed: u32,
    },
    EnemyIdle {
        enemy_id: u32,
    },
    Ended {
        outcome: CombatOutcome,
    },
}

/// Result of one submitted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub phase: CombatPhase,
    pub events: Vec<CombatEvent>,
}

impl TurnReport {
    /// Damage the player dealt with abilities this turn.
    pub fn damage_dealt(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                CombatEvent::AbilityUsed { damage, .. } => *damage,
                _ => 0,
            })
            .sum()
    }

    /// Damage the player took from enemies this turn.
    pub fn damage_taken(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                CombatEvent::EnemyAttacked { damage, .. } => *damage,
                _ => 0,
            })
            .sum()
    }

    pub fn defeated_enemy_ids(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::EnemyDefeated { enemy_id, .. } => Some(*enemy_id),
                _ => None,
            })
            .collect()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.phase.outcome()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDefeat {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub max_health: u32,
}

/// Everything the ledger needs to record a finished battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub session_id: Uuid,
    pub outcome: CombatOutcome,
    pub experience_awarded: u64,
    pub enemies_defeated: Vec<EnemyDefeat>,
    pub turns: u32,
    pub damage_taken: u32,
    pub abilities_used: BTreeSet<String>,
    pub player_health: u32,
    pub player_max_health: u32,
}

impl CombatSummary {
    pub fn is_victory(&self) -> bool {
        self.outcome == CombatOutcome::Victory
    }

    pub fn health_percent(&self) -> u32 {
        if self.player_max_health == 0 {
            return 0;
        }
        ((self.player_health as u64 * 100) / self.player_max_health as u64) as u32
    }
}

/// One battle in progress.
pub struct CombatSession<'a> {
    id: Uuid,
    player: &'a mut PlayerState,
    learned: BTreeSet<String>,
    loadout: Vec<&'static Ability>,
    enemies: Vec<Enemy>,
    defeated: Vec<EnemyDefeat>,
    config: BalanceConfig,
    turn: u32,
    phase: CombatPhase,
    shield: u32,
    damage_taken: u32,
    abilities_used: BTreeSet<String>,
}

impl<'a> CombatSession<'a> {
    /// Starts a battle. The loadout is the ledger's available abilities at
    /// this moment; learning a concept mid-battle does not change it.
    pub fn new(
        player: &'a mut PlayerState,
        ledger: &ProgressionLedger,
        enemies: Vec<Enemy>,
    ) -> Result<Self> {
        if enemies.is_empty() {
            return Err(EngineError::InvariantViolation(
                "a battle needs at least one enemy".to_string(),
            ));
        }
        let ids: BTreeSet<u32> = enemies.iter().map(|e| e.id).collect();
        if ids.len() != enemies.len() {
            return Err(EngineError::InvariantViolation(
                "enemy ids must be unique within an encounter".to_string(),
            ));
        }
        if let Some(enemy) = enemies.iter().find(|e| !e.is_alive()) {
            return Err(EngineError::InvariantViolation(format!(
                "enemy {} starts the battle defeated",
                enemy.id
            )));
        }
        if !player.is_alive() {
            return Err(EngineError::InvalidAction(
                "cannot start a battle with no health".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        info!(
            session = %id,
            enemies = enemies.len(),
            player_health = player.health,
            "battle started"
        );

        Ok(Self {
            id,
            player,
            learned: ledger.learned_concepts().clone(),
            loadout: ledger.available_abilities(),
            enemies,
            defeated: Vec::new(),
            config: ledger.config().clone(),
            turn: 1,
            phase: CombatPhase::PlayerTurn,
            shield: 0,
            damage_taken: 0,
            abilities_used: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Enemies still standing, in encounter order.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn player(&self) -> &PlayerState {
        self.player
    }

    pub fn loadout(&self) -> &[&'static Ability] {
        &self.loadout
    }

    /// Loadout abilities that are off cooldown right now.
    pub fn available_abilities(&self) -> Vec<&'static Ability> {
        self.loadout
            .iter()
            .copied()
            .filter(|a| self.player.cooldowns.is_ready(a.id))
            .collect()
    }

    /// Applies one player action. A rejected action leaves the session
    /// untouched and the player may choose again.
    pub fn submit(&mut self, action: PlayerAction) -> Result<TurnReport> {
        if self.phase != CombatPhase::PlayerTurn {
            return Err(EngineError::InvalidAction(format!(
                "cannot act during {:?}",
                self.phase
            )));
        }

        let turn = self.turn;
        let mut events = Vec::new();
        match action {
            PlayerAction::Flee => {
                self.transition(CombatPhase::Fled, &mut events);
                self.end(CombatOutcome::Fled, &mut events);
            }
            PlayerAction::UseAbility {
                ability_id,
                target_id,
            } => self.play_turn(&ability_id, target_id, &mut events)?,
        }

        Ok(TurnReport {
            turn,
            phase: self.phase,
            events,
        })
    }

    fn play_turn(
        &mut self,
        ability_id: &str,
        target_id: u32,
        events: &mut Vec<CombatEvent>,
    ) -> Result<()> {
        let ability = get_ability(ability_id)?;
        if !self.loadout.iter().any(|a| a.id == ability.id) {
            return Err(EngineError::InvalidAction(format!(
                "ability {ability_id} is not in the loadout"
            )));
        }
        let target_index = self
            .enemies
            .iter()
            .position(|e| e.id == target_id)
            .ok_or_else(|| EngineError::InvalidAction(format!("no enemy with id {target_id}")))?;
        let resolution = resolve(
            ability,
            &self.learned,
            &self.enemies[target_index],
            &self.player.cooldowns,
        )?;

        // Validated; from here on the turn always completes.
        self.transition(CombatPhase::ResolvingPlayerAction, events);
        self.abilities_used.insert(resolution.ability_id.to_string());

        let target = &mut self.enemies[target_index];
        target.take_damage(resolution.damage);
        events.push(CombatEvent::AbilityUsed {
            ability_id: resolution.ability_id,
            target_id,
            damage: resolution.damage,
            weakness_hit: resolution.weakness_hit,
            countered: resolution.countered,
        });
        debug!(
            session = %self.id,
            ability = resolution.ability_id,
            target = target_id,
            damage = resolution.damage,
            weakness_hit = resolution.weakness_hit,
            "ability resolved"
        );

        let lethal = !target.is_alive();
        if lethal {
            let enemy = self.enemies.remove(target_index);
            self.defeated.push(EnemyDefeat {
                enemy_id: enemy.id,
                kind: enemy.kind,
                max_health: enemy.max_health,
            });
            events.push(CombatEvent::EnemyDefeated {
                enemy_id: enemy.id,
                kind: enemy.kind,
            });
        }
        self.apply_effect(resolution.effect, target_id, lethal, events);

        if self.enemies.is_empty() {
            self.player
                .cooldowns
                .set(resolution.ability_id, resolution.new_cooldown);
            self.transition(CombatPhase::Victory, events);
            self.end(CombatOutcome::Victory, events);
            return Ok(());
        }

        self.player
            .cooldowns
            .commit(resolution.ability_id, resolution.new_cooldown);
        self.transition(CombatPhase::EnemyTurn, events);
        self.transition(CombatPhase::ResolvingEnemyAction, events);
        self.run_enemy_actions(events);
        self.shield = 0;

        if self.player.is_alive() {
            self.turn += 1;
            self.transition(CombatPhase::PlayerTurn, events);
        } else {
            self.transition(CombatPhase::Defeat, events);
            self.end(CombatOutcome::Defeat, events);
        }
        Ok(())
    }

    fn apply_effect(
        &mut self,
        effect: AbilityEffect,
        target_id: u32,
        target_defeated: bool,
        events: &mut Vec<CombatEvent>,
    ) {
        match effect {
            AbilityEffect::None => {}
            AbilityEffect::Heal(amount) => {
                let restored = self.player.heal(amount);
                events.push(CombatEvent::PlayerHealed { amount: restored });
            }
            AbilityEffect::Shield(amount) => {
                self.shield = self.shield.saturating_add(amount);
                events.push(CombatEvent::ShieldRaised { amount });
            }
            AbilityEffect::Weaken { percent } => {
                if target_defeated {
                    events.push(CombatEvent::EffectDiscarded {
                        enemy_id: target_id,
                    });
                } else if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == target_id) {
                    enemy.apply_weaken(percent);
                    events.push(CombatEvent::EnemyWeakened {
                        enemy_id: target_id,
                        percent,
                    });
                }
            }
        }
    }

    fn run_enemy_actions(&mut self, events: &mut Vec<CombatEvent>) {
        for enemy in self.enemies.iter_mut() {
            if !self.player.is_alive() {
                break;
            }
            match enemy.next_step() {
                AttackStep::Strike(base) => {
                    let damage = enemy.strike_damage(base);
                    let absorbed = damage.min(self.shield);
                    self.shield -= absorbed;
                    let taken = self.player.take_damage(damage - absorbed);
                    self.damage_taken = self.damage_taken.saturating_add(taken);
                    events.push(CombatEvent::EnemyAttacked {
                        enemy_id: enemy.id,
                        damage: taken,
                        absorbed,
                    });
                }
                AttackStep::Idle => events.push(CombatEvent::EnemyIdle { enemy_id: enemy.id }),
            }
        }
    }

    fn transition(&mut self, to: CombatPhase, events: &mut Vec<CombatEvent>) {
        debug!(session = %self.id, from = ?self.phase, to = ?to, "combat phase change");
        events.push(CombatEvent::PhaseChanged {
            from: self.phase,
            to,
        });
        self.phase = to;
    }

    fn end(&self, outcome: CombatOutcome, events: &mut Vec<CombatEvent>) {
        info!(
            session = %self.id,
            outcome = ?outcome,
            turns = self.turn,
            damage_taken = self.damage_taken,
            "battle ended"
        );
        events.push(CombatEvent::Ended { outcome });
    }

    /// Summary of a finished battle. `None` while the battle is running.
    pub fn summary(&self) -> Option<CombatSummary> {
        let outcome = self.phase.outcome()?;
        let experience_awarded = match outcome {
            CombatOutcome::Victory => self
                .defeated
                .iter()
                .map(|d| self.config.victory_xp(d.max_health))
                .sum(),
            CombatOutcome::Defeat | CombatOutcome::Fled => 0,
        };
        Some(CombatSummary {
            session_id: self.id,
            outcome,
            experience_awarded,
            enemies_defeated: self.defeated.clone(),
            turns: self.turn,
            damage_taken: self.damage_taken,
            abilities_used: self.abilities_used.clone(),
            player_health: self.player.health,
            player_max_health: self.player.max_health,
        })
    }

    /// Ends the session and releases the player.
    pub fn finish(self) -> Result<CombatSummary> {
        self.summary().ok_or_else(|| {
            EngineError::InvalidAction(format!(
                "battle {} is still in {:?}",
                self.id, self.phase
            ))
        })
    }
}
