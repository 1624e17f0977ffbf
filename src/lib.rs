//! Cloud Quest - Combat & Progression Engine
//!
//! Turn-based battles whose outcome depends on the cloud concepts a player
//! has learned, plus the experience, achievement and save model that lessons
//! and combat feed into. Rendering, input and audio live outside this crate.

pub mod achievements;
pub mod combat;
pub mod concepts;
pub mod core;
pub mod encounters;
pub mod persistence;
pub mod progression;
pub mod simulator;

pub use combat::{
    CombatEvent, CombatOutcome, CombatPhase, CombatSession, CombatSummary, Enemy, EnemyKind,
    PlayerAction, PlayerState, TurnReport,
};
pub use crate::core::{BalanceConfig, EngineError, GameState, Result};
pub use progression::{LessonResult, ProgressionEvent, ProgressionLedger};
