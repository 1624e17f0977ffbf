//! Combat system: enemies, ability resolution and the turn-based session.

pub mod resolver;
pub mod session;
pub mod types;

pub use resolver::{resolve, Defender, Resolution};
pub use session::{
    CombatEvent, CombatOutcome, CombatPhase, CombatSession, CombatSummary, EnemyDefeat,
    PlayerAction, TurnReport,
};
pub use types::*;
