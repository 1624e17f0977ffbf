//! Core game state, balance settings and errors.

pub mod config;
pub mod constants;
pub mod error;
pub mod game_state;

pub use config::{BalanceConfig, LevelCurve};
pub use constants::*;
pub use error::{ContentKind, EngineError, Result};
pub use game_state::GameState;
