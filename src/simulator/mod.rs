//! Battle balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of seeded battles with a scripted player to analyze:
//! - Victory rates per level and encounter size
//! - How much learning concepts changes the odds
//! - Damage taken and experience earned per battle

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleRun, SimReport};
pub use runner::run_simulation;
