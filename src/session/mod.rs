//! Battle session module
//!
//! Ties combatants, cooldown timers and the combat log together:
//! - CombatLog: bounded, newest first
//! - BattleState: one lock's worth of battle, stepped synchronously
//! - BattleSession: async driver with per-skill timer tasks, reset and stop

mod log;
mod runner;
mod state;

pub use log::CombatLog;
pub use runner::{BattleSession, SessionError};
pub use state::{BattleSnapshot, BattleState, BattleStatus, RESET_MESSAGE};
