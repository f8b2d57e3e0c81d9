//! skirmish - real-time two-combatant battle simulator
//!
//! Player and Enemy fire Attack, Block, Heal and Power Strike on
//! independent cooldown timers until one of them drops to zero health.

pub mod combat;
pub mod config;
pub mod report;
pub mod session;
pub mod timers;

pub use combat::{CombatResult, Combatant, Outcome, Side, SkillKind};
pub use config::{ArenaConfig, ConfigError};
pub use session::{BattleSession, BattleSnapshot, BattleStatus, SessionError};
