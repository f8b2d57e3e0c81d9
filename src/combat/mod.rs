//! Combat system module
//!
//! Implements the duel rules:
//! - Random draws (damage rolls, miss/crit chances, heal amounts)
//! - Damage resolution with buff, critical and block multipliers
//! - Combatant state and its four actions
//! - Skill and side identifiers shared with the scheduler

mod damage;
mod dice;
mod result;
mod skill;
mod state;

pub use damage::{base_damage, resolve_attack, scale, AttackResolution, DamageModifier, DamageResult};
pub use dice::{roll_between, roll_chance, AttackRolls, CRIT_CHANCE, MISS_CHANCE};
pub use result::{CombatResult, Outcome};
pub use skill::{Side, SkillKind};
pub use state::{Combatant, MAX_HEALTH};
