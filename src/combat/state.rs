//! Combatant state and actions
//!
//! A combatant is mutated in place by its own actions:
//! - attack (miss, crit, buff, block, clamp)
//! - heal, block, power strike charge
//! - restore on reset

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::damage::{resolve_attack, AttackResolution};
use super::dice::{roll_between, AttackRolls, HEAL_ROLL};
use super::result::{CombatResult, Outcome};

/// Health cap and starting health
pub const MAX_HEALTH: i32 = 100;

/// One side of the duel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    /// Current health, always within `0..=MAX_HEALTH`
    pub health: i32,
    pub attack_power: i32,
    pub defense: i32,
    /// Incoming damage is halved while set
    pub is_blocking: bool,
    /// Spent by the next attack attempt
    pub has_power_buff: bool,
}

impl Combatant {
    /// Create a combatant at full health
    pub fn new(name: &str, attack_power: i32, defense: i32) -> Self {
        Self {
            name: name.to_string(),
            health: MAX_HEALTH,
            attack_power,
            defense,
            is_blocking: false,
            has_power_buff: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Attack a target, drawing rolls from `rng`
    pub fn attack<R: Rng + ?Sized>(&mut self, target: &mut Combatant, rng: &mut R) -> CombatResult {
        if !self.is_alive() || !target.is_alive() {
            return self.cannot("attack");
        }
        let rolls = AttackRolls::roll(rng);
        self.attack_with(target, rolls)
    }

    /// Attack a target with pre-drawn rolls
    pub fn attack_with(&mut self, target: &mut Combatant, rolls: AttackRolls) -> CombatResult {
        if !self.is_alive() || !target.is_alive() {
            return self.cannot("attack");
        }

        let resolution = resolve_attack(&rolls, self, target);
        // The buff is spent on the attempt, hit or miss
        self.has_power_buff = false;

        let result = match resolution {
            AttackResolution::Missed => {
                return CombatResult::new(format!("{}'s attack missed!", self.name), Outcome::Missed);
            }
            AttackResolution::Hit(result) => result,
        };

        target.health = (target.health - result.final_damage).max(0);

        let mut message = format!(
            "{} attacks {} for {} damage!",
            self.name, target.name, result.final_damage
        );
        if result.critical {
            message.push_str(" Critical hit!");
        }
        if result.blocked {
            message.push_str(" Blocked!");
        }

        CombatResult::new(
            message,
            Outcome::Hit {
                damage: result.final_damage,
                critical: result.critical,
                blocked: result.blocked,
            },
        )
    }

    /// Charge a power strike; the next attack deals 150%
    pub fn charge_buff(&mut self) -> CombatResult {
        if !self.is_alive() {
            return self.cannot("charge a power strike");
        }
        self.has_power_buff = true;
        CombatResult::new(
            format!(
                "{} is charging a Power Strike! Next attack will deal extra damage!",
                self.name
            ),
            Outcome::Charged,
        )
    }

    /// Heal by a random amount, capped at `MAX_HEALTH`
    pub fn heal_self<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CombatResult {
        if !self.is_alive() {
            return self.cannot("heal");
        }
        let amount = roll_between(rng, HEAL_ROLL.0, HEAL_ROLL.1);
        self.heal(amount)
    }

    /// Heal by a fixed amount, capped at `MAX_HEALTH`
    pub fn heal(&mut self, amount: i32) -> CombatResult {
        if !self.is_alive() {
            return self.cannot("heal");
        }
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(MAX_HEALTH);
        let gained = self.health - before;

        CombatResult::new(
            format!("{} heals for {} HP!", self.name, gained),
            Outcome::Healed { amount: gained },
        )
    }

    /// Raise the block; the caller lowers it when the window closes
    pub fn block(&mut self) -> CombatResult {
        if !self.is_alive() {
            return self.cannot("block");
        }
        self.is_blocking = true;
        CombatResult::new(
            format!(
                "{} braces for impact and is blocking incoming attacks!",
                self.name
            ),
            Outcome::Blocking,
        )
    }

    /// Lower the block
    pub fn end_block(&mut self) {
        self.is_blocking = false;
    }

    /// Back to full health with every status flag cleared
    pub fn restore(&mut self) {
        self.health = MAX_HEALTH;
        self.is_blocking = false;
        self.has_power_buff = false;
    }

    fn cannot(&self, action: &str) -> CombatResult {
        CombatResult::new(format!("{} cannot {}.", self.name, action), Outcome::Skipped)
    }
}
