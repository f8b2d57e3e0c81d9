//! Damage multipliers and attack resolution
//!
//! Handles damage calculation with:
//! - Base damage (roll + attack power - defense, floored at 0)
//! - Power buff (150%), critical (150%), block (50%)
//! - Truncation toward zero after every single multiplier

use serde::{Deserialize, Serialize};

use super::dice::AttackRolls;
use super::state::Combatant;

/// A multiplier that can apply to an attack's damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModifier {
    /// Attacker spent a charged power strike - 150%
    PowerBuff,
    /// Critical hit - 150%
    Critical,
    /// Defender is blocking - 50%
    Blocked,
}

impl DamageModifier {
    /// Application order. Each step truncates before the next one runs.
    pub const ORDER: [DamageModifier; 3] = [
        DamageModifier::PowerBuff,
        DamageModifier::Critical,
        DamageModifier::Blocked,
    ];

    /// Apply this modifier to a damage amount
    pub fn apply(&self, damage: i32) -> i32 {
        scale(damage, self.factor())
    }

    /// The raw multiplier
    pub fn factor(&self) -> f64 {
        match self {
            DamageModifier::PowerBuff => 1.5,
            DamageModifier::Critical => 1.5,
            DamageModifier::Blocked => 0.5,
        }
    }

    /// Get the multiplier as a percentage
    pub fn percentage(&self) -> u32 {
        match self {
            DamageModifier::PowerBuff => 150,
            DamageModifier::Critical => 150,
            DamageModifier::Blocked => 50,
        }
    }
}

/// Multiply and truncate toward zero
pub fn scale(damage: i32, factor: f64) -> i32 {
    (damage as f64 * factor) as i32
}

/// Damage before any multiplier, never negative
pub fn base_damage(damage_roll: i32, attack_power: i32, defense: i32) -> i32 {
    damage_roll
        .saturating_add(attack_power)
        .saturating_sub(defense)
        .max(0)
}

/// Result of a damage calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Damage before modifiers
    pub base_damage: i32,
    /// Damage after every modifier
    pub final_damage: i32,
    /// Whether the power buff was spent on this hit
    pub buffed: bool,
    /// Whether this was a critical hit
    pub critical: bool,
    /// Whether the defender was blocking
    pub blocked: bool,
}

impl DamageResult {
    /// Run the modifier chain over a base damage value
    pub fn new(base: i32, buffed: bool, critical: bool, blocked: bool) -> Self {
        let final_damage = DamageModifier::ORDER
            .iter()
            .filter(|m| match m {
                DamageModifier::PowerBuff => buffed,
                DamageModifier::Critical => critical,
                DamageModifier::Blocked => blocked,
            })
            .fold(base, |damage, m| m.apply(damage));

        Self {
            base_damage: base,
            final_damage,
            buffed,
            critical,
            blocked,
        }
    }

    /// Modifiers that contributed to this result, in application order
    pub fn modifiers(&self) -> Vec<DamageModifier> {
        let mut applied = Vec::new();
        if self.buffed {
            applied.push(DamageModifier::PowerBuff);
        }
        if self.critical {
            applied.push(DamageModifier::Critical);
        }
        if self.blocked {
            applied.push(DamageModifier::Blocked);
        }
        applied
    }
}

/// Outcome of resolving an attack without touching either combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackResolution {
    /// The attack whiffed
    Missed,
    /// The attack landed
    Hit(DamageResult),
}

/// Resolve one attack from pre-drawn rolls.
///
/// Pure: the caller consumes the attacker's buff and applies the damage.
pub fn resolve_attack(
    rolls: &AttackRolls,
    attacker: &Combatant,
    defender: &Combatant,
) -> AttackResolution {
    if rolls.missed {
        return AttackResolution::Missed;
    }

    let base = base_damage(rolls.damage_roll, attacker.attack_power, defender.defense);
    AttackResolution::Hit(DamageResult::new(
        base,
        attacker.has_power_buff,
        rolls.critical,
        defender.is_blocking,
    ))
}
