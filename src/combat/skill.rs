//! Skill and side identifiers

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Enemy];

    /// The other combatant
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// The four hardcoded skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    /// Strike the opponent
    Attack,
    /// Halve incoming damage for the block window
    Block,
    /// Restore some health
    Heal,
    /// Charge the next attack to 150%
    PowerStrike,
}

impl SkillKind {
    pub const ALL: [SkillKind; 4] = [
        SkillKind::Attack,
        SkillKind::Block,
        SkillKind::Heal,
        SkillKind::PowerStrike,
    ];

    pub fn index(&self) -> usize {
        match self {
            SkillKind::Attack => 0,
            SkillKind::Block => 1,
            SkillKind::Heal => 2,
            SkillKind::PowerStrike => 3,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SkillKind::Attack => "Attack",
            SkillKind::Block => "Block",
            SkillKind::Heal => "Heal",
            SkillKind::PowerStrike => "Power Strike",
        }
    }

    /// Inclusive cooldown interval range in milliseconds
    pub fn default_range(&self) -> (u64, u64) {
        match self {
            SkillKind::Attack => (2700, 3200),
            SkillKind::Block => (5500, 6500),
            SkillKind::Heal => (7500, 8500),
            SkillKind::PowerStrike => (9500, 10500),
        }
    }

    /// Whether the skill needs a living opponent to fire
    pub fn needs_target(&self) -> bool {
        matches!(self, SkillKind::Attack | SkillKind::PowerStrike)
    }
}

impl FromStr for SkillKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "attack" => Ok(SkillKind::Attack),
            "block" => Ok(SkillKind::Block),
            "heal" => Ok(SkillKind::Heal),
            "power_strike" | "powerstrike" => Ok(SkillKind::PowerStrike),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SkillKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
