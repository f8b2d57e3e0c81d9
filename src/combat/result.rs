//! Action results

use serde::{Deserialize, Serialize};

/// What an action actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Attack landed
    Hit {
        damage: i32,
        critical: bool,
        blocked: bool,
    },
    /// Attack whiffed
    Missed,
    /// Health restored (actual gain after the cap)
    Healed { amount: i32 },
    /// Power strike charged for the next attack
    Charged,
    /// Block raised
    Blocking,
    /// Actor or target was dead; nothing changed
    Skipped,
}

/// Result of one combat action: a log line plus the numbers behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub message: String,
    pub outcome: Outcome,
}

impl CombatResult {
    pub fn new(message: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            message: message.into(),
            outcome,
        }
    }

    /// Damage dealt, zero for anything but a hit
    pub fn damage_dealt(&self) -> i32 {
        match self.outcome {
            Outcome::Hit { damage, .. } => damage,
            _ => 0,
        }
    }

    /// Health restored, zero for anything but a heal
    pub fn healed(&self) -> i32 {
        match self.outcome {
            Outcome::Healed { amount } => amount,
            _ => 0,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self.outcome, Outcome::Hit { critical: true, .. })
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == Outcome::Skipped
    }
}

impl std::fmt::Display for CombatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
