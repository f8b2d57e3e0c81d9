//! Skill cooldown timers
//!
//! Provides:
//! - CooldownTimer: a repeating countdown with a fixed interval
//! - CooldownBoard: the eight timers, one per skill per combatant
//!
//! The timers hold no clock of their own. The session's tasks advance
//! them one tick at a time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{Side, SkillKind};

/// A repeating cooldown for one skill of one combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownTimer {
    /// Milliseconds until the skill fires, within `0..=interval_ms`
    pub remaining_ms: u64,
    /// Fixed until the timer is rebuilt
    pub interval_ms: u64,
}

impl CooldownTimer {
    /// Create a timer that starts a full interval away from firing
    pub fn new(interval_ms: u64) -> Self {
        Self {
            remaining_ms: interval_ms,
            interval_ms,
        }
    }

    /// Create a timer with an interval drawn from `min..=max`
    pub fn rolled<R: Rng + ?Sized>(rng: &mut R, (min, max): (u64, u64)) -> Self {
        Self::new(rng.random_range(min..=max))
    }

    /// Check if the skill is due to fire
    pub fn is_ready(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Count down by one tick, stopping at zero
    pub fn advance(&mut self, tick_ms: u64) {
        self.remaining_ms = self.remaining_ms.saturating_sub(tick_ms);
    }

    /// Start the next cycle with the same interval
    pub fn rearm(&mut self) {
        self.remaining_ms = self.interval_ms;
    }
}

/// Cooldown of one skill as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCooldown {
    pub side: Side,
    pub skill: SkillKind,
    pub remaining_ms: u64,
    pub interval_ms: u64,
}

/// All eight cooldown timers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownBoard {
    timers: [[CooldownTimer; 4]; 2],
}

impl CooldownBoard {
    /// Roll a fresh interval for every timer
    pub fn rolled<R, F>(rng: &mut R, range: F) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(SkillKind) -> (u64, u64),
    {
        let mut timers = [[CooldownTimer::new(0); 4]; 2];
        for side in Side::ALL {
            for skill in SkillKind::ALL {
                timers[side.index()][skill.index()] = CooldownTimer::rolled(rng, range(skill));
            }
        }
        Self { timers }
    }

    pub fn get(&self, side: Side, skill: SkillKind) -> &CooldownTimer {
        &self.timers[side.index()][skill.index()]
    }

    pub fn get_mut(&mut self, side: Side, skill: SkillKind) -> &mut CooldownTimer {
        &mut self.timers[side.index()][skill.index()]
    }

    /// Remaining milliseconds for a skill
    pub fn remaining_ms(&self, side: Side, skill: SkillKind) -> u64 {
        self.get(side, skill).remaining_ms
    }

    /// Every cooldown, player skills first
    pub fn cooldowns(&self) -> Vec<SkillCooldown> {
        Side::ALL
            .iter()
            .flat_map(|&side| {
                SkillKind::ALL.iter().map(move |&skill| {
                    let timer = self.get(side, skill);
                    SkillCooldown {
                        side,
                        skill,
                        remaining_ms: timer.remaining_ms,
                        interval_ms: timer.interval_ms,
                    }
                })
            })
            .collect()
    }
}
