//! Arena configuration
//!
//! Layers, lowest priority first:
//! - built-in defaults
//! - optional TOML file
//! - `SKIRMISH_` environment variables (`__` separates nested keys)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::SkillKind;

/// Highest accepted attack power or defense
pub const MAX_STAT: i32 = 1000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("tick_ms must be greater than zero")]
    ZeroTick,

    #[error("log_capacity must be greater than zero")]
    ZeroLogCapacity,

    #[error("{skill} cooldown range is inverted: {min} > {max}")]
    InvalidRange { skill: SkillKind, min: u64, max: u64 },

    #[error("{combatant} {stat} must be within 0..={max}, got {value}")]
    StatOutOfRange {
        combatant: String,
        stat: &'static str,
        value: i32,
        max: i32,
    },
}

/// Base stats for one combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantConfig {
    pub name: String,
    pub attack_power: i32,
    pub defense: i32,
}

impl CombatantConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (stat, value) in [("attack_power", self.attack_power), ("defense", self.defense)] {
            if !(0..=MAX_STAT).contains(&value) {
                return Err(ConfigError::StatOutOfRange {
                    combatant: self.name.clone(),
                    stat,
                    value,
                    max: MAX_STAT,
                });
            }
        }
        Ok(())
    }
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self {
            name: "Combatant".to_string(),
            attack_power: 15,
            defense: 5,
        }
    }
}

/// Inclusive `[min, max]` interval range per skill, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownRanges {
    pub attack: (u64, u64),
    pub block: (u64, u64),
    pub heal: (u64, u64),
    pub power_strike: (u64, u64),
}

impl CooldownRanges {
    pub fn get(&self, skill: SkillKind) -> (u64, u64) {
        match skill {
            SkillKind::Attack => self.attack,
            SkillKind::Block => self.block,
            SkillKind::Heal => self.heal,
            SkillKind::PowerStrike => self.power_strike,
        }
    }

    /// Every skill fires after exactly `interval_ms`
    pub fn fixed(interval_ms: u64) -> Self {
        let range = (interval_ms, interval_ms);
        Self {
            attack: range,
            block: range,
            heal: range,
            power_strike: range,
        }
    }
}

impl Default for CooldownRanges {
    fn default() -> Self {
        Self {
            attack: SkillKind::Attack.default_range(),
            block: SkillKind::Block.default_range(),
            heal: SkillKind::Heal.default_range(),
            power_strike: SkillKind::PowerStrike.default_range(),
        }
    }
}

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Scheduling quantum
    pub tick_ms: u64,
    /// Pause between a cooldown expiring and the skill landing
    pub cast_delay_ms: u64,
    /// How long a block halves incoming damage
    pub block_window_ms: u64,
    /// Maximum combat log entries kept
    pub log_capacity: usize,
    /// RNG seed; drawn from the OS when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub player: CombatantConfig,
    pub enemy: CombatantConfig,
    pub cooldowns: CooldownRanges,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            cast_delay_ms: 300,
            block_window_ms: 2000,
            log_capacity: 100,
            seed: None,
            player: CombatantConfig::named("Player"),
            enemy: CombatantConfig::named("Enemy"),
            cooldowns: CooldownRanges::default(),
        }
    }
}

impl ArenaConfig {
    /// Load defaults, then the optional TOML file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ArenaConfig::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: ArenaConfig = figment
            .merge(Env::prefixed("SKIRMISH_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a session cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        for skill in SkillKind::ALL {
            let (min, max) = self.cooldowns.get(skill);
            if min > max {
                return Err(ConfigError::InvalidRange { skill, min, max });
            }
        }
        self.player.validate()?;
        self.enemy.validate()?;
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
