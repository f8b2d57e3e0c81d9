//! Battle state
//!
//! Everything a battle mutates, behind one lock in the session:
//! - both combatants
//! - the cooldown board
//! - the combat log
//! - the epoch and end-of-battle status
//! - the RNG
//!
//! All methods are synchronous; one call is one atomic step of the battle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::combat::{AttackRolls, CombatResult, Combatant, Side, SkillKind};
use crate::config::{ArenaConfig, CooldownRanges};
use crate::timers::{CooldownBoard, SkillCooldown};

use super::log::CombatLog;

/// Log entry written by every reset
pub const RESET_MESSAGE: &str = "Game reset! The battle begins anew!";

/// Where a battle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BattleStatus {
    /// Timers are ticking
    Running { epoch: u64 },
    /// One side fell
    Ended { epoch: u64, winner: Side },
    /// Halted from outside before a winner emerged
    Stopped { epoch: u64 },
}

impl BattleStatus {
    pub fn epoch(&self) -> u64 {
        match *self {
            BattleStatus::Running { epoch }
            | BattleStatus::Ended { epoch, .. }
            | BattleStatus::Stopped { epoch } => epoch,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match *self {
            BattleStatus::Ended { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, BattleStatus::Running { .. })
    }
}

/// Read-only copy of a battle for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub status: BattleStatus,
    pub player: Combatant,
    pub enemy: Combatant,
    /// Player skills first, in `SkillKind::ALL` order
    pub cooldowns: Vec<SkillCooldown>,
    /// Newest first
    pub log: Vec<String>,
}

impl BattleSnapshot {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn player_health(&self) -> i32 {
        self.player.health
    }

    pub fn enemy_health(&self) -> i32 {
        self.enemy.health
    }

    pub fn remaining_ms(&self, side: Side, skill: SkillKind) -> u64 {
        self.cooldowns
            .iter()
            .find(|cd| cd.side == side && cd.skill == skill)
            .map(|cd| cd.remaining_ms)
            .unwrap_or(0)
    }
}

/// Mutable state of one battle session
#[derive(Debug)]
pub struct BattleState {
    player: Combatant,
    enemy: Combatant,
    cooldowns: CooldownBoard,
    ranges: CooldownRanges,
    log: CombatLog,
    epoch: u64,
    winner: Option<Side>,
    stopped: bool,
    rng: StdRng,
}

impl BattleState {
    /// Fresh battle in epoch 0
    pub fn new(config: &ArenaConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let ranges = config.cooldowns;
        let cooldowns = CooldownBoard::rolled(&mut rng, |skill| ranges.get(skill));

        Self {
            player: Combatant::new(
                &config.player.name,
                config.player.attack_power,
                config.player.defense,
            ),
            enemy: Combatant::new(
                &config.enemy.name,
                config.enemy.attack_power,
                config.enemy.defense,
            ),
            cooldowns,
            ranges,
            log: CombatLog::new(config.log_capacity),
            epoch: 0,
            winner: None,
            stopped: false,
            rng,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Actor and opponent, both mutable
    fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        match side {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn status(&self) -> BattleStatus {
        match (self.winner, self.stopped) {
            (Some(winner), _) => BattleStatus::Ended {
                epoch: self.epoch,
                winner,
            },
            (None, true) => BattleStatus::Stopped { epoch: self.epoch },
            (None, false) => BattleStatus::Running { epoch: self.epoch },
        }
    }

    pub fn both_alive(&self) -> bool {
        self.player.is_alive() && self.enemy.is_alive()
    }

    /// Whether timers of `epoch` should keep ticking
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.status().is_running() && self.both_alive()
    }

    /// Whether a skill of `epoch` may still land
    pub fn can_fire(&self, side: Side, skill: SkillKind, epoch: u64) -> bool {
        if self.epoch != epoch || !self.status().is_running() {
            return false;
        }
        if !self.combatant(side).is_alive() {
            return false;
        }
        !skill.needs_target() || self.combatant(side.opponent()).is_alive()
    }

    pub fn cooldowns(&self) -> &CooldownBoard {
        &self.cooldowns
    }

    pub fn cooldowns_mut(&mut self) -> &mut CooldownBoard {
        &mut self.cooldowns
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Apply a skill, log it, and check for the end after an attack.
    ///
    /// Returns `None` when the actor or its target cannot act.
    pub fn perform(&mut self, side: Side, skill: SkillKind) -> Option<CombatResult> {
        let result = match skill {
            SkillKind::Attack => {
                let rolls = AttackRolls::roll(&mut self.rng);
                return self.attack_with(side, rolls);
            }
            SkillKind::Block => self.combatant_mut(side).block(),
            SkillKind::Heal => {
                let actor = match side {
                    Side::Player => &mut self.player,
                    Side::Enemy => &mut self.enemy,
                };
                actor.heal_self(&mut self.rng)
            }
            SkillKind::PowerStrike => {
                if !self.combatant(side.opponent()).is_alive() {
                    return None;
                }
                self.combatant_mut(side).charge_buff()
            }
        };

        self.settle(result)
    }

    /// Attack with pre-drawn rolls, log it, and check for the end
    pub fn attack_with(&mut self, side: Side, rolls: AttackRolls) -> Option<CombatResult> {
        let (actor, target) = self.pair_mut(side);
        let result = actor.attack_with(target, rolls);
        let result = self.settle(result)?;
        self.check_end();
        Some(result)
    }

    fn settle(&mut self, result: CombatResult) -> Option<CombatResult> {
        if result.is_skipped() {
            return None;
        }
        self.log.record(result.message.clone());
        Some(result)
    }

    /// Lower a combatant's block when its window closes
    pub fn end_block(&mut self, side: Side) {
        self.combatant_mut(side).end_block();
    }

    pub fn record_log(&mut self, message: impl Into<String>) {
        self.log.record(message);
    }

    /// Declare a winner once either side is down.
    ///
    /// Returns the winner only on the call that ends the battle.
    pub fn check_end(&mut self) -> Option<Side> {
        if self.winner.is_some() || self.both_alive() {
            return None;
        }

        let winner = if self.player.is_alive() {
            Side::Player
        } else {
            Side::Enemy
        };
        let message = format!("{} Wins!", self.combatant(winner).name);
        self.log.record(message);
        self.winner = Some(winner);
        Some(winner)
    }

    /// Halt without declaring a winner
    pub fn stop(&mut self) {
        if self.winner.is_none() {
            self.stopped = true;
        }
    }

    /// Start the next epoch: full health, no flags, new intervals, one log entry
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.winner = None;
        self.stopped = false;
        self.log.clear();
        self.player.restore();
        self.enemy.restore();
        let ranges = self.ranges;
        self.cooldowns = CooldownBoard::rolled(&mut self.rng, |skill| ranges.get(skill));
        self.log.record(RESET_MESSAGE);
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            status: self.status(),
            player: self.player.clone(),
            enemy: self.enemy.clone(),
            cooldowns: self.cooldowns.cooldowns(),
            log: self.log.to_vec(),
        }
    }
}
