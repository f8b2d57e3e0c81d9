//! Battle session driver
//!
//! Runs one tokio task per (combatant, skill) cooldown plus one short
//! task per open block window. Every task carries the epoch it was
//! spawned in and re-checks it under the state lock before mutating,
//! so nothing from an old battle lands after a reset or an end.
//!
//! Lock order is state, then tasks. Tracked tasks are tagged with their
//! epoch so the end of one battle never aborts the next one's timers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::combat::{Side, SkillKind};
use crate::config::{ArenaConfig, ConfigError};

use super::state::{BattleSnapshot, BattleState, BattleStatus};

/// Session startup errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("battle session must be started inside a tokio runtime")]
    NoRuntime,
}

struct Shared {
    config: ArenaConfig,
    state: Mutex<BattleState>,
    /// Spawned tasks, tagged with the epoch they serve
    tasks: Mutex<Vec<(u64, JoinHandle<()>)>>,
    status_tx: watch::Sender<BattleStatus>,
    runtime: Handle,
}

/// A running two-combatant battle
#[derive(Clone)]
pub struct BattleSession {
    inner: Arc<Shared>,
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("status", &self.status())
            .field("tasks", &self.inner.tasks.lock().len())
            .finish()
    }
}

impl BattleSession {
    /// Validate the config and start all eight timers.
    ///
    /// Must be called from within a tokio runtime; later resets reuse it.
    pub fn start(config: ArenaConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let state = BattleState::new(&config);
        let (status_tx, _) = watch::channel(state.status());
        let epoch = state.epoch();

        let session = Self {
            inner: Arc::new(Shared {
                config,
                state: Mutex::new(state),
                tasks: Mutex::new(Vec::new()),
                status_tx,
                runtime,
            }),
        };

        info!(
            "Battle started: {} vs {}",
            session.inner.config.player.name, session.inner.config.enemy.name
        );
        session.spawn_timers(epoch);
        Ok(session)
    }

    /// Stop every timer, restore both sides, and start a new epoch
    pub fn reset(&self) {
        let mut state = self.inner.state.lock();
        self.abort_tasks();
        state.reset();
        self.publish(state.status());
        let epoch = state.epoch();
        self.spawn_timers(epoch);
        drop(state);

        info!("Battle reset (epoch {})", epoch);
    }

    /// Halt all timers without declaring a winner
    pub fn stop(&self) {
        let mut state = self.inner.state.lock();
        self.abort_tasks();
        state.stop();
        self.publish(state.status());
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.inner.config
    }

    pub fn status(&self) -> BattleStatus {
        *self.inner.status_tx.borrow()
    }

    /// Watch status changes (start, end, reset, stop)
    pub fn subscribe(&self) -> watch::Receiver<BattleStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Wait until the current battle has a winner.
    ///
    /// Returns `None` if the battle is stopped instead.
    pub async fn wait_for_end(&self) -> Option<Side> {
        let mut rx = self.subscribe();
        loop {
            let status = *rx.borrow_and_update();
            match status {
                BattleStatus::Ended { winner, .. } => return Some(winner),
                BattleStatus::Stopped { .. } => return None,
                BattleStatus::Running { .. } => {}
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        self.inner.state.lock().snapshot()
    }

    pub fn player_health(&self) -> i32 {
        self.inner.state.lock().combatant(Side::Player).health
    }

    pub fn enemy_health(&self) -> i32 {
        self.inner.state.lock().combatant(Side::Enemy).health
    }

    /// Milliseconds until a skill fires
    pub fn remaining_ms(&self, side: Side, skill: SkillKind) -> u64 {
        self.inner.state.lock().cooldowns().remaining_ms(side, skill)
    }

    /// Combat log, newest first
    pub fn combat_log(&self) -> Vec<String> {
        self.inner.state.lock().log().to_vec()
    }

    /// Timer and block-window tasks still alive
    pub fn active_tasks(&self) -> usize {
        self.inner
            .tasks
            .lock()
            .iter()
            .filter(|(_, task)| !task.is_finished())
            .count()
    }

    fn publish(&self, status: BattleStatus) {
        self.inner.status_tx.send_replace(status);
    }

    fn abort_tasks(&self) {
        let tasks = std::mem::take(&mut *self.inner.tasks.lock());
        for (_, task) in tasks {
            task.abort();
        }
    }

    /// Abort only the tasks serving `epoch`
    fn abort_epoch(&self, epoch: u64) {
        let mut tasks = self.inner.tasks.lock();
        tasks.retain(|(tag, task)| {
            if *tag == epoch {
                task.abort();
                false
            } else {
                !task.is_finished()
            }
        });
    }

    fn track(&self, epoch: u64, task: JoinHandle<()>) {
        let mut tasks = self.inner.tasks.lock();
        tasks.retain(|(_, t)| !t.is_finished());
        tasks.push((epoch, task));
    }

    fn spawn_timers(&self, epoch: u64) {
        for side in Side::ALL {
            for skill in SkillKind::ALL {
                let session = self.clone();
                let task = self
                    .inner
                    .runtime
                    .spawn(async move { session.run_timer(side, skill, epoch).await });
                self.track(epoch, task);
            }
        }
    }

    /// Count down, fire, rearm; until the epoch is over or someone falls
    async fn run_timer(self, side: Side, skill: SkillKind, epoch: u64) {
        let tick_ms = self.inner.config.tick_ms;
        let tick = Duration::from_millis(tick_ms);

        loop {
            let ready = {
                let state = self.inner.state.lock();
                if !state.is_current(epoch) {
                    break;
                }
                state.cooldowns().get(side, skill).is_ready()
            };

            if ready {
                self.fire(side, skill, epoch).await;

                let mut state = self.inner.state.lock();
                if state.epoch() != epoch {
                    break;
                }
                state.cooldowns_mut().get_mut(side, skill).rearm();
                trace!(%side, %skill, "cooldown rearmed");
            } else {
                tokio::time::sleep(tick).await;

                let mut state = self.inner.state.lock();
                if !state.is_current(epoch) {
                    break;
                }
                state.cooldowns_mut().get_mut(side, skill).advance(tick_ms);
            }
        }

        trace!(%side, %skill, epoch, "timer finished");
    }

    /// Cast delay, then apply the skill if the battle has not moved on
    async fn fire(&self, side: Side, skill: SkillKind, epoch: u64) {
        if !self.inner.state.lock().can_fire(side, skill, epoch) {
            return;
        }

        tokio::time::sleep(Duration::from_millis(self.inner.config.cast_delay_ms)).await;

        let (result, status) = {
            let mut state = self.inner.state.lock();
            if !state.can_fire(side, skill, epoch) {
                return;
            }
            let result = state.perform(side, skill);
            let status = state.status();
            if !status.is_running() {
                self.publish(status);
            }
            (result, status)
        };

        let Some(result) = result else {
            return;
        };
        debug!(%side, %skill, outcome = ?result.outcome, "{}", result.message);

        if let BattleStatus::Ended { winner, .. } = status {
            info!("Battle over: {} wins (epoch {})", winner, epoch);
            self.abort_epoch(epoch);
            return;
        }

        if skill == SkillKind::Block {
            self.open_block_window(side, epoch);
        }
    }

    /// Lower the block after the window, unless a reset got there first
    fn open_block_window(&self, side: Side, epoch: u64) {
        let session = self.clone();
        let window = Duration::from_millis(self.inner.config.block_window_ms);

        let task = self.inner.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            let mut state = session.inner.state.lock();
            if state.epoch() == epoch {
                state.end_block(side);
            }
        });
        self.track(epoch, task);
    }
}
