//! Common test utilities for driving sessions on tokio's paused clock

#![allow(dead_code)]

use std::time::Duration;

use skirmish::config::CooldownRanges;
use skirmish::{ArenaConfig, BattleSession, BattleSnapshot, Side};

/// Longer than any test runs, so the skill never fires
pub const NEVER_MS: u64 = 3_600_000;

/// Default arena with a fixed seed
pub fn seeded(seed: u64) -> ArenaConfig {
    ArenaConfig::default().with_seed(seed)
}

/// Only the given skill ranges fire; everything else waits an hour
pub fn only(seed: u64, configure: impl FnOnce(&mut CooldownRanges)) -> ArenaConfig {
    let mut config = seeded(seed);
    config.cooldowns = CooldownRanges::fixed(NEVER_MS);
    configure(&mut config.cooldowns);
    config
}

/// Advance the paused clock
pub async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Wait for a winner, failing after ten virtual minutes
pub async fn run_to_end(session: &BattleSession) -> Side {
    tokio::time::timeout(Duration::from_secs(600), session.wait_for_end())
        .await
        .expect("battle did not finish")
        .expect("battle was stopped")
}

/// Log entries announcing a winner
pub fn victory_messages(snapshot: &BattleSnapshot) -> Vec<&str> {
    snapshot
        .log
        .iter()
        .map(String::as_str)
        .filter(|entry| entry.ends_with("Wins!"))
        .collect()
}
