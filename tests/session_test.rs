//! Battle session tests on tokio's paused clock

mod common;

use std::time::Duration;

use common::{advance_ms, only, run_to_end, seeded, victory_messages};
use skirmish::combat::MAX_HEALTH;
use skirmish::session::RESET_MESSAGE;
use skirmish::{BattleSession, BattleStatus, ConfigError, SessionError, Side, SkillKind};

#[tokio::test(start_paused = true)]
async fn test_battle_runs_to_single_winner() {
    let session = BattleSession::start(seeded(1)).expect("Failed to start session");

    let winner = run_to_end(&session).await;
    let snapshot = session.snapshot();

    assert_eq!(snapshot.status, BattleStatus::Ended { epoch: 0, winner });
    assert_eq!(snapshot.combatant(winner.opponent()).health, 0);
    assert!(snapshot.combatant(winner).health > 0);

    let expected = format!("{} Wins!", snapshot.combatant(winner).name);
    assert_eq!(victory_messages(&snapshot), vec![expected.as_str()]);
    assert_eq!(snapshot.log[0], expected);
    assert_eq!(session.active_tasks(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_nothing_happens_after_the_end() {
    let session = BattleSession::start(seeded(2)).expect("Failed to start session");
    run_to_end(&session).await;

    let at_end = session.snapshot();
    advance_ms(60_000).await;

    assert_eq!(session.snapshot(), at_end);
}

#[tokio::test(start_paused = true)]
async fn test_many_battles_end_cleanly() {
    for seed in 10..20 {
        let session = BattleSession::start(seeded(seed)).expect("Failed to start session");
        run_to_end(&session).await;

        let snapshot = session.snapshot();
        assert_eq!(victory_messages(&snapshot).len(), 1, "seed {}", seed);
        assert!(snapshot.log.len() <= 100);
        for side in Side::ALL {
            let health = snapshot.combatant(side).health;
            assert!((0..=MAX_HEALTH).contains(&health), "seed {}", seed);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_cooldowns_count_down_each_tick() {
    let session =
        BattleSession::start(only(3, |ranges| ranges.attack = (1000, 1000))).expect("start");

    assert_eq!(session.remaining_ms(Side::Player, SkillKind::Attack), 1000);

    advance_ms(350).await;
    assert_eq!(session.remaining_ms(Side::Player, SkillKind::Attack), 700);
    assert_eq!(session.remaining_ms(Side::Enemy, SkillKind::Attack), 700);
    assert_eq!(
        session.remaining_ms(Side::Enemy, SkillKind::Heal),
        common::NEVER_MS - 300
    );
}

#[tokio::test(start_paused = true)]
async fn test_cooldowns_stay_within_interval() {
    let session = BattleSession::start(seeded(4)).expect("Failed to start session");
    let intervals: Vec<u64> = session
        .snapshot()
        .cooldowns
        .iter()
        .map(|cd| cd.interval_ms)
        .collect();

    for _ in 0..150 {
        advance_ms(100).await;
        let snapshot = session.snapshot();
        if !snapshot.status.is_running() {
            break;
        }
        for (cd, interval) in snapshot.cooldowns.iter().zip(&intervals) {
            let (min, max) = cd.skill.default_range();
            assert!((min..=max).contains(&cd.interval_ms));
            assert_eq!(cd.interval_ms, *interval, "interval re-rolled mid-battle");
            assert!(cd.remaining_ms <= cd.interval_ms);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_skill_lands_after_cast_delay() {
    let session =
        BattleSession::start(only(5, |ranges| ranges.attack = (1000, 1000))).expect("start");

    // Cooldown runs out at 1000ms, the attack lands at 1300ms
    advance_ms(1250).await;
    assert!(session.combat_log().is_empty());
    assert_eq!(session.remaining_ms(Side::Player, SkillKind::Attack), 0);

    advance_ms(100).await;
    assert_eq!(session.combat_log().len(), 2);
    assert_eq!(session.remaining_ms(Side::Player, SkillKind::Attack), 1000);
}

#[tokio::test(start_paused = true)]
async fn test_block_window_runs_beside_cooldown() {
    let session =
        BattleSession::start(only(6, |ranges| ranges.block = (5000, 5000))).expect("start");

    advance_ms(5350).await;
    let snapshot = session.snapshot();
    assert!(snapshot.player.is_blocking);
    assert!(snapshot.enemy.is_blocking);
    assert_eq!(snapshot.remaining_ms(Side::Player, SkillKind::Block), 5000);

    // Cooldown keeps counting while the block is still up
    advance_ms(1000).await;
    let snapshot = session.snapshot();
    assert!(snapshot.player.is_blocking);
    assert_eq!(snapshot.remaining_ms(Side::Player, SkillKind::Block), 4000);

    // Window closes 2000ms after the block landed
    advance_ms(1000).await;
    let snapshot = session.snapshot();
    assert!(!snapshot.player.is_blocking);
    assert!(!snapshot.enemy.is_blocking);
}

#[tokio::test(start_paused = true)]
async fn test_power_strike_charges_without_damage() {
    let session = BattleSession::start(only(7, |ranges| ranges.power_strike = (2000, 2000)))
        .expect("start");

    advance_ms(2350).await;
    let snapshot = session.snapshot();
    assert!(snapshot.player.has_power_buff);
    assert!(snapshot.enemy.has_power_buff);
    assert_eq!(snapshot.player_health(), MAX_HEALTH);
    assert_eq!(snapshot.enemy_health(), MAX_HEALTH);
    assert_eq!(snapshot.log.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_reset_after_victory() {
    let session = BattleSession::start(seeded(8)).expect("Failed to start session");
    run_to_end(&session).await;

    session.reset();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, BattleStatus::Running { epoch: 1 });
    assert_eq!(snapshot.log, vec![RESET_MESSAGE.to_string()]);
    for side in Side::ALL {
        let combatant = snapshot.combatant(side);
        assert_eq!(combatant.health, MAX_HEALTH);
        assert!(!combatant.is_blocking);
        assert!(!combatant.has_power_buff);
    }
    for cd in &snapshot.cooldowns {
        assert_eq!(cd.remaining_ms, cd.interval_ms);
    }
    assert_eq!(session.active_tasks(), 8);

    // The rematch plays out to its own single winner
    run_to_end(&session).await;
    let snapshot = session.snapshot();
    assert_eq!(victory_messages(&snapshot).len(), 1);
    assert_eq!(snapshot.status.epoch(), 1);
    assert!(
        snapshot.log.len() == 100 || snapshot.log.last().map(String::as_str) == Some(RESET_MESSAGE),
        "rematch log should start from the reset entry"
    );
}

#[tokio::test(start_paused = true)]
async fn test_reset_discards_in_flight_actions() {
    let session =
        BattleSession::start(only(9, |ranges| ranges.attack = (1000, 1000))).expect("start");

    // Both attacks are mid-cast
    advance_ms(1150).await;
    session.reset();

    advance_ms(250).await;
    assert_eq!(session.combat_log(), vec![RESET_MESSAGE.to_string()]);
    assert_eq!(session.player_health(), MAX_HEALTH);
    assert_eq!(session.enemy_health(), MAX_HEALTH);
    assert_eq!(session.remaining_ms(Side::Player, SkillKind::Attack), 800);
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_everything() {
    let session = BattleSession::start(seeded(11)).expect("Failed to start session");
    advance_ms(500).await;

    session.stop();
    assert_eq!(session.status(), BattleStatus::Stopped { epoch: 0 });
    assert_eq!(session.wait_for_end().await, None);
    assert_eq!(session.active_tasks(), 0);

    let stopped = session.snapshot();
    advance_ms(30_000).await;
    assert_eq!(session.snapshot(), stopped);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_the_end() {
    let session = BattleSession::start(seeded(12)).expect("Failed to start session");
    let mut status = session.subscribe();
    assert!(status.borrow().is_running());

    status.changed().await.expect("status channel closed");
    let ended = *status.borrow();
    assert!(ended.winner().is_some());
    assert_eq!(ended, session.status());
}

#[tokio::test]
async fn test_start_rejects_invalid_config() {
    let mut config = seeded(13);
    config.tick_ms = 0;
    assert!(matches!(
        BattleSession::start(config),
        Err(SessionError::Config(ConfigError::ZeroTick))
    ));
}

#[test]
fn test_start_outside_runtime_is_an_error() {
    let result = BattleSession::start(seeded(14));
    assert!(matches!(result, Err(SessionError::NoRuntime)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rematch_loop_on_worker_threads() {
    let mut config = only(15, |ranges| ranges.attack = (1, 1));
    config.tick_ms = 1;
    config.cast_delay_ms = 0;
    let session = BattleSession::start(config).expect("Failed to start session");

    for round in 0..200u64 {
        let winner = tokio::time::timeout(Duration::from_secs(5), session.wait_for_end())
            .await
            .unwrap_or_else(|_| panic!("round {round} never ended"))
            .expect("battle was stopped");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.status, BattleStatus::Ended { epoch: round, winner });
        assert_eq!(victory_messages(&snapshot).len(), 1);

        session.reset();
        assert_eq!(session.status(), BattleStatus::Running { epoch: round + 1 });
    }

    session.stop();
}
