//! Plain-text rendering of a battle snapshot

use std::fmt::Write;

use crate::combat::{Combatant, Side, SkillKind, MAX_HEALTH};
use crate::session::{BattleSnapshot, BattleStatus};

/// Width of a health bar, in cells
pub const BAR_WIDTH: usize = 20;

/// `[##########----------]` for half health at width 20
pub fn health_bar(health: i32, width: usize) -> String {
    let health = health.clamp(0, MAX_HEALTH) as usize;
    let filled = health * width / MAX_HEALTH as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Cooldown as seconds with one decimal, e.g. `2.7s`
pub fn format_seconds(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

fn combatant_line(combatant: &Combatant) -> String {
    let mut flags = String::new();
    if combatant.is_blocking {
        flags.push_str(" [blocking]");
    }
    if combatant.has_power_buff {
        flags.push_str(" [charged]");
    }
    format!(
        "{:<10} {} {:>3}/{}{}",
        combatant.name,
        health_bar(combatant.health, BAR_WIDTH),
        combatant.health,
        MAX_HEALTH,
        flags
    )
}

/// One-line summary for periodic progress output
pub fn status_line(snapshot: &BattleSnapshot) -> String {
    format!(
        "{} {}/{} | {} {}/{}",
        snapshot.player.name,
        snapshot.player.health,
        MAX_HEALTH,
        snapshot.enemy.name,
        snapshot.enemy.health,
        MAX_HEALTH
    )
}

/// Full screen: status, both combatants, cooldowns, newest log lines
pub fn render(snapshot: &BattleSnapshot, log_lines: usize) -> String {
    let mut out = String::new();

    let headline = match snapshot.status {
        BattleStatus::Running { epoch } => format!("Battle #{} in progress", epoch + 1),
        BattleStatus::Ended { epoch, winner } => format!(
            "Battle #{} over: {} wins",
            epoch + 1,
            snapshot.combatant(winner).name
        ),
        BattleStatus::Stopped { epoch } => format!("Battle #{} stopped", epoch + 1),
    };
    let _ = writeln!(out, "{}", headline);

    for side in Side::ALL {
        let _ = writeln!(out, "{}", combatant_line(snapshot.combatant(side)));
    }

    let _ = writeln!(out, "Cooldowns:");
    for skill in SkillKind::ALL {
        let _ = writeln!(
            out,
            "  {:<13} {:>6} {:>6}",
            skill.name(),
            format_seconds(snapshot.remaining_ms(Side::Player, skill)),
            format_seconds(snapshot.remaining_ms(Side::Enemy, skill)),
        );
    }

    let _ = writeln!(out, "Battle log:");
    for entry in snapshot.log.iter().take(log_lines) {
        let _ = writeln!(out, "  {}", entry);
    }

    out
}
